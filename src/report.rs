//! The single result line written at the end of a run.

use crate::parse::ParseError;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Default output destination, relative to the working directory.
pub const OUTPUT_FILE: &str = "railway_planner_output.txt";

/// Printed instead of a price when no track can be built.
pub const NO_TRACK: i64 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    Solved(u64),
    Unsolvable,
    InvalidLine(usize),
    EmptyFile,
    MissingFile,
    UnreadableFile,
    Usage,
}

impl Report {
    /// Replace the contents of `path` with this report's line.
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_string())
    }

    /// Whether the run that produced this report succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Report::Solved(_) | Report::Unsolvable)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Solved(price) => write!(f, "The minimal price is: {price}"),
            Report::Unsolvable => write!(f, "The minimal price is: {NO_TRACK}"),
            Report::InvalidLine(line) => write!(f, "Invalid input in line: {line}."),
            Report::EmptyFile => f.write_str("File is empty."),
            Report::MissingFile => f.write_str("File doesn't exists."),
            Report::UnreadableFile => f.write_str("File can't be read."),
            Report::Usage => f.write_str("Usage: RailWayPlanner <InputFile>"),
        }
    }
}

impl From<Option<u64>> for Report {
    fn from(best: Option<u64>) -> Self {
        best.map_or(Report::Unsolvable, Report::Solved)
    }
}

impl From<&ParseError> for Report {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::Empty => Report::EmptyFile,
            ParseError::Line { line, .. } => Report::InvalidLine(*line),
            ParseError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                Report::MissingFile
            }
            ParseError::Io { .. } => Report::UnreadableFile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_description;

    #[test]
    fn renders_each_outcome() {
        assert_eq!(Report::Solved(8).to_string(), "The minimal price is: 8");
        assert_eq!(Report::Unsolvable.to_string(), "The minimal price is: -1");
        assert_eq!(
            Report::InvalidLine(5).to_string(),
            "Invalid input in line: 5."
        );
        assert_eq!(Report::EmptyFile.to_string(), "File is empty.");
        assert_eq!(Report::MissingFile.to_string(), "File doesn't exists.");
        assert_eq!(Report::UnreadableFile.to_string(), "File can't be read.");
        assert_eq!(
            Report::Usage.to_string(),
            "Usage: RailWayPlanner <InputFile>"
        );
    }

    #[test]
    fn maps_solver_and_parser_outcomes() {
        assert_eq!(Report::from(Some(0)), Report::Solved(0));
        assert_eq!(Report::from(None), Report::Unsolvable);
        let err = parse_description("1\n1\nA\nA,B,1,1\n").unwrap_err();
        assert_eq!(Report::from(&err), Report::InvalidLine(4));
        let err = parse_description("").unwrap_err();
        assert_eq!(Report::from(&err), Report::EmptyFile);
        let io_err = |kind: io::ErrorKind| ParseError::Io {
            path: "track.txt".into(),
            source: io::Error::from(kind),
        };
        assert_eq!(
            Report::from(&io_err(io::ErrorKind::NotFound)),
            Report::MissingFile
        );
        assert_eq!(
            Report::from(&io_err(io::ErrorKind::PermissionDenied)),
            Report::UnreadableFile
        );
    }

    #[test]
    fn write_replaces_previous_contents() {
        let path = std::env::temp_dir().join(format!(
            "railway_planner_report_{}.txt",
            std::process::id()
        ));
        Report::Usage.write_to(&path).unwrap();
        Report::Solved(12).write_to(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(written, "The minimal price is: 12");
    }
}
