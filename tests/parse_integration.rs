use railway_planner::parse::{load_description, ParseError};
use railway_planner::report::Report;
use railway_planner::solve;
use std::fs;
use std::path::PathBuf;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("railway_planner_{}_{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_and_solves_a_description_file() {
    let path = temp_file("ok.txt", "4\n2\nA,B\nA,B,1,5\nB,A,1,3\nA,A,2,9\n");
    let model = load_description(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(model.target_length(), 4);
    // A-B, B-A, A-B, B-A costs 16; A-A twice costs 18.
    assert_eq!(Report::from(solve(&model)), Report::Solved(16));
}

#[test]
fn unsolvable_description_reports_sentinel() {
    let path = temp_file("nosol.txt", "3\n2\nA,B\nA,B,2,5\n");
    let model = load_description(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(
        Report::from(solve(&model)).to_string(),
        "The minimal price is: -1"
    );
}

#[test]
fn bad_piece_line_is_reported_by_number() {
    let path = temp_file("bad.txt", "3\n2\nA,B\nA,B,2,5\nA,B,two,5\n");
    let err = load_description(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert_eq!(err.line(), Some(5));
    assert_eq!(Report::from(&err).to_string(), "Invalid input in line: 5.");
}

#[test]
fn empty_file_is_its_own_error() {
    let path = temp_file("empty.txt", "");
    let err = load_description(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err, ParseError::Empty));
    assert_eq!(Report::from(&err), Report::EmptyFile);
}

#[test]
fn missing_file_maps_to_missing_report() {
    let path = std::env::temp_dir().join("railway_planner_definitely_missing.txt");
    let err = load_description(&path).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
    assert_eq!(err.line(), None);
    assert_eq!(Report::from(&err), Report::MissingFile);
}

#[test]
fn non_utf8_line_is_an_invalid_line_not_a_missing_file() {
    let path = std::env::temp_dir().join(format!(
        "railway_planner_{}_latin1.txt",
        std::process::id()
    ));
    fs::write(&path, b"3\n2\nA,B\nA,B,1,5\nA,\xff,1,5\n").unwrap();
    assert!(path.is_file());
    let err = load_description(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert_eq!(err.line(), Some(5));
    assert_eq!(Report::from(&err), Report::InvalidLine(5));
}
