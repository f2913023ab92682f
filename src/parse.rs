//! Text description format.
//!
//! ```text
//! 4            target length
//! 2            number of connector symbols
//! A,B          connector symbols
//! A,B,1,5      left,right,length,price  (one piece per line)
//! B,A,1,3
//! ```
//!
//! Every failure carries the 1-indexed line it was found on; the first bad
//! line aborts parsing.

use crate::model::{Alphabet, Connector, ModelError, Piece, TrackModel};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const TARGET_LINE: usize = 1;
pub const CONNECTOR_COUNT_LINE: usize = 2;
pub const SYMBOLS_LINE: usize = 3;
pub const FIRST_PIECE_LINE: usize = 4;

const PIECE_FIELDS: usize = 4;

/// What was wrong with a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("line is missing")]
    Missing,
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
    #[error("expected a non-negative integer, found '{0}'")]
    NotANumber(String),
    #[error("connector count must be positive")]
    ZeroConnectors,
    #[error("connector symbol '{0}' is not a single character")]
    BadSymbol(String),
    #[error("expected {expected} connector symbols, found {found}")]
    SymbolCount { expected: usize, found: usize },
    #[error("expected 4 comma-separated fields, found {0}")]
    FieldCount(usize),
    #[error("unknown connector '{0}'")]
    UnknownConnector(String),
    #[error("piece length must be positive")]
    ZeroLength,
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,
    #[error("invalid input in line {line}: {kind}")]
    Line { line: usize, kind: LineError },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// 1-indexed line of the failure, if it concerns a line.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}

fn at(line: usize) -> impl FnOnce(LineError) -> ParseError {
    move |kind| ParseError::Line { line, kind }
}

/// ASCII digits only; no sign, no whitespace. Overflow is rejected too.
fn number<T: FromStr>(token: &str) -> Result<T, LineError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineError::NotANumber(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| LineError::NotANumber(token.to_string()))
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_symbols(line: &str, expected: usize) -> Result<Alphabet, LineError> {
    let symbols = line
        .split(',')
        .map(|token| single_char(token).ok_or_else(|| LineError::BadSymbol(token.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    if symbols.len() != expected {
        return Err(LineError::SymbolCount {
            expected,
            found: symbols.len(),
        });
    }
    Ok(Alphabet::new(symbols)?)
}

fn parse_piece(line: &str, alphabet: &Alphabet) -> Result<Piece, LineError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != PIECE_FIELDS {
        return Err(LineError::FieldCount(fields.len()));
    }
    let connector = |token: &str| -> Result<Connector, LineError> {
        single_char(token)
            .and_then(|c| alphabet.index_of(c))
            .ok_or_else(|| LineError::UnknownConnector(token.to_string()))
    };
    let left = connector(fields[0])?;
    let right = connector(fields[1])?;
    let length: u32 = number(fields[2])?;
    if length == 0 {
        return Err(LineError::ZeroLength);
    }
    let price: u32 = number(fields[3])?;
    Ok(Piece::new(price, length, left, right))
}

/// Parse a full description into a validated model.
pub fn parse_description(text: &str) -> Result<TrackModel, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut lines = text
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .map(|(i, l)| (i + 1, l));

    let mut header = |expected: usize| {
        lines
            .next()
            .map(|(_, l)| l)
            .ok_or_else(|| at(expected)(LineError::Missing))
    };

    let target: usize = number(header(TARGET_LINE)?).map_err(at(TARGET_LINE))?;
    let count: usize = number(header(CONNECTOR_COUNT_LINE)?).map_err(at(CONNECTOR_COUNT_LINE))?;
    if count == 0 {
        return Err(at(CONNECTOR_COUNT_LINE)(LineError::ZeroConnectors));
    }
    let alphabet = parse_symbols(header(SYMBOLS_LINE)?, count).map_err(at(SYMBOLS_LINE))?;

    let pieces = lines
        .map(|(no, l)| parse_piece(l, &alphabet).map_err(at(no)))
        .collect::<Result<Vec<_>, _>>()?;

    TrackModel::new(target, alphabet, pieces).map_err(|err| {
        let line = match &err {
            ModelError::ConnectorOutOfRange { piece, .. } | ModelError::ZeroLength { piece } => {
                FIRST_PIECE_LINE + *piece
            }
            ModelError::TargetTooLong(_) => TARGET_LINE,
            _ => SYMBOLS_LINE,
        };
        at(line)(err.into())
    })
}

/// Parse raw bytes. A line that is not UTF-8 is reported like any other
/// bad line, unless an earlier line already fails.
pub fn parse_bytes(bytes: &[u8]) -> Result<TrackModel, ParseError> {
    let err = match std::str::from_utf8(bytes) {
        Ok(text) => return parse_description(text),
        Err(err) => err,
    };
    let valid = &bytes[..err.valid_up_to()];
    let bad_line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
    let complete = valid.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    let prefix = std::str::from_utf8(&valid[..complete]).unwrap_or_default();
    match parse_description(prefix) {
        Err(earlier) if earlier.line().is_some_and(|line| line < bad_line) => Err(earlier),
        _ => Err(at(bad_line)(LineError::InvalidUtf8)),
    }
}

/// Read and parse a description file.
pub fn load_description(path: impl AsRef<Path>) -> Result<TrackModel, ParseError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read description");
    parse_bytes(&bytes)
}
