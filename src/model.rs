//! Immutable problem model: connector alphabet, piece catalog, target length.
//!
//! A [`TrackModel`] can only be obtained through [`TrackModel::new`], which
//! checks every piece against the alphabet. The engines therefore index the
//! cost table with piece connectors without any further bounds checks.

use std::sync::Arc;
use thiserror::Error;

/// Index of a connector symbol inside its [`Alphabet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Connector(pub usize);

/// Longest target a model accepts; keeps `(L + 1) × C` table sizes in range.
pub const MAX_TARGET_LENGTH: usize = u32::MAX as usize;

/// Reasons a model cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("connector alphabet must contain at least one symbol")]
    EmptyAlphabet,
    #[error("connector symbol '{0}' is declared more than once")]
    DuplicateSymbol(char),
    #[error("piece {piece} references connector {connector}, alphabet has {size} symbols")]
    ConnectorOutOfRange {
        piece: usize,
        connector: usize,
        size: usize,
    },
    #[error("piece {piece} has zero length")]
    ZeroLength { piece: usize },
    #[error("target length {0} exceeds {}", MAX_TARGET_LENGTH)]
    TargetTooLong(usize),
}

/// Ordered set of single-character connector symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new(symbols: Vec<char>) -> Result<Self, ModelError> {
        if symbols.is_empty() {
            return Err(ModelError::EmptyAlphabet);
        }
        for (i, &s) in symbols.iter().enumerate() {
            if symbols[..i].contains(&s) {
                return Err(ModelError::DuplicateSymbol(s));
            }
        }
        Ok(Self { symbols })
    }

    /// Resolve a symbol to its connector index.
    pub fn index_of(&self, symbol: char) -> Option<Connector> {
        self.symbols.iter().position(|&s| s == symbol).map(Connector)
    }

    pub fn symbol(&self, connector: Connector) -> Option<char> {
        self.symbols.get(connector.0).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// One catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub price: u32,
    pub length: u32,
    pub left: Connector,
    pub right: Connector,
}

impl Piece {
    pub fn new(price: u32, length: u32, left: Connector, right: Connector) -> Self {
        Self {
            price,
            length,
            left,
            right,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.length as usize
    }
}

/// Validated planning instance.
///
/// Cloning is cheap: the catalog is shared behind an `Arc`.
#[derive(Clone, Debug)]
pub struct TrackModel {
    target_length: usize,
    alphabet: Arc<Alphabet>,
    pieces: Arc<[Piece]>,
}

impl TrackModel {
    /// Build a model, rejecting targets above [`MAX_TARGET_LENGTH`] and pieces
    /// with out-of-range connectors or zero length. Piece errors name the
    /// offending piece by its catalog position.
    pub fn new(
        target_length: usize,
        alphabet: Alphabet,
        pieces: Vec<Piece>,
    ) -> Result<Self, ModelError> {
        check_target(target_length)?;
        let size = alphabet.len();
        for (idx, piece) in pieces.iter().enumerate() {
            for c in [piece.left, piece.right] {
                if c.0 >= size {
                    return Err(ModelError::ConnectorOutOfRange {
                        piece: idx,
                        connector: c.0,
                        size,
                    });
                }
            }
            if piece.length == 0 {
                return Err(ModelError::ZeroLength { piece: idx });
            }
        }
        Ok(Self {
            target_length,
            alphabet: Arc::new(alphabet),
            pieces: pieces.into(),
        })
    }

    /// Return a copy of this model with one extra piece appended.
    pub fn with_piece(&self, piece: Piece) -> Result<Self, ModelError> {
        let mut pieces = self.pieces.to_vec();
        pieces.push(piece);
        Self::new(self.target_length, (*self.alphabet).clone(), pieces)
    }

    /// Same catalog and alphabet, different target.
    pub fn with_target(&self, target_length: usize) -> Result<Self, ModelError> {
        check_target(target_length)?;
        Ok(Self {
            target_length,
            alphabet: Arc::clone(&self.alphabet),
            pieces: Arc::clone(&self.pieces),
        })
    }

    #[inline]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    #[inline]
    pub fn num_connections(&self) -> usize {
        self.alphabet.len()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Longest piece in the catalog, 0 for an empty catalog.
    pub fn max_piece_length(&self) -> usize {
        self.pieces.iter().map(Piece::len).max().unwrap_or(0)
    }
}

fn check_target(target_length: usize) -> Result<(), ModelError> {
    if target_length > MAX_TARGET_LENGTH {
        return Err(ModelError::TargetTooLong(target_length));
    }
    Ok(())
}
