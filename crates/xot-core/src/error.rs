use crate::TransferId;

/// An error for oblivious transfer.
///
/// Errors abort the invocation they occur in, no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The protocol parameters or inputs are inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// An index expected in a position map is missing.
    #[error("index map error: index {0} is missing from the position map")]
    IndexMap(usize),
    /// An index exceeds its valid bound.
    #[error("range error: index {index} is out of range, expected less than {bound}")]
    Range {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound.
        bound: usize,
    },
    /// A message belongs to a different transfer.
    #[error("wrong transfer id. Got {0}, expected {1}")]
    WrongId(TransferId, TransferId),
}

impl TransferError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn check_range(index: usize, bound: usize) -> Result<(), Self> {
        if index < bound {
            Ok(())
        } else {
            Err(Self::Range { index, bound })
        }
    }
}
