use core::fmt;
use std::{error::Error, io::Error as IOError};

use xot_core::TransferError;

/// An oblivious transfer error.
#[derive(Debug, thiserror::Error)]
pub struct XotError {
    kind: ErrorKind,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl XotError {
    fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    pub(crate) fn state(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::State, msg.into())
    }

    pub(crate) fn protocol(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol, msg.into())
    }

    pub(crate) fn rejected() -> Self {
        Self {
            kind: ErrorKind::Rejected,
            source: None,
        }
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the core error, if this error was caused by one.
    pub fn as_core(&self) -> Option<&TransferError> {
        self.source.as_ref()?.downcast_ref()
    }
}

/// The kind of an [`XotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An I/O error.
    Io,
    /// A protocol error reported by the core.
    Core,
    /// The pad setup functionality failed.
    State,
    /// The peer deviated from the message flow.
    Protocol,
    /// The sender produced no response for the invocation.
    Rejected,
}

impl fmt::Display for XotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Io => write!(f, "io error"),
            ErrorKind::Core => write!(f, "core error"),
            ErrorKind::State => write!(f, "state error"),
            ErrorKind::Protocol => write!(f, "protocol error"),
            ErrorKind::Rejected => write!(f, "the sender rejected the query"),
        }?;

        if let Some(source) = self.source.as_ref() {
            write!(f, " caused by: {source}")?;
        }

        Ok(())
    }
}

impl From<IOError> for XotError {
    fn from(value: IOError) -> Self {
        Self::new(ErrorKind::Io, value)
    }
}

impl From<TransferError> for XotError {
    fn from(value: TransferError) -> Self {
        Self::new(ErrorKind::Core, value)
    }
}
