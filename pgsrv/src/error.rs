//! `pgsrv` error types.
use std::{backtrace::Backtrace, fmt};

use crate::postgres::ProtocolError;

/// A specialized [`Result`] type for `pgsrv` operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All possible error from `pgsrv` library.
pub struct Error {
    backtrace: Backtrace,
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

/// All possible error kind from `pgsrv` library.
pub enum ErrorKind {
    Protocol(ProtocolError),
    Encode(EncodeError),
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for Error {
            fn from($pat: $ty) -> Self {
                let backtrace = std::backtrace::Backtrace::capture();
                Self { backtrace, kind: $body }
            }
        }
    };
}

from!(<ErrorKind>e => e);
from!(<ProtocolError>e => ErrorKind::Protocol(e));
from!(<EncodeError>e => ErrorKind::Encode(e));

impl std::error::Error for Error { }

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)?;

        if let std::backtrace::BacktraceStatus::Captured = self.backtrace.status() {
            let mut backtrace = self.backtrace.to_string();
            write!(f, "\n\n")?;
            writeln!(f, "Stack backtrace:")?;
            backtrace.truncate(backtrace.trim_end().len());
            write!(f, "{}", backtrace)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl std::error::Error for ErrorKind { }

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(e) => fmt::Display::fmt(e, f),
            Self::Encode(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// An error when the message builder input is malformed.
#[derive(Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Column names and type names have different length.
    ColumnMismatch {
        names: usize,
        types: usize,
    },
    /// Fields count does not fit in the 2 bytes count.
    TooManyFields {
        len: usize,
    },
    /// Value length does not fit in the 4 bytes signed length.
    ValueTooLarge {
        index: usize,
        len: usize,
    },
}

impl std::error::Error for EncodeError { }

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            EncodeError::ColumnMismatch { names, types } => {
                write!(f, "Got {names} column names but {types} column types")
            },
            EncodeError::TooManyFields { len } => {
                write!(f, "Too many fields, {len} exceeds {}", u16::MAX)
            },
            EncodeError::ValueTooLarge { index, len } => {
                write!(f, "Value at column {index} is too large, {len} bytes")
            },
        }
    }
}

impl fmt::Debug for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let err = Error::from(EncodeError::ColumnMismatch { names: 2, types: 1 });
        assert!(err.to_string().starts_with("Got 2 column names but 1 column types"));
        assert!(matches!(err.kind(), ErrorKind::Encode(EncodeError::ColumnMismatch { .. })));

        let err = Error::from(ProtocolError::Incomplete { len: 1 });
        assert!(matches!(err.into_kind(), ErrorKind::Protocol(_)));
    }
}
