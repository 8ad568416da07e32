//! Errors reported to the client in an [`ErrorResponse`][crate::postgres::ErrorResponse].
use std::{borrow::Cow, fmt};

use crate::{EncodeError, Error, ErrorKind, postgres::ProtocolError};

/// An error that can be reported to the client.
///
/// The primary human-readable error message defaults to the [`Display`][fmt::Display] output,
/// every other field is optional.
pub trait DatabaseError: fmt::Display {
    /// The primary human-readable error message, defaults to the [`Display`][fmt::Display] output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// The SQLSTATE code, [`sqlstate::INTERNAL_ERROR`] is sent when absent.
    fn code(&self) -> Option<&str> {
        None
    }

    /// An optional suggestion what to do about the problem.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Error cursor position as an index into the original query string.
    fn position(&self) -> Option<usize> {
        None
    }
}

/// A structured error with optional fields.
///
/// ```
/// use pgsrv::{DatabaseError, PgError, sqlstate};
///
/// let err = PgError::new("syntax error at or near \"SELEC\"")
///     .with_code(sqlstate::SYNTAX_ERROR)
///     .with_position(0);
///
/// assert_eq!(err.code(), Some("42601"));
/// assert_eq!(err.hint(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgError {
    message: Cow<'static, str>,
    code: Option<Cow<'static, str>>,
    hint: Option<Cow<'static, str>>,
    position: Option<usize>,
}

impl PgError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            code: None,
            hint: None,
            position: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<Cow<'static, str>>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for PgError { }

impl fmt::Display for PgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl DatabaseError for PgError {
    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    fn position(&self) -> Option<usize> {
        self.position
    }
}

impl DatabaseError for ProtocolError {
    fn code(&self) -> Option<&str> {
        Some(sqlstate::PROTOCOL_VIOLATION)
    }
}

impl DatabaseError for EncodeError { }

impl DatabaseError for Error {
    /// The error kind only, backtrace is not sent to the client.
    fn message(&self) -> String {
        self.kind().to_string()
    }

    fn code(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::Protocol(e) => e.code(),
            ErrorKind::Encode(e) => e.code(),
        }
    }
}

/// SQLSTATE error codes.
///
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
pub mod sqlstate {
    // Class 08 - Connection Exception
    pub const PROTOCOL_VIOLATION: &str = "08P01";

    // Class 0A - Feature Not Supported
    pub const FEATURE_NOT_SUPPORTED: &str = "0A000";

    // Class 22 - Data Exception
    pub const DIVISION_BY_ZERO: &str = "22012";
    pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";

    // Class 23 - Integrity Constraint Violation
    pub const UNIQUE_VIOLATION: &str = "23505";

    // Class 42 - Syntax Error or Access Rule Violation
    pub const SYNTAX_ERROR: &str = "42601";
    pub const UNDEFINED_COLUMN: &str = "42703";
    pub const UNDEFINED_TABLE: &str = "42P01";
    pub const UNDEFINED_FUNCTION: &str = "42883";

    // Class XX - Internal Error
    pub const INTERNAL_ERROR: &str = "XX000";
}

#[cfg(test)]
mod test {
    use super::*;

    struct NotFound;

    impl fmt::Display for NotFound {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("not found")
        }
    }

    impl DatabaseError for NotFound {
        fn hint(&self) -> Option<&str> {
            Some("create it first")
        }
    }

    #[test]
    fn default_accessors() {
        assert_eq!(NotFound.code(), None);
        assert_eq!(NotFound.hint(), Some("create it first"));
        assert_eq!(NotFound.position(), None);

        let msg = crate::error_response(&NotFound);
        assert_eq!(
            msg.as_bytes(),
            b"E\0\0\0\x2fSERROR\0CXX000\0Mnot found\0Hcreate it first\0\0",
        );
    }

    #[test]
    fn protocol_error_code() {
        let err = crate::query_text(b"P\0\0\0\x04").unwrap_err();
        assert_eq!(err.code(), Some(sqlstate::PROTOCOL_VIOLATION));

        let err = Error::from(err);
        assert_eq!(err.code(), Some("08P01"));
    }

    #[test]
    fn error_message_excludes_backtrace() {
        let err = Error::from(crate::query_text(b"P\0\0\0\x04").unwrap_err());
        let msg = crate::error_response(&err);
        let body = String::from_utf8_lossy(msg.body());
        assert!(!body.to_lowercase().contains("backtrace"));
        assert_eq!(
            msg.body(),
            b"SERROR\0C08P01\0MExpected message `Query` found `Parse` ('P')\0\0",
        );
    }

    #[test]
    fn dyn_database_error() {
        let err: Box<dyn DatabaseError> = Box::new(PgError::new("boom").with_hint("retry"));
        let msg = crate::error_response(&*err);
        assert!(msg.body().windows(7).any(|w| w == b"Hretry\0"));
    }
}
