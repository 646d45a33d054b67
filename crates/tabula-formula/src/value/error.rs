//! Error leaves

use std::fmt;

use tabula_core::{ErrorKind, SharedString};

/// A terminal error marker
///
/// Errors are never recomputed: once produced, the same `ErrorValue`
/// (kind and message) is handed along until it reaches the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    kind: ErrorKind,
    message: Option<SharedString>,
}

impl ErrorValue {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// An error carrying a diagnostic message for hosts
    pub fn with_message(kind: ErrorKind, message: impl AsRef<str>) -> Self {
        Self {
            kind,
            message: Some(SharedString::new(message)),
        }
    }

    /// `#N/A`
    pub fn na() -> Self {
        Self::new(ErrorKind::Na)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.as_str())
    }
}

impl From<ErrorKind> for ErrorValue {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())
    }
}
