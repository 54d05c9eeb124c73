//! Error types for roster persistence.

use std::io;

use thiserror::Error;

/// Errors from reading or writing a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// An I/O error occurred during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A record could not be decoded (non-numeric field or truncated).
    #[error("malformed roster at line {line}: {detail}")]
    Malformed {
        /// 1-based line where the problem was found.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A name that would not survive a save/load cycle: empty, padded with
    /// whitespace, or spanning several lines.
    #[error("actor name {name:?} cannot be stored in a roster")]
    UnwritableName {
        /// The offending name.
        name: String,
    },
}

impl RosterError {
    pub(crate) fn malformed(line: usize, detail: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_line() {
        let err = RosterError::malformed(7, "x is not an integer");
        assert_eq!(
            err.to_string(),
            "malformed roster at line 7: x is not an integer"
        );
    }

    #[test]
    fn io_converts() {
        let err: RosterError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, RosterError::Io(_)));
    }
}
