//! Error type shared by parsing, arithmetic and validation.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed text: CIDR, address, integer, enum or hardware address.
    #[error("cannot parse {what} {input:?}: {reason}")]
    Parse {
        what: &'static str,
        input: String,
        reason: String,
    },

    /// An entity breaks a structural or cross-reference invariant.
    #[error("{path}: {field}: {reason}")]
    Invalid {
        path: String,
        field: &'static str,
        reason: String,
    },

    /// A split that is malformed or over [`MAX_SPLIT_SUBNETS`](crate::processing::MAX_SPLIT_SUBNETS).
    #[error("cannot split {cidr}: {reason}")]
    Split { cidr: String, reason: String },

    /// Networks that do not merge into one aligned prefix.
    #[error("cannot summarize: {reason}")]
    Summarize { reason: String },
}

impl Error {
    pub(crate) fn parse(what: &'static str, input: &str, reason: impl ToString) -> Self {
        Error::Parse {
            what,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid(path: &str, field: &'static str, reason: impl ToString) -> Self {
        Error::Invalid {
            path: path.to_string(),
            field,
            reason: reason.to_string(),
        }
    }

    /// Attach an entity path and field to a parse failure.
    ///
    /// Errors that already carry a path are returned unchanged.
    pub fn at(self, path: &str, field: &'static str) -> Self {
        match self {
            Error::Invalid { .. } => self,
            other => Error::invalid(path, field, other),
        }
    }
}
