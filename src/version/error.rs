use thiserror::Error;

use crate::version::scheme::Scheme;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Unknown version scheme: {0}")]
    UnknownScheme(String),

    #[error("Invalid {scheme} version '{version}': {reason}")]
    InvalidVersion {
        scheme: Scheme,
        version: String,
        reason: String,
    },

    #[error("Incomparable schemes: cannot compare {left} version with {right} version")]
    IncomparableSchemes { left: Scheme, right: Scheme },
}

impl VersionError {
    pub(crate) fn invalid(scheme: Scheme, version: &str, reason: impl Into<String>) -> Self {
        VersionError::InvalidVersion {
            scheme,
            version: version.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VersionError>;
