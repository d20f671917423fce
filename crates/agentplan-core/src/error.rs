//! Errors raised while resolving a plan.

use thiserror::Error;

/// Why a resolution failed. Exactly one is returned per failed resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The platform, or the managed-mode precondition, is outside the
    /// support matrix. `detail` names the offending value verbatim.
    #[error("{detail} not supported")]
    UnsupportedPlatform {
        /// The rejected distro, family, release or platform tag.
        detail: String,
    },

    /// A required parameter was not supplied.
    #[error("Missing required parameter: {name}")]
    MissingParameter {
        /// Parameter name.
        name: &'static str,
    },

    /// A parameter was supplied with a value that cannot be used.
    #[error("Invalid value for parameter {name}: '{value}'")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The host inventory snapshot lacks a fact.
    #[error("Missing host fact: {name}")]
    MissingFact {
        /// Fact name.
        name: String,
    },

    /// The host inventory snapshot carries a fact that cannot be interpreted.
    #[error("Invalid value for host fact {name}: '{value}'")]
    InvalidFact {
        /// Fact name.
        name: String,
        /// The rejected value.
        value: String,
    },
}

impl PlanError {
    /// Shorthand for [`PlanError::UnsupportedPlatform`].
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_names_the_value() {
        assert_eq!(
            PlanError::unsupported("OpenSuse").to_string(),
            "OpenSuse not supported"
        );
    }
}
