//! Planning errors.

use std::fmt;

use thiserror::Error;

use kpiseed_core::identifier::Id;
use kpiseed_manifest::error::ErrorCode;

use super::sort::CycleError;

/// Which end of a relationship an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Reasons a set of objects cannot be materialized.
///
/// Indices refer to positions in the object and relationship slices passed
/// to [`materialize`](super::materialize), so callers can point back at the
/// offending declarations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("alias `{alias}` is declared by more than one object")]
    DuplicateAlias {
        alias: Id,
        first: usize,
        duplicate: usize,
    },

    #[error("relationship {endpoint} `{alias}` is not declared by any object")]
    UnresolvedReference {
        alias: Id,
        relationship: usize,
        endpoint: Endpoint,
    },

    #[error("object `{alias}` assigns attribute `{name}` more than once")]
    DuplicateAttribute {
        alias: Id,
        name: String,
        object: usize,
        first: usize,
        duplicate: usize,
    },

    #[error(transparent)]
    CycleDetected(#[from] CycleError),
}

impl PlanError {
    /// The diagnostic code reported for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanError::DuplicateAlias { .. } => ErrorCode::E200,
            PlanError::UnresolvedReference { .. } => ErrorCode::E201,
            PlanError::DuplicateAttribute { .. } => ErrorCode::E202,
            PlanError::CycleDetected(_) => ErrorCode::E300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PlanError::UnresolvedReference {
            alias: Id::new("kpiGhost"),
            relationship: 3,
            endpoint: Endpoint::Target,
        };
        assert_eq!(
            err.to_string(),
            "relationship target `kpiGhost` is not declared by any object"
        );

        let err = PlanError::DuplicateAlias {
            alias: Id::new("sofia"),
            first: 0,
            duplicate: 4,
        };
        assert_eq!(
            err.to_string(),
            "alias `sofia` is declared by more than one object"
        );
    }

    #[test]
    fn test_codes() {
        let err = PlanError::DuplicateAttribute {
            alias: Id::new("kpi"),
            name: "unitText".to_string(),
            object: 0,
            first: 0,
            duplicate: 1,
        };
        assert_eq!(err.code(), ErrorCode::E202);
        assert_eq!(
            PlanError::DuplicateAlias {
                alias: Id::new("x"),
                first: 0,
                duplicate: 1
            }
            .code(),
            ErrorCode::E200
        );
    }
}
