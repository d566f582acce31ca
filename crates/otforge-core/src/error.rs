//! Error types for OTForge

use thiserror::Error;

/// Main error type for OTForge operations.
///
/// Every variant is a contract violation. An ERC list that admits no
/// ranking is reported through `ErcList::is_consistent`, not through
/// this type; only asking for a hierarchy of such a list is an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtForgeError {
    /// An ERC was combined with a list over a different constraint set.
    #[error("Structural mismatch: expected constraints [{expected}], found [{found}]")]
    StructuralMismatch { expected: String, found: String },

    /// A winner-loser pair was built from candidates with different inputs.
    #[error("Input mismatch: winner input '{winner}' differs from loser input '{loser}'")]
    InputMismatch { winner: String, loser: String },

    /// Two constraints with the same name were given for one set.
    #[error("Duplicate constraint name: {0}")]
    DuplicateConstraint(String),

    /// A constraint type tag outside markedness/faithfulness.
    #[error("Invalid constraint type: {0}")]
    InvalidConstraintType(String),

    /// A hierarchy was requested for an ERC list that admits no ranking.
    #[error("Inconsistent ranking information; unrankable constraints: {unranked}")]
    Inconsistent { unranked: String },

    /// A builder was asked for a strategy without all required settings.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A candidate has no violation count assigned for a constraint.
    #[error("Candidate {candidate} has no violation count for constraint {constraint}")]
    MissingViolation {
        candidate: String,
        constraint: String,
    },
}

/// Result type alias for OTForge operations
pub type Result<T> = std::result::Result<T, OtForgeError>;
