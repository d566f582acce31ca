//! OTForge - Optimality Theory Constraint Ranking in Rust
//!
//! Learn constraint rankings from winners: collect ERCs, check their
//! consistency with RCD, and grow them with MRCD over a GEN.
//!
//! # Example
//!
//! ```rust
//! use otforge::prelude::*;
//!
//! let set = ConstraintSet::new(vec![
//!     Constraint::new("C1", ConstraintType::Markedness),
//!     Constraint::new("C2", ConstraintType::Markedness),
//! ]);
//! let mut ercs = ErcList::new(set.clone());
//! ercs.add(Erc::new(set).with("C2", ErcLabel::W).with("C1", ErcLabel::L)).unwrap();
//!
//! let hierarchy = Ranker::all_high().get_hierarchy(&ercs).unwrap();
//! assert_eq!(hierarchy.to_string(), "{C2} {C1}");
//! ```

// Data model
pub use otforge_core::{
    Candidate, CandidateGenerator, Constraint, ConstraintSet, ConstraintType, Erc, ErcLabel,
    EvalFn, Hierarchy, OtForgeError, Result, WinLosePair,
};

// Configuration
pub use otforge_config::{ComparerType, ConfigError, LearnerConfig, MrcdConfig, RankingBiasType};

// Ranking engine
pub use otforge_ranking::{
    AllHigh, CompareConsistency, CompareCtie, ComparePool, Comparer, ComparerBuilder, Comparison,
    ErcList, LoserSelector, LoserSelectorBuilder, LoserSelectorFromCompetition,
    LoserSelectorFromGen, Mrcd, MrcdSingle, MrcdStats, Ranker, RankingBias, RankingBiasBuilder,
    Rcd, RcdResult, SomeLow, StratumCtie, StratumVerdict,
};

/// Colorful console output for learner events.
#[cfg(feature = "console")]
pub use otforge_console as console;

pub mod prelude {
    pub use super::{
        Candidate, CandidateGenerator, Constraint, ConstraintSet, ConstraintType, Erc, ErcLabel,
        Hierarchy, WinLosePair,
    };
    pub use super::{ComparerType, LearnerConfig, RankingBiasType};
    pub use super::{
        Comparer, ComparerBuilder, Comparison, ErcList, LoserSelector, LoserSelectorBuilder, Mrcd,
        Ranker, RankingBias, RankingBiasBuilder,
    };
}
