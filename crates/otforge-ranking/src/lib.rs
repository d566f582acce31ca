//! OTForge Ranking Engine
//!
//! This crate provides the constraint-ranking and consistency-checking
//! machinery used by every learning stage:
//! - ERC lists with cached consistency
//! - Recursive Constraint Demotion (RCD) with pluggable ranking biases
//! - Ranker for hierarchy queries
//! - Comparers for relative-harmony judgments
//! - Loser selection over a fixed or generated competition
//! - Multi-Recursive Constraint Demotion (MRCD)
//! - Configuration wiring (builder module)

pub mod builder;
pub mod comparer;
pub mod erc_list;
pub mod mrcd;
pub mod ranker;
pub mod rcd;
pub mod selector;
pub mod stats;

pub use builder::{ComparerBuilder, LoserSelectorBuilder, RankingBiasBuilder};
pub use comparer::{
    CompareConsistency, CompareCtie, ComparePool, Comparer, Comparison, StratumCtie,
    StratumVerdict,
};
pub use erc_list::ErcList;
pub use mrcd::{Mrcd, MrcdSingle};
pub use ranker::Ranker;
pub use rcd::{AllHigh, RankingBias, Rcd, RcdResult, SomeLow};
pub use selector::{LoserSelector, LoserSelectorFromCompetition, LoserSelectorFromGen};
pub use stats::MrcdStats;
