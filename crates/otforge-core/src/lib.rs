//! OTForge Core - Core types for Optimality Theory ranking
//!
//! This crate provides the fundamental data model shared by every
//! learning component:
//! - Constraints and the shared constraint set
//! - Candidates with their violation profiles
//! - Elementary ranking conditions (ERCs) and winner-loser pairs
//! - Stratified constraint hierarchies
//! - The candidate generator (GEN) interface

pub mod candidate;
pub mod constraint;
pub mod erc;
pub mod error;
pub mod gen;
pub mod hierarchy;

#[cfg(test)]
mod test_utils;

pub use candidate::Candidate;
pub use constraint::{Constraint, ConstraintSet, ConstraintType, EvalFn};
pub use erc::{Erc, ErcLabel, WinLosePair};
pub use error::{OtForgeError, Result};
pub use gen::CandidateGenerator;
pub use hierarchy::Hierarchy;
