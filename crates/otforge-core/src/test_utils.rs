//! Test utilities for otforge-core
//!
//! Provides common test fixtures used across the crate's test modules.

use std::sync::Arc;

use crate::candidate::Candidate;
use crate::constraint::{Constraint, ConstraintSet, ConstraintType};

/// Two markedness constraints, `C1` and `C2`.
pub fn two_markedness() -> ConstraintSet {
    ConstraintSet::new(vec![
        Constraint::new("C1", ConstraintType::Markedness),
        Constraint::new("C2", ConstraintType::Markedness),
    ])
}

/// A shared candidate with violations given in constraint-set order.
pub fn cand(set: &ConstraintSet, input: &str, output: &str, viols: &[u32]) -> Arc<Candidate> {
    let mut candidate = Candidate::new(input, output, set.clone());
    for (constraint, count) in set.iter().zip(viols) {
        candidate.set_viols(constraint.name(), *count);
    }
    Arc::new(candidate)
}
