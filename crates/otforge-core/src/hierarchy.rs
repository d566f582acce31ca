//! Stratified constraint hierarchies.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::constraint::Constraint;

/// An ordered list of strata, dominant first.
///
/// Constraints within a stratum are mutually unranked, so equality compares
/// each stratum as a set.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use otforge_core::{Constraint, ConstraintType, Hierarchy};
///
/// let c1 = Arc::new(Constraint::new("C1", ConstraintType::Markedness));
/// let c2 = Arc::new(Constraint::new("C2", ConstraintType::Faithfulness));
///
/// let mut hierarchy = Hierarchy::new();
/// hierarchy.push_stratum(vec![c1.clone()]);
/// hierarchy.push_stratum(vec![c2.clone()]);
///
/// assert_eq!(hierarchy.to_string(), "{C1} {C2}");
/// assert_eq!(hierarchy.rank_of(&c2), Some(1));
/// ```
#[derive(Clone, Default)]
pub struct Hierarchy {
    strata: Vec<Vec<Arc<Constraint>>>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hierarchy from strata, top to bottom.
    pub fn from_strata(strata: Vec<Vec<Arc<Constraint>>>) -> Self {
        Self { strata }
    }

    /// Appends a stratum below all existing strata.
    pub fn push_stratum(&mut self, stratum: Vec<Arc<Constraint>>) {
        self.strata.push(stratum);
    }

    pub fn strata(&self) -> &[Vec<Arc<Constraint>>] {
        &self.strata
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<Arc<Constraint>>> {
        self.strata.iter()
    }

    /// Number of strata.
    pub fn len(&self) -> usize {
        self.strata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strata.is_empty()
    }

    /// Total number of constraints across all strata.
    pub fn constraint_count(&self) -> usize {
        self.strata.iter().map(Vec::len).sum()
    }

    /// Index of the stratum holding the constraint (0 is the top).
    pub fn rank_of(&self, constraint: &Constraint) -> Option<usize> {
        self.strata
            .iter()
            .position(|stratum| stratum.iter().any(|c| **c == *constraint))
    }

    /// The stratum holding the constraint.
    pub fn stratum_of(&self, constraint: &Constraint) -> Option<&[Arc<Constraint>]> {
        self.rank_of(constraint).map(|i| self.strata[i].as_slice())
    }

    /// All constraints, top stratum first.
    pub fn flatten(&self) -> Vec<Arc<Constraint>> {
        self.strata.iter().flatten().cloned().collect()
    }
}

impl PartialEq for Hierarchy {
    fn eq(&self, other: &Self) -> bool {
        self.strata.len() == other.strata.len()
            && self.strata.iter().zip(&other.strata).all(|(a, b)| {
                let a: HashSet<&str> = a.iter().map(|c| c.name()).collect();
                let b: HashSet<&str> = b.iter().map(|c| c.name()).collect();
                a == b
            })
    }
}

impl Eq for Hierarchy {}

impl fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.strata
                    .iter()
                    .map(|s| s.iter().map(|c| c.name()).collect::<Vec<_>>()),
            )
            .finish()
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strata: Vec<String> = self
            .strata
            .iter()
            .map(|s| {
                let names: Vec<String> = s.iter().map(|c| c.to_string()).collect();
                format!("{{{}}}", names.join(" "))
            })
            .collect();
        f.write_str(&strata.join(" "))
    }
}
