//! Recursive Constraint Demotion.
//!
//! RCD builds a stratified hierarchy top-down. At each step the constraints
//! that no remaining ERC labels `L` are rankable; a [`RankingBias`] picks
//! which of them form the next stratum, and every ERC that a constraint of
//! that stratum labels `W` is explained and set aside. The ERC set is
//! consistent iff every constraint ends up ranked.

mod bias;

use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::sync::Arc;

use otforge_core::{Constraint, ConstraintSet, Erc, Hierarchy};
use tracing::{trace, warn};

use crate::erc_list::ErcList;

pub use bias::{AllHigh, RankingBias, SomeLow};

/// Outcome of one RCD run.
#[derive(Clone)]
pub struct RcdResult {
    hierarchy: Hierarchy,
    unranked: Vec<Arc<Constraint>>,
    explained: Vec<Vec<Arc<Erc>>>,
    unexplained: Vec<Arc<Erc>>,
}

impl RcdResult {
    /// The strata placed before the run stopped.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Constraints that could never be ranked. Empty iff consistent.
    pub fn unranked(&self) -> &[Arc<Constraint>] {
        &self.unranked
    }

    /// ERCs explained by each stratum, aligned with the hierarchy.
    pub fn explained(&self) -> &[Vec<Arc<Erc>>] {
        &self.explained
    }

    /// ERCs no placed constraint explains.
    pub fn unexplained(&self) -> &[Arc<Erc>] {
        &self.unexplained
    }

    pub fn is_consistent(&self) -> bool {
        self.unranked.is_empty()
    }

    /// The hierarchy with any unranked constraints appended as a final stratum.
    pub fn total_hierarchy(&self) -> Hierarchy {
        let mut hierarchy = self.hierarchy.clone();
        if !self.unranked.is_empty() {
            hierarchy.push_stratum(self.unranked.clone());
        }
        hierarchy
    }
}

impl Debug for RcdResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RcdResult")
            .field("hierarchy", &self.hierarchy)
            .field(
                "unranked",
                &self.unranked.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("unexplained", &self.unexplained.len())
            .finish()
    }
}

/// The RCD algorithm, parameterized by a ranking bias.
///
/// # Type Parameters
/// * `B` - The ranking bias choosing each stratum from the rankable constraints
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintSet, ConstraintType, Erc, ErcLabel};
/// use otforge_ranking::{AllHigh, ErcList, Rcd};
///
/// let set = ConstraintSet::new(vec![
///     Constraint::new("C1", ConstraintType::Markedness),
///     Constraint::new("C2", ConstraintType::Markedness),
///     Constraint::new("C3", ConstraintType::Markedness),
/// ]);
/// let mut list = ErcList::new(set.clone());
/// list.add(Erc::new(set).with("C1", ErcLabel::W).with("C2", ErcLabel::L)).unwrap();
///
/// let result = Rcd::new(AllHigh).run(&list);
/// assert!(result.is_consistent());
/// assert_eq!(result.hierarchy().to_string(), "{C1 C3} {C2}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rcd<B = AllHigh> {
    bias: B,
}

impl<B: RankingBias> Rcd<B> {
    /// Creates an RCD runner with the given bias.
    pub fn new(bias: B) -> Self {
        Self { bias }
    }

    pub fn bias(&self) -> &B {
        &self.bias
    }

    /// Runs RCD over an ERC list.
    pub fn run(&self, ercs: &ErcList) -> RcdResult {
        self.run_on(ercs.constraints(), ercs.as_slice())
    }

    /// Runs RCD over a constraint set and ERCs defined on it.
    pub fn run_on(&self, constraints: &ConstraintSet, ercs: &[Arc<Erc>]) -> RcdResult {
        let mut unranked: Vec<Arc<Constraint>> = constraints.iter().cloned().collect();
        let mut unexplained: Vec<Arc<Erc>> = ercs.to_vec();
        let mut hierarchy = Hierarchy::new();
        let mut explained = Vec::new();

        loop {
            let rankable: Vec<Arc<Constraint>> = unranked
                .iter()
                .filter(|c| !unexplained.iter().any(|e| e.prefers_loser(c)))
                .cloned()
                .collect();
            if rankable.is_empty() {
                break;
            }

            let mut stratum = self.bias.choose(&rankable);
            let mut seen = HashSet::with_capacity(stratum.len());
            stratum.retain(|c| rankable.contains(c) && seen.insert(Arc::clone(c)));
            if stratum.is_empty() {
                warn!(
                    event = "empty_bias_choice",
                    bias = self.bias.name(),
                    rankable = rankable.len(),
                );
                stratum = rankable;
            }

            unranked.retain(|c| !stratum.contains(c));
            let (done, rest): (Vec<_>, Vec<_>) = unexplained
                .into_iter()
                .partition(|e| stratum.iter().any(|c| e.prefers_winner(c)));
            unexplained = rest;

            trace!(
                event = "rcd_stratum",
                depth = hierarchy.len(),
                size = stratum.len(),
                explained = done.len(),
            );
            explained.push(done);
            hierarchy.push_stratum(stratum);
        }

        RcdResult {
            hierarchy,
            unranked,
            explained,
            unexplained,
        }
    }
}

#[cfg(test)]
mod tests;
