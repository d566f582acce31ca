//! Exact comparison by consistency testing.

use std::sync::Arc;

use otforge_core::{Candidate, Result, WinLosePair};
use tracing::trace;

use super::{Comparer, Comparison};
use crate::erc_list::ErcList;

/// Decides whether the second candidate could beat the first under any
/// ranking consistent with the current information.
///
/// The reversed pair (second as winner, first as loser) is added to a copy
/// of the ERC list; if the copy stays consistent the answer is
/// [`Comparison::Second`], otherwise [`Comparison::First`]. Exact, at the
/// cost of an RCD run per comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareConsistency;

impl CompareConsistency {
    pub fn new() -> Self {
        Self
    }
}

impl Comparer for CompareConsistency {
    fn more_harmonic(
        &self,
        first: &Arc<Candidate>,
        second: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Comparison> {
        if first.ident_viols(second) {
            return Ok(Comparison::IdentViolations);
        }

        let reversed = WinLosePair::new(Arc::clone(second), Arc::clone(first))?;
        let mut trial = ercs.dup();
        trial.add(&reversed)?;

        let verdict = if trial.is_consistent() {
            Comparison::Second
        } else {
            Comparison::First
        };
        trace!(
            event = "compare",
            comparer = "consistent",
            first = first.output(),
            second = second.output(),
            verdict = %verdict,
        );
        Ok(verdict)
    }
}
