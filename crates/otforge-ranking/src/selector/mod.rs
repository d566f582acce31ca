//! Loser selection: finding an informative competitor for a winner.
//!
//! A loser is informative when current ranking information does not yet
//! force the winner to beat it. [`LoserSelectorFromCompetition`] scans a
//! given competition; [`LoserSelectorFromGen`] obtains the competition from
//! a [`CandidateGenerator`] first.

use std::fmt::{self, Debug};
use std::sync::Arc;

use otforge_core::{Candidate, CandidateGenerator, Result};
use tracing::trace;

use crate::comparer::{Comparer, Comparison};
use crate::erc_list::ErcList;

/// Finds an informative loser for a winner under current ranking information.
///
/// MRCD relies on selectors never returning the same loser twice for an
/// unchanged ERC list once the pair for it has been added.
pub trait LoserSelector: Debug {
    /// Returns an informative loser, or `None` if the winner is already
    /// optimal under `ercs`.
    fn select_loser(
        &self,
        winner: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Option<Arc<Candidate>>>;
}

impl<S: LoserSelector + ?Sized> LoserSelector for &S {
    fn select_loser(
        &self,
        winner: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Option<Arc<Candidate>>> {
        (**self).select_loser(winner, ercs)
    }
}

impl<S: LoserSelector + ?Sized> LoserSelector for Box<S> {
    fn select_loser(
        &self,
        winner: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Option<Arc<Candidate>>> {
        (**self).select_loser(winner, ercs)
    }
}

/// Scans a competition in order and returns the first candidate the
/// comparer does not rank strictly below the winner.
///
/// # Type Parameters
/// * `C` - The comparer judging each competitor against the winner
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use otforge_core::{Candidate, Constraint, ConstraintSet, ConstraintType};
/// use otforge_ranking::{CompareConsistency, ErcList, LoserSelectorFromCompetition};
///
/// let set = ConstraintSet::new(vec![
///     Constraint::new("C1", ConstraintType::Markedness),
///     Constraint::new("C2", ConstraintType::Markedness),
/// ]);
/// let winner = Arc::new(
///     Candidate::new("x", "w", set.clone()).with_viols("C1", 0).with_viols("C2", 1),
/// );
/// let rival = Arc::new(
///     Candidate::new("x", "r", set.clone()).with_viols("C1", 1).with_viols("C2", 0),
/// );
///
/// let selector = LoserSelectorFromCompetition::new(CompareConsistency::new());
/// let competition = vec![Arc::clone(&winner), Arc::clone(&rival)];
/// let loser = selector
///     .select_loser(&winner, &competition, &ErcList::new(set))
///     .unwrap();
/// assert_eq!(loser.as_deref(), Some(&*rival));
/// ```
pub struct LoserSelectorFromCompetition<C> {
    comparer: C,
}

impl<C: Comparer> LoserSelectorFromCompetition<C> {
    pub fn new(comparer: C) -> Self {
        Self { comparer }
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Returns the first informative loser in `competition`.
    pub fn select_loser(
        &self,
        winner: &Arc<Candidate>,
        competition: &[Arc<Candidate>],
        ercs: &ErcList,
    ) -> Result<Option<Arc<Candidate>>> {
        for (index, candidate) in competition.iter().enumerate() {
            match self.comparer.more_harmonic(winner, candidate, ercs)? {
                Comparison::Second | Comparison::Tie => {
                    trace!(
                        event = "loser_found",
                        winner = winner.output(),
                        loser = candidate.output(),
                        scanned = index + 1,
                    );
                    return Ok(Some(Arc::clone(candidate)));
                }
                Comparison::First | Comparison::IdentViolations => {}
            }
        }
        trace!(
            event = "no_loser",
            winner = winner.output(),
            scanned = competition.len(),
        );
        Ok(None)
    }
}

impl<C: Debug> Debug for LoserSelectorFromCompetition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoserSelectorFromCompetition")
            .field("comparer", &self.comparer)
            .finish()
    }
}

/// Selects losers from the competition GEN produces for the winner's input.
///
/// # Type Parameters
/// * `G` - The candidate generator
/// * `C` - The comparer judging each competitor against the winner
pub struct LoserSelectorFromGen<G, C> {
    gen: G,
    inner: LoserSelectorFromCompetition<C>,
}

impl<G: CandidateGenerator, C: Comparer> LoserSelectorFromGen<G, C> {
    pub fn new(gen: G, comparer: C) -> Self {
        Self {
            gen,
            inner: LoserSelectorFromCompetition::new(comparer),
        }
    }

    pub fn generator(&self) -> &G {
        &self.gen
    }

    pub fn comparer(&self) -> &C {
        self.inner.comparer()
    }
}

impl<G, C: Debug> Debug for LoserSelectorFromGen<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoserSelectorFromGen")
            .field("comparer", &self.inner.comparer)
            .finish_non_exhaustive()
    }
}

impl<G: CandidateGenerator, C: Comparer> LoserSelector for LoserSelectorFromGen<G, C> {
    fn select_loser(
        &self,
        winner: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Option<Arc<Candidate>>> {
        let competition = self.gen.gen(winner.input());
        self.inner.select_loser(winner, &competition, ercs)
    }
}

#[cfg(test)]
mod tests;
