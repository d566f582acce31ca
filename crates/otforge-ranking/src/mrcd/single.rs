//! Single-winner MRCD.

use std::sync::Arc;

use otforge_core::{Candidate, Result, WinLosePair};
use tracing::{debug, info};

use crate::erc_list::ErcList;
use crate::selector::LoserSelector;
use crate::stats::MrcdStats;

/// Result of running MRCD for one winner.
///
/// The run works on a copy of the prior ERC list. It repeatedly asks the
/// selector for an informative loser, adds the winner-loser pair, and stops
/// when no loser remains or the list becomes inconsistent.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use otforge_core::{Candidate, Constraint, ConstraintSet, ConstraintType};
/// use otforge_ranking::{CompareConsistency, ErcList, LoserSelectorFromGen, MrcdSingle};
/// # use otforge_core::CandidateGenerator;
/// # struct Fixed(Vec<Arc<Candidate>>);
/// # impl CandidateGenerator for Fixed {
/// #     fn gen(&self, _input: &str) -> Vec<Arc<Candidate>> { self.0.clone() }
/// # }
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
/// let selector = LoserSelectorFromGen::new(
///     Fixed(vec![winner.clone(), rival]),
///     CompareConsistency::new(),
/// );
/// let prior = ErcList::new(set);
/// let result = MrcdSingle::run(&winner, &prior, &selector).unwrap();
///
/// assert_eq!(result.added_pairs().len(), 1);
/// assert!(result.is_consistent());
/// assert!(prior.is_empty());
/// ```
#[derive(Debug)]
pub struct MrcdSingle {
    winner: Arc<Candidate>,
    ercs: ErcList,
    added_pairs: Vec<WinLosePair>,
    stats: MrcdStats,
}

impl MrcdSingle {
    /// Runs MRCD for `winner` starting from `prior`.
    ///
    /// `prior` is never modified. If it is already inconsistent no loser
    /// search is made.
    pub fn run<S>(winner: &Arc<Candidate>, prior: &ErcList, selector: &S) -> Result<Self>
    where
        S: LoserSelector + ?Sized,
    {
        let mut run = Self {
            winner: Arc::clone(winner),
            ercs: prior.dup(),
            added_pairs: Vec::new(),
            stats: MrcdStats::default(),
        };
        run.stats.record_winner();

        if !run.ercs.is_consistent() {
            debug!(
                event = "mrcd_single_skipped",
                winner = %winner,
                reason = "inconsistent prior",
            );
            return Ok(run);
        }

        loop {
            let found = selector.select_loser(winner, &run.ercs)?;
            run.stats.record_search(found.is_some());
            let Some(loser) = found else {
                break;
            };

            let pair = WinLosePair::new(Arc::clone(winner), loser)?;
            run.ercs.add(&pair)?;
            info!(
                event = "pair_added",
                winner = winner.output(),
                loser = pair.loser().output(),
                input = winner.input(),
                erc = %pair.erc(),
                ercs = run.ercs.len(),
            );
            run.added_pairs.push(pair);

            if !run.ercs.is_consistent() {
                info!(
                    event = "inconsistency_detected",
                    winner = winner.output(),
                    input = winner.input(),
                    ercs = run.ercs.len(),
                );
                break;
            }
        }

        Ok(run)
    }

    pub fn winner(&self) -> &Arc<Candidate> {
        &self.winner
    }

    /// The working ERC list: the prior ERCs plus every added pair.
    pub fn erc_list(&self) -> &ErcList {
        &self.ercs
    }

    /// Pairs added during this run, in the order they were found.
    pub fn added_pairs(&self) -> &[WinLosePair] {
        &self.added_pairs
    }

    pub fn is_consistent(&self) -> bool {
        self.ercs.is_consistent()
    }

    /// Number of calls made to the loser selector.
    pub fn loser_searches(&self) -> u64 {
        self.stats.loser_searches
    }

    /// Counters for this winner; `pass_count` is always zero.
    pub fn stats(&self) -> &MrcdStats {
        &self.stats
    }

    /// Consumes the run, returning the working list and the added pairs.
    pub fn into_parts(self) -> (ErcList, Vec<WinLosePair>) {
        (self.ercs, self.added_pairs)
    }
}
