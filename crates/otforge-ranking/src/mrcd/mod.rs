//! Multi-Recursive Constraint Demotion.
//!
//! MRCD grows an ERC list by searching for informative losers for a list
//! of winners. Winners are processed in full passes against the
//! accumulated list, so pairs found for one winner constrain the search
//! for the winners after it. Passes repeat until one adds no pairs or the
//! list becomes inconsistent.

mod single;

use std::sync::Arc;

use otforge_config::MrcdConfig;
use otforge_core::{Candidate, Result, WinLosePair};
use tracing::{info, warn};

use crate::erc_list::ErcList;
use crate::selector::LoserSelector;
use crate::stats::MrcdStats;

pub use single::MrcdSingle;

/// Result of running MRCD over a list of winners.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintSet, ConstraintType};
/// use otforge_ranking::{CompareConsistency, ErcList, LoserSelectorFromGen, Mrcd};
/// # use std::sync::Arc;
/// # use otforge_core::{Candidate, CandidateGenerator};
/// # struct Empty;
/// # impl CandidateGenerator for Empty {
/// #     fn gen(&self, _input: &str) -> Vec<Arc<Candidate>> { Vec::new() }
/// # }
///
/// let set = ConstraintSet::new(vec![Constraint::new("C1", ConstraintType::Markedness)]);
/// let selector = LoserSelectorFromGen::new(Empty, CompareConsistency::new());
///
/// let result = Mrcd::run(&[], &ErcList::new(set), &selector).unwrap();
/// assert!(result.added_pairs().is_empty());
/// assert!(result.is_consistent());
/// assert_eq!(result.stats().pass_count, 1);
/// ```
#[derive(Debug)]
pub struct Mrcd {
    ercs: ErcList,
    added_pairs: Vec<WinLosePair>,
    stats: MrcdStats,
    pass_limit_reached: bool,
}

impl Mrcd {
    /// Runs MRCD until a fixed point or an inconsistency.
    ///
    /// Neither `winners` nor `prior` is modified.
    pub fn run<S>(winners: &[Arc<Candidate>], prior: &ErcList, selector: &S) -> Result<Self>
    where
        S: LoserSelector + ?Sized,
    {
        Self::run_with_limit(winners, prior, selector, None)
    }

    /// Runs MRCD with the settings from an [`MrcdConfig`].
    pub fn run_with_config<S>(
        winners: &[Arc<Candidate>],
        prior: &ErcList,
        selector: &S,
        config: &MrcdConfig,
    ) -> Result<Self>
    where
        S: LoserSelector + ?Sized,
    {
        Self::run_with_limit(winners, prior, selector, config.pass_limit)
    }

    /// Runs MRCD, stopping after at most `pass_limit` passes if given.
    pub fn run_with_limit<S>(
        winners: &[Arc<Candidate>],
        prior: &ErcList,
        selector: &S,
        pass_limit: Option<u64>,
    ) -> Result<Self>
    where
        S: LoserSelector + ?Sized,
    {
        let winners = winners.to_vec();
        let mut ercs = prior.dup();
        let mut added_pairs = Vec::new();
        let mut stats = MrcdStats::default();
        let mut pass_limit_reached = false;
        stats.start();

        info!(
            event = "mrcd_start",
            winners = winners.len(),
            prior_ercs = ercs.len(),
            constraints = ercs.constraints().len(),
            pass_limit = pass_limit.unwrap_or(0),
        );

        loop {
            if let Some(limit) = pass_limit {
                if stats.pass_count >= limit {
                    warn!(
                        event = "pass_limit_reached",
                        passes = stats.pass_count,
                        pairs = added_pairs.len(),
                    );
                    pass_limit_reached = true;
                    break;
                }
            }

            stats.record_pass();
            let mut pass_pairs = 0usize;
            let mut inconsistent = false;

            for winner in &winners {
                let single = MrcdSingle::run(winner, &ercs, selector)?;
                stats.absorb(single.stats());
                let consistent = single.is_consistent();

                let (list, pairs) = single.into_parts();
                ercs = list;
                pass_pairs += pairs.len();
                added_pairs.extend(pairs);

                if !consistent {
                    inconsistent = true;
                    break;
                }
            }

            info!(
                event = "mrcd_pass",
                pass = stats.pass_count,
                pairs = pass_pairs,
                ercs = ercs.len(),
                consistent = !inconsistent,
            );

            if inconsistent || pass_pairs == 0 {
                break;
            }
        }

        stats.finish();
        info!(
            event = "mrcd_end",
            passes = stats.pass_count,
            pairs = added_pairs.len(),
            searches = stats.loser_searches,
            hit_rate = stats.hit_rate(),
            consistent = ercs.is_consistent(),
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        Ok(Self {
            ercs,
            added_pairs,
            stats,
            pass_limit_reached,
        })
    }

    /// The final ERC list: the prior ERCs plus every added pair.
    pub fn erc_list(&self) -> &ErcList {
        &self.ercs
    }

    /// Every pair added across all passes, in the order found.
    pub fn added_pairs(&self) -> &[WinLosePair] {
        &self.added_pairs
    }

    pub fn is_consistent(&self) -> bool {
        self.ercs.is_consistent()
    }

    pub fn stats(&self) -> &MrcdStats {
        &self.stats
    }

    /// Returns true if the run stopped because of the pass limit.
    pub fn pass_limit_reached(&self) -> bool {
        self.pass_limit_reached
    }

    /// Consumes the result, returning the final list and the added pairs.
    pub fn into_parts(self) -> (ErcList, Vec<WinLosePair>) {
        (self.ercs, self.added_pairs)
    }
}
