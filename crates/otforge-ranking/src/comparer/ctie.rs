//! Stratum-wise comparison with conflicting ties.

use std::sync::Arc;

use otforge_core::{Candidate, Constraint, ErcLabel, Result};
use tracing::trace;

use super::{viols, CachedHierarchy, Comparer, Comparison};
use crate::erc_list::ErcList;
use crate::rcd::RankingBias;

/// Classification of a single stratum for a candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StratumVerdict {
    /// Some member prefers the first candidate and none the second.
    First,
    /// Some member prefers the second candidate and none the first.
    Second,
    /// Members prefer both candidates.
    Conflict,
    /// No member has a preference.
    Undecided,
}

/// Evaluates one stratum of mutually unranked constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct StratumCtie;

impl StratumCtie {
    /// Classifies `stratum` for `first` versus `second`.
    ///
    /// A stratum is decisive if any member has a preference; a stratum
    /// whose members disagree is a conflict.
    pub fn evaluate(
        stratum: &[Arc<Constraint>],
        first: &Candidate,
        second: &Candidate,
    ) -> Result<StratumVerdict> {
        let mut prefers_first = false;
        let mut prefers_second = false;
        for constraint in stratum {
            match ErcLabel::compare(viols(first, constraint)?, viols(second, constraint)?) {
                ErcLabel::W => prefers_first = true,
                ErcLabel::L => prefers_second = true,
                ErcLabel::E => {}
            }
        }
        Ok(match (prefers_first, prefers_second) {
            (true, true) => StratumVerdict::Conflict,
            (true, false) => StratumVerdict::First,
            (false, true) => StratumVerdict::Second,
            (false, false) => StratumVerdict::Undecided,
        })
    }
}

/// Compares over the hierarchy built under a ranking bias, treating a
/// stratum whose members disagree as an unresolved tie.
///
/// Strata are visited top to bottom and the first decisive one settles the
/// comparison: a one-sided stratum picks its side, a conflicting stratum
/// yields [`Comparison::Tie`] rather than letting either side dominate.
/// If no stratum decides, the profiles are identical.
///
/// # Type Parameters
/// * `B` - The ranking bias used to build the hierarchy
#[derive(Debug)]
pub struct CompareCtie<B> {
    hierarchy: CachedHierarchy<B>,
}

impl<B: RankingBias> CompareCtie<B> {
    pub fn new(bias: B) -> Self {
        Self {
            hierarchy: CachedHierarchy::new(bias),
        }
    }

    pub fn bias(&self) -> &B {
        self.hierarchy.bias()
    }
}

impl<B: RankingBias> Comparer for CompareCtie<B> {
    fn more_harmonic(
        &self,
        first: &Arc<Candidate>,
        second: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Comparison> {
        if first.ident_viols(second) {
            return Ok(Comparison::IdentViolations);
        }

        let hierarchy = self.hierarchy.get(ercs)?;
        for (depth, stratum) in hierarchy.iter().enumerate() {
            let verdict = match StratumCtie::evaluate(stratum, first, second)? {
                StratumVerdict::Undecided => continue,
                StratumVerdict::First => Comparison::First,
                StratumVerdict::Second => Comparison::Second,
                StratumVerdict::Conflict => Comparison::Tie,
            };
            trace!(
                event = "compare",
                comparer = "ctie",
                first = first.output(),
                second = second.output(),
                depth,
                verdict = %verdict,
            );
            return Ok(verdict);
        }

        Ok(Comparison::Tie)
    }
}
