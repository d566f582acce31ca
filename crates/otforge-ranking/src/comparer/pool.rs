//! Stratum-wise comparison with pooled violations.

use std::sync::Arc;

use otforge_core::{Candidate, Result};
use tracing::trace;

use super::{viols, CachedHierarchy, Comparer, Comparison};
use crate::erc_list::ErcList;
use crate::rcd::RankingBias;

/// Compares over the hierarchy built under a ranking bias, pooling the
/// violations of each stratum.
///
/// Strata are visited top to bottom. Within a stratum the violations of all
/// member constraints are summed for each candidate; the smaller sum wins.
/// Equal sums pass to the next stratum. If no stratum decides, the result
/// is [`Comparison::IdentViolations`] for identical profiles and
/// [`Comparison::Tie`] otherwise.
///
/// # Type Parameters
/// * `B` - The ranking bias used to build the hierarchy
#[derive(Debug)]
pub struct ComparePool<B> {
    hierarchy: CachedHierarchy<B>,
}

impl<B: RankingBias> ComparePool<B> {
    pub fn new(bias: B) -> Self {
        Self {
            hierarchy: CachedHierarchy::new(bias),
        }
    }

    pub fn bias(&self) -> &B {
        self.hierarchy.bias()
    }
}

impl<B: RankingBias> Comparer for ComparePool<B> {
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
            let mut first_sum = 0u64;
            let mut second_sum = 0u64;
            for constraint in stratum {
                first_sum += u64::from(viols(first, constraint)?);
                second_sum += u64::from(viols(second, constraint)?);
            }
            let verdict = match first_sum.cmp(&second_sum) {
                std::cmp::Ordering::Less => Comparison::First,
                std::cmp::Ordering::Greater => Comparison::Second,
                std::cmp::Ordering::Equal => continue,
            };
            trace!(
                event = "compare",
                comparer = "pool",
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
