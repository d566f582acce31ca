//! Ranking biases: tie-break policies for choosing each RCD stratum.

use std::fmt::{self, Debug};
use std::sync::Arc;

use otforge_core::Constraint;

/// Chooses which rankable constraints RCD places in the next stratum.
///
/// Implementations must return a non-empty subset of `rankable` whenever
/// `rankable` is non-empty; RCD falls back to the full set otherwise.
/// Biases are immutable values and may be shared between runs.
pub trait RankingBias: Send + Sync + Debug {
    /// Returns the constraints to rank now, in their given order.
    fn choose(&self, rankable: &[Arc<Constraint>]) -> Vec<Arc<Constraint>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

impl<B: RankingBias + ?Sized> RankingBias for &B {
    fn choose(&self, rankable: &[Arc<Constraint>]) -> Vec<Arc<Constraint>> {
        (**self).choose(rankable)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<B: RankingBias + ?Sized> RankingBias for Box<B> {
    fn choose(&self, rankable: &[Arc<Constraint>]) -> Vec<Arc<Constraint>> {
        (**self).choose(rankable)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Ranks every rankable constraint as high as possible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllHigh;

impl AllHigh {
    pub fn new() -> Self {
        Self
    }
}

impl RankingBias for AllHigh {
    fn choose(&self, rankable: &[Arc<Constraint>]) -> Vec<Arc<Constraint>> {
        rankable.to_vec()
    }

    fn name(&self) -> &'static str {
        "all_high"
    }
}

/// Keeps one class of constraints as low as possible.
///
/// While any rankable constraint falls outside the low class, only those
/// are ranked. When every rankable constraint is in the low class, all of
/// them are ranked together.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use otforge_core::{Constraint, ConstraintType};
/// use otforge_ranking::{RankingBias, SomeLow};
///
/// let m = Arc::new(Constraint::new("M", ConstraintType::Markedness));
/// let f = Arc::new(Constraint::new("F", ConstraintType::Faithfulness));
///
/// let bias = SomeLow::faith_low();
/// assert_eq!(bias.choose(&[m.clone(), f.clone()]), vec![m]);
/// assert_eq!(bias.choose(&[f.clone()]), vec![f]);
/// ```
#[derive(Clone, Copy)]
pub struct SomeLow {
    name: &'static str,
    is_low: fn(&Constraint) -> bool,
}

impl SomeLow {
    /// Creates a bias keeping constraints matching `is_low` low.
    pub fn new(name: &'static str, is_low: fn(&Constraint) -> bool) -> Self {
        Self { name, is_low }
    }

    /// Faithfulness low, markedness high.
    pub fn faith_low() -> Self {
        Self::new("faith_low", Constraint::is_faithfulness)
    }

    /// Markedness low, faithfulness high.
    pub fn mark_low() -> Self {
        Self::new("mark_low", Constraint::is_markedness)
    }

    /// Returns true if the constraint belongs to the low class.
    pub fn is_low(&self, constraint: &Constraint) -> bool {
        (self.is_low)(constraint)
    }
}

impl Debug for SomeLow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SomeLow").field("name", &self.name).finish()
    }
}

impl RankingBias for SomeLow {
    fn choose(&self, rankable: &[Arc<Constraint>]) -> Vec<Arc<Constraint>> {
        let high: Vec<Arc<Constraint>> = rankable
            .iter()
            .filter(|c| !self.is_low(c))
            .cloned()
            .collect();
        if high.is_empty() {
            rankable.to_vec()
        } else {
            high
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
