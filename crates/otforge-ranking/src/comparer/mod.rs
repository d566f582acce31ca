//! Comparers: relative-harmony judgments between two candidates.
//!
//! A comparer decides, given the ranking information gathered so far,
//! whether the first candidate is more harmonic than the second. Loser
//! search asks this question once per competitor, so comparers range from
//! exact-but-expensive ([`CompareConsistency`]) to hierarchy-based
//! approximations ([`ComparePool`], [`CompareCtie`]).

mod consistency;
mod ctie;
mod pool;

use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::sync::Arc;

use otforge_core::{Candidate, Constraint, Hierarchy, OtForgeError, Result};

use crate::erc_list::ErcList;
use crate::ranker::Ranker;
use crate::rcd::RankingBias;

pub use consistency::CompareConsistency;
pub use ctie::{CompareCtie, StratumCtie, StratumVerdict};
pub use pool::ComparePool;

/// Verdict of comparing a first candidate with a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// The first candidate is strictly more harmonic.
    First,
    /// The second candidate is (possibly) more harmonic.
    Second,
    /// Current ranking information does not separate them.
    Tie,
    /// Both candidates have the same violation profile.
    IdentViolations,
}

impl Comparison {
    /// Returns true if the second candidate is an informative loser.
    pub fn is_informative(&self) -> bool {
        matches!(self, Self::Second | Self::Tie)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "FIRST"),
            Self::Second => write!(f, "SECOND"),
            Self::Tie => write!(f, "TIE"),
            Self::IdentViolations => write!(f, "IDENT_VIOLATIONS"),
        }
    }
}

/// Trait for comparing the harmony of two candidates for the same input.
pub trait Comparer: Send + Debug {
    /// Compares `first` with `second` under the ranking information `ercs`.
    ///
    /// Comparing a candidate with itself always yields
    /// [`Comparison::IdentViolations`].
    fn more_harmonic(
        &self,
        first: &Arc<Candidate>,
        second: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Comparison>;
}

impl<C: Comparer + ?Sized> Comparer for Box<C> {
    fn more_harmonic(
        &self,
        first: &Arc<Candidate>,
        second: &Arc<Candidate>,
        ercs: &ErcList,
    ) -> Result<Comparison> {
        (**self).more_harmonic(first, second, ercs)
    }
}

/// A ranker whose last hierarchy is kept until the ERC list changes.
struct CachedHierarchy<B> {
    ranker: Ranker<B>,
    cached: RefCell<Option<(u64, Arc<Hierarchy>)>>,
}

impl<B: RankingBias> CachedHierarchy<B> {
    fn new(bias: B) -> Self {
        Self {
            ranker: Ranker::new(bias),
            cached: RefCell::new(None),
        }
    }

    fn bias(&self) -> &B {
        self.ranker.bias()
    }

    fn get(&self, ercs: &ErcList) -> Result<Arc<Hierarchy>> {
        if let Some((revision, hierarchy)) = self.cached.borrow().as_ref() {
            if *revision == ercs.revision() {
                return Ok(Arc::clone(hierarchy));
            }
        }
        let hierarchy = Arc::new(self.ranker.get_hierarchy(ercs)?);
        *self.cached.borrow_mut() = Some((ercs.revision(), Arc::clone(&hierarchy)));
        Ok(hierarchy)
    }
}

impl<B: Debug> Debug for CachedHierarchy<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedHierarchy")
            .field("ranker", &self.ranker)
            .field("cached", &self.cached.borrow().is_some())
            .finish()
    }
}

fn viols(candidate: &Candidate, constraint: &Constraint) -> Result<u32> {
    candidate
        .get_viols(constraint)
        .ok_or_else(|| OtForgeError::MissingViolation {
            candidate: candidate.to_string(),
            constraint: constraint.name().to_string(),
        })
}
