//! Hierarchy queries over consistent ERC lists.

use otforge_core::{Hierarchy, OtForgeError, Result};
use tracing::debug;

use crate::erc_list::ErcList;
use crate::rcd::{AllHigh, RankingBias, Rcd};

/// Returns the hierarchy RCD builds for an ERC list under a fixed bias.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintSet, ConstraintType, Erc, ErcLabel};
/// use otforge_ranking::{ErcList, Ranker, SomeLow};
///
/// let set = ConstraintSet::new(vec![
///     Constraint::new("M", ConstraintType::Markedness),
///     Constraint::new("F", ConstraintType::Faithfulness),
/// ]);
/// let ranker = Ranker::new(SomeLow::faith_low());
///
/// let hierarchy = ranker.get_hierarchy(&ErcList::new(set.clone())).unwrap();
/// assert_eq!(hierarchy.to_string(), "{M} {F}");
///
/// let mut bad = ErcList::new(set.clone());
/// bad.add(Erc::new(set).with("M", ErcLabel::L)).unwrap();
/// assert!(ranker.get_hierarchy(&bad).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Ranker<B = AllHigh> {
    rcd: Rcd<B>,
}

impl Ranker<AllHigh> {
    /// A ranker with the all-high bias.
    pub fn all_high() -> Self {
        Self::new(AllHigh)
    }
}

impl<B: RankingBias> Ranker<B> {
    pub fn new(bias: B) -> Self {
        Self { rcd: Rcd::new(bias) }
    }

    pub fn bias(&self) -> &B {
        self.rcd.bias()
    }

    /// Runs RCD and returns the resulting hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`OtForgeError::Inconsistent`] if some constraint cannot be ranked.
    pub fn get_hierarchy(&self, ercs: &ErcList) -> Result<Hierarchy> {
        let result = self.rcd.run(ercs);
        if !result.is_consistent() {
            let unranked: Vec<String> = result.unranked().iter().map(|c| c.to_string()).collect();
            debug!(
                event = "ranker_inconsistent",
                bias = self.rcd.bias().name(),
                unranked = unranked.len(),
            );
            return Err(OtForgeError::Inconsistent {
                unranked: unranked.join(" "),
            });
        }
        Ok(result.hierarchy().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otforge_core::{Erc, ErcLabel};
    use otforge_test::systems::markedness_set;

    #[test]
    fn test_all_high_hierarchy() {
        let set = markedness_set(&["C1", "C2", "C3"]);
        let mut ercs = ErcList::new(set.clone());
        ercs.add(Erc::new(set).with("C3", ErcLabel::W).with("C1", ErcLabel::L))
            .unwrap();

        let hierarchy = Ranker::all_high().get_hierarchy(&ercs).unwrap();
        assert_eq!(hierarchy.to_string(), "{C2 C3} {C1}");
    }

    #[test]
    fn test_inconsistent_error_names_unranked() {
        let set = markedness_set(&["C1", "C2"]);
        let mut ercs = ErcList::new(set.clone());
        ercs.add(Erc::new(set.clone()).with("C1", ErcLabel::W).with("C2", ErcLabel::L))
            .unwrap();
        ercs.add(Erc::new(set).with("C1", ErcLabel::L)).unwrap();

        let err = Ranker::all_high().get_hierarchy(&ercs).unwrap_err();
        assert_eq!(
            err,
            OtForgeError::Inconsistent {
                unranked: "C1 C2".into()
            }
        );
    }
}
