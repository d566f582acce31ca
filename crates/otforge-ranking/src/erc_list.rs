//! ERC lists with cached consistency.

use std::cell::OnceCell;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use otforge_core::{ConstraintSet, Erc, OtForgeError, Result};

use crate::rcd::{AllHigh, Rcd, RcdResult};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// A collection of ERCs over one shared constraint set.
///
/// Every member ERC must be defined over the list's constraint set; adding
/// anything else fails with [`OtForgeError::StructuralMismatch`].
///
/// Consistency is computed lazily by an all-high RCD run and cached until
/// the next mutation. Each mutation also assigns a fresh revision number,
/// so derived data (such as a comparer's hierarchy) can be cached per
/// list state.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintSet, ConstraintType, Erc, ErcLabel};
/// use otforge_ranking::ErcList;
///
/// let set = ConstraintSet::new(vec![
///     Constraint::new("C1", ConstraintType::Markedness),
///     Constraint::new("C2", ConstraintType::Markedness),
/// ]);
///
/// let mut list = ErcList::new(set.clone());
/// list.add(Erc::new(set.clone()).with("C1", ErcLabel::W).with("C2", ErcLabel::L)).unwrap();
/// assert!(list.is_consistent());
///
/// list.add(Erc::new(set).with("C1", ErcLabel::L)).unwrap();
/// assert!(!list.is_consistent());
/// ```
pub struct ErcList {
    constraints: ConstraintSet,
    ercs: Vec<Arc<Erc>>,
    revision: u64,
    rcd: OnceCell<RcdResult>,
}

impl ErcList {
    /// Creates an empty list over a constraint set.
    pub fn new(constraints: ConstraintSet) -> Self {
        Self {
            constraints,
            ercs: Vec::new(),
            revision: next_revision(),
            rcd: OnceCell::new(),
        }
    }

    /// Adds an ERC.
    ///
    /// # Errors
    ///
    /// Returns [`OtForgeError::StructuralMismatch`] if the ERC's constraint
    /// set differs from the list's in size or membership.
    pub fn add(&mut self, erc: impl Into<Arc<Erc>>) -> Result<&mut Self> {
        let erc = erc.into();
        self.check_structure(&erc)?;
        self.ercs.push(erc);
        self.invalidate();
        Ok(self)
    }

    /// Adds every ERC, or none of them if any has the wrong structure.
    pub fn add_all<I, E>(&mut self, ercs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Erc>>,
    {
        let ercs: Vec<Arc<Erc>> = ercs.into_iter().map(Into::into).collect();
        for erc in &ercs {
            self.check_structure(erc)?;
        }
        if !ercs.is_empty() {
            self.ercs.extend(ercs);
            self.invalidate();
        }
        Ok(self)
    }

    fn check_structure(&self, erc: &Erc) -> Result<()> {
        if *erc.constraints() != self.constraints {
            return Err(OtForgeError::StructuralMismatch {
                expected: self.constraints.names(),
                found: erc.constraints().names(),
            });
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.rcd = OnceCell::new();
        self.revision = next_revision();
    }

    /// Returns an independent list sharing the same ERC objects.
    ///
    /// The copy starts with an empty consistency cache. It keeps the
    /// revision of this list until either list is mutated, since both hold
    /// the same ERCs.
    pub fn dup(&self) -> Self {
        Self {
            constraints: self.constraints.clone(),
            ercs: self.ercs.clone(),
            revision: self.revision,
            rcd: OnceCell::new(),
        }
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.ercs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ercs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Erc>> {
        self.ercs.iter()
    }

    /// Members in insertion order.
    pub fn as_slice(&self) -> &[Arc<Erc>] {
        &self.ercs
    }

    /// Identifies the current contents; changes on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Members satisfying the predicate, in insertion order.
    pub fn find_all<P>(&self, mut predicate: P) -> Vec<Arc<Erc>>
    where
        P: FnMut(&Erc) -> bool,
    {
        self.ercs
            .iter()
            .filter(|e| predicate(e.as_ref()))
            .cloned()
            .collect()
    }

    /// Splits the members into those satisfying the predicate and the rest.
    pub fn partition<P>(&self, mut predicate: P) -> (Vec<Arc<Erc>>, Vec<Arc<Erc>>)
    where
        P: FnMut(&Erc) -> bool,
    {
        self.ercs.iter().cloned().partition(|e| predicate(e.as_ref()))
    }

    /// Returns true if some ranking satisfies every member.
    pub fn is_consistent(&self) -> bool {
        self.rcd_result().is_consistent()
    }

    /// The all-high RCD result for the current contents.
    pub fn rcd_result(&self) -> &RcdResult {
        self.rcd
            .get_or_init(|| Rcd::new(AllHigh).run_on(&self.constraints, &self.ercs))
    }
}

impl Clone for ErcList {
    fn clone(&self) -> Self {
        self.dup()
    }
}

impl Debug for ErcList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErcList")
            .field("constraints", &self.constraints)
            .field("len", &self.ercs.len())
            .field("revision", &self.revision)
            .field("consistent", &self.rcd.get().map(RcdResult::is_consistent))
            .finish()
    }
}

impl<'a> IntoIterator for &'a ErcList {
    type Item = &'a Arc<Erc>;
    type IntoIter = std::slice::Iter<'a, Arc<Erc>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ercs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otforge_core::{Constraint, ConstraintType, ErcLabel};
    use otforge_test::systems::markedness_set;

    fn erc(set: &ConstraintSet, labels: &[(&str, ErcLabel)]) -> Erc {
        labels
            .iter()
            .fold(Erc::new(set.clone()), |e, (name, l)| e.with(name, *l))
    }

    #[test]
    fn test_add_grows_by_one() {
        let set = markedness_set(&["C1", "C2"]);
        let mut list = ErcList::new(set.clone());
        assert!(list.is_empty());
        list.add(erc(&set, &[("C1", ErcLabel::W)])).unwrap();
        assert_eq!(list.len(), 1);
        list.add(erc(&set, &[("C1", ErcLabel::W)])).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_add_rejects_different_size() {
        let set = markedness_set(&["C1", "C2"]);
        let other = markedness_set(&["C1"]);
        let mut list = ErcList::new(set);
        let err = list.add(Erc::new(other)).unwrap_err();
        assert!(matches!(err, OtForgeError::StructuralMismatch { .. }));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_rejects_different_membership() {
        let set = markedness_set(&["C1", "C2"]);
        let other = markedness_set(&["C1", "C3"]);
        let mut list = ErcList::new(set);
        assert!(list.add(Erc::new(other)).is_err());
    }

    #[test]
    fn test_add_accepts_reordered_set() {
        let set = markedness_set(&["C1", "C2"]);
        let reordered = ConstraintSet::from_shared(set.iter().rev().cloned().collect());
        let mut list = ErcList::new(set);
        assert!(list.add(Erc::new(reordered)).is_ok());
    }

    #[test]
    fn test_add_invalidates_cache() {
        let set = markedness_set(&["C1", "C2"]);
        let mut list = ErcList::new(set.clone());
        list.add(erc(&set, &[("C1", ErcLabel::W), ("C2", ErcLabel::L)]))
            .unwrap();
        assert!(list.is_consistent());
        let before = list.revision();

        list.add(erc(&set, &[("C1", ErcLabel::L), ("C2", ErcLabel::E)]))
            .unwrap();
        assert_ne!(list.revision(), before);
        assert!(!list.is_consistent());
    }

    #[test]
    fn test_add_all_is_atomic() {
        let set = markedness_set(&["C1", "C2"]);
        let other = markedness_set(&["X"]);
        let mut list = ErcList::new(set.clone());
        let result = list.add_all(vec![Erc::new(set.clone()), Erc::new(other)]);
        assert!(result.is_err());
        assert!(list.is_empty());

        list.add_all(vec![Erc::new(set.clone()), Erc::new(set)]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_dup_is_independent() {
        let set = markedness_set(&["C1", "C2"]);
        let mut list = ErcList::new(set.clone());
        list.add(erc(&set, &[("C1", ErcLabel::W), ("C2", ErcLabel::L)]))
            .unwrap();

        let mut copy = list.dup();
        assert_eq!(copy.revision(), list.revision());
        copy.add(erc(&set, &[("C1", ErcLabel::L)])).unwrap();
        assert_ne!(copy.revision(), list.revision());

        assert_eq!(list.len(), 1);
        assert_eq!(copy.len(), 2);
        assert!(Arc::ptr_eq(&list.as_slice()[0], &copy.as_slice()[0]));
        assert!(list.is_consistent());
        assert!(!copy.is_consistent());
    }

    #[test]
    fn test_find_all_and_partition() {
        let set = markedness_set(&["C1", "C2"]);
        let mut list = ErcList::new(set.clone());
        list.add(erc(&set, &[("C1", ErcLabel::W)])).unwrap();
        list.add(erc(&set, &[("C2", ErcLabel::W), ("C1", ErcLabel::L)]))
            .unwrap();
        list.add(erc(&set, &[("C1", ErcLabel::W), ("C2", ErcLabel::L)]))
            .unwrap();

        let c1 = Constraint::new("C1", ConstraintType::Markedness);
        let found = list.find_all(|e| e.prefers_winner(&c1));
        assert_eq!(found.len(), 2);

        let (valid, other) = list.partition(Erc::is_trivially_valid);
        assert_eq!(valid.len(), 1);
        assert_eq!(other.len(), 2);
    }

    #[test]
    fn test_empty_list_is_consistent() {
        let list = ErcList::new(markedness_set(&["C1", "C2"]));
        assert!(list.is_consistent());
        assert_eq!(list.rcd_result().hierarchy().len(), 1);
    }
}
