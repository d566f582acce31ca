//! Constraint sets and hand-scored candidates.

use std::sync::Arc;

use otforge_core::{Candidate, Constraint, ConstraintSet, ConstraintType};

/// A set of markedness constraints without evaluation functions.
pub fn markedness_set(names: &[&str]) -> ConstraintSet {
    typed_set(names, &[])
}

/// Markedness constraints followed by faithfulness constraints.
pub fn typed_set(markedness: &[&str], faithfulness: &[&str]) -> ConstraintSet {
    let mark = markedness
        .iter()
        .map(|n| Constraint::new(*n, ConstraintType::Markedness));
    let faith = faithfulness
        .iter()
        .map(|n| Constraint::new(*n, ConstraintType::Faithfulness));
    ConstraintSet::new(mark.chain(faith).collect())
}

/// A shared candidate with violations given in constraint-set order.
///
/// # Panics
///
/// Panics if `viols` does not have one count per constraint.
pub fn candidate(
    set: &ConstraintSet,
    input: &str,
    output: &str,
    viols: &[u32],
) -> Arc<Candidate> {
    assert_eq!(
        viols.len(),
        set.len(),
        "one violation count per constraint expected"
    );
    let mut cand = Candidate::new(input, output, set.clone());
    for (constraint, count) in set.iter().zip(viols) {
        cand.set_viols(constraint.name(), *count);
    }
    Arc::new(cand)
}
