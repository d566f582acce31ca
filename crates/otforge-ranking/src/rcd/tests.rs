//! Tests for RCD and ranking biases.

use super::*;
use otforge_core::{ConstraintSet, ErcLabel};
use otforge_test::systems::{markedness_set, typed_set};

fn list(set: &ConstraintSet, rows: &[&[(&str, ErcLabel)]]) -> ErcList {
    let mut list = ErcList::new(set.clone());
    for row in rows {
        let erc = row
            .iter()
            .fold(Erc::new(set.clone()), |e, (name, l)| e.with(name, *l));
        list.add(erc).unwrap();
    }
    list
}

fn names(stratum: &[Arc<Constraint>]) -> Vec<&str> {
    stratum.iter().map(|c| c.name()).collect()
}

#[test]
fn test_inconsistent_pair() {
    let set = markedness_set(&["C1", "C2"]);
    let ercs = list(
        &set,
        &[
            &[("C1", ErcLabel::W), ("C2", ErcLabel::L)],
            &[("C1", ErcLabel::L), ("C2", ErcLabel::E)],
        ],
    );

    let result = Rcd::new(AllHigh).run(&ercs);
    assert!(!result.is_consistent());
    assert_eq!(result.unranked().len(), 2);
    assert!(result.hierarchy().is_empty());
    assert_eq!(result.unexplained().len(), 2);
    assert!(!ercs.is_consistent());
}

#[test]
fn test_partial_inconsistency_keeps_ranked_prefix() {
    let set = markedness_set(&["C1", "C2", "C3"]);
    let ercs = list(
        &set,
        &[
            &[("C1", ErcLabel::W), ("C2", ErcLabel::L)],
            &[("C1", ErcLabel::L), ("C2", ErcLabel::W)],
        ],
    );

    let result = Rcd::new(AllHigh).run(&ercs);
    assert!(!result.is_consistent());
    assert_eq!(result.hierarchy().len(), 1);
    assert_eq!(names(&result.hierarchy().strata()[0]), vec!["C3"]);
    assert_eq!(names(result.unranked()), vec!["C1", "C2"]);

    let total = result.total_hierarchy();
    assert_eq!(total.len(), 2);
    assert_eq!(total.constraint_count(), 3);
}

#[test]
fn test_chain_gives_total_order() {
    let set = markedness_set(&["C1", "C2", "C3"]);
    let ercs = list(
        &set,
        &[
            &[("C2", ErcLabel::W), ("C3", ErcLabel::L)],
            &[("C1", ErcLabel::W), ("C2", ErcLabel::L)],
        ],
    );

    let result = Rcd::new(AllHigh).run(&ercs);
    assert!(result.is_consistent());
    assert_eq!(result.hierarchy().to_string(), "{C1} {C2} {C3}");

    let explained: Vec<usize> = result.explained().iter().map(Vec::len).collect();
    assert_eq!(explained, vec![1, 1, 0]);
    assert!(result.unexplained().is_empty());
}

#[test]
fn test_strata_partition_constraints() {
    let set = markedness_set(&["A", "B", "C", "D", "E"]);
    let ercs = list(
        &set,
        &[
            &[("A", ErcLabel::W), ("B", ErcLabel::L), ("C", ErcLabel::L)],
            &[("B", ErcLabel::W), ("D", ErcLabel::L)],
            &[("E", ErcLabel::W), ("D", ErcLabel::L)],
        ],
    );

    let result = Rcd::new(AllHigh).run(&ercs);
    assert!(result.is_consistent());
    let flat = result.hierarchy().flatten();
    assert_eq!(flat.len(), set.len());
    for constraint in &set {
        assert_eq!(flat.iter().filter(|c| *c == constraint).count(), 1);
    }
    assert!(result.hierarchy().len() <= set.len());
}

#[test]
fn test_empty_constraint_set() {
    let set = markedness_set(&[]);
    let result = Rcd::new(AllHigh).run(&ErcList::new(set));
    assert!(result.is_consistent());
    assert!(result.hierarchy().is_empty());
}

#[test]
fn test_faith_low_bias() {
    let set = typed_set(&["M1", "M2"], &["F1"]);
    let ercs = list(&set, &[&[("F1", ErcLabel::W), ("M1", ErcLabel::L)]]);

    let all_high = Rcd::new(AllHigh).run(&ercs);
    assert_eq!(all_high.hierarchy().to_string(), "{M2 F1} {M1}");

    let faith_low = Rcd::new(SomeLow::faith_low()).run(&ercs);
    assert!(faith_low.is_consistent());
    assert_eq!(faith_low.hierarchy().to_string(), "{M2} {F1} {M1}");
}

#[test]
fn test_mark_low_bias() {
    let set = typed_set(&["M1", "M2"], &["F1"]);
    let ercs = list(&set, &[&[("F1", ErcLabel::W), ("M1", ErcLabel::L)]]);

    let mark_low = Rcd::new(SomeLow::mark_low()).run(&ercs);
    assert!(mark_low.is_consistent());
    assert_eq!(mark_low.hierarchy().to_string(), "{F1} {M1 M2}");
}

#[test]
fn test_faith_low_with_no_evidence_puts_faith_last() {
    let set = typed_set(&["M1"], &["F1", "F2"]);
    let result = Rcd::new(SomeLow::faith_low()).run(&ErcList::new(set));
    assert_eq!(result.hierarchy().to_string(), "{M1} {F1 F2}");
}

#[derive(Debug)]
struct ChooseNothing;

impl RankingBias for ChooseNothing {
    fn choose(&self, _rankable: &[Arc<Constraint>]) -> Vec<Arc<Constraint>> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "choose_nothing"
    }
}

#[test]
fn test_empty_bias_choice_falls_back_to_all() {
    let set = markedness_set(&["C1", "C2"]);
    let result = Rcd::new(ChooseNothing).run(&ErcList::new(set));
    assert!(result.is_consistent());
    assert_eq!(result.hierarchy().to_string(), "{C1 C2}");
}

#[test]
fn test_boxed_bias() {
    let set = typed_set(&["M1"], &["F1"]);
    let bias: Box<dyn RankingBias> = Box::new(SomeLow::faith_low());
    let result = Rcd::new(bias).run(&ErcList::new(set));
    assert_eq!(result.hierarchy().to_string(), "{M1} {F1}");
}

#[derive(Debug)]
struct RepeatFirst;

impl RankingBias for RepeatFirst {
    fn choose(&self, rankable: &[Arc<Constraint>]) -> Vec<Arc<Constraint>> {
        let first = Arc::clone(&rankable[0]);
        vec![Arc::clone(&first), first]
    }

    fn name(&self) -> &'static str {
        "repeat_first"
    }
}

#[test]
fn test_repeated_bias_choice_ranks_once() {
    let set = markedness_set(&["C1", "C2"]);
    let result = Rcd::new(RepeatFirst).run(&ErcList::new(set.clone()));
    assert!(result.is_consistent());
    assert_eq!(result.hierarchy().to_string(), "{C1} {C2}");
    assert_eq!(result.hierarchy().constraint_count(), set.len());
}
