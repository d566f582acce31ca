//! Tests for loser selectors.

use super::*;
use otforge_core::{Erc, ErcLabel, WinLosePair};
use otforge_test::systems::{candidate, markedness_set};
use otforge_test::TableGen;

use crate::comparer::{CompareConsistency, CompareCtie};
use crate::rcd::AllHigh;

#[test]
fn test_end_to_end_single_competitor() {
    let set = markedness_set(&["C1", "C2"]);
    let winner = candidate(&set, "x", "w", &[0, 1]);
    let competitor = candidate(&set, "x", "c", &[1, 0]);
    let mut ercs = ErcList::new(set);

    let comparer = CompareConsistency::new();
    assert_eq!(
        comparer.more_harmonic(&winner, &competitor, &ercs).unwrap(),
        Comparison::Second
    );

    let selector = LoserSelectorFromCompetition::new(comparer);
    let competition = vec![Arc::clone(&winner), Arc::clone(&competitor)];
    let loser = selector
        .select_loser(&winner, &competition, &ercs)
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(&loser, &competitor));

    let pair = WinLosePair::new(Arc::clone(&winner), loser).unwrap();
    assert_eq!(pair.erc().to_string(), "W L");
    ercs.add(&pair).unwrap();
    assert!(ercs.is_consistent());
    assert_eq!(ercs.rcd_result().hierarchy().to_string(), "{C1} {C2}");

    // The winner now beats the competitor.
    assert!(selector
        .select_loser(&winner, &competition, &ercs)
        .unwrap()
        .is_none());
}

#[test]
fn test_skips_first_and_ident() {
    let set = markedness_set(&["C1", "C2"]);
    let winner = candidate(&set, "x", "w", &[0, 1]);
    let bounded = candidate(&set, "x", "b", &[1, 1]);
    let twin = candidate(&set, "x", "t", &[0, 1]);
    let rival = candidate(&set, "x", "r", &[1, 0]);
    let ercs = ErcList::new(set);

    let selector = LoserSelectorFromCompetition::new(CompareConsistency::new());
    let competition = vec![bounded, twin, Arc::clone(&winner), Arc::clone(&rival)];
    let loser = selector
        .select_loser(&winner, &competition, &ercs)
        .unwrap();
    assert_eq!(loser.map(|c| c.output().to_string()), Some("r".to_string()));
}

#[test]
fn test_tie_is_informative() {
    let set = markedness_set(&["C1", "C2"]);
    let winner = candidate(&set, "x", "w", &[0, 1]);
    let rival = candidate(&set, "x", "r", &[1, 0]);
    let ercs = ErcList::new(set);

    let selector = LoserSelectorFromCompetition::new(CompareCtie::new(AllHigh));
    let loser = selector
        .select_loser(&winner, &[Arc::clone(&rival)], &ercs)
        .unwrap();
    assert!(loser.is_some());
}

#[test]
fn test_returns_first_informative_in_order() {
    let set = markedness_set(&["C1", "C2"]);
    let winner = candidate(&set, "x", "w", &[0, 1]);
    let first = candidate(&set, "x", "a", &[1, 0]);
    let second = candidate(&set, "x", "b", &[2, 0]);
    let ercs = ErcList::new(set);

    let selector = LoserSelectorFromCompetition::new(CompareConsistency::new());
    let loser = selector
        .select_loser(&winner, &[Arc::clone(&first), second], &ercs)
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(&loser, &first));
}

#[test]
fn test_empty_competition() {
    let set = markedness_set(&["C1"]);
    let winner = candidate(&set, "x", "w", &[0]);
    let selector = LoserSelectorFromCompetition::new(CompareConsistency::new());
    assert!(selector
        .select_loser(&winner, &[], &ErcList::new(set))
        .unwrap()
        .is_none());
}

#[test]
fn test_from_gen_uses_winner_input() {
    let set = markedness_set(&["C1", "C2"]);
    let winner = candidate(&set, "x", "w", &[0, 1]);
    let rival = candidate(&set, "x", "r", &[1, 0]);
    let elsewhere = candidate(&set, "y", "z", &[0, 0]);
    let gen = TableGen::new().with_candidates(vec![
        Arc::clone(&winner),
        Arc::clone(&rival),
        elsewhere,
    ]);

    let selector = LoserSelectorFromGen::new(gen, CompareConsistency::new());
    let mut ercs = ErcList::new(set.clone());
    let loser = selector.select_loser(&winner, &ercs).unwrap().unwrap();
    assert!(Arc::ptr_eq(&loser, &rival));

    ercs.add(Erc::new(set).with("C1", ErcLabel::W).with("C2", ErcLabel::L))
        .unwrap();
    assert!(selector.select_loser(&winner, &ercs).unwrap().is_none());
}

#[test]
fn test_from_gen_unknown_input() {
    let set = markedness_set(&["C1"]);
    let winner = candidate(&set, "unseen", "w", &[0]);
    let selector = LoserSelectorFromGen::new(TableGen::new(), CompareConsistency::new());
    let boxed: Box<dyn LoserSelector> = Box::new(selector);
    assert!(boxed
        .select_loser(&winner, &ErcList::new(set))
        .unwrap()
        .is_none());
}

#[test]
fn test_comparer_errors_propagate() {
    let set = markedness_set(&["C1", "C2"]);
    let winner = candidate(&set, "x", "w", &[0, 1]);
    let other_input = candidate(&set, "y", "r", &[1, 0]);
    let selector = LoserSelectorFromCompetition::new(CompareConsistency::new());
    let err = selector
        .select_loser(&winner, &[other_input], &ErcList::new(set))
        .unwrap_err();
    assert!(matches!(err, otforge_core::OtForgeError::InputMismatch { .. }));
}
