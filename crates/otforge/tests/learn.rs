//! End-to-end learning through the public API.

use std::sync::Arc;

use otforge::prelude::*;
use otforge::OtForgeError;
use otforge_test::systems::{candidate, markedness_set};
use otforge_test::CvSystem;

#[test]
fn test_two_constraint_scenario() {
    let set = markedness_set(&["C1", "C2"]);
    let winner = candidate(&set, "x", "w", &[0, 1]);
    let competitor = candidate(&set, "x", "c", &[1, 0]);
    let mut ercs = ErcList::new(set);

    let config = LearnerConfig::new().with_comparer(ComparerType::Consistent);
    let comparer = ComparerBuilder::build(&config).unwrap();
    assert_eq!(
        comparer.more_harmonic(&winner, &competitor, &ercs).unwrap(),
        Comparison::Second
    );

    let selector = LoserSelectorBuilder::from_competition(&config).unwrap();
    let competition = [Arc::clone(&winner), Arc::clone(&competitor)];
    let loser = selector
        .select_loser(&winner, &competition, &ercs)
        .unwrap()
        .unwrap();

    let pair = WinLosePair::new(winner, loser).unwrap();
    assert_eq!(pair.erc().label_of("C1"), ErcLabel::W);
    assert_eq!(pair.erc().label_of("C2"), ErcLabel::L);

    ercs.add(&pair).unwrap();
    assert!(ercs.is_consistent());
    let hierarchy = Ranker::all_high().get_hierarchy(&ercs).unwrap();
    assert_eq!(hierarchy.to_string(), "{C1} {C2}");
}

#[test]
fn test_learn_cv_grammar_from_config() {
    let config = LearnerConfig::from_yaml_str(
        "ranking_bias: faith_low\ncomparer: ctie\nmrcd:\n  pass_limit: 20\n",
    )
    .unwrap();
    let system = CvSystem::new();
    let winners = vec![system.candidate("pat", "pa"), system.candidate("ta", "ta")];
    let prior = ErcList::new(system.constraints().clone());

    let selector = LoserSelectorBuilder::from_gen(system, &config).unwrap();
    let result = Mrcd::run_with_config(&winners, &prior, &selector, &config.mrcd).unwrap();

    assert!(result.is_consistent());
    assert!(!result.pass_limit_reached());
    let ranker = Ranker::new(RankingBiasBuilder::build(&RankingBiasType::FaithLow));
    let hierarchy = ranker.get_hierarchy(result.erc_list()).unwrap();
    let no_coda = result.erc_list().constraints().by_name("NoCoda").unwrap();
    let max = result.erc_list().constraints().by_name("Max").unwrap();
    assert!(hierarchy.rank_of(no_coda) < hierarchy.rank_of(max));
}

#[test]
fn test_incomplete_configuration_fails_at_build_time() {
    let config = LearnerConfig::new().with_comparer(ComparerType::Pool);
    let err = LoserSelectorBuilder::from_gen(CvSystem::new(), &config).unwrap_err();
    assert!(matches!(err, OtForgeError::MissingConfiguration(_)));
}
