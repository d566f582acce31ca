//! Builder module for constructing ranking components from configuration
//!
//! This module provides the wiring between configuration types and
//! the ranking strategies. Incomplete or incompatible settings are
//! rejected when a component is built, never on first use.

use otforge_config::{ComparerType, LearnerConfig, RankingBiasType};
use otforge_core::{CandidateGenerator, OtForgeError, Result};
use tracing::debug;

use crate::comparer::{CompareConsistency, CompareCtie, ComparePool, Comparer};
use crate::rcd::{AllHigh, RankingBias, SomeLow};
use crate::selector::{LoserSelectorFromCompetition, LoserSelectorFromGen};

/// Builder for constructing ranking biases from configuration.
pub struct RankingBiasBuilder;

impl RankingBiasBuilder {
    /// Builds the bias named by `kind`.
    pub fn build(kind: &RankingBiasType) -> Box<dyn RankingBias> {
        match kind {
            RankingBiasType::AllHigh => Box::new(AllHigh),
            RankingBiasType::FaithLow => Box::new(SomeLow::faith_low()),
            RankingBiasType::MarkLow => Box::new(SomeLow::mark_low()),
        }
    }

    /// Builds the bias named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`OtForgeError::MissingConfiguration`] if no bias is set.
    pub fn from_config(config: &LearnerConfig) -> Result<Box<dyn RankingBias>> {
        config
            .ranking_bias
            .as_ref()
            .map(Self::build)
            .ok_or_else(|| OtForgeError::MissingConfiguration("ranking_bias".to_string()))
    }
}

/// Builder for constructing comparers from configuration.
pub struct ComparerBuilder;

impl ComparerBuilder {
    /// Builds the comparer named in `config`.
    ///
    /// `pool` and `ctie` compare over a biased hierarchy and need
    /// `ranking_bias`; `consistent` ignores it.
    ///
    /// # Errors
    ///
    /// Returns [`OtForgeError::MissingConfiguration`] if the comparer is not
    /// named, or if it needs a bias and none is set.
    pub fn build(config: &LearnerConfig) -> Result<Box<dyn Comparer>> {
        let kind = config
            .comparer
            .ok_or_else(|| OtForgeError::MissingConfiguration("comparer".to_string()))?;

        if !kind.requires_bias() {
            if let Some(bias) = config.ranking_bias {
                debug!(
                    event = "bias_ignored",
                    comparer = %kind,
                    bias = %bias,
                );
            }
            return Ok(Box::new(CompareConsistency::new()));
        }

        let bias = Self::bias_for(config, kind)?;
        let comparer: Box<dyn Comparer> = match kind {
            ComparerType::Pool => Box::new(ComparePool::new(bias)),
            ComparerType::Ctie => Box::new(CompareCtie::new(bias)),
            ComparerType::Consistent => Box::new(CompareConsistency::new()),
        };
        Ok(comparer)
    }

    fn bias_for(config: &LearnerConfig, kind: ComparerType) -> Result<Box<dyn RankingBias>> {
        RankingBiasBuilder::from_config(config).map_err(|_| {
            OtForgeError::MissingConfiguration(format!("ranking_bias (required by {kind})"))
        })
    }

    /// Creates an exact consistency comparer.
    pub fn consistent() -> CompareConsistency {
        CompareConsistency::new()
    }

    /// Creates a pooling comparer with the given bias.
    pub fn pool<B: RankingBias>(bias: B) -> ComparePool<B> {
        ComparePool::new(bias)
    }

    /// Creates a conflicting-tie comparer with the given bias.
    pub fn ctie<B: RankingBias>(bias: B) -> CompareCtie<B> {
        CompareCtie::new(bias)
    }
}

/// Builder for constructing loser selectors from configuration.
pub struct LoserSelectorBuilder;

impl LoserSelectorBuilder {
    /// Builds a selector over caller-supplied competitions.
    pub fn from_competition(
        config: &LearnerConfig,
    ) -> Result<LoserSelectorFromCompetition<Box<dyn Comparer>>> {
        let comparer = ComparerBuilder::build(config)?;
        Ok(LoserSelectorFromCompetition::new(comparer))
    }

    /// Builds a selector over the competitions `gen` produces.
    pub fn from_gen<G: CandidateGenerator>(
        gen: G,
        config: &LearnerConfig,
    ) -> Result<LoserSelectorFromGen<G, Box<dyn Comparer>>> {
        Ok(LoserSelectorFromGen::new(gen, ComparerBuilder::build(config)?))
    }
}
