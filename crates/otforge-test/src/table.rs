//! A GEN backed by fixed competitions.

use std::collections::HashMap;
use std::sync::Arc;

use otforge_core::{Candidate, CandidateGenerator};

/// Returns a pre-built competition per input, in insertion order.
///
/// Unknown inputs have an empty competition.
#[derive(Debug, Clone, Default)]
pub struct TableGen {
    competitions: HashMap<String, Vec<Arc<Candidate>>>,
}

impl TableGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends candidates to their inputs' competitions.
    pub fn with_candidates(
        mut self,
        candidates: impl IntoIterator<Item = Arc<Candidate>>,
    ) -> Self {
        for cand in candidates {
            self.competitions
                .entry(cand.input().to_string())
                .or_default()
                .push(cand);
        }
        self
    }
}

impl CandidateGenerator for TableGen {
    fn gen(&self, input: &str) -> Vec<Arc<Candidate>> {
        self.competitions.get(input).cloned().unwrap_or_default()
    }
}
