//! Candidate generation interface.

use std::sync::Arc;

use crate::candidate::Candidate;

/// GEN: produces the competition for an input.
///
/// Implementations live outside the engine (one per linguistic system).
/// Every returned candidate must be fully scored against the shared
/// constraint set, and the order must be deterministic: loser search
/// scans the competition in the order given here.
pub trait CandidateGenerator {
    /// Returns every candidate for the input.
    fn gen(&self, input: &str) -> Vec<Arc<Candidate>>;
}

impl<G: CandidateGenerator + ?Sized> CandidateGenerator for &G {
    fn gen(&self, input: &str) -> Vec<Arc<Candidate>> {
        (**self).gen(input)
    }
}

impl<G: CandidateGenerator + ?Sized> CandidateGenerator for Box<G> {
    fn gen(&self, input: &str) -> Vec<Arc<Candidate>> {
        (**self).gen(input)
    }
}
