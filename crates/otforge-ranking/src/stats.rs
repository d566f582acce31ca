//! Learner statistics.
//!
//! Counters for MRCD runs, kept alongside each result.

use std::time::{Duration, Instant};

/// MRCD run statistics.
///
/// Tracks aggregate metrics across all passes of one run.
///
/// # Example
///
/// ```
/// use otforge_ranking::stats::MrcdStats;
///
/// let mut stats = MrcdStats::default();
/// stats.start();
/// stats.record_pass();
/// stats.record_winner();
/// stats.record_search(true);
/// stats.record_search(false);
/// stats.finish();
///
/// assert_eq!(stats.pass_count, 1);
/// assert_eq!(stats.loser_searches, 2);
/// assert_eq!(stats.pairs_added, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MrcdStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    /// Full passes over the winner list.
    pub pass_count: u64,
    /// Winners processed across all passes.
    pub winners_processed: u64,
    /// Calls to the loser selector.
    pub loser_searches: u64,
    /// Winner-loser pairs added to the ERC list.
    pub pairs_added: u64,
}

impl MrcdStats {
    /// Marks the start of the run.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = Some(self.live_elapsed());
    }

    /// Returns the run's duration, or the time since start if still running.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.live_elapsed())
    }

    fn live_elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Records the start of a pass.
    pub fn record_pass(&mut self) {
        self.pass_count += 1;
    }

    /// Records a winner being processed.
    pub fn record_winner(&mut self) {
        self.winners_processed += 1;
    }

    /// Records a loser search and whether it found a loser.
    pub fn record_search(&mut self, found: bool) {
        self.loser_searches += 1;
        if found {
            self.pairs_added += 1;
        }
    }

    /// Folds in the winner, search and pair counters of another run.
    ///
    /// Pass counts and timing are left alone.
    pub fn absorb(&mut self, other: &MrcdStats) {
        self.winners_processed += other.winners_processed;
        self.loser_searches += other.loser_searches;
        self.pairs_added += other.pairs_added;
    }

    /// Returns the fraction of loser searches that found a loser.
    pub fn hit_rate(&self) -> f64 {
        if self.loser_searches == 0 {
            0.0
        } else {
            self.pairs_added as f64 / self.loser_searches as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let stats = MrcdStats::default();
        assert_eq!(stats.pass_count, 0);
        assert_eq!(stats.elapsed(), Duration::ZERO);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_absorb_and_hit_rate() {
        let mut single = MrcdStats::default();
        single.record_winner();
        for found in [true, false, false, false] {
            single.record_search(found);
        }

        let mut stats = MrcdStats::default();
        stats.record_pass();
        stats.absorb(&single);
        stats.record_search(true);
        assert_eq!(stats.pass_count, 1);
        assert_eq!(stats.winners_processed, 1);
        assert_eq!(stats.loser_searches, 5);
        assert_eq!(stats.pairs_added, 2);
        assert!((stats.hit_rate() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_finish_freezes_elapsed() {
        let mut stats = MrcdStats::default();
        stats.start();
        stats.finish();
        let frozen = stats.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(stats.elapsed(), frozen);
    }
}
