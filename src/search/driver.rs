//! Escalating search over a ladder of complexity profiles

use crate::error::Result;
use crate::ir::Expression;
use crate::search::cancel::CancelToken;
use crate::search::config::SearchConfig;
use crate::search::enumerator::Enumerator;
use crate::search::result::{ProfileStatistics, SearchOutcome, SearchResult, SearchStatistics};
use crate::semantics::{Evaluator, Verdict};
use crate::sequence::Sequence;
use log::{debug, info, warn};
use std::time::Instant;

/// Candidates checked between looks at the clock and the cancel token
pub const POLL_INTERVAL: u64 = 4096;

/// Runs each profile in turn until one yields a formula
#[derive(Debug, Default)]
pub struct SearchDriver {
    evaluator: Evaluator,
    cancel: CancelToken,
}

/// Why a profile stopped early
enum Interrupt {
    TimedOut,
    Cancelled,
}

impl SearchDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a token the caller keeps a clone of
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Search for the first formula, in ladder then enumeration order, that
    /// reproduces `sequence`.
    ///
    /// Fails only if the configuration is invalid. Running out of profiles,
    /// time, or permission to continue are all reported through
    /// [`SearchOutcome`].
    pub fn search(&mut self, sequence: &Sequence, config: &SearchConfig) -> Result<SearchResult> {
        config.validate()?;

        let start = Instant::now();
        let deadline = config.timeout.and_then(|t| start.checked_add(t));
        let mut statistics = SearchStatistics::default();

        info!("Guessing the term after {}", sequence);

        for (index, profile) in config.profiles.iter().enumerate() {
            debug!("Profile {}: {}", index + 1, profile);
            let profile_start = Instant::now();
            let mut stats = ProfileStatistics::new(profile);
            let mut enumerator = Enumerator::new(profile);

            let mut interrupt = self.interrupted(deadline);
            let mut found = None;

            while interrupt.is_none() {
                let Some(items) = enumerator.advance() else {
                    stats.exhausted = true;
                    break;
                };
                stats.candidates_evaluated += 1;

                match self.evaluator.evaluate(items, sequence) {
                    Verdict::Matched(prediction) => {
                        found = Some((Expression::from_slice(items), prediction));
                        break;
                    }
                    Verdict::Mismatched => stats.mismatched += 1,
                    Verdict::Inapplicable => stats.inapplicable += 1,
                }

                if stats.candidates_evaluated % POLL_INTERVAL == 0 {
                    interrupt = self.interrupted(deadline);
                }
            }

            stats.elapsed_time = profile_start.elapsed();
            if config.verbose {
                info!(
                    "Profile {}: {} candidates in {:.2?} ({:.0}/sec)",
                    index + 1,
                    stats.candidates_evaluated,
                    stats.elapsed_time,
                    stats.throughput()
                );
            }
            let candidates = stats.candidates_evaluated;
            statistics.profiles.push(stats);

            let outcome = match (found, interrupt) {
                (Some((expression, prediction)), _) => {
                    info!(
                        "Profile {} matched {} predicting {}",
                        index + 1,
                        expression,
                        prediction
                    );
                    SearchOutcome::Found {
                        expression,
                        prediction,
                        profile_index: index,
                    }
                }
                (None, Some(Interrupt::TimedOut)) => {
                    warn!("Search timed out during profile {}", index + 1);
                    SearchOutcome::TimedOut
                }
                (None, Some(Interrupt::Cancelled)) => {
                    warn!("Search cancelled during profile {}", index + 1);
                    SearchOutcome::Cancelled
                }
                (None, None) => {
                    info!(
                        "Profile {} exhausted after {} candidates",
                        index + 1,
                        candidates
                    );
                    continue;
                }
            };

            statistics.elapsed_time = start.elapsed();
            return Ok(SearchResult {
                outcome,
                statistics,
            });
        }

        statistics.elapsed_time = start.elapsed();
        Ok(SearchResult {
            outcome: SearchOutcome::Exhausted,
            statistics,
        })
    }

    fn interrupted(&self, deadline: Option<Instant>) -> Option<Interrupt> {
        if self.cancel.is_cancelled() {
            Some(Interrupt::Cancelled)
        } else if deadline.is_some_and(|d| Instant::now() >= d) {
            Some(Interrupt::TimedOut)
        } else {
            None
        }
    }
}

/// Guess the next term of `sequence` with a fresh driver
pub fn guess(sequence: &Sequence, config: &SearchConfig) -> Result<SearchResult> {
    SearchDriver::new().search(sequence, config)
}
