//! Search result types and statistics

use crate::ir::Expression;
use crate::search::config::ComplexityProfile;
use crate::sequence::format_value;
use std::time::Duration;

/// How a search ended
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A formula reproduced every known value
    Found {
        expression: Expression,
        prediction: f64,
        /// Index into the profile ladder of the profile that found it
        profile_index: usize,
    },
    /// Every profile was searched without a match
    Exhausted,
    /// The deadline passed before a match was found
    TimedOut,
    /// The caller asked the search to stop
    Cancelled,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Counters for one profile's run
#[derive(Debug, Clone, Default)]
pub struct ProfileStatistics {
    pub profile: Option<ComplexityProfile>,
    /// Complete formulas produced by the enumerator
    pub candidates_evaluated: u64,
    /// Formulas rejected because a known value differed
    pub mismatched: u64,
    /// Formulas that never disagreed but could not predict
    pub inapplicable: u64,
    pub elapsed_time: Duration,
    /// Whether the enumerator ran to the end of this profile's space
    pub exhausted: bool,
}

impl ProfileStatistics {
    pub fn new(profile: &ComplexityProfile) -> Self {
        Self {
            profile: Some(profile.clone()),
            ..Default::default()
        }
    }

    /// Get candidates evaluated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.candidates_evaluated as f64 / secs
        }
    }
}

/// Statistics from a whole search
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// One entry per profile that was started
    pub profiles: Vec<ProfileStatistics>,
    /// Total time spent searching
    pub elapsed_time: Duration,
}

impl SearchStatistics {
    pub fn candidates_evaluated(&self) -> u64 {
        self.profiles.iter().map(|p| p.candidates_evaluated).sum()
    }

    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.candidates_evaluated() as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Time: {}\n", format_elapsed(self.elapsed_time)));
        s.push_str(&format!(
            "Candidates evaluated: {}\n",
            self.candidates_evaluated()
        ));
        s.push_str(&format!(
            "Throughput: {:.0} candidates/sec\n",
            self.throughput()
        ));
        for (n, stats) in self.profiles.iter().enumerate() {
            s.push_str(&format!("Profile {}:", n + 1));
            if let Some(ref profile) = stats.profile {
                s.push_str(&format!(" {}", profile));
            }
            s.push('\n');
            s.push_str(&format!(
                "  candidates: {}, mismatched: {}, inapplicable: {}, time: {:.2?}{}\n",
                stats.candidates_evaluated,
                stats.mismatched,
                stats.inapplicable,
                stats.elapsed_time,
                if stats.exhausted { ", exhausted" } else { "" }
            ));
        }
        s
    }
}

/// Elapsed time as `HH:MM:SS.mmm`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        elapsed.subsec_millis()
    )
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub statistics: SearchStatistics,
}

impl SearchResult {
    pub fn expression(&self) -> Option<&Expression> {
        match &self.outcome {
            SearchOutcome::Found { expression, .. } => Some(expression),
            _ => None,
        }
    }

    pub fn prediction(&self) -> Option<f64> {
        match self.outcome {
            SearchOutcome::Found { prediction, .. } => Some(prediction),
            _ => None,
        }
    }
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            SearchOutcome::Found {
                expression,
                prediction,
                profile_index,
            } => {
                writeln!(f, "Got it! The next number is {}", format_value(*prediction))?;
                writeln!(f, "Reverse Polish: S(i) = {}", expression)?;
                if let Some(infix) = expression.to_infix() {
                    writeln!(f, "Infix:          S(i) = {}", infix)?;
                }
                writeln!(f, "Found with profile {}", profile_index + 1)?;
            }
            SearchOutcome::Exhausted => {
                writeln!(f, "Sorry, I couldn't work out the next number.")?;
            }
            SearchOutcome::TimedOut => {
                writeln!(f, "Gave up: the search timed out.")?;
            }
            SearchOutcome::Cancelled => {
                writeln!(f, "Search cancelled.")?;
            }
        }
        write!(f, "Took {}.", format_elapsed(self.statistics.elapsed_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Item, OperatorKind};

    fn found() -> SearchResult {
        SearchResult {
            outcome: SearchOutcome::Found {
                expression: Expression::new(vec![
                    Item::PriorValue(0),
                    Item::PriorValue(1),
                    Item::Operator(OperatorKind::Add),
                ]),
                prediction: 144.0,
                profile_index: 0,
            },
            statistics: SearchStatistics::default(),
        }
    }

    #[test]
    fn test_found_accessors() {
        let result = found();
        assert!(result.outcome.is_found());
        assert_eq!(result.prediction(), Some(144.0));
        assert_eq!(result.expression().unwrap().len(), 3);
    }

    #[test]
    fn test_exhausted_accessors() {
        let result = SearchResult {
            outcome: SearchOutcome::Exhausted,
            statistics: SearchStatistics::default(),
        };
        assert!(!result.outcome.is_found());
        assert_eq!(result.prediction(), None);
        assert!(result.expression().is_none());
    }

    #[test]
    fn test_display_found() {
        let text = found().to_string();
        assert!(text.contains("The next number is 144"));
        assert!(text.contains("S(i) = S(i-1) S(i-2) +"));
        assert!(text.contains("S(i) = S(i-1) + S(i-2)"));
        assert!(text.contains("profile 1"));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(3_723_045)), "01:02:03.045");
        assert_eq!(format_elapsed(Duration::ZERO), "00:00:00.000");
    }

    #[test]
    fn test_statistics_totals() {
        let mut stats = SearchStatistics::default();
        stats.profiles.push(ProfileStatistics {
            candidates_evaluated: 600,
            ..Default::default()
        });
        stats.profiles.push(ProfileStatistics {
            candidates_evaluated: 400,
            ..Default::default()
        });
        stats.elapsed_time = Duration::from_secs(2);

        assert_eq!(stats.candidates_evaluated(), 1000);
        assert!((stats.throughput() - 500.0).abs() < 1e-10);
        assert!(stats.format_summary().contains("Profile 2:"));
    }

    #[test]
    fn test_statistics_zero_division() {
        let stats = SearchStatistics::default();
        assert_eq!(stats.throughput(), 0.0);
        assert_eq!(ProfileStatistics::default().throughput(), 0.0);
    }
}
