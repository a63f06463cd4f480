//! Search for a formula that reproduces a sequence
//!
//! The search walks a ladder of complexity profiles, cheapest first:
//! - Enumerator: depth-first generation of postfix formulas within a profile
//! - Pruning: rules that skip formulas equivalent to ones already visited
//! - Driver: evaluates each candidate and stops at the first match

pub mod cancel;
pub mod config;
pub mod driver;
pub mod enumerator;
pub mod pruning;
pub mod result;

pub use cancel::CancelToken;
pub use config::{ComplexityProfile, SearchConfig, load_profiles, parse_operators};
pub use driver::{SearchDriver, guess};
pub use enumerator::Enumerator;
pub use result::{SearchOutcome, SearchResult, SearchStatistics, format_elapsed};
