//! Configuration types for the formula search

use crate::error::{Error, Result};
use crate::ir::{MAX_ITEMS_IN_EXPRESSION, OperatorKind};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use OperatorKind::{
    Add, Cube, DigitFromLeft, DigitFromRight, Divide, Multiply, Square, SquareRoot, Subtract,
};

/// One search budget: which items may appear and how many of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityProfile {
    /// Longest expression to try. `1 + 2 * 3` in postfix is 5 items.
    pub max_items: usize,
    /// Operators available in this attempt, in enumeration order
    pub operators: Vec<OperatorKind>,
    /// How far back formulas may look: 2 allows `S(i-1)` and `S(i-2)`
    pub max_back_reference: u8,
    /// How many constants are available: 3 allows 1, 2 and 3. Zero is
    /// never needed in a formula.
    pub constants: u8,
}

impl ComplexityProfile {
    pub fn new(
        max_items: usize,
        operators: Vec<OperatorKind>,
        max_back_reference: u8,
        constants: u8,
    ) -> Self {
        Self {
            max_items,
            operators,
            max_back_reference,
            constants,
        }
    }

    /// The default ladder: short formulas with common operators first, then
    /// longer formulas with more operators.
    pub fn escalating() -> Vec<ComplexityProfile> {
        vec![
            Self::new(3, vec![Add], 2, 1),
            Self::new(3, vec![Add, Subtract], 2, 2),
            Self::new(5, vec![Add, Subtract, Multiply, Divide], 2, 9),
            Self::new(10, vec![Add, Subtract, Multiply, Divide, Square], 2, 2),
            Self::new(12, vec![Add, Subtract, Multiply, Divide, Square], 2, 5),
            Self::new(
                20,
                vec![Add, Subtract, Multiply, Divide, Square, Cube, SquareRoot],
                4,
                9,
            ),
            Self::new(
                20,
                vec![
                    Add,
                    Subtract,
                    Multiply,
                    Divide,
                    Square,
                    Cube,
                    SquareRoot,
                    DigitFromLeft,
                    DigitFromRight,
                ],
                5,
                9,
            ),
        ]
    }

    pub fn has_operator(&self, op: OperatorKind) -> bool {
        self.operators.contains(&op)
    }

    /// Greatest arity among the active operators
    pub fn max_arity(&self) -> usize {
        self.operators.iter().map(|op| op.arity()).max().unwrap_or(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 || self.max_items > MAX_ITEMS_IN_EXPRESSION {
            return Err(Error::InvalidProfile(format!(
                "max_items must be between 1 and {}, got {}",
                MAX_ITEMS_IN_EXPRESSION, self.max_items
            )));
        }
        if self.operators.is_empty() {
            return Err(Error::InvalidProfile(
                "at least one operator is required".to_string(),
            ));
        }
        for (n, op) in self.operators.iter().enumerate() {
            if self.operators[..n].contains(op) {
                return Err(Error::InvalidProfile(format!(
                    "operator '{}' listed twice",
                    op
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ComplexityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ops: Vec<&str> = self.operators.iter().map(|op| op.symbol()).collect();
        write!(
            f,
            "up to {} items, operators [{}], back to S(i-{}), constants 1..{}",
            self.max_items,
            ops.join(" "),
            self.max_back_reference,
            self.constants
        )
    }
}

/// On-disk form of a profile ladder
#[derive(Debug, Deserialize)]
struct ProfileFile {
    profile: Vec<ProfileEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    max_items: usize,
    operators: Vec<String>,
    #[serde(default)]
    max_back_reference: u8,
    #[serde(default)]
    constants: u8,
}

impl TryFrom<ProfileEntry> for ComplexityProfile {
    type Error = Error;

    fn try_from(entry: ProfileEntry) -> Result<Self> {
        let operators = parse_operators(&entry.operators)?;
        let profile = ComplexityProfile::new(
            entry.max_items,
            operators,
            entry.max_back_reference,
            entry.constants,
        );
        profile.validate()?;
        Ok(profile)
    }
}

/// Parse operator tokens such as `["+", "-", "sqrt"]`
pub fn parse_operators<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<OperatorKind>> {
    tokens
        .iter()
        .map(|token| {
            token
                .as_ref()
                .parse::<OperatorKind>()
                .map_err(Error::UnknownOperator)
        })
        .collect()
}

/// Parse a TOML profile ladder:
///
/// ```toml
/// [[profile]]
/// max_items = 3
/// operators = ["+"]
/// max_back_reference = 2
/// constants = 1
/// ```
pub fn parse_profiles(text: &str) -> Result<Vec<ComplexityProfile>> {
    let file: ProfileFile = toml::from_str(text)?;
    if file.profile.is_empty() {
        return Err(Error::InvalidProfile(
            "profile file contains no profiles".to_string(),
        ));
    }
    file.profile.into_iter().map(ComplexityProfile::try_from).collect()
}

pub fn load_profiles(path: &Path) -> Result<Vec<ComplexityProfile>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ProfileFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profiles(&text)
}

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Profiles to try, cheapest first
    pub profiles: Vec<ComplexityProfile>,
    /// Overall timeout for the search
    pub timeout: Option<Duration>,
    /// Verbose output during search
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            profiles: ComplexityProfile::escalating(),
            timeout: None,
            verbose: false,
        }
    }
}

impl SearchConfig {
    pub fn with_profiles(mut self, profiles: Vec<ComplexityProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Keep only the first `count` profiles
    pub fn with_max_profiles(mut self, count: usize) -> Self {
        self.profiles.truncate(count);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.profiles.is_empty() {
            return Err(Error::InvalidProfile("no profiles to search".to_string()));
        }
        self.profiles.iter().try_for_each(ComplexityProfile::validate)
    }
}
