//! Parsing of sequences typed by the user

use crate::error::{Error, Result};
use crate::sequence::Sequence;
use crate::sequence::samples::find_sample;

/// What the user asked for on one line of input
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Guess(Sequence),
    Quit,
}

/// Parse numbers separated by commas and/or whitespace
pub fn parse_sequence(line: &str) -> Result<Sequence> {
    let values = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| Error::InvalidNumber(token.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    Sequence::new(values)
}

/// Interpret a line of interactive input: a quit command, a sample letter,
/// or a list of numbers
pub fn parse_request(line: &str) -> Result<Request> {
    let line = line.trim();
    let lower = line.to_lowercase();
    if lower == "q" || lower == "quit" {
        return Ok(Request::Quit);
    }

    let mut chars = line.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            let sample = find_sample(letter).ok_or(Error::UnknownSample(letter))?;
            return Sequence::new(sample.values.to_vec()).map(Request::Guess);
        }
    }

    parse_sequence(line).map(Request::Guess)
}
