//! Number parsing and a running total for the summing exercise.

use rust_decimal::Decimal;
use thiserror::Error;

/// Words (besides an empty line) that end an input sequence.
pub const STOP_WORDS: &[&str] = &["done", "q", "quit"];

/// Whether a line ends the sequence of entries.
pub fn is_stop(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.is_empty() || STOP_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid input. Please enter a number.")]
    NotANumber(String),
    #[error("Invalid input. {0} is too large to add exactly.")]
    OutOfRange(String),
    #[error("Total would overflow; this number was not added.")]
    Overflow,
}

/// Parse one entry, accepting integers and decimals with an optional sign and
/// an optional `e` exponent.
pub fn parse_number(input: &str) -> Result<Decimal, NumberError> {
    let trimmed = input.trim();
    if let Ok(value) = trimmed.parse::<Decimal>() {
        return Ok(value);
    }
    if trimmed.contains(['e', 'E']) {
        if let Ok(value) = Decimal::from_scientific(trimmed) {
            return Ok(value);
        }
    }
    // A real number the decimal type cannot hold is reported as such.
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Err(NumberError::OutOfRange(trimmed.to_string())),
        _ => Err(NumberError::NotANumber(trimmed.to_string())),
    }
}

/// Accumulates entries without keeping them. The total is an exact decimal
/// sum of the entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningTotal {
    total: Decimal,
    count: usize,
}

impl RunningTotal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum a batch of values, stopping at the first overflow.
    pub fn from_values<I>(values: I) -> Result<Self, NumberError>
    where
        I: IntoIterator<Item = Decimal>,
    {
        let mut total = Self::new();
        for value in values {
            total.add(value)?;
        }
        Ok(total)
    }

    /// Add one value. On overflow the total is left unchanged.
    pub fn add(&mut self, value: Decimal) -> Result<(), NumberError> {
        self.total = self
            .total
            .checked_add(value)
            .ok_or(NumberError::Overflow)?;
        self.count += 1;
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Format a total without trailing fractional zeros: `2.50` prints as `2.5`,
/// `10.0` as `10`.
pub fn format_number(value: Decimal) -> String {
    value.normalize().to_string()
}
