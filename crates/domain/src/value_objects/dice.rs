//! Dice request value objects and roll planning
//!
//! A [`DieRequest`] is one unit of a roll command: a number of dice, the faces
//! per die, and an optional reference rating used for success classification.
//! Planning a request decides whether it needs a draw at all; degenerate shapes
//! resolve to a fixed value and never reach a random source.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SuccessTier;

/// Largest integer a JSON number can carry without losing precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Error when a dice request cannot be resolved
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiceError {
    /// A field was missing, non-numeric, non-integral or out of range
    #[error("Invalid dice request: {0}")]
    InvalidRequest(String),
    /// Bounds are non-finite or empty once rounded inward
    #[error("Invalid draw range: [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
}

impl DiceError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

/// A validated request for one die roll, like "3d6" with an optional rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieRequest {
    count: i64,
    faces: i64,
    reference: Option<f64>,
}

impl DieRequest {
    /// Create a request from integer fields.
    ///
    /// `faces` may be zero or negative (those resolve to a fixed value), but a
    /// negative `count` is rejected.
    pub fn new(count: i64, faces: i64) -> Result<Self, DiceError> {
        if count < 0 {
            return Err(DiceError::invalid_request(format!(
                "count must not be negative, got {}",
                count
            )));
        }
        Ok(Self {
            count,
            faces,
            reference: None,
        })
    }

    /// Create a request from raw numbers as they arrive off the wire.
    ///
    /// `count` and `faces` must be finite integers; `reference` must be finite
    /// when present.
    pub fn from_numbers(
        count: f64,
        faces: f64,
        reference: Option<f64>,
    ) -> Result<Self, DiceError> {
        let count = integral("count", count)?;
        let faces = integral("faces", faces)?;
        let request = Self::new(count, faces)?;

        match reference {
            Some(value) if !value.is_finite() => Err(DiceError::invalid_request(format!(
                "reference must be a finite number, got {}",
                value
            ))),
            Some(value) => Ok(request.with_reference(value)),
            None => Ok(request),
        }
    }

    pub fn with_reference(mut self, reference: f64) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn faces(&self) -> i64 {
        self.faces
    }

    pub fn reference(&self) -> Option<f64> {
        self.reference
    }

    /// Decide how this request resolves.
    ///
    /// Checked in order:
    /// 1. `count == 0` or `faces < 1` - the raw faces value, unchanged
    /// 2. `faces == 1` - a one-sided die always lands on the count
    /// 3. otherwise a single draw in `[count, count * faces]`
    pub fn plan(&self) -> Result<RollPlan, DiceError> {
        if self.count == 0 || self.faces < 1 {
            return Ok(RollPlan::Fixed(self.faces));
        }

        if self.faces == 1 {
            return Ok(RollPlan::Fixed(self.count));
        }

        let max = self.count.checked_mul(self.faces).ok_or_else(|| {
            DiceError::invalid_request(format!(
                "{}d{} exceeds the supported range",
                self.count, self.faces
            ))
        })?;

        Ok(RollPlan::Draw(DrawRange::new(self.count, max)?))
    }
}

fn integral(field: &str, value: f64) -> Result<i64, DiceError> {
    if !value.is_finite() {
        return Err(DiceError::invalid_request(format!(
            "{} is not a number",
            field
        )));
    }
    if value.fract() != 0.0 || value.abs() > MAX_EXACT_INTEGER {
        return Err(DiceError::invalid_request(format!(
            "{} must be an integer, got {}",
            field, value
        )));
    }
    Ok(value as i64)
}

/// How a [`DieRequest`] resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollPlan {
    /// Degenerate shape: the value is known without drawing
    Fixed(i64),
    /// Draw one integer from the range
    Draw(DrawRange),
}

/// An inclusive integer range `[min, max]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawRange {
    min: i64,
    max: i64,
}

impl DrawRange {
    pub fn new(min: i64, max: i64) -> Result<Self, DiceError> {
        if min > max {
            return Err(DiceError::InvalidRange {
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(Self { min, max })
    }

    /// Build a range from possibly fractional bounds, rounding `min` up and
    /// `max` down so every value in the range lies within the original bounds.
    pub fn from_bounds(min: f64, max: f64) -> Result<Self, DiceError> {
        let invalid = || DiceError::InvalidRange { min, max };

        if !min.is_finite() || !max.is_finite() {
            return Err(invalid());
        }

        let low = min.ceil();
        let high = max.floor();
        if low > high || low.abs() > MAX_EXACT_INTEGER || high.abs() > MAX_EXACT_INTEGER {
            return Err(invalid());
        }

        Ok(Self {
            min: low as i64,
            max: high as i64,
        })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Outcome of one [`DieRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Aggregated numeric outcome
    pub roll: i64,
    /// Success tier, present only when classification ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SuccessTier>,
}

impl DieResult {
    pub fn new(roll: i64) -> Self {
        Self {
            roll,
            description: None,
        }
    }

    pub fn with_description(mut self, tier: SuccessTier) -> Self {
        self.description = Some(tier);
        self
    }
}

/// A fully resolved batch, index-aligned with the requests that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBatch {
    results: Vec<DieResult>,
    total: i64,
}

impl ResolvedBatch {
    pub fn new(results: Vec<DieResult>) -> Self {
        let total = results
            .iter()
            .fold(0i64, |acc, result| acc.saturating_add(result.roll));
        Self { results, total }
    }

    pub fn results(&self) -> &[DieResult] {
        &self.results
    }

    /// Sum of every `roll` in the batch
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<DieResult> {
        self.results
    }
}
