//! Random source with local fallback
//!
//! Composes a remote true-random service with a local generator. The remote is
//! asked first; a declared failure (or a response that breaks the contract)
//! switches that call to the local generator. The caller always gets values,
//! and [`Draw::origin`] says where they came from.

use std::sync::Arc;

use sheetroll_domain::{DiceError, DrawRange};

use crate::infrastructure::ports::{LocalRandomPort, RandomSourceError, RemoteRandomPort};

/// Where a draw's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOrigin {
    /// The remote true-random service
    Remote,
    /// The local pseudo-random generator
    Local,
}

/// Values produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub values: Vec<i64>,
    pub origin: DrawOrigin,
}

impl Draw {
    pub fn sum(&self) -> i64 {
        self.values
            .iter()
            .fold(0i64, |acc, value| acc.saturating_add(*value))
    }
}

/// Remote-first random source that falls back to a local generator.
pub struct ResilientRandomSource {
    remote: Arc<dyn RemoteRandomPort>,
    local: Arc<dyn LocalRandomPort>,
}

impl ResilientRandomSource {
    pub fn new(remote: Arc<dyn RemoteRandomPort>, local: Arc<dyn LocalRandomPort>) -> Self {
        Self { remote, local }
    }

    /// `count` integers in `[min, max]`, with `min` rounded up and `max`
    /// rounded down first.
    pub async fn generate(&self, min: f64, max: f64, count: u32) -> Result<Draw, DiceError> {
        let range = DrawRange::from_bounds(min, max)?;
        Ok(self.draw(range, count).await)
    }

    /// `count` integers in `range`. Zero values are answered locally without
    /// consulting either generator.
    pub async fn draw(&self, range: DrawRange, count: u32) -> Draw {
        if count == 0 {
            return Draw {
                values: Vec::new(),
                origin: DrawOrigin::Local,
            };
        }

        let remote = self
            .remote
            .generate(range, count)
            .await
            .and_then(|values| check_values(range, count, values));

        match remote {
            Ok(values) => Draw {
                values,
                origin: DrawOrigin::Remote,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    min = range.min(),
                    max = range.max(),
                    count,
                    "Remote random source unavailable, using local generator"
                );
                Draw {
                    values: self.local.generate(range, count),
                    origin: DrawOrigin::Local,
                }
            }
        }
    }
}

fn check_values(
    range: DrawRange,
    count: u32,
    values: Vec<i64>,
) -> Result<Vec<i64>, RandomSourceError> {
    if values.len() != count as usize {
        return Err(RandomSourceError::InvalidResponse(format!(
            "expected {} values, got {}",
            count,
            values.len()
        )));
    }
    if let Some(value) = values.iter().find(|v| !range.contains(**v)) {
        return Err(RandomSourceError::InvalidResponse(format!(
            "value {} outside [{}, {}]",
            value,
            range.min(),
            range.max()
        )));
    }
    Ok(values)
}
