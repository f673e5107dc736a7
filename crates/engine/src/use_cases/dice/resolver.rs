//! Single-die resolution.

use std::sync::Arc;

use sheetroll_domain::{DiceError, DieRequest, DieResult, RollPlan};

use crate::infrastructure::resilient_random::ResilientRandomSource;

/// Resolves one die request into a raw roll.
///
/// Degenerate requests are answered from the plan without touching the
/// random source; everything else is a single draw over `[count, count * faces]`.
pub struct DieResolver {
    random: Arc<ResilientRandomSource>,
}

impl DieResolver {
    pub fn new(random: Arc<ResilientRandomSource>) -> Self {
        Self { random }
    }

    pub async fn resolve(&self, request: &DieRequest) -> Result<DieResult, DiceError> {
        match request.plan()? {
            RollPlan::Fixed(roll) => Ok(DieResult::new(roll)),
            RollPlan::Draw(range) => {
                let draw = self.random.draw(range, 1).await;
                tracing::trace!(
                    count = request.count(),
                    faces = request.faces(),
                    origin = ?draw.origin,
                    "Die drawn"
                );
                Ok(DieResult::new(draw.sum()))
            }
        }
    }
}
