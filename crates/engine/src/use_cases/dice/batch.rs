//! Batch resolution.

use std::sync::Arc;

use futures_util::future::try_join_all;
use sheetroll_domain::{DiceError, DieRequest, ResolvedBatch, RollConfig, ScoringRule};

use super::resolver::DieResolver;

/// Resolves every request of a roll command concurrently.
///
/// Results are index-aligned with the requests regardless of completion
/// order. The first invalid request fails the whole batch.
pub struct RollBatchCoordinator {
    resolver: Arc<DieResolver>,
}

impl RollBatchCoordinator {
    pub fn new(resolver: Arc<DieResolver>) -> Self {
        Self { resolver }
    }

    pub async fn resolve_batch(
        &self,
        requests: &[DieRequest],
        rule: Option<ScoringRule>,
        config: RollConfig,
    ) -> Result<ResolvedBatch, DiceError> {
        let rule = rule.filter(|_| config.success_types_enabled);

        let results = try_join_all(requests.iter().map(|request| async move {
            let result = self.resolver.resolve(request).await?;
            Ok::<_, DiceError>(match (rule, request.reference()) {
                (Some(rule), Some(reference)) => {
                    let tier = rule.classify(reference, result.roll);
                    result.with_description(tier)
                }
                _ => result,
            })
        }))
        .await?;

        Ok(ResolvedBatch::new(results))
    }
}
