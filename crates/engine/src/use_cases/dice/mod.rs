//! Dice use cases.
//!
//! Handles a player's roll command. The flow is:
//! 1. Every die spec is validated and planned (nothing is broadcast for a bad
//!    request, including one whose range overflows)
//! 2. The player's public display is told a roll is in flight
//! 3. Roll settings are read fresh from the platform's config
//! 4. All dice resolve concurrently, remote randomness first
//! 5. Results fan out to the admin console and the public display
//! 6. The requester gets the full result list back

use std::sync::Arc;

use sheetroll_domain::{DiceError, DieRequest, Requester, ResolvedBatch, RollConfig, ScoringRule};
use sheetroll_shared::DieSpec;

mod batch;
mod broadcast;
mod resolver;

pub use batch::RollBatchCoordinator;
pub use broadcast::AudienceBroadcaster;
pub use resolver::DieResolver;

use crate::infrastructure::ports::RollConfigRepo;

/// Container for dice use cases.
pub struct DiceUseCases {
    pub roll: Arc<RollDice>,
}

impl DiceUseCases {
    pub fn new(roll: Arc<RollDice>) -> Self {
        Self { roll }
    }
}

/// Roll a batch of dice for a player.
pub struct RollDice {
    coordinator: Arc<RollBatchCoordinator>,
    broadcaster: Arc<AudienceBroadcaster>,
    config: Arc<dyn RollConfigRepo>,
}

impl RollDice {
    pub fn new(
        coordinator: Arc<RollBatchCoordinator>,
        broadcaster: Arc<AudienceBroadcaster>,
        config: Arc<dyn RollConfigRepo>,
    ) -> Self {
        Self {
            coordinator,
            broadcaster,
            config,
        }
    }

    pub async fn execute(
        &self,
        requester: Requester,
        specs: Vec<DieSpec>,
        rule: Option<ScoringRule>,
    ) -> Result<ResolvedBatch, RollError> {
        let requests = specs
            .iter()
            .map(DieSpec::to_request)
            .collect::<Result<Vec<DieRequest>, DiceError>>()?;
        for request in &requests {
            request.plan()?;
        }

        self.broadcaster.announce_rolling(&requester).await;

        let config = match self.config.load().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read roll config, classification disabled");
                RollConfig::default()
            }
        };

        let batch = self
            .coordinator
            .resolve_batch(&requests, rule, config)
            .await?;

        tracing::info!(
            player_id = %requester.id(),
            admin = requester.is_admin(),
            dice = batch.len(),
            total = batch.total(),
            "Dice rolled"
        );

        self.broadcaster
            .publish_results(&requester, &specs, &batch)
            .await;

        Ok(batch)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RollError {
    #[error("{0}")]
    InvalidRequest(#[from] DiceError),
}
