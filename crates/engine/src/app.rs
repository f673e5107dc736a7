//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{BroadcastPort, LocalRandomPort, RemoteRandomPort, RollConfigRepo},
    resilient_random::ResilientRandomSource,
};
use crate::use_cases;
use crate::use_cases::dice::{AudienceBroadcaster, DieResolver, RollBatchCoordinator, RollDice};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub dice: use_cases::DiceUseCases,
}

impl App {
    /// Wire the use cases onto their ports.
    pub fn new(
        remote_random: Arc<dyn RemoteRandomPort>,
        local_random: Arc<dyn LocalRandomPort>,
        roll_config: Arc<dyn RollConfigRepo>,
        broadcast: Arc<dyn BroadcastPort>,
    ) -> Self {
        let random = Arc::new(ResilientRandomSource::new(remote_random, local_random));
        let resolver = Arc::new(DieResolver::new(random));
        let coordinator = Arc::new(RollBatchCoordinator::new(resolver));
        let broadcaster = Arc::new(AudienceBroadcaster::new(broadcast));

        let roll = Arc::new(RollDice::new(coordinator, broadcaster, roll_config));

        Self {
            use_cases: UseCases {
                dice: use_cases::DiceUseCases::new(roll),
            },
        }
    }
}
