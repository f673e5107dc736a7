//! Audience fan-out for roll events.

use std::sync::Arc;

use sheetroll_domain::{DieResult, Requester, ResolvedBatch};
use sheetroll_shared::{DieSpec, Room, ServerMessage};

use crate::infrastructure::ports::BroadcastPort;

/// Publishes roll events to the rooms watching a requester.
///
/// Publishing is fire-and-forget: a failed delivery is logged and never
/// affects the roll.
pub struct AudienceBroadcaster {
    port: Arc<dyn BroadcastPort>,
}

impl AudienceBroadcaster {
    pub fn new(port: Arc<dyn BroadcastPort>) -> Self {
        Self { port }
    }

    /// Tell the requester's public display a roll is in flight.
    pub async fn announce_rolling(&self, requester: &Requester) {
        self.send(Room::Portrait(requester.id()), ServerMessage::DiceRoll)
            .await;
    }

    /// Publish a resolved batch to every room watching `requester`.
    ///
    /// The admin console gets the raw specs with the full results; the public
    /// display gets no specs and, for multi-entry batches, only the total.
    pub async fn publish_results(
        &self,
        requester: &Requester,
        dices: &[DieSpec],
        batch: &ResolvedBatch,
    ) {
        for audience in requester.audiences() {
            // The requester reads its results from the roll response.
            let Some(room) = Room::for_audience(audience, requester) else {
                continue;
            };

            let message = match room {
                Room::Admin => ServerMessage::DiceResult {
                    player_id: requester.id(),
                    dices: dices.to_vec(),
                    results: batch.results().to_vec(),
                },
                Room::Portrait(_) if batch.is_empty() => continue,
                Room::Portrait(_) => ServerMessage::DiceResult {
                    player_id: requester.id(),
                    dices: Vec::new(),
                    results: public_results(batch),
                },
            };

            self.send(room, message).await;
        }
    }

    async fn send(&self, room: Room, message: ServerMessage) {
        let event = message.event_name();
        if let Err(e) = self.port.publish(room, message).await {
            tracing::warn!(room = %room, event, error = %e, "Failed to publish roll event");
        }
    }
}

/// What a public display shows: a lone result as-is, otherwise the total.
fn public_results(batch: &ResolvedBatch) -> Vec<DieResult> {
    match batch.results() {
        [single] => vec![single.clone()],
        _ => vec![DieResult::new(batch.total())],
    }
}
