use serde::{Deserialize, Serialize};

/// Process-wide roll settings, owned by the sheet platform.
///
/// Read fresh for every roll request; the engine never caches or mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollConfig {
    /// Whether success-tier classification runs at all
    #[serde(default)]
    pub success_types_enabled: bool,
}

impl RollConfig {
    pub fn new(success_types_enabled: bool) -> Self {
        Self {
            success_types_enabled,
        }
    }
}
