//! Repository port traits for configuration owned by the sheet platform.

use async_trait::async_trait;
use sheetroll_domain::RollConfig;

use super::error::RepoError;

// =============================================================================
// Settings Storage
// =============================================================================

/// Read-only view of the platform's roll settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RollConfigRepo: Send + Sync {
    async fn load(&self) -> Result<RollConfig, RepoError>;
}
