use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BackendError;

/// Tool-license rental row as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    /// Worker the license is lent to.
    pub worker: String,
    /// Tool or license name.
    pub tool: String,
    /// End of the rental window.
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub returned: bool,
}

impl Rental {
    /// A rental is expired once its window has passed and the tool has
    /// not been handed back.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.returned && self.expires_at <= now
    }
}

/// Source of rental rows for the expiry watcher.
#[async_trait]
pub trait RentalSource: Send + Sync {
    /// Fetch the rentals that are currently out.
    async fn active_rentals(&self) -> Result<Vec<Rental>, BackendError>;
}
