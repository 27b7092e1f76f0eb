//! HTTP client for the backend's REST-style table endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use super::rentals::{Rental, RentalSource};
use super::BackendError;

static SHARED: OnceCell<Arc<BackendClient>> = OnceCell::new();

/// Configure the process-wide shared client. Construction happens once;
/// a second call fails instead of silently swapping the handle.
pub fn configure_shared(client: BackendClient) -> Result<Arc<BackendClient>, BackendError> {
    let client = Arc::new(client);
    SHARED
        .set(client.clone())
        .map_err(|_| BackendError::AlreadyConfigured)?;
    Ok(client)
}

/// The shared client, if one has been configured.
pub fn shared() -> Option<Arc<BackendClient>> {
    SHARED.get().cloned()
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RentalSource for BackendClient {
    async fn active_rentals(&self) -> Result<Vec<Rental>, BackendError> {
        let mut request = self
            .http
            .get(self.endpoint("rentals"))
            .query(&[("active", "true")]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}
