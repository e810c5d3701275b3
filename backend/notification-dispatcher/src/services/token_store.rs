/// Device token lookup
///
/// Tokens are registered by the mobile apps into a PostgREST-exposed table
/// (`user_id`, `token`). This service only reads from it.
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::StoreConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store request failed: {0}")]
    Request(String),

    #[error("token store returned status {0}: {1}")]
    Status(u16, String),

    #[error("expected at most one token row, got {0}")]
    MultipleRows(usize),

    #[error("failed to decode token rows: {0}")]
    Decode(String),
}

/// Read-only access to registered device tokens
#[async_trait]
pub trait DeviceTokenStore: Send + Sync {
    /// At most one token per recipient; blank tokens count as none
    async fn find_token(&self, recipient_id: &str) -> Result<Option<String>, StoreError>;
}

#[derive(Debug, Deserialize)]
struct TokenRow {
    token: Option<String>,
}

/// Supabase (PostgREST) backed token store
pub struct SupabaseTokenStore {
    base_url: String,
    service_role_key: String,
    table: String,
    http_client: reqwest::Client,
}

impl SupabaseTokenStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http_client: reqwest::Client, config: &StoreConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            service_role_key: config.service_role_key.clone(),
            table: config.table.clone(),
            http_client,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl DeviceTokenStore for SupabaseTokenStore {
    async fn find_token(&self, recipient_id: &str) -> Result<Option<String>, StoreError> {
        let user_filter = format!("eq.{}", recipient_id);

        let response = self
            .http_client
            .get(self.table_url())
            .query(&[("select", "token"), ("user_id", user_filter.as_str())])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status(status.as_u16(), body));
        }

        let rows: Vec<TokenRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        debug!(rows = rows.len(), "Fetched device token rows");

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows
                .into_iter()
                .next()
                .and_then(|row| row.token)
                .filter(|token| !token.is_empty())),
            n => Err(StoreError::MultipleRows(n)),
        }
    }
}
