/// Notification dispatch
///
/// One request, one send: validate, resolve the target, sign, post. Each step
/// short-circuits on failure and nothing is retried here.
use chrono::Utc;
use fcm_shared::{mint_assertion, FCMClient, FcmMessage, FcmNotification, ServiceAccountKey};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{NotificationRequest, ValidatedRequest};
use crate::services::token_store::DeviceTokenStore;

pub struct NotificationDispatcher {
    config: Arc<Config>,
    token_store: Arc<dyn DeviceTokenStore>,
    fcm_client: FCMClient,
}

impl NotificationDispatcher {
    pub fn new(
        config: Arc<Config>,
        token_store: Arc<dyn DeviceTokenStore>,
        fcm_client: FCMClient,
    ) -> Self {
        Self {
            config,
            token_store,
            fcm_client,
        }
    }

    /// Parse a raw JSON body and dispatch it
    ///
    /// A body that is not valid JSON, or is `null`, is treated as an
    /// unexpected failure. Any other non-object body carries no fields.
    pub async fn parse_and_dispatch(&self, raw: &[u8]) -> AppResult<serde_json::Value> {
        let request = parse_request(raw)?;
        self.dispatch(request.validate()?).await
    }

    /// Send one notification and return the backend's success payload
    pub async fn dispatch(&self, request: ValidatedRequest) -> AppResult<serde_json::Value> {
        let token = match request.recipient_id.as_deref() {
            Some(recipient_id) => self.token_store.find_token(recipient_id).await?,
            None => None,
        };

        if token.is_none() && request.topic.is_none() {
            warn!(
                recipient_id = ?request.recipient_id,
                "No device token registered and no topic given"
            );
            return Err(AppError::NotFound);
        }

        let raw_key = self
            .config
            .firebase
            .service_account
            .as_deref()
            .ok_or(AppError::Config)?;
        let key = ServiceAccountKey::from_json(raw_key)?;
        let assertion = mint_assertion(&key, Utc::now())?;

        let message = build_message(request, token)?;

        let outcome = self
            .fcm_client
            .send(&key.project_id, &assertion, &message)
            .await?;

        if !outcome.is_success() {
            return Err(AppError::Backend {
                status: outcome.status,
                details: outcome.body,
            });
        }

        let addressed_to = if message.message.topic.is_some() { "topic" } else { "token" };
        info!(
            project_id = %key.project_id,
            addressed_to,
            "Push notification accepted by FCM"
        );

        Ok(outcome.body)
    }
}

fn parse_request(raw: &[u8]) -> AppResult<NotificationRequest> {
    match serde_json::from_slice::<serde_json::Value>(raw)? {
        serde_json::Value::Null => Err(AppError::Internal("request body is null".to_string())),
        value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(NotificationRequest::default()),
    }
}

/// Topic takes precedence over a resolved device token
fn build_message(request: ValidatedRequest, token: Option<String>) -> AppResult<FcmMessage> {
    let notification = FcmNotification::new(request.title, request.body);

    match (request.topic, token) {
        (Some(topic), _) => Ok(FcmMessage::to_topic(topic, notification, request.data)),
        (None, Some(token)) => Ok(FcmMessage::to_token(token, notification, request.data)),
        (None, None) => Err(AppError::NotFound),
    }
}
