use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// Inbound send request, as posted by the caller
///
/// Every field is optional on the wire so that missing values surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationRequest {
    #[serde(rename = "userId", alias = "recipientId", default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub data: Option<HashMap<String, String>>,
}

/// A request that passed validation: content present, at least one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub recipient_id: Option<String>,
    pub topic: Option<String>,
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

impl NotificationRequest {
    /// Content is checked before targeting, so a request missing both gets the
    /// title/body message.
    pub fn validate(self) -> AppResult<ValidatedRequest> {
        let (title, body) = match (present(self.title), present(self.body)) {
            (Some(title), Some(body)) => (title, body),
            _ => return Err(AppError::missing_content()),
        };

        let recipient_id = present(self.recipient_id);
        let topic = present(self.topic);
        if recipient_id.is_none() && topic.is_none() {
            return Err(AppError::missing_target());
        }

        Ok(ValidatedRequest {
            recipient_id,
            topic,
            title,
            body,
            data: self.data.unwrap_or_default(),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
