use tracing::debug;

use crate::assertion::SignedAssertion;
use crate::errors::FCMError;
use crate::models::*;

/// Production FCM endpoint
pub const DEFAULT_FCM_BASE_URL: &str = "https://fcm.googleapis.com";

/// Firebase Cloud Messaging Client
///
/// Issues exactly one HTTP v1 send call per message. Retries and token
/// bookkeeping are left to the caller.
#[derive(Clone)]
pub struct FCMClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl FCMClient {
    /// Create new FCM client
    ///
    /// # Arguments
    /// * `base_url` - FCM API origin, normally [`DEFAULT_FCM_BASE_URL`]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Project-scoped send endpoint
    pub fn send_url(&self, project_id: &str) -> String {
        format!("{}/v1/projects/{}/messages:send", self.base_url, project_id)
    }

    /// Send a message and return the backend's status and payload
    ///
    /// Non-2xx statuses are not errors here; only transport failures are.
    pub async fn send(
        &self,
        project_id: &str,
        assertion: &SignedAssertion,
        message: &FcmMessage,
    ) -> Result<FcmSendOutcome, FCMError> {
        let url = self.send_url(project_id);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&assertion.token)
            .json(message)
            .send()
            .await
            .map_err(|e| FCMError::SendRequestError(e.to_string()))?;

        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|e| FCMError::ResponseParseError(e.to_string()))?;

        debug!(status, "FCM responded for project {}", project_id);

        Ok(FcmSendOutcome {
            status,
            body: parse_body(&raw),
        })
    }
}

fn parse_body(raw: &str) -> serde_json::Value {
    if raw.trim().is_empty() {
        return serde_json::Value::Null;
    }

    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn assertion() -> SignedAssertion {
        SignedAssertion {
            token: "signed.jwt.value".to_string(),
            issued_at: 0,
            expires_at: 3600,
        }
    }

    #[test]
    fn test_send_url_is_project_scoped() {
        let client = FCMClient::new("https://fcm.googleapis.com/");
        assert_eq!(
            client.send_url("demo"),
            "https://fcm.googleapis.com/v1/projects/demo/messages:send"
        );
    }

    #[test]
    fn test_parse_body_fallbacks() {
        assert_eq!(parse_body(""), serde_json::Value::Null);
        assert_eq!(parse_body("upstream down"), json!("upstream down"));
        assert_eq!(parse_body(r#"{"name":"x"}"#), json!({"name": "x"}));
    }

    #[tokio::test]
    async fn test_send_posts_bearer_authenticated_message() {
        let server = MockServer::start().await;
        let message = FcmMessage::to_topic(
            "news",
            FcmNotification::new("Hi", "There"),
            HashMap::new(),
        );

        Mock::given(method("POST"))
            .and(path("/v1/projects/demo/messages:send"))
            .and(header("authorization", "Bearer signed.jwt.value"))
            .and(body_json(json!({
                "message": {
                    "topic": "news",
                    "notification": { "title": "Hi", "body": "There" },
                    "data": {}
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "name": "projects/demo/messages/1" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = FCMClient::new(server.uri());
        let outcome = client.send("demo", &assertion(), &message).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.body["name"], "projects/demo/messages/1");
    }

    #[tokio::test]
    async fn test_send_reports_rejection_as_outcome() {
        let server = MockServer::start().await;
        let rejection = json!({ "error": { "code": 404, "status": "NOT_FOUND" } });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(rejection.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let message = FcmMessage::to_token(
            "tok123",
            FcmNotification::new("Hi", "There"),
            HashMap::new(),
        );
        let client = FCMClient::new(server.uri());
        let outcome = client.send("demo", &assertion(), &message).await.unwrap();

        assert_eq!(outcome.status, 404);
        assert_eq!(outcome.body, rejection);
    }
}
