/// FCM Shared Library
///
/// Firebase Cloud Messaging (HTTP v1) plumbing for the notification dispatcher.
///
/// It handles:
/// - Service account key parsing
/// - Self-signed RS256 assertions scoped to the FCM audience
/// - Topic- and token-addressed message construction
/// - A single-shot send client that reports the backend's raw verdict

pub mod assertion;
pub mod client;
pub mod errors;
pub mod models;

pub use assertion::{mint_assertion, SignedAssertion, ASSERTION_TTL_SECS, FCM_AUDIENCE};
pub use client::{FCMClient, DEFAULT_FCM_BASE_URL};
pub use errors::FCMError;
pub use models::{
    AssertionClaims, FcmMessage, FcmMessageContent, FcmNotification, FcmSendOutcome,
    ServiceAccountKey,
};
