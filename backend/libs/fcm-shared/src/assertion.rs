use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::errors::FCMError;
use crate::models::{AssertionClaims, ServiceAccountKey};

/// Audience the FCM HTTP v1 endpoint accepts for self-signed JWTs
pub const FCM_AUDIENCE: &str = "https://fcm.googleapis.com/";

/// Lifetime of a minted assertion
pub const ASSERTION_TTL_SECS: i64 = 3600;

/// Signed bearer assertion for a single send call
#[derive(Debug, Clone)]
pub struct SignedAssertion {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Mint an RS256 assertion for the given service account
///
/// Issuer and subject are both the service account email.
pub fn mint_assertion(
    key: &ServiceAccountKey,
    now: DateTime<Utc>,
) -> Result<SignedAssertion, FCMError> {
    let iat = now.timestamp();
    let exp = (now + Duration::seconds(ASSERTION_TTL_SECS)).timestamp();

    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        sub: key.client_email.clone(),
        aud: FCM_AUDIENCE.to_string(),
        iat,
        exp,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| FCMError::KeyParseError(e.to_string()))?;

    let token = encode(&header, &claims, &encoding_key)
        .map_err(|e| FCMError::JwtEncodeError(e.to_string()))?;

    Ok(SignedAssertion {
        token,
        issued_at: iat,
        expires_at: exp,
    })
}
