//! Transfer tokens for the data-plane handoff.
//!
//! When a provider does not expose its data server directly, the
//! gateway signs the transfer target and points the client at the data
//! gateway instead. The data gateway verifies the token and proxies the
//! bytes. Only the target URI is signed; headers and method are not.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Fixed audience of transfer tokens, shared with the data gateway.
pub const TRANSFER_AUDIENCE: &str = "reva";

/// Claims bound into a transfer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferClaims {
    /// The signed transfer target URI.
    pub target: String,
    pub aud: String,
    /// Issued at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("error signing transfer token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("invalid transfer token: {0}")]
    Verify(#[source] jsonwebtoken::errors::Error),
}

/// Mints and verifies HMAC-SHA256 transfer tokens over a shared secret.
#[derive(Clone)]
pub struct TransferSigner {
    secret: String,
    expires_seconds: u64,
}

impl TransferSigner {
    pub fn new(secret: impl Into<String>, expires_seconds: u64) -> Self {
        Self {
            secret: secret.into(),
            expires_seconds,
        }
    }

    /// Signs the given transfer target into a short-lived bearer token.
    pub fn sign(&self, target: &str) -> Result<String, TransferError> {
        let now = Utc::now().timestamp();
        let claims = TransferClaims {
            target: target.to_string(),
            aud: TRANSFER_AUDIENCE.to_string(),
            iat: now,
            exp: now + self.expires_seconds as i64,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TransferError::Sign)
    }

    /// Verifies a token under the same secret, enforcing expiry and the
    /// fixed audience.
    pub fn verify(&self, token: &str) -> Result<TransferClaims, TransferError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TRANSFER_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "aud"]);
        validation.leeway = 0;

        decode::<TransferClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(TransferError::Verify)
    }
}

impl std::fmt::Debug for TransferSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferSigner")
            .field("expires_seconds", &self.expires_seconds)
            .finish_non_exhaustive()
    }
}
