//! Invite management: minting tokens, forwarding them to a peer
//! provider, and tracking the remote users that accepted them.

mod json;
mod memory;
pub mod token;

pub use json::JsonManager;
pub use memory::MemoryManager;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use common::user::{User, UserId};

use crate::provider::{ocm_endpoint, ProviderInfo};
use crate::registry::Registry;

const ACCEPT_INVITE_ENDPOINT: &str = "invites/accept";

/// An invite minted by a local user, redeemable until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteToken {
    pub token: String,
    /// The local user that minted the invite.
    pub user_id: UserId,
    /// Expiry, unix seconds.
    pub expiration: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("invalid invite token: {0}")]
    InvalidToken(String),
    #[error("invite token expired: {0}")]
    TokenExpired(String),
    #[error("user already added to accepted users")]
    AlreadyAccepted,
    #[error("remote user not found: {0}")]
    UserNotFound(String),
    #[error("ocm endpoint not specified for mesh provider")]
    MissingOcmEndpoint,
    #[error("error sending accept post request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("accept post request failed: {status}: {body}")]
    Forward {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Manages the invite lifecycle on behalf of local users.
#[async_trait]
pub trait Manager: Send + Sync {
    /// Mints a new invite token for the user.
    async fn generate_token(&self, user: &User) -> Result<InviteToken, InviteError>;

    /// Hands the invite to the peer provider the invitee lives on.
    async fn forward_invite(
        &self,
        user: &User,
        invite: &InviteToken,
        origin_provider: &ProviderInfo,
    ) -> Result<(), InviteError>;

    /// Records that a remote user redeemed the invite.
    async fn accept_invite(&self, invite: &InviteToken, remote_user: &User)
        -> Result<(), InviteError>;

    /// Looks up a remote user previously accepted by the given local
    /// user.
    async fn get_remote_user(
        &self,
        user: &User,
        remote_user_id: &UserId,
    ) -> Result<User, InviteError>;
}

/// POSTs the invite as an HTTP form to `<peer>/invites/accept`.
///
/// Success is exactly HTTP 200; any other status is surfaced to the
/// caller verbatim.
pub(crate) async fn post_invite_form(
    client: &reqwest::Client,
    user: &User,
    invite: &InviteToken,
    origin_provider: &ProviderInfo,
) -> Result<(), InviteError> {
    let endpoint = ocm_endpoint(origin_provider).ok_or(InviteError::MissingOcmEndpoint)?;
    let form = [
        ("token", invite.token.as_str()),
        ("userID", user.id.opaque_id.as_str()),
        ("recipientProvider", user.id.idp.as_str()),
        ("email", user.mail.as_str()),
        ("name", user.display_name.as_str()),
    ];

    let response = client
        .post(format!("{}{}", endpoint, ACCEPT_INVITE_ENDPOINT))
        .form(&form)
        .send()
        .await?;

    if response.status() != reqwest::StatusCode::OK {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(InviteError::Forward { status, body });
    }

    Ok(())
}

/// Validates a presented token against the stored one.
pub(crate) fn validate_token(
    stored: Option<&InviteToken>,
    presented: &InviteToken,
) -> Result<InviteToken, InviteError> {
    let stored = stored.ok_or_else(|| InviteError::InvalidToken(presented.token.clone()))?;
    if chrono::Utc::now().timestamp() as u64 > stored.expiration {
        return Err(InviteError::TokenExpired(stored.token.clone()));
    }
    Ok(stored.clone())
}

/// Registers the built-in invite manager drivers. Called from the
/// composition root.
pub fn register_drivers(registry: &mut Registry<Box<dyn Manager>>) {
    registry.register("memory", |options| {
        Ok(Box::new(MemoryManager::from_options(options)?) as Box<dyn Manager>)
    });
    registry.register("json", |options| {
        Ok(Box::new(JsonManager::from_options(options)?) as Box<dyn Manager>)
    });
}
