//! In-memory invite manager. State does not survive a restart; use the
//! file-backed variant where it must.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::user::{User, UserId};

use crate::provider::ProviderInfo;
use crate::registry::{u64_option, DriverError, Options};

use super::{post_invite_form, token, validate_token, InviteError, InviteToken, Manager};

pub struct MemoryManager {
    invites: RwLock<HashMap<String, InviteToken>>,
    accepted_users: RwLock<HashMap<String, Vec<User>>>,
    expiration_secs: u64,
    http: reqwest::Client,
}

impl MemoryManager {
    pub fn new(expiration_secs: u64) -> Self {
        Self {
            invites: RwLock::new(HashMap::new()),
            accepted_users: RwLock::new(HashMap::new()),
            expiration_secs,
            http: reqwest::Client::new(),
        }
    }

    /// Options: `expiration` (seconds an invite stays valid).
    pub fn from_options(options: &Options) -> Result<Self, DriverError> {
        let expiration_secs = u64_option(options, "expiration", token::DEFAULT_EXPIRATION_SECS)?;
        Ok(Self::new(expiration_secs))
    }
}

#[async_trait]
impl Manager for MemoryManager {
    async fn generate_token(&self, user: &User) -> Result<InviteToken, InviteError> {
        let invite = token::create_token(self.expiration_secs, &user.id);
        self.invites
            .write()
            .await
            .insert(invite.token.clone(), invite.clone());
        Ok(invite)
    }

    async fn forward_invite(
        &self,
        user: &User,
        invite: &InviteToken,
        origin_provider: &ProviderInfo,
    ) -> Result<(), InviteError> {
        post_invite_form(&self.http, user, invite, origin_provider).await
    }

    async fn accept_invite(
        &self,
        invite: &InviteToken,
        remote_user: &User,
    ) -> Result<(), InviteError> {
        let stored = {
            let invites = self.invites.read().await;
            validate_token(invites.get(&invite.token), invite)?
        };

        let user_key = stored.user_id.opaque_id.clone();
        let mut accepted = self.accepted_users.write().await;
        let users = accepted.entry(user_key).or_default();
        if users
            .iter()
            .any(|u| u.id.opaque_id == remote_user.id.opaque_id && u.id.idp == remote_user.id.idp)
        {
            return Err(InviteError::AlreadyAccepted);
        }
        users.push(remote_user.clone());
        Ok(())
    }

    async fn get_remote_user(
        &self,
        user: &User,
        remote_user_id: &UserId,
    ) -> Result<User, InviteError> {
        let accepted = self.accepted_users.read().await;
        accepted
            .get(&user.id.opaque_id)
            .and_then(|users| {
                users.iter().find(|u| {
                    u.id.opaque_id == remote_user_id.opaque_id
                        && (remote_user_id.idp.is_empty() || u.id.idp == remote_user_id.idp)
                })
            })
            .cloned()
            .ok_or_else(|| InviteError::UserNotFound(remote_user_id.opaque_id.clone()))
    }
}
