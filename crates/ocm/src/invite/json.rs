//! File-backed invite manager.
//!
//! A single JSON document holds all invites and accepted users. Every
//! mutation rewrites the whole document while holding the manager's
//! mutex, so there is at most one writer at any time. The rewrite is
//! not atomic against crashes; a crash mid-write can truncate the
//! file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use common::user::{User, UserId};

use crate::provider::ProviderInfo;
use crate::registry::{string_option, u64_option, DriverError, Options};

use super::{post_invite_form, token, validate_token, InviteError, InviteToken, Manager};

const DEFAULT_INVITES_FILE: &str = "/var/tmp/reva/ocm-invites.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct InviteModel {
    #[serde(default)]
    invites: HashMap<String, InviteToken>,
    #[serde(default)]
    accepted_users: HashMap<String, Vec<User>>,
}

pub struct JsonManager {
    file: PathBuf,
    expiration_secs: u64,
    /// All access goes through this lock; mutations rewrite the whole
    /// file before releasing it.
    model: Mutex<InviteModel>,
    http: reqwest::Client,
}

impl JsonManager {
    /// Options: `file` (storage path), `expiration` (seconds an invite
    /// stays valid).
    pub fn from_options(options: &Options) -> Result<Self, DriverError> {
        let file = string_option(options, "file", DEFAULT_INVITES_FILE)?;
        let expiration_secs = u64_option(options, "expiration", token::DEFAULT_EXPIRATION_SECS)?;
        Self::load(file, expiration_secs)
    }

    /// Loads the model from disk, creating an empty file first if none
    /// exists.
    pub fn load(file: impl Into<PathBuf>, expiration_secs: u64) -> Result<Self, DriverError> {
        let file = file.into();
        if !file.exists() {
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&file, b"{}")?;
        }

        let data = std::fs::read(&file)?;
        let model: InviteModel = serde_json::from_slice(&data)?;

        Ok(Self {
            file,
            expiration_secs,
            model: Mutex::new(model),
            http: reqwest::Client::new(),
        })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    async fn save(&self, model: &InviteModel) -> Result<(), InviteError> {
        let data = serde_json::to_vec(model)?;
        tokio::fs::write(&self.file, data).await?;
        Ok(())
    }
}

#[async_trait]
impl Manager for JsonManager {
    async fn generate_token(&self, user: &User) -> Result<InviteToken, InviteError> {
        let invite = token::create_token(self.expiration_secs, &user.id);

        let mut model = self.model.lock().await;
        model.invites.insert(invite.token.clone(), invite.clone());
        self.save(&model).await?;

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
        let mut model = self.model.lock().await;
        let stored = validate_token(model.invites.get(&invite.token), invite)?;

        let user_key = stored.user_id.opaque_id.clone();
        let users = model.accepted_users.entry(user_key).or_default();
        if users
            .iter()
            .any(|u| u.id.opaque_id == remote_user.id.opaque_id && u.id.idp == remote_user.id.idp)
        {
            return Err(InviteError::AlreadyAccepted);
        }
        users.push(remote_user.clone());

        self.save(&model).await?;
        Ok(())
    }

    async fn get_remote_user(
        &self,
        user: &User,
        remote_user_id: &UserId,
    ) -> Result<User, InviteError> {
        let model = self.model.lock().await;
        model
            .accepted_users
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

#[cfg(test)]
mod tests {
    use super::*;

    fn local_user() -> User {
        User {
            id: UserId::new("https://idp.example.org", "einstein"),
            username: "einstein".to_string(),
            mail: "einstein@example.org".to_string(),
            display_name: "Albert Einstein".to_string(),
        }
    }

    fn remote_user() -> User {
        User {
            id: UserId::new("https://peer.example.org", "marie"),
            username: "marie".to_string(),
            mail: "marie@peer.example.org".to_string(),
            display_name: "Marie Curie".to_string(),
        }
    }

    #[tokio::test]
    async fn test_creates_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("state/invites.json");

        let manager = JsonManager::load(&path, 3600).unwrap();
        assert!(manager.file().exists());
    }

    #[tokio::test]
    async fn test_state_survives_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("invites.json");
        let inviter = local_user();
        let invitee = remote_user();

        let invite = {
            let manager = JsonManager::load(&path, 3600).unwrap();
            let invite = manager.generate_token(&inviter).await.unwrap();
            manager.accept_invite(&invite, &invitee).await.unwrap();
            invite
        };

        // a fresh manager sees everything the previous one persisted
        let manager = JsonManager::load(&path, 3600).unwrap();
        let found = manager
            .get_remote_user(&inviter, &invitee.id)
            .await
            .unwrap();
        assert_eq!(found, invitee);

        let err = manager
            .accept_invite(&invite, &invitee)
            .await
            .unwrap_err();
        assert!(matches!(err, InviteError::AlreadyAccepted));
    }

    #[tokio::test]
    async fn test_document_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("invites.json");

        let manager = JsonManager::load(&path, 3600).unwrap();
        let invite = manager.generate_token(&local_user()).await.unwrap();
        manager.accept_invite(&invite, &remote_user()).await.unwrap();

        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert!(doc["invites"][&invite.token].is_object());
        assert!(doc["accepted_users"]["einstein"].is_array());
    }

    #[tokio::test]
    async fn test_from_options_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("invites.json");

        let mut options = Options::new();
        options.insert(
            "file".to_string(),
            serde_json::json!(path.to_str().unwrap()),
        );
        options.insert("expiration".to_string(), serde_json::json!(60));

        let manager = JsonManager::from_options(&options).unwrap();
        assert_eq!(manager.file(), path);
    }
}
