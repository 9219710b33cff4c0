//! Invite token minting.

use chrono::Utc;
use uuid::Uuid;

use common::user::UserId;

use super::InviteToken;

/// Default invite validity, one day.
pub const DEFAULT_EXPIRATION_SECS: u64 = 24 * 60 * 60;

/// Mints a fresh invite token for the given user.
pub fn create_token(expiration_secs: u64, user_id: &UserId) -> InviteToken {
    InviteToken {
        token: Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        expiration: Utc::now().timestamp() as u64 + expiration_secs,
    }
}
