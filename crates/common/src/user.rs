use serde::{Deserialize, Serialize};

/// Identifies a user across identity providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId {
    /// The identity provider that owns the user, e.g. `https://cernbox.cern.ch`.
    #[serde(default)]
    pub idp: String,
    pub opaque_id: String,
}

impl UserId {
    pub fn new(idp: impl Into<String>, opaque_id: impl Into<String>) -> Self {
        Self {
            idp: idp.into(),
            opaque_id: opaque_id.into(),
        }
    }
}

/// The authenticated user on behalf of whom an operation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub display_name: String,
}
