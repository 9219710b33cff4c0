use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::user::UserId;

use super::ResourceId;

/// What kind of resource a provider returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Invalid,
    File,
    Container,
    /// A symbolic pointer into another namespace; the actual target
    /// lives in [`ResourceInfo::target`].
    Reference,
    Symlink,
}

/// Metadata for a single resource as reported by a storage provider.
///
/// The gateway mutates only `path` before returning infos to clients:
/// resolved share targets are mapped back into the caller's namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub path: String,
    /// Target URI, present only when `resource_type` is
    /// [`ResourceType::Reference`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub size: u64,
    /// Modification time, unix seconds.
    #[serde(default)]
    pub mtime: u64,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arbitrary_metadata: BTreeMap<String, String>,
}
