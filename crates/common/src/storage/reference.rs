use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a resource within a single storage provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    pub storage_id: String,
    pub opaque_id: String,
}

impl ResourceId {
    pub fn new(storage_id: impl Into<String>, opaque_id: impl Into<String>) -> Self {
        Self {
            storage_id: storage_id.into(),
            opaque_id: opaque_id.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.storage_id, self.opaque_id)
    }
}

/// A reference to a resource, exactly one of an absolute path or a
/// `(storage_id, opaque_id)` pair.
///
/// An empty path (or an id with an empty opaque id) does not name
/// anything; the gateway rejects such references when deriving the
/// effective path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    Path(String),
    Id(ResourceId),
}

impl Reference {
    pub fn path(p: impl Into<String>) -> Self {
        Reference::Path(p.into())
    }

    pub fn id(storage_id: impl Into<String>, opaque_id: impl Into<String>) -> Self {
        Reference::Id(ResourceId::new(storage_id, opaque_id))
    }

    pub fn as_path(&self) -> Option<&str> {
        match self {
            Reference::Path(p) => Some(p),
            Reference::Id(_) => None,
        }
    }

    pub fn as_id(&self) -> Option<&ResourceId> {
        match self {
            Reference::Path(_) => None,
            Reference::Id(id) => Some(id),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Path(p) => write!(f, "path:{}", p),
            Reference::Id(id) => write!(f, "id:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_roundtrip() {
        let by_path = Reference::path("/home/MyShares/photos");
        let json = serde_json::to_string(&by_path).unwrap();
        assert_eq!(serde_json::from_str::<Reference>(&json).unwrap(), by_path);

        let by_id = Reference::id("abc", "def");
        let json = serde_json::to_string(&by_id).unwrap();
        assert_eq!(serde_json::from_str::<Reference>(&json).unwrap(), by_id);
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(Reference::path("/eos/f").to_string(), "path:/eos/f");
        assert_eq!(Reference::id("abc", "def").to_string(), "id:abc/def");
    }
}
