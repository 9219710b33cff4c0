//! Path classification for the share folder.
//!
//! The gateway recognizes four path shapes under the hardcoded `/home`:
//!
//! - `/home/<ShareFolder>`: the share folder itself
//! - `/home/<ShareFolder>/<name>`: a share name (a mount point backed
//!   by a reference resource)
//! - `/home/<ShareFolder>/<name>/<rest...>`: a share child; the first
//!   three segments form the share name, the remainder is the child
//!   sub-path
//! - anything else: a plain path, forwarded without rewriting
//!
//! Classification is pure string work: it never touches the network and
//! is oblivious to whether the named share actually exists.

/// The home prefix is hardcoded; only the share folder name below it is
/// configurable.
pub const HOME: &str = "/home";

/// The shape of a path relative to the share folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePath {
    Plain,
    ShareFolder,
    ShareName,
    ShareChild,
}

#[derive(Debug, thiserror::Error)]
#[error("path is not a share child: {0}")]
pub struct SplitShareError(pub String);

/// Classifies paths against a configured share folder name.
#[derive(Debug, Clone)]
pub struct ShareLayout {
    share_folder: String,
}

impl ShareLayout {
    pub fn new(share_folder: &str) -> Self {
        Self {
            share_folder: share_folder.trim_matches('/').to_string(),
        }
    }

    /// The full path of the share folder, e.g. `/home/MyShares`.
    pub fn share_folder_path(&self) -> String {
        path_join(&[HOME, &self.share_folder])
    }

    pub fn classify(&self, p: &str) -> SharePath {
        let parts = split_segments(p);
        if parts.len() < 2 || parts[0] != "home" || parts[1] != self.share_folder {
            return SharePath::Plain;
        }
        match parts.len() {
            2 => SharePath::ShareFolder,
            3 if !parts[2].is_empty() => SharePath::ShareName,
            4 if !parts[3].is_empty() => SharePath::ShareChild,
            _ => SharePath::Plain,
        }
    }

    /// Splits a share-child path into `(share_name, share_child)` where
    /// `share_name` is `/home/<ShareFolder>/<name>` and `share_child`
    /// the remaining sub-path.
    pub fn split_share(&self, p: &str) -> Result<(String, String), SplitShareError> {
        if self.classify(p) != SharePath::ShareChild {
            return Err(SplitShareError(p.to_string()));
        }
        let parts = split_segments(p);
        let share_name = path_join(&["/", parts[0], parts[1], parts[2]]);
        let share_child = path_join(&["/", parts[3]]);
        Ok((share_name, share_child))
    }
}

/// Trims surrounding slashes and splits into at most four segments;
/// everything past the third slash collapses into one remainder.
fn split_segments(p: &str) -> Vec<&str> {
    p.trim_matches('/').splitn(4, '/').collect()
}

/// Joins path elements into a normalized absolute path: segments are
/// separated by single slashes, empty elements disappear.
pub fn path_join(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined)
}

/// The last segment of a path, the whole path if it has none.
pub fn basename(p: &str) -> &str {
    p.trim_end_matches('/').rsplit('/').next().unwrap_or(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ShareLayout {
        ShareLayout::new("MyShares")
    }

    #[test]
    fn test_classify_plain() {
        let l = layout();
        assert_eq!(l.classify("/eos/user/a/file.txt"), SharePath::Plain);
        assert_eq!(l.classify("/home"), SharePath::Plain);
        assert_eq!(l.classify("/home/Documents/f"), SharePath::Plain);
        assert_eq!(l.classify("/"), SharePath::Plain);
        assert_eq!(l.classify(""), SharePath::Plain);
        // the share folder name must match exactly
        assert_eq!(l.classify("/home/MyShares2/photos"), SharePath::Plain);
        // and sit under /home
        assert_eq!(l.classify("/data/MyShares/photos"), SharePath::Plain);
    }

    #[test]
    fn test_classify_share_shapes() {
        let l = layout();
        assert_eq!(l.classify("/home/MyShares"), SharePath::ShareFolder);
        assert_eq!(l.classify("/home/MyShares/"), SharePath::ShareFolder);
        assert_eq!(l.classify("/home/MyShares/photos"), SharePath::ShareName);
        assert_eq!(l.classify("/home/MyShares/photos/"), SharePath::ShareName);
        assert_eq!(
            l.classify("/home/MyShares/photos/Ibiza"),
            SharePath::ShareChild
        );
        assert_eq!(
            l.classify("/home/MyShares/photos/Ibiza/beach.png"),
            SharePath::ShareChild
        );
    }

    #[test]
    fn test_split_share() {
        let l = layout();
        let (name, child) = l.split_share("/home/MyShares/photos/Ibiza/beach.png").unwrap();
        assert_eq!(name, "/home/MyShares/photos");
        assert_eq!(child, "/Ibiza/beach.png");

        let (name, child) = l.split_share("/home/MyShares/photos/notes.txt").unwrap();
        assert_eq!(name, "/home/MyShares/photos");
        assert_eq!(child, "/notes.txt");
    }

    #[test]
    fn test_split_share_rejects_other_shapes() {
        let l = layout();
        assert!(l.split_share("/home/MyShares").is_err());
        assert!(l.split_share("/home/MyShares/photos").is_err());
        assert!(l.split_share("/eos/user/a/f").is_err());
    }

    #[test]
    fn test_split_share_joins_back() {
        let l = layout();
        for p in [
            "/home/MyShares/photos/Ibiza/beach.png",
            "/home/MyShares/photos/a",
            "/home/MyShares/docs/x/y/z/deep.txt",
        ] {
            let (name, child) = l.split_share(p).unwrap();
            assert_eq!(path_join(&[&name, &child]), path_join(&[p]));
        }
    }

    #[test]
    fn test_path_join() {
        assert_eq!(path_join(&["/eos/user/b/photos", "/Ibiza/beach.png"]),
            "/eos/user/b/photos/Ibiza/beach.png");
        assert_eq!(path_join(&["/", "home", "MyShares"]), "/home/MyShares");
        assert_eq!(path_join(&["/a//b/", "c"]), "/a/b/c");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/eos/user/b/photos"), "photos");
        assert_eq!(basename("/f.txt"), "f.txt");
        assert_eq!(basename("/a/b/"), "b");
    }
}
