use serde::{Deserialize, Serialize};

/// Identity and revision state of one locally checked-out package.
///
/// `root` is the import-path-like identity (for example
/// `github.com/gopherjs/gopherjs`) and is unique within a run. `remote_url`
/// is the URL of the underlying VCS remote and may be empty when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub root: String,
    #[serde(default)]
    pub remote_url: String,
    pub local_revision: String,
    pub remote_revision: String,
}

impl RepositoryDescriptor {
    pub fn new(
        root: impl Into<String>,
        remote_url: impl Into<String>,
        local_revision: impl Into<String>,
        remote_revision: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            remote_url: remote_url.into(),
            local_revision: local_revision.into(),
            remote_revision: remote_revision.into(),
        }
    }

    /// Whether the local checkout is already at the remote revision.
    #[inline]
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.local_revision == self.remote_revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_url_defaults_to_empty_when_missing() {
        let repo: RepositoryDescriptor = serde_json::from_value(serde_json::json!({
            "root": "github.com/gopherjs/gopherjs",
            "local_revision": "aaa",
            "remote_revision": "bbb"
        }))
        .expect("descriptor should deserialize");

        assert_eq!(repo.root, "github.com/gopherjs/gopherjs");
        assert!(repo.remote_url.is_empty());
        assert!(!repo.is_up_to_date());
    }

    #[test]
    fn up_to_date_compares_revisions() {
        let repo = RepositoryDescriptor::new("golang.org/x/image", "", "abc", "abc");
        assert!(repo.is_up_to_date());
    }
}
