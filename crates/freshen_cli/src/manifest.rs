//! Loading repository descriptors from a manifest file.
//!
//! TOML manifests hold `[[repo]]` tables; files ending in `.json` hold a JSON
//! array of the same objects:
//!
//! ```toml
//! [[repo]]
//! root = "github.com/gopherjs/gopherjs"
//! local_revision = "87bf7e4"
//! remote_revision = "29dd054"
//!
//! [[repo]]
//! root = "golang.org/x/image"
//! remote_url = "https://go.googlesource.com/image"
//! local_revision = "f510ad8"
//! remote_revision = "e6cbe15"
//! ```

use std::path::Path;

use freshen::RepositoryDescriptor;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct TomlManifest {
    #[serde(default)]
    repo: Vec<RepositoryDescriptor>,
}

/// Read the descriptors listed in `path`.
///
/// Descriptors whose local revision already matches the remote one are
/// dropped; there is nothing to explain for them.
pub(crate) fn load_manifest(
    path: &Path,
) -> Result<Vec<RepositoryDescriptor>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read manifest {}: {}", path.display(), e))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let descriptors = if is_json {
        parse_json(&content)
    } else {
        parse_toml(&content)
    }
    .map_err(|e| format!("Invalid manifest {}: {}", path.display(), e))?;

    let total = descriptors.len();
    let outdated: Vec<_> = descriptors
        .into_iter()
        .filter(|d| {
            if d.is_up_to_date() {
                tracing::debug!(root = %d.root, "Skipping up-to-date repository");
                false
            } else {
                true
            }
        })
        .collect();

    tracing::info!(
        manifest = %path.display(),
        total,
        outdated = outdated.len(),
        "Loaded manifest"
    );
    Ok(outdated)
}

fn parse_json(content: &str) -> Result<Vec<RepositoryDescriptor>, Box<dyn std::error::Error>> {
    Ok(serde_json::from_str(content)?)
}

fn parse_toml(content: &str) -> Result<Vec<RepositoryDescriptor>, Box<dyn std::error::Error>> {
    let manifest: TomlManifest = toml::from_str(content)?;
    Ok(manifest.repo)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_manifest(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(content.as_bytes()).expect("write manifest");
        file
    }

    #[test]
    fn test_toml_manifest() {
        let file = write_manifest(
            ".toml",
            r#"
            [[repo]]
            root = "github.com/gopherjs/gopherjs"
            local_revision = "aaa"
            remote_revision = "bbb"

            [[repo]]
            root = "golang.org/x/image"
            remote_url = "https://go.googlesource.com/image"
            local_revision = "ccc"
            remote_revision = "ddd"
        "#,
        );

        let repos = load_manifest(file.path()).expect("manifest should load");
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].root, "github.com/gopherjs/gopherjs");
        assert_eq!(repos[0].remote_url, "");
        assert_eq!(repos[1].remote_url, "https://go.googlesource.com/image");
    }

    #[test]
    fn test_json_manifest() {
        let file = write_manifest(
            ".json",
            r#"[{"root":"gopkg.in/yaml.v2","local_revision":"a","remote_revision":"b"}]"#,
        );
        let repos = load_manifest(file.path()).expect("manifest should load");
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].root, "gopkg.in/yaml.v2");
    }

    #[test]
    fn test_up_to_date_repos_are_dropped() {
        let file = write_manifest(
            ".toml",
            r#"
            [[repo]]
            root = "github.com/a/current"
            local_revision = "same"
            remote_revision = "same"

            [[repo]]
            root = "github.com/a/behind"
            local_revision = "old"
            remote_revision = "new"
        "#,
        );
        let repos = load_manifest(file.path()).expect("manifest should load");
        let roots: Vec<_> = repos.iter().map(|r| r.root.as_str()).collect();
        assert_eq!(roots, vec!["github.com/a/behind"]);
    }

    #[test]
    fn test_empty_toml_manifest() {
        let file = write_manifest(".toml", "");
        assert!(load_manifest(file.path()).expect("empty is fine").is_empty());
    }

    #[test]
    fn test_missing_field_is_reported_with_path() {
        let file = write_manifest(".toml", "[[repo]]\nroot = \"github.com/a/b\"\n");
        let err = load_manifest(file.path()).expect_err("missing revisions");
        assert!(err.to_string().contains("Invalid manifest"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_manifest(Path::new("/definitely/not/here.toml")).expect_err("missing");
        assert!(err.to_string().contains("Failed to read manifest"));
    }
}
