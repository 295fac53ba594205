//! Mapping of repository identities onto GitHub `(owner, repo)` pairs.
//!
//! Recognized conventions, checked in order:
//!
//! | convention        | match on     | example                                        |
//! |-------------------|--------------|------------------------------------------------|
//! | direct host       | root         | `github.com/owner/repo`                        |
//! | semver domain     | root         | `azul3d.org/pkg.v2` → `azul3d/pkg`             |
//! | package mirror    | root         | `gopkg.in/yaml.v2` → `go-yaml/yaml`            |
//! | underlying remote | remote URL   | `https://github.com/owner/repo.git`            |
//! | mirror host       | remote URL   | `https://go.googlesource.com/net` → `golang/net` |
//!
//! The first convention whose prefix matches decides. If its path has the
//! wrong shape the descriptor is not recognized at all.

use thiserror::Error;

use crate::descriptor::RepositoryDescriptor;

const GITHUB_PREFIX: &str = "github.com/";
const AZUL3D_PREFIX: &str = "azul3d.org/";
const GOPKG_IN_PREFIX: &str = "gopkg.in/";
const GITHUB_REMOTE_PREFIX: &str = "https://github.com/";
const GO_SOURCE_REMOTE_PREFIX: &str = "https://go.googlesource.com/";

/// Which convention a descriptor was recognized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    DirectHost,
    SemverDomain,
    PackageMirror,
    UnderlyingRemote,
    MirrorHost,
}

/// A GitHub repository resolved from a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubTarget {
    pub owner: String,
    pub repo: String,
    pub convention: Convention,
}

impl GitHubTarget {
    fn new(owner: &str, repo: &str, convention: Convention) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            convention,
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A recognized prefix whose path could not be mapped to `(owner, repo)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {convention:?} identity: {identity}")]
pub struct IdentityError {
    pub convention: Convention,
    pub identity: String,
}

impl IdentityError {
    fn new(convention: Convention, identity: &str) -> Self {
        Self {
            convention,
            identity: identity.to_string(),
        }
    }
}

/// Resolve a descriptor to a GitHub repository.
///
/// Returns `Ok(None)` when no convention applies and `Err` when one applies
/// but the identity is malformed.
pub fn resolve(repo: &RepositoryDescriptor) -> Result<Option<GitHubTarget>, IdentityError> {
    let root = repo.root.as_str();
    let remote = repo.remote_url.as_str();

    if root.starts_with(GITHUB_PREFIX) {
        return github_import_path(root).map(Some);
    }
    if let Some(rest) = root.strip_prefix(AZUL3D_PREFIX) {
        return azul3d_import_path(rest)
            .map(Some)
            .map_err(|()| IdentityError::new(Convention::SemverDomain, root));
    }
    if let Some(rest) = root.strip_prefix(GOPKG_IN_PREFIX) {
        return gopkg_in_import_path(rest)
            .map(Some)
            .map_err(|()| IdentityError::new(Convention::PackageMirror, root));
    }
    if remote.starts_with(GITHUB_REMOTE_PREFIX) {
        return github_remote_url(remote).map(Some);
    }
    if let Some(rest) = remote.strip_prefix(GO_SOURCE_REMOTE_PREFIX) {
        return go_source_remote_url(rest).map(Some);
    }

    Ok(None)
}

/// `github.com/owner/repo`: exactly three non-empty segments.
fn github_import_path(root: &str) -> Result<GitHubTarget, IdentityError> {
    match split_exact::<3>(root) {
        Some([_, owner, repo]) => Ok(GitHubTarget::new(owner, repo, Convention::DirectHost)),
        None => Err(IdentityError::new(Convention::DirectHost, root)),
    }
}

/// `azul3d.org/pkg.v2` → `github.com/azul3d/pkg`.
fn azul3d_import_path(rest: &str) -> Result<GitHubTarget, ()> {
    match split_exact::<1>(rest) {
        Some([pkg]) => Ok(GitHubTarget::new(
            "azul3d",
            strip_version(pkg)?,
            Convention::SemverDomain,
        )),
        None => Err(()),
    }
}

/// `gopkg.in/pkg.v3` → `github.com/go-pkg/pkg`,
/// `gopkg.in/user/pkg.v3` → `github.com/user/pkg`.
fn gopkg_in_import_path(rest: &str) -> Result<GitHubTarget, ()> {
    if let Some([pkg]) = split_exact::<1>(rest) {
        let name = strip_version(pkg)?;
        let owner = format!("go-{name}");
        return Ok(GitHubTarget::new(&owner, name, Convention::PackageMirror));
    }
    if let Some([user, pkg]) = split_exact::<2>(rest) {
        return Ok(GitHubTarget::new(
            user,
            strip_version(pkg)?,
            Convention::PackageMirror,
        ));
    }
    Err(())
}

/// `https://github.com/owner/repo(.git)`.
fn github_remote_url(remote: &str) -> Result<GitHubTarget, IdentityError> {
    let without_scheme = &remote["https://".len()..];
    let path = without_scheme
        .strip_suffix(".git")
        .unwrap_or(without_scheme);

    match split_exact::<3>(path) {
        Some([_, owner, repo]) => Ok(GitHubTarget::new(owner, repo, Convention::UnderlyingRemote)),
        None => Err(IdentityError::new(Convention::UnderlyingRemote, remote)),
    }
}

/// `https://go.googlesource.com/name` is mirrored at `github.com/golang/name`.
fn go_source_remote_url(rest: &str) -> Result<GitHubTarget, IdentityError> {
    let name = rest.strip_suffix(".git").unwrap_or(rest);
    match split_exact::<1>(name) {
        Some([name]) => Ok(GitHubTarget::new("golang", name, Convention::MirrorHost)),
        None => Err(IdentityError::new(
            Convention::MirrorHost,
            &format!("{GO_SOURCE_REMOTE_PREFIX}{rest}"),
        )),
    }
}

/// Drop the `.vN` suffix from a versioned package element.
fn strip_version(element: &str) -> Result<&str, ()> {
    match element.split('.').next() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(()),
    }
}

/// Split on `/` and require exactly `N` non-empty segments.
fn split_exact<const N: usize>(s: &str) -> Option<[&str; N]> {
    let mut out = [""; N];
    let mut parts = s.split('/');
    for slot in out.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() {
            return None;
        }
        *slot = part;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(out),
    }
}
