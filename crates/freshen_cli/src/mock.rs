//! Offline demo run with canned presenters.
//!
//! Feeds a fixed set of presentations through a real [`Workspace`], one per
//! `delay`, so renderers can be exercised without network access.

use std::sync::Arc;
use std::time::Duration;

use freshen::{
    Change, Presentations, PresenterError, RepoPresenter, RepositoryDescriptor, StaticPresenter,
    Workspace,
};

const GOPHERJS_CHANGES: &[(&str, &str, u32)] = &[
    (
        "improved reflect support for blocking functions",
        "87bf7e405aa3df6df0dcbb9385713f997408d7b9",
        0,
    ),
    ("small cleanup", "77a838f965881a888416bae38f790f76bb1f64bd", 1),
    (
        "replaced js.This and js.Arguments by js.MakeFunc",
        "29dd054a0753760fe6e826ded0982a1bf69f702a",
        0,
    ),
];

const IMAGE_CHANGES: &[(&str, &str, u32)] = &[(
    "draw: generate code paths for image.Gray sources.",
    "f510ad81a1256ee96a2870647b74fa144a30c249",
    0,
)];

const INFLUXDB_CHANGES: &[(&str, &str, u32)] = &[
    ("Add link to \"How to Report Bugs Effectively\"", "6f398c1daf88fe34faede69f4404a334202acae8", 0),
    ("Update CONTRIBUTING.md", "37fa6056009dd4e84e9852ec50ce747e22375a99", 0),
    ("Update CONTRIBUTING.md", "87a6a8f15a13c5bf0ac60608edc1be570e7b023e", 0),
    ("Add note about requiring distro details", "901f91dc9559bebddf9b49607eac4ffd5caa4158", 4),
    ("Correct typo in change log", "8eefdba0d3ef3ab5a408073ae275d495b67c9535", 0),
    ("Correct markdown for URL", "41688ea6af78d45d051c7f6ac24a6468d36b9fad", 0),
    ("Update with PR1744", "db09b20d199c973a209e181c9e2f890969bd0b57", 0),
    ("Merge pull request #1770 from kylezh/dev", "a7c0d71d9ccadde17e7aa5cbba538b4a99670633", 0),
    ("Merge pull request #1787 from influxdb/measurement_batch_in_series", "40479784e2bd690b9021ec730287c426124230dd", 0),
    ("Store Measurement commands in batches", "a5749bebfb40239b8fd7b25d2ab1aa234c31c6b2", 0),
    ("Merge pull request #1786 from influxdb/remove-syslog", "2facd6158620e86262407ae3c4c131860f6953c5", 0),
    ("Merge pull request #1785 from influxdb/1784", "4a5fdcc9ea3bf6dc178f45758332b871e45b93eb", 0),
    ("Fix urlgen to work on Ubuntu", "666d09367690627f9c3212c1c25c566416c645da", 0),
    ("Remove unused syslog.go", "06bfd9c496becacff404e6768e7c0fd8ce9603c2", 0),
    ("Fix timezone abbreviation.", "06eac99c230dcc24bee9c3e1c1ef01725ce017ad", 0),
    ("Merge pull request #1782 from influxdb/more_contains_unit_tests", "fffbcf3fbe953e03e69ac1d22c142ecd6b3aba3b", 0),
    ("More shard \"contains\" unit tests", "ec93341f3fddd294f404fd1469fb651d4ba16e4c", 0),
    ("Update changelog for rc6 release", "65b4d1a060883a5901bd7c40492a3345d2eabc77", 0),
    ("Merge pull request #1781 from influxdb/single_shard_data", "5889b12832b2e43424951c92089db03f31df1078", 0),
    ("Refactor shard group time bound checking", "05d630bfb8041362c89249e3e6fabe6261cecc66", 0),
    ("Fix error when alter retention policy", "9f8639ded8778a270cc99cf2d9ee1a09f635d67d", 0),
];

fn commits(repo_url: &str, entries: &[(&str, &str, u32)]) -> Vec<Change> {
    entries
        .iter()
        .map(|(message, sha, comments)| {
            Change::new(*message, format!("{repo_url}/commit/{sha}"), *comments)
        })
        .collect()
}

fn descriptor(root: &str) -> Arc<RepositoryDescriptor> {
    Arc::new(RepositoryDescriptor::new(root, "", "", ""))
}

fn presentation(presenter: StaticPresenter, repo: Arc<RepositoryDescriptor>) -> RepoPresenter {
    RepoPresenter::new(repo, Some(Box::new(presenter)))
}

/// The canned presentations, in delivery order.
pub(crate) fn mock_presentations() -> Vec<RepoPresenter> {
    let gopherjs = descriptor("github.com/gopherjs/gopherjs");
    let image = descriptor("golang.org/x/image");
    let foobar = descriptor("golang.org/x/foobar");
    let influxdb = descriptor("github.com/influxdb/influxdb");

    vec![
        presentation(
            StaticPresenter::new(
                Arc::clone(&gopherjs),
                "https://avatars.githubusercontent.com/u/6654647?v=3",
            )
            .with_home("https://github.com/gopherjs/gopherjs")
            .with_changes(commits(
                "https://github.com/gopherjs/gopherjs",
                GOPHERJS_CHANGES,
            )),
            gopherjs,
        ),
        presentation(
            StaticPresenter::new(
                Arc::clone(&image),
                "https://avatars.githubusercontent.com/u/4314092?v=3",
            )
            .with_home("http://golang.org/x/image")
            .with_changes(commits("https://github.com/golang/image", IMAGE_CHANGES)),
            image,
        ),
        presentation(
            StaticPresenter::new(
                Arc::clone(&foobar),
                "https://avatars.githubusercontent.com/u/4314092?v=3",
            )
            .with_home("http://golang.org/x/foobar")
            .with_error(PresenterError::internal(
                "something went wrong\n\nnew lines are kept -    spaces are too.",
            )),
            foobar,
        ),
        presentation(
            StaticPresenter::new(
                Arc::clone(&influxdb),
                "https://avatars.githubusercontent.com/u/5713248?v=3",
            )
            .with_home("https://github.com/influxdb/influxdb")
            .with_changes(commits(
                "https://github.com/influxdb/influxdb",
                INFLUXDB_CHANGES,
            )),
            influxdb,
        ),
    ]
}

/// Present the canned presentations one per `delay`, then close the run.
pub(crate) fn run_mock(delay: Duration) -> Presentations {
    let (workspace, presentations) = Workspace::new();

    tokio::spawn(async move {
        for presentation in mock_presentations() {
            tokio::time::sleep(delay).await;
            if let Err(e) = workspace.present(presentation) {
                tracing::warn!(error = %e, "Mock presentation rejected");
            }
        }
        tokio::time::sleep(delay).await;
        if let Err(e) = workspace.done() {
            tracing::warn!(error = %e, "Mock workspace already done");
        }
    });

    presentations
}
