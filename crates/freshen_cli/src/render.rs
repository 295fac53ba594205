//! Terminal and NDJSON rendering of presentations.

use console::style;
use freshen::{Change, RepoPresenter};
use serde::{Deserialize, Serialize};

/// Output format for rendered presentations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Render one presentation in `format`, draining its change stream.
pub(crate) async fn render(presentation: &RepoPresenter, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(presentation).await,
        OutputFormat::Json => render_json(presentation).await,
    }
}

async fn render_text(presentation: &RepoPresenter) -> String {
    let mut out = String::new();

    let Some(presenter) = &presentation.presenter else {
        out.push_str(&format!(
            "{}  {}\n",
            style(presentation.root()).bold(),
            style("(no presenter)").dim()
        ));
        return out;
    };

    match presenter.home() {
        Some(home) => out.push_str(&format!(
            "{}  {}\n",
            style(presentation.root()).bold(),
            style(home).cyan()
        )),
        None => out.push_str(&format!("{}\n", style(presentation.root()).bold())),
    }
    out.push_str(&format!("  {} {}\n", style("image:").dim(), presenter.image()));

    if let Some(error) = presenter.error() {
        let text = error.to_string();
        let mut lines = text.lines();
        let first = lines.next().unwrap_or_default();
        out.push_str(&format!("  {} {}\n", style("error:").red().bold(), first));
        for line in lines {
            out.push_str(&format!("         {line}\n"));
        }
        return out;
    }

    match presenter.changes() {
        Some(mut changes) => {
            let mut count = 0usize;
            while let Some(change) = changes.next().await {
                count += 1;
                out.push_str(&change_line(&change));
            }
            if count == 0 {
                out.push_str(&format!("  {}\n", style("(no changes)").dim()));
            }
        }
        None => out.push_str(&format!("  {}\n", style("(changes unavailable)").dim())),
    }

    out
}

fn change_line(change: &Change) -> String {
    let mut line = format!("  - {}", change.message);
    if change.comments.count > 0 {
        let noun = if change.comments.count == 1 {
            "comment"
        } else {
            "comments"
        };
        line.push_str(&format!(
            " {}",
            style(format!("[{} {}]", change.comments.count, noun)).yellow()
        ));
    }
    line.push_str(&format!("\n    {}\n", style(&change.url).dim()));
    line
}

/// JSON shape of one presentation.
#[derive(Debug, Serialize)]
struct PresentationRecord<'a> {
    root: &'a str,
    remote_url: &'a str,
    local_revision: &'a str,
    remote_revision: &'a str,
    matched: bool,
    home: Option<String>,
    image: Option<String>,
    changes: Option<Vec<Change>>,
    error: Option<String>,
}

async fn render_json(presentation: &RepoPresenter) -> String {
    let repo = &presentation.repo;
    let presenter = presentation.presenter.as_deref();

    let changes = match presenter.and_then(|p| p.changes()) {
        Some(stream) => Some(stream.collect().await),
        None => None,
    };

    let record = PresentationRecord {
        root: &repo.root,
        remote_url: &repo.remote_url,
        local_revision: &repo.local_revision,
        remote_revision: &repo.remote_revision,
        matched: presenter.is_some(),
        home: presenter.and_then(|p| p.home()),
        image: presenter.map(|p| p.image()),
        changes,
        error: presenter.and_then(|p| p.error()).map(ToString::to_string),
    };

    serde_json::to_string(&record).unwrap_or_else(|e| {
        tracing::warn!(root = %repo.root, error = %e, "Failed to encode presentation");
        format!(r#"{{"root":{:?},"error":"encoding failed"}}"#, repo.root)
    })
}
