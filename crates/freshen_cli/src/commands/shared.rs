use console::Term;
use freshen::Presentations;

use crate::render::{OutputFormat, render};
use crate::shutdown::is_shutdown_requested;

/// Render presentations to stdout as they arrive. Returns how many were
/// rendered.
///
/// Stops early when shutdown was requested; presentations still in flight
/// are dropped.
pub(crate) async fn render_presentations(
    mut presentations: Presentations,
    format: OutputFormat,
) -> Result<usize, Box<dyn std::error::Error>> {
    let term = Term::stdout();
    let mut rendered = 0;

    while let Some(presentation) = presentations.next().await {
        if is_shutdown_requested() {
            tracing::warn!(rendered, "Shutdown requested, stopping output");
            break;
        }

        let out = render(&presentation, format).await;
        match format {
            OutputFormat::Text => {
                term.write_str(&out)?;
                term.write_line("")?;
            }
            OutputFormat::Json => term.write_line(&out)?,
        }
        rendered += 1;
    }

    Ok(rendered)
}
