use std::time::Duration;

use super::shared::render_presentations;
use crate::mock::run_mock;
use crate::render::OutputFormat;

/// Render the canned presentations with an artificial delay between each.
pub(crate) async fn handle_mock(
    delay: Duration,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(delay_ms = delay.as_millis() as u64, "Starting mock run");
    let rendered = render_presentations(run_mock(delay), format).await?;
    tracing::info!(rendered, "Mock run complete");
    Ok(())
}
