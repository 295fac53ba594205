use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use freshen::{ProgressCallback, RunProgress};

/// Logging reporter using tracing for structured output.
///
/// Also keeps tallies so the caller can print a summary once the run ends.
#[derive(Debug, Default)]
pub(crate) struct LoggingReporter {
    unmatched: AtomicUsize,
    errored: AtomicUsize,
    failed: AtomicUsize,
}

impl LoggingReporter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn handle(&self, event: RunProgress) {
        match event {
            RunProgress::Dispatching { root } => {
                tracing::debug!(root = %root, "Dispatching");
            }

            RunProgress::Presented {
                root,
                matched,
                errored,
            } => {
                if !matched {
                    self.unmatched.fetch_add(1, Ordering::Relaxed);
                    tracing::info!(root = %root, "No presenter for repository");
                } else if errored {
                    self.errored.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(root = %root, "Presented with error");
                } else {
                    tracing::debug!(root = %root, "Presented");
                }
            }

            RunProgress::DuplicateSkipped { root } => {
                tracing::warn!(root = %root, "Duplicate repository skipped");
            }

            RunProgress::TaskFailed { root, error } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(root = %root, error = %error, "Presentation failed");
            }

            RunProgress::RunComplete { presented } => {
                tracing::info!(
                    presented,
                    unmatched = self.unmatched(),
                    errored = self.errored(),
                    failed = self.failed(),
                    "Run complete"
                );
            }
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub(crate) fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Arc::new(move |event| {
            reporter.handle(event);
        })
    }

    pub(crate) fn unmatched(&self) -> usize {
        self.unmatched.load(Ordering::Relaxed)
    }

    pub(crate) fn errored(&self) -> usize {
        self.errored.load(Ordering::Relaxed)
    }

    pub(crate) fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tallies_follow_events() {
        let reporter = Arc::new(LoggingReporter::new());
        let callback = reporter.as_callback();

        callback(RunProgress::Presented {
            root: "a".into(),
            matched: false,
            errored: false,
        });
        callback(RunProgress::Presented {
            root: "b".into(),
            matched: true,
            errored: true,
        });
        callback(RunProgress::Presented {
            root: "c".into(),
            matched: true,
            errored: false,
        });
        callback(RunProgress::TaskFailed {
            root: "d".into(),
            error: "Task panic".into(),
        });
        callback(RunProgress::RunComplete { presented: 3 });

        assert_eq!(reporter.unmatched(), 1);
        assert_eq!(reporter.errored(), 1);
        assert_eq!(reporter.failed(), 1);
    }
}
