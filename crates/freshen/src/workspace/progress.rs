//! Progress reporting for pipeline runs.

use std::sync::Arc;

/// Progress events emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunProgress {
    /// A task started asking the registry about `root`.
    Dispatching { root: String },

    /// A presentation reached the consumer.
    Presented {
        root: String,
        /// Whether any provider recognized the descriptor.
        matched: bool,
        /// Whether the presenter holds an error.
        errored: bool,
    },

    /// A descriptor with an already seen root was ignored.
    DuplicateSkipped { root: String },

    /// A per-descriptor task panicked or was rejected by the workspace.
    TaskFailed { root: String, error: String },

    /// All tasks have finished.
    RunComplete { presented: usize },
}

/// Callback type for progress reporting.
///
/// Shared across every task of a run, hence reference counted.
pub type ProgressCallback = Arc<dyn Fn(RunProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: RunProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_with_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let callback: ProgressCallback = Arc::new(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        emit(Some(&callback), RunProgress::RunComplete { presented: 3 });
        emit(
            Some(&callback),
            RunProgress::Dispatching {
                root: "github.com/a/b".to_string(),
            },
        );

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emit_without_callback() {
        emit(None, RunProgress::RunComplete { presented: 0 });
    }

    #[test]
    fn test_callback_receives_event_payload() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let callback: ProgressCallback = Arc::new(move |event: RunProgress| {
            events_clone.lock().unwrap().push(event);
        });

        emit(
            Some(&callback),
            RunProgress::DuplicateSkipped {
                root: "gopkg.in/yaml.v2".to_string(),
            },
        );

        let events = events.lock().unwrap();
        assert_eq!(
            events.as_slice(),
            &[RunProgress::DuplicateSkipped {
                root: "gopkg.in/yaml.v2".to_string()
            }]
        );
    }
}
