use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::progress::{ProgressCallback, RunProgress, emit};
use super::{Presentations, Workspace};
use crate::descriptor::RepositoryDescriptor;
use crate::presenter::{ProviderRegistry, RepoPresenter};

/// Present every descriptor in `descriptors`.
///
/// Returns the consumer side immediately; the work happens on spawned tasks.
/// Must be called from within a tokio runtime.
pub fn run<I>(
    registry: Arc<ProviderRegistry>,
    descriptors: I,
    on_progress: Option<ProgressCallback>,
) -> Presentations
where
    I: IntoIterator<Item = RepositoryDescriptor>,
{
    let descriptors: Vec<_> = descriptors.into_iter().collect();
    let (tx, rx) = mpsc::channel(descriptors.len().max(1));
    for descriptor in descriptors {
        // Capacity covers every descriptor.
        let _ = tx.try_send(descriptor);
    }
    drop(tx);

    run_streaming(registry, rx, on_progress)
}

/// Present descriptors as they arrive on `descriptors`.
///
/// The run completes once the sender side is dropped and every spawned task
/// has finished. Descriptors whose root was already seen are skipped.
/// Must be called from within a tokio runtime.
pub fn run_streaming(
    registry: Arc<ProviderRegistry>,
    mut descriptors: mpsc::Receiver<RepositoryDescriptor>,
    on_progress: Option<ProgressCallback>,
) -> Presentations {
    let (workspace, presentations) = Workspace::new();

    tokio::spawn(async move {
        let mut seen = HashSet::new();
        let mut handles: Vec<(String, JoinHandle<bool>)> = Vec::new();

        while let Some(descriptor) = descriptors.recv().await {
            if !seen.insert(descriptor.root.clone()) {
                tracing::warn!(root = %descriptor.root, "Skipping duplicate descriptor");
                emit(
                    on_progress.as_ref(),
                    RunProgress::DuplicateSkipped {
                        root: descriptor.root,
                    },
                );
                continue;
            }

            let repo = Arc::new(descriptor);
            let handle = tokio::spawn(present_one(
                Arc::clone(&registry),
                workspace.clone(),
                Arc::clone(&repo),
                on_progress.clone(),
            ));
            handles.push((repo.root.clone(), handle));
        }

        tracing::debug!(tasks = handles.len(), "All descriptors dispatched");

        let mut presented = 0;
        for (root, handle) in handles {
            match handle.await {
                Ok(true) => presented += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(%root, error = %e, "Task panic");
                    emit(
                        on_progress.as_ref(),
                        RunProgress::TaskFailed {
                            root,
                            error: format!("Task panic: {e}"),
                        },
                    );
                }
            }
        }

        emit(on_progress.as_ref(), RunProgress::RunComplete { presented });
        tracing::info!(presented, "Run complete");

        if let Err(e) = workspace.done() {
            tracing::warn!(error = %e, "Workspace closed twice");
        }
    });

    presentations
}

/// Dispatch one descriptor and present the result. Returns whether the
/// workspace accepted it.
#[tracing::instrument(skip_all, fields(root = %repo.root))]
async fn present_one(
    registry: Arc<ProviderRegistry>,
    workspace: Workspace,
    repo: Arc<RepositoryDescriptor>,
    on_progress: Option<ProgressCallback>,
) -> bool {
    emit(
        on_progress.as_ref(),
        RunProgress::Dispatching {
            root: repo.root.clone(),
        },
    );

    let presenter = registry.dispatch(&repo).await;
    let matched = presenter.is_some();
    let errored = presenter.as_ref().is_some_and(|p| p.error().is_some());

    match workspace.present(RepoPresenter::new(Arc::clone(&repo), presenter)) {
        Ok(()) => {
            tracing::debug!(matched, errored, "Presented");
            emit(
                on_progress.as_ref(),
                RunProgress::Presented {
                    root: repo.root.clone(),
                    matched,
                    errored,
                },
            );
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Presentation rejected");
            emit(
                on_progress.as_ref(),
                RunProgress::TaskFailed {
                    root: repo.root.clone(),
                    error: e.to_string(),
                },
            );
            false
        }
    }
}
