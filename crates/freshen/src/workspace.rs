//! Per-run pipeline that turns descriptors into presentations.
//!
//! A [`Workspace`] is the producer side of one run: any number of tasks call
//! [`Workspace::present`] concurrently, and exactly one [`Workspace::done`]
//! closes it. The paired [`Presentations`] handle is the consumer side and
//! yields presentations in arrival order.
//!
//! [`run`] and [`run_streaming`] wire a [`ProviderRegistry`] to a workspace,
//! spawning one task per descriptor.
//!
//! [`ProviderRegistry`]: crate::presenter::ProviderRegistry

mod progress;
mod run;

pub use progress::{ProgressCallback, RunProgress, emit};
pub use run::{run, run_streaming};

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::mpsc;

use crate::presenter::RepoPresenter;

/// Misuse of a [`Workspace`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// `present` was called after `done`.
    #[error("workspace is closed")]
    Closed,

    /// `done` was called twice.
    #[error("workspace is already done")]
    AlreadyDone,

    /// The same root was presented twice in one run.
    #[error("{root} was already presented")]
    AlreadyPresented { root: String },
}

#[derive(Debug)]
struct WorkspaceState {
    /// `None` once the workspace is done.
    tx: Option<mpsc::UnboundedSender<RepoPresenter>>,
    presented: HashSet<String>,
}

/// Producer side of a run. Cheap to clone; all clones share one state.
#[derive(Debug, Clone)]
pub struct Workspace {
    state: Arc<Mutex<WorkspaceState>>,
}

/// Consumer side of a run.
#[derive(Debug)]
pub struct Presentations {
    rx: mpsc::UnboundedReceiver<RepoPresenter>,
}

impl Workspace {
    /// Create an open workspace and its consumer handle.
    pub fn new() -> (Self, Presentations) {
        let (tx, rx) = mpsc::unbounded_channel();
        let workspace = Self {
            state: Arc::new(Mutex::new(WorkspaceState {
                tx: Some(tx),
                presented: HashSet::new(),
            })),
        };
        (workspace, Presentations { rx })
    }

    fn lock(&self) -> MutexGuard<'_, WorkspaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand a presentation to the consumer.
    ///
    /// Never waits on the consumer. Fails once the workspace is done, or if
    /// the same root was already presented.
    pub fn present(&self, presentation: RepoPresenter) -> Result<(), WorkspaceError> {
        let mut state = self.lock();

        let Some(tx) = state.tx.clone() else {
            return Err(WorkspaceError::Closed);
        };

        let root = presentation.root().to_string();
        if !state.presented.insert(root.clone()) {
            return Err(WorkspaceError::AlreadyPresented { root });
        }

        if tx.send(presentation).is_err() {
            tracing::debug!(%root, "Consumer dropped; discarding presentation");
        }
        Ok(())
    }

    /// Close the workspace. The consumer sees the end of the sequence once it
    /// has drained everything presented before this call.
    pub fn done(&self) -> Result<(), WorkspaceError> {
        let mut state = self.lock();
        match state.tx.take() {
            Some(_) => {
                tracing::debug!(presented = state.presented.len(), "Workspace done");
                Ok(())
            }
            None => Err(WorkspaceError::AlreadyDone),
        }
    }

    pub fn is_done(&self) -> bool {
        self.lock().tx.is_none()
    }

    /// Number of presentations accepted so far.
    pub fn presented(&self) -> usize {
        self.lock().presented.len()
    }
}

impl Presentations {
    /// Wait for the next presentation.
    ///
    /// Returns `None` once the workspace is done and every presentation
    /// has been read.
    pub async fn next(&mut self) -> Option<RepoPresenter> {
        self.rx.recv().await
    }

    /// Drain every remaining presentation, waiting for the run to finish.
    pub async fn collect(mut self) -> Vec<RepoPresenter> {
        let mut out = Vec::new();
        while let Some(p) = self.next().await {
            out.push(p);
        }
        out
    }
}
