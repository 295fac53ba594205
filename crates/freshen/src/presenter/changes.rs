//! Produce-on-pull sequences of [`Change`]s.

use tokio::sync::mpsc;

use super::types::Change;

/// Buffer between the producer task and the consumer of a change stream.
pub const CHANGE_STREAM_BUFFER: usize = 16;

/// A finite, non-restartable sequence of changes.
///
/// The changes are fed by a background task through a bounded channel, so a
/// consumer can start rendering before the whole list has been produced.
/// Dropping the stream closes the channel and the producer task exits on its
/// next send; draining it to the end is not required.
#[derive(Debug)]
pub struct ChangeStream {
    rx: mpsc::Receiver<Change>,
}

impl ChangeStream {
    /// Stream `changes` in iteration order.
    ///
    /// Inside a tokio runtime a producer task is spawned. Outside of one the
    /// channel is sized to fit every change and filled up front.
    pub fn spawn<I>(changes: I) -> Self
    where
        I: IntoIterator<Item = Change>,
        I::IntoIter: Send + 'static,
    {
        let changes = changes.into_iter();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let (tx, rx) = mpsc::channel(CHANGE_STREAM_BUFFER);
                handle.spawn(async move {
                    for change in changes {
                        if tx.send(change).await.is_err() {
                            tracing::trace!("change stream dropped before it was drained");
                            break;
                        }
                    }
                });
                Self { rx }
            }
            Err(_) => {
                let changes: Vec<Change> = changes.collect();
                let (tx, rx) = mpsc::channel(changes.len().max(1));
                for change in changes {
                    // Capacity covers every change, so this cannot be full.
                    let _ = tx.try_send(change);
                }
                Self { rx }
            }
        }
    }

    /// Pull the next change, or `None` once the sequence is exhausted.
    pub async fn next(&mut self) -> Option<Change> {
        self.rx.recv().await
    }

    /// Drain the remaining changes into a vector.
    pub async fn collect(mut self) -> Vec<Change> {
        let mut out = Vec::new();
        while let Some(change) = self.next().await {
            out.push(change);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(n: usize) -> Change {
        Change::new(format!("commit {n}"), format!("https://example.com/{n}"), 0)
    }

    #[tokio::test]
    async fn yields_changes_in_iteration_order_then_ends() {
        let mut stream = ChangeStream::spawn(vec![change(0), change(1), change(2)]);

        assert_eq!(stream.next().await.map(|c| c.message), Some("commit 0".into()));
        assert_eq!(stream.next().await.map(|c| c.message), Some("commit 1".into()));
        assert_eq!(stream.next().await.map(|c| c.message), Some("commit 2".into()));
        assert!(stream.next().await.is_none());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn streams_more_changes_than_the_buffer_holds() {
        let total = CHANGE_STREAM_BUFFER * 3 + 1;
        let stream = ChangeStream::spawn((0..total).map(change));
        let collected = stream.collect().await;
        assert_eq!(collected.len(), total);
        assert_eq!(collected.last().map(|c| c.message.as_str()), Some("commit 48"));
    }

    #[tokio::test]
    async fn dropping_a_partially_read_stream_releases_the_producer() {
        let mut stream = ChangeStream::spawn((0..CHANGE_STREAM_BUFFER * 4).map(change));
        assert!(stream.next().await.is_some());
        drop(stream);
        // The producer notices the closed channel; nothing left to assert
        // beyond the runtime shutting down cleanly.
        tokio::task::yield_now().await;
    }

    #[test]
    fn works_without_a_runtime() {
        let stream = ChangeStream::spawn(vec![change(7), change(8)]);
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let collected = rt.block_on(stream.collect());
        let messages: Vec<_> = collected.into_iter().map(|c| c.message).collect();
        assert_eq!(messages, vec!["commit 7", "commit 8"]);
    }

    #[tokio::test]
    async fn empty_sequence_ends_immediately() {
        let mut stream = ChangeStream::spawn(Vec::new());
        assert!(stream.next().await.is_none());
    }
}
