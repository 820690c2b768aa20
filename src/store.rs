//! File-backed preference store.
//!
//! A single writer task owns the on-disk document and drains a queue of
//! edit transforms, applying them strictly one at a time: run the transform,
//! persist the whole map atomically, publish the new snapshot. Readers
//! subscribe to a watch channel that starts at `None` until the first
//! snapshot has been loaded from disk.

use crate::prefs::Preferences;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to persist preferences to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference store is shut down")]
    Closed,
}

type Transform = Box<dyn FnOnce(Preferences) -> BoxFuture<'static, Preferences> + Send>;

struct EditRequest {
    transform: Transform,
    reply: oneshot::Sender<Result<Preferences, StoreError>>,
}

/// Cloneable handle to the store. Dropping every handle shuts the writer
/// task down once its queue drains.
#[derive(Clone)]
pub struct PrefStore {
    tx: mpsc::UnboundedSender<EditRequest>,
    snapshot_rx: watch::Receiver<Option<Preferences>>,
}

impl PrefStore {
    /// Open the store backed by the given file, spawning its writer task
    /// on the provided runtime. The file is loaded asynchronously; until
    /// then subscribers observe `None`.
    pub fn open(path: PathBuf, runtime: &tokio::runtime::Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        runtime.spawn(writer_task(path, rx, snapshot_tx));
        Self { tx, snapshot_rx }
    }

    /// Watch the stream of committed snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Option<Preferences>> {
        self.snapshot_rx.clone()
    }

    /// Latest committed snapshot, or `None` before the initial load.
    pub fn snapshot(&self) -> Option<Preferences> {
        self.snapshot_rx.borrow().clone()
    }

    /// Queue an edit. The request is enqueued synchronously, before the
    /// returned future is first polled, so two calls from the same thread
    /// are applied in call order. Edits run one at a time; each transform
    /// observes the state left by the previous edit, and the whole edit is
    /// all-or-nothing: if persisting fails, the previous snapshot stands
    /// and the error is returned. On success the committed snapshot is
    /// returned.
    pub fn edit<F, Fut>(
        &self,
        transform: F,
    ) -> impl std::future::Future<Output = Result<Preferences, StoreError>> + Send + 'static
    where
        F: FnOnce(Preferences) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Preferences> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = EditRequest {
            transform: Box::new(move |prefs| Box::pin(transform(prefs))),
            reply: reply_tx,
        };
        let sent = self.tx.send(request).map_err(|_| StoreError::Closed);
        async move {
            sent?;
            reply_rx.await.map_err(|_| StoreError::Closed)?
        }
    }
}

async fn writer_task(
    path: PathBuf,
    mut rx: mpsc::UnboundedReceiver<EditRequest>,
    snapshot_tx: watch::Sender<Option<Preferences>>,
) {
    let mut current = load_or_default(&path);
    if snapshot_tx.send(Some(current.clone())).is_err() {
        return;
    }
    debug!(path = %path.display(), entries = current.len(), "Preference store ready");

    while let Some(EditRequest { transform, reply }) = rx.recv().await {
        let next = transform(current.clone()).await;

        let outcome = if next == current {
            // Nothing changed; skip the disk write.
            Ok(current.clone())
        } else {
            match persist(&path, &next) {
                Ok(()) => {
                    current = next;
                    if snapshot_tx.send(Some(current.clone())).is_err() {
                        // No subscribers left; keep serving queued edits anyway.
                        debug!("All snapshot subscribers dropped");
                    }
                    Ok(current.clone())
                }
                Err(e) => {
                    error!(error = %e, "Edit discarded, keeping previous snapshot");
                    Err(e)
                }
            }
        };

        // The caller may have given up waiting; that is fine.
        let _ = reply.send(outcome);
    }

    debug!(path = %path.display(), "Preference store writer stopped");
}

/// Read the document, substituting the empty map when the file is missing,
/// unreadable, or corrupt.
fn load_or_default(path: &Path) -> Preferences {
    match std::fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str(&s) {
            Ok(prefs) => {
                debug!(path = %path.display(), "Preferences loaded");
                prefs
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse preferences, using empty map");
                Preferences::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No preferences file found, starting empty");
            Preferences::default()
        }
        Err(e) => {
            warn!(error = %e, "Failed to read preferences, using empty map");
            Preferences::default()
        }
    }
}

/// Whole-map replace, atomic via temp file + rename.
fn persist(path: &Path, prefs: &Preferences) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(prefs)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| StoreError::Persist {
        path: tmp.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| StoreError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{COUNTER, DARK_THEME};
    use tempfile::tempdir;

    async fn first_snapshot(store: &PrefStore) -> Preferences {
        let mut rx = store.subscribe();
        let snapshot = rx.wait_for(|v| v.is_some()).await.unwrap().clone();
        snapshot.unwrap()
    }

    #[tokio::test]
    async fn starts_empty_when_file_is_missing() {
        let dir = tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("prefs.json"), &tokio::runtime::Handle::current());
        let prefs = first_snapshot(&store).await;
        assert!(prefs.is_empty());
    }

    #[tokio::test]
    async fn recovers_from_a_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json at all").unwrap();

        let store = PrefStore::open(path, &tokio::runtime::Handle::current());
        let prefs = first_snapshot(&store).await;
        assert!(prefs.is_empty());
    }

    #[tokio::test]
    async fn edit_commits_and_returns_the_new_snapshot() {
        let dir = tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("prefs.json"), &tokio::runtime::Handle::current());

        let committed = store
            .edit(|mut prefs| async move {
                prefs.set(COUNTER, 5);
                prefs.set(DARK_THEME, true);
                prefs
            })
            .await
            .unwrap();

        assert_eq!(committed.get(COUNTER), Some(5));
        assert_eq!(store.snapshot().unwrap().get(DARK_THEME), Some(true));
    }

    #[tokio::test]
    async fn edits_are_durable_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = PrefStore::open(path.clone(), &tokio::runtime::Handle::current());
        store
            .edit(|mut prefs| async move {
                prefs.set(COUNTER, 41);
                prefs
            })
            .await
            .unwrap();
        drop(store);

        let reopened = PrefStore::open(path, &tokio::runtime::Handle::current());
        let prefs = first_snapshot(&reopened).await;
        assert_eq!(prefs.get(COUNTER), Some(41));
    }

    #[tokio::test]
    async fn concurrent_edits_serialize() {
        let dir = tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("prefs.json"), &tokio::runtime::Handle::current());

        let mut handles = Vec::new();
        for _ in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .edit(|mut prefs| async move {
                        let next = prefs.get(COUNTER).unwrap_or(0) + 1;
                        prefs.set(COUNTER, next);
                        prefs
                    })
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.snapshot().unwrap().get(COUNTER), Some(10));
    }

    #[tokio::test]
    async fn clear_empties_the_map_but_keeps_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = PrefStore::open(path.clone(), &tokio::runtime::Handle::current());

        store
            .edit(|mut prefs| async move {
                prefs.set(COUNTER, 3);
                prefs
            })
            .await
            .unwrap();
        store
            .edit(|mut prefs| async move {
                prefs.clear();
                prefs
            })
            .await
            .unwrap();

        assert!(store.snapshot().unwrap().is_empty());
        assert!(path.exists());

        let on_disk: Preferences =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.is_empty());
    }

    #[tokio::test]
    async fn failed_persist_discards_the_edit() {
        let dir = tempdir().unwrap();
        // Parent directory does not exist, so every write must fail.
        let path = dir.path().join("missing").join("prefs.json");
        let store = PrefStore::open(path, &tokio::runtime::Handle::current());
        first_snapshot(&store).await;

        let result = store
            .edit(|mut prefs| async move {
                prefs.set(COUNTER, 1);
                prefs
            })
            .await;

        assert!(matches!(result, Err(StoreError::Persist { .. })));
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn edits_apply_in_call_order() {
        let dir = tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("prefs.json"), &tokio::runtime::Handle::current());

        // Both requests are enqueued before either future is polled; the
        // second must observe the first's result.
        let first = store.edit(|mut prefs| async move {
            prefs.set(COUNTER, 1);
            prefs
        });
        let second = store.edit(|mut prefs| async move {
            let seen = prefs.get(COUNTER).unwrap_or(0);
            prefs.set(COUNTER, seen * 10 + 2);
            prefs
        });

        let (a, b) = tokio::join!(first, second);
        a.unwrap();
        assert_eq!(b.unwrap().get(COUNTER), Some(12));
    }
}
