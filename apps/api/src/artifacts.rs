//! Transient storage for rendered documents.
//!
//! Each response writes one uniquely named PDF, streams it, and deletes it once the body is
//! dropped. Deletion is fire-and-forget: failures are logged and never reach the caller.
//! Files orphaned by a crash or an aborted request are collected by a periodic sweep.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, SystemTime};

use futures_util::Stream;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{DocumentKind, Language};

const PARTIAL_PREFIX: &str = ".cvespresso-partial-";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a fresh collision-free name and returns the final path.
    ///
    /// The file is written to a temporary name and renamed into place, so a reader or the
    /// sweeper never sees a half-written PDF. Blocking; call from `spawn_blocking`.
    pub fn persist(
        &self,
        bytes: &[u8],
        kind: DocumentKind,
        language: Language,
    ) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let name = format!(
            "{}_{}_{}.pdf",
            kind.artifact_prefix(),
            Uuid::new_v4().simple(),
            language
        );
        let path = self.dir.join(name);

        let mut tmp = tempfile::Builder::new()
            .prefix(PARTIAL_PREFIX)
            .tempfile_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.persist_noclobber(&path).map_err(|e| e.error)?;

        debug!("Artifact written: {}", path.display());
        Ok(path)
    }

    /// Deletes artifacts owned by this store that are older than `max_age`.
    /// Returns how many were removed.
    pub async fn sweep_stale(&self, max_age: Duration) -> usize {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Artifact sweep could not read {}: {e}", self.dir.display());
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut removed = 0;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Artifact sweep aborted while listing: {e}");
                    break;
                }
            };

            let name = entry.file_name();
            if !is_owned_artifact(&name.to_string_lossy()) {
                continue;
            }

            let is_stale = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => now
                    .duration_since(modified)
                    .map(|age| age > max_age)
                    .unwrap_or(false),
                Err(e) => {
                    warn!("Artifact sweep skipped {:?}: {e}", name);
                    false
                }
            };

            if is_stale && remove_quietly(&entry.path()).await {
                removed += 1;
            }
        }

        if removed > 0 {
            info!(removed, "Swept stale artifacts");
        }
        removed
    }

    /// Runs [`ArtifactStore::sweep_stale`] every `interval` until the runtime shuts down.
    pub fn spawn_sweeper(self, interval: Duration, max_age: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                self.sweep_stale(max_age).await;
            }
        })
    }
}

fn is_owned_artifact(name: &str) -> bool {
    let prefixed = [DocumentKind::Resume, DocumentKind::CoverLetter]
        .iter()
        .any(|k| name.starts_with(&format!("{}_", k.artifact_prefix())));
    (prefixed && name.ends_with(".pdf")) || name.starts_with(PARTIAL_PREFIX)
}

/// Deletes the file at `path` when dropped.
///
/// Move it into whatever outlives the response (the body stream) so deletion happens after
/// the last byte is sent, or when the client goes away.
#[derive(Debug)]
pub struct RemovalGuard {
    path: Option<PathBuf>,
}

impl RemovalGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

/// A stream that owns a [`RemovalGuard`]; the file is deleted when the stream is dropped.
#[derive(Debug)]
pub struct GuardedStream<S> {
    inner: S,
    _guard: RemovalGuard,
}

impl<S> GuardedStream<S> {
    pub fn new(inner: S, guard: RemovalGuard) -> Self {
        Self {
            inner,
            _guard: guard,
        }
    }
}

impl<S: Stream + Unpin> Stream for GuardedStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl Drop for RemovalGuard {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            schedule_removal(path);
        }
    }
}

/// Deletes `path` in the background without blocking the caller.
pub fn schedule_removal(path: PathBuf) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                remove_quietly(&path).await;
            });
        }
        Err(_) => {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to delete temp file {}: {e}", path.display());
                }
            }
        }
    }
}

async fn remove_quietly(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Deleted temp file {}", path.display());
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!("Failed to delete temp file {}: {e}", path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_file(path: &Path, age: Duration) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    async fn wait_until_gone(path: &Path) -> bool {
        for _ in 0..100 {
            if !path.exists() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[test]
    fn test_persist_writes_unique_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());

        let a = store.persist(b"%PDF-a", DocumentKind::Resume, Language::English).unwrap();
        let b = store.persist(b"%PDF-b", DocumentKind::Resume, Language::English).unwrap();

        assert_ne!(a, b);
        assert_eq!(std::fs::read(&a).unwrap(), b"%PDF-a");
        let name = a.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("CVespresso_"), "{name}");
        assert!(name.ends_with("_en.pdf"), "{name}");
        // no partial files left behind
        let leftovers = std::fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .starts_with(PARTIAL_PREFIX)
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_cover_letter_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        let path = store
            .persist(b"x", DocumentKind::CoverLetter, Language::Serbian)
            .unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("CoverLetter_") && name.ends_with("_sr.pdf"));
    }

    #[tokio::test]
    async fn test_removal_guard_deletes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        let path = store.persist(b"x", DocumentKind::Resume, Language::Serbian).unwrap();

        let guard = RemovalGuard::new(path.clone());
        assert!(path.exists());
        drop(guard);

        assert!(wait_until_gone(&path).await);
    }

    #[tokio::test]
    async fn test_guarded_stream_keeps_file_until_dropped() {
        use futures_util::StreamExt;

        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        let path = store.persist(b"x", DocumentKind::Resume, Language::English).unwrap();

        let mut stream = GuardedStream::new(
            futures_util::stream::iter(vec![1, 2]),
            RemovalGuard::new(path.clone()),
        );
        assert_eq!(stream.next().await, Some(1));
        assert_eq!(stream.next().await, Some(2));
        assert_eq!(stream.next().await, None);
        assert!(path.exists());

        drop(stream);
        assert!(wait_until_gone(&path).await);
    }

    #[tokio::test]
    async fn test_removal_of_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        schedule_removal(dir.path().join("never-existed.pdf"));
        assert!(!remove_quietly(&dir.path().join("never-existed.pdf")).await);
    }

    #[test]
    fn test_removal_without_runtime_is_synchronous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CVespresso_x_en.pdf");
        std::fs::write(&path, b"x").unwrap();
        drop(RemovalGuard::new(path.clone()));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_stale_owned_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());
        let hour = Duration::from_secs(3600);

        let stale = store.persist(b"old", DocumentKind::Resume, Language::English).unwrap();
        age_file(&stale, hour);
        let fresh = store.persist(b"new", DocumentKind::CoverLetter, Language::English).unwrap();
        let foreign = dir.path().join("notes.txt");
        std::fs::write(&foreign, b"keep me").unwrap();
        age_file(&foreign, hour);

        let removed = store.sweep_stale(Duration::from_secs(600)).await;

        assert_eq!(removed, 1);
        assert!(!stale.exists());
        assert!(fresh.exists());
        assert!(foreign.exists());
    }

    #[tokio::test]
    async fn test_sweep_of_missing_dir_is_harmless() {
        let store = ArtifactStore::new(PathBuf::from("/nonexistent/cvespresso-artifacts"));
        assert_eq!(store.sweep_stale(Duration::from_secs(1)).await, 0);
    }
}
