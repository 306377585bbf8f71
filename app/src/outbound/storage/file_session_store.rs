//! Session store backed by one file per key in a capability directory.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic::replace_file;
use crate::domain::ports::{SessionKey, SessionStore, SessionStoreError};

/// Durable session storage.
///
/// Each [`SessionKey`] maps to a file of the same name. Writes are atomic.
#[derive(Clone)]
pub struct FileSessionStore {
    dir: Arc<Dir>,
    root: Utf8PathBuf,
}

impl FileSessionStore {
    /// Open `root`, creating it when missing.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            root: root.to_owned(),
        })
    }

    /// Directory holding the session files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    async fn blocking<T, F>(&self, key: SessionKey, op: F) -> Result<T, SessionStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir, &'static str) -> io::Result<T> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || op(&dir, key.as_str()))
            .await
            .map_err(|err| SessionStoreError::io(err.to_string()))?
            .map_err(|err| SessionStoreError::io(format!("{key}: {err}")))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError> {
        self.blocking(key, |dir, name| match dir.read_to_string(name) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError> {
        let contents = value.as_bytes().to_vec();
        self.blocking(key, move |dir, name| replace_file(dir, name, &contents))
            .await?;
        debug!(%key, "session entry written");
        Ok(())
    }

    async fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError> {
        self.blocking(key, |dir, name| match dir.remove_file(name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        })
        .await
    }
}
