use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use super::SessionError;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Key/value storage for secrets that outlive the process.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
    async fn delete_item(&self, key: &str) -> Result<(), SessionError>;
}

/// Credentials kept as one JSON object in `{dir}/credentials.json`.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CREDENTIALS_FILE),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(items)?).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await?;
        debug!(key, path = %self.path.display(), "Credential stored");
        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
            debug!(key, "Credential deleted");
        }
        Ok(())
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<(), SessionError> {
        self.items.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested"));
        assert_eq!(store.get_item("ilicooapp_cookie").await.unwrap(), None);

        store.set_item("ilicooapp_cookie", "{}").await.unwrap();
        store.set_item("other", "1").await.unwrap();

        let reopened = FileCredentialStore::new(dir.path().join("nested"));
        assert_eq!(
            reopened.get_item("ilicooapp_cookie").await.unwrap().as_deref(),
            Some("{}")
        );

        reopened.delete_item("ilicooapp_cookie").await.unwrap();
        assert_eq!(store.get_item("ilicooapp_cookie").await.unwrap(), None);
        assert_eq!(store.get_item("other").await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(
            store.get_item("k").await,
            Err(SessionError::Json(_))
        ));
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        store.set_item("k", "v").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));
        store.delete_item("k").await.unwrap();
        store.delete_item("k").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), None);
    }
}
