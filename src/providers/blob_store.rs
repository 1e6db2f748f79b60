use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::InternalError;

/// Opaque file storage for uploaded pack audio and archives. The rest of
/// the system references files by key only and never assumes a layout.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), InternalError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, InternalError>;
}

/// Filesystem-backed blob store rooted at a configured directory.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, InternalError> {
        // Keys are generated internally, but reject traversal anyway
        if key.contains("..") || key.starts_with('/') {
            return Err(InternalError::Blob {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid key"),
            });
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), InternalError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InternalError::Blob {
                    key: key.to_string(),
                    source: e,
                })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| InternalError::Blob {
                key: key.to_string(),
                source: e,
            })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, InternalError> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| InternalError::Blob {
                key: key.to_string(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = std::env::temp_dir().join(format!("sounddrops-blob-{}", uuid::Uuid::new_v4()));
        let store = FsBlobStore::new(dir.clone());

        store
            .put("audio/pack_1.mp3", b"bytes".to_vec())
            .await
            .unwrap();
        let bytes = store.get("audio/pack_1.mp3").await.unwrap();
        assert_eq!(bytes, b"bytes");

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let store = FsBlobStore::new(PathBuf::from("/tmp"));
        assert!(store.get("../etc/passwd").await.is_err());
    }
}
