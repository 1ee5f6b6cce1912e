use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage. Reads take the path as given; writes land
/// under `base_path`, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&full_path, data).await?;
        tracing::debug!("wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("out"));

        tokio_test::block_on(async {
            storage.write_file("nested/a.csv", b"id\n1\n").await.unwrap();
            let path = storage.base_path().join("nested/a.csv");
            let data = storage.read_file(&path.to_string_lossy()).await.unwrap();
            assert_eq!(data, b"id\n1\n");
        });
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let storage = LocalStorage::new("unused");
        let result = tokio_test::block_on(storage.read_file("definitely/not/here.csv"));
        assert!(matches!(
            result,
            Err(crate::utils::error::EtlError::IoError(_))
        ));
    }
}
