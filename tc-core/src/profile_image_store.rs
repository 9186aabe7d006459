use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROFILE_IMAGE_FILE_NAME: &str = "profile_image.bin";

#[derive(Debug, Clone)]
pub struct ProfileImageStore {
    path: PathBuf,
}

impl ProfileImageStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PROFILE_IMAGE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save(&self, image: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.context("Failed to create data directory")?;
        }
        tokio::fs::write(&self.path, image).await.context("Failed to write profile image")?;
        debug!(bytes = image.len(), path = %self.path.display(), "saved profile image");
        Ok(())
    }

    pub async fn load(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read profile image"),
        }
    }

    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove profile image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn save_load_and_clear() -> Result<()> {
        let dir = tempdir()?;
        let store = ProfileImageStore::new(&dir.path().join("data"));

        assert_eq!(store.load().await?, None);

        let png_header = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        store.save(&png_header).await?;
        assert_eq!(store.load().await?, Some(png_header.to_vec()));

        store.clear().await?;
        assert_eq!(store.load().await?, None);

        // clearing twice is fine
        store.clear().await?;
        Ok(())
    }
}
