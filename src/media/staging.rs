/**
 * Upload Staging
 *
 * Multipart file fields are written to a local temp directory before being
 * forwarded to the media service. A `StagedFile` owns that temp path; it is
 * removed explicitly by the upload path (success or failure) and, as a
 * backstop, on drop.
 */

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A file staged to local temp storage, pending upload
///
/// Dropping a `StagedFile` without calling `discard` removes the file
/// best-effort, so early handler exits never leak temp storage.
#[derive(Debug)]
pub struct StagedFile {
    path: Option<PathBuf>,
    /// Original client-supplied file name, for the upload form
    pub file_name: String,
}

impl StagedFile {
    /// Write multipart field bytes to the temp directory
    ///
    /// The stored name is prefixed with a UUID so concurrent uploads of
    /// identically named files cannot collide.
    pub async fn stage(
        temp_dir: &Path,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Self, std::io::Error> {
        tokio::fs::create_dir_all(temp_dir).await?;

        let safe_name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or("upload")
            .to_string();
        let path = temp_dir.join(format!("{}-{}", Uuid::new_v4(), safe_name));
        tokio::fs::write(&path, bytes).await?;

        Ok(Self {
            path: Some(path),
            file_name: safe_name,
        })
    }

    /// Path of the staged file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the staged bytes back for upload
    pub async fn read(&self) -> Result<Vec<u8>, std::io::Error> {
        match &self.path {
            Some(path) => tokio::fs::read(path).await,
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "staged file already discarded",
            )),
        }
    }

    /// Remove the staged file
    ///
    /// Removal failures are logged and swallowed; a leaked temp file must
    /// never fail the surrounding operation.
    pub async fn discard(mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!("failed to remove staged file {}: {}", path.display(), e);
            }
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("failed to remove staged file {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("clipstream-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_stage_writes_file() {
        let dir = temp_dir();
        let staged = StagedFile::stage(&dir, "avatar.png", b"png-bytes")
            .await
            .unwrap();

        let path = staged.path().unwrap().to_path_buf();
        assert!(path.exists());
        assert_eq!(staged.read().await.unwrap(), b"png-bytes");

        staged.discard().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = temp_dir();
        let staged = StagedFile::stage(&dir, "cover.jpg", b"jpg").await.unwrap();
        let path = staged.path().unwrap().to_path_buf();

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_path_traversal_stripped() {
        let dir = temp_dir();
        let staged = StagedFile::stage(&dir, "../../etc/passwd", b"x").await.unwrap();

        assert_eq!(staged.file_name, "passwd");
        assert!(staged.path().unwrap().starts_with(&dir));
        staged.discard().await;
    }
}
