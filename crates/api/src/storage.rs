//! Local disk storage for uploaded images.
//!
//! Files land in `UPLOAD_DIR` under `{unix_millis}-{sanitized name}` and are
//! served back at `/uploads/{name}`. Every file of a request is validated
//! before the first one is written.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::multipart::Field;
use panotour_core::upload::{public_url, stored_file_name, validate_image_upload};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{AppError, AppResult};

/// Attempts at finding a free file name before giving up.
const MAX_NAME_ATTEMPTS: i64 = 16;

/// An image received in a multipart body, not yet written to disk.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl PendingUpload {
    /// Read a file field completely.
    pub async fn from_field(field: Field<'_>) -> AppResult<Self> {
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field.content_type().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_image_upload(&self.file_name, self.content_type.as_deref())?;
        Ok(())
    }
}

/// A file written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Name on disk, also used as the tour image name.
    pub stored_name: String,
    /// Public URL, e.g. `/uploads/1717171717171-lobby.jpg`.
    pub url: String,
    path: PathBuf,
}

/// Writes uploads below one root directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate every upload, then write them all.
    ///
    /// If a write fails, files already written by this call are removed.
    pub async fn save_all(&self, uploads: &[PendingUpload]) -> AppResult<Vec<StoredUpload>> {
        for upload in uploads {
            upload.validate()?;
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot create upload dir: {e}")))?;

        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.write_one(upload).await {
                Ok(file) => stored.push(file),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Best-effort removal of files whose database rows were never written.
    pub async fn discard(&self, files: &[StoredUpload]) {
        for file in files {
            if let Err(e) = tokio::fs::remove_file(&file.path).await {
                tracing::warn!(path = %file.path.display(), error = %e, "Failed to remove upload");
            }
        }
    }

    async fn write_one(&self, upload: &PendingUpload) -> AppResult<StoredUpload> {
        let millis = chrono::Utc::now().timestamp_millis();

        // Same name within the same millisecond: bump the prefix.
        for offset in 0..MAX_NAME_ATTEMPTS {
            let stored_name = stored_file_name(&upload.file_name, millis + offset);
            let path = self.root.join(&stored_name);
            let file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            let file = match file {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(AppError::InternalError(format!("Cannot store upload: {e}"))),
            };
            write_or_remove(&path, file, &upload.data)
                .await
                .map_err(|e| AppError::InternalError(format!("Cannot store upload: {e}")))?;

            tracing::debug!(file = %stored_name, bytes = upload.data.len(), "Stored upload");
            return Ok(StoredUpload {
                url: public_url(&stored_name),
                stored_name,
                path,
            });
        }

        Err(AppError::InternalError(format!(
            "No free file name for upload '{}'",
            upload.file_name
        )))
    }
}

/// Write `data` through `writer` into the freshly created file at `path`.
/// On failure the partial file is removed before the error is returned.
async fn write_or_remove<W>(path: &Path, mut writer: W, data: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(data).await?;
        writer.flush().await
    }
    .await;
    drop(writer);

    if let Err(e) = written {
        if let Err(rm) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %rm, "Failed to remove partial upload");
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use assert_matches::assert_matches;
    use panotour_core::error::CoreError;

    use super::*;

    fn jpeg(name: &str) -> PendingUpload {
        PendingUpload {
            file_name: name.to_string(),
            content_type: Some("image/jpeg".to_string()),
            data: Bytes::from_static(b"\xff\xd8\xff"),
        }
    }

    #[tokio::test]
    async fn writes_files_with_public_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let stored = store.save_all(&[jpeg("lobby.jpg"), jpeg("lobby.jpg")]).await.unwrap();

        assert_eq!(stored.len(), 2);
        assert_ne!(stored[0].stored_name, stored[1].stored_name);
        for file in &stored {
            assert!(file.stored_name.ends_with("-lobby.jpg"));
            assert_eq!(file.url, format!("/uploads/{}", file.stored_name));
            let bytes = std::fs::read(dir.path().join(&file.stored_name)).unwrap();
            assert_eq!(bytes, b"\xff\xd8\xff");
        }
    }

    #[tokio::test]
    async fn rejects_batch_before_writing_anything() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("nested"));

        let mut text = jpeg("notes.txt");
        text.content_type = Some("text/plain".to_string());
        let result = store.save_all(&[jpeg("a.jpg"), text]).await;

        assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
        assert!(!dir.path().join("nested").exists());
    }

    /// Accepts nothing.
    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("no space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1-lobby.jpg");
        std::fs::write(&path, b"\xff").unwrap();

        let result = write_or_remove(&path, FullDisk, b"\xff\xd8\xff").await;

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn successful_write_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1-hall.jpg");
        let file = tokio::fs::File::create(&path).await.unwrap();

        write_or_remove(&path, file, b"\xff\xd8\xff").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\xff\xd8\xff");
    }

    #[tokio::test]
    async fn discard_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let stored = store.save_all(&[jpeg("a.png")]).await.unwrap();

        store.discard(&stored).await;
        assert!(!dir.path().join(&stored[0].stored_name).exists());
    }
}
