//! Load a report file from disk into an `UploadPayload`.

use crate::domain::UploadPayload;
use std::path::Path;
use tracing::warn;

/// Read `path` and guess its MIME type from the extension.
///
/// An unreadable path yields a payload without a file so that validation
/// reports it like an empty file picker.
pub async fn load_upload(path: &Path) -> UploadPayload {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    let file = match tokio::fs::read(path).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read report file");
            None
        }
    };

    UploadPayload {
        file,
        file_name,
        mime_type,
    }
}
