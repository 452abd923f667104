use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use dashboard_core::LocalFile;

pub const DEFAULT_MAX_PREVIEW_BYTES: u64 = 10 * 1024 * 1024;
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PreviewError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("{path} is empty")]
    Empty { path: String },
    #[error("{path} is too large to preview (max {max_bytes}, actual {actual})")]
    TooLarge {
        path: String,
        max_bytes: u64,
        actual: u64,
    },
}

/// Read a selected file and embed it as a `data:` URL for display.
pub async fn decode_preview(file: &LocalFile, max_bytes: u64) -> Result<String, PreviewError> {
    let path = file.path.display().to_string();
    let read_err = |err: std::io::Error| PreviewError::Read {
        path: path.clone(),
        message: err.to_string(),
    };

    let meta = tokio::fs::metadata(&file.path).await.map_err(read_err)?;
    if meta.len() > max_bytes {
        return Err(PreviewError::TooLarge {
            path: path.clone(),
            max_bytes,
            actual: meta.len(),
        });
    }

    let bytes = tokio::fs::read(&file.path).await.map_err(read_err)?;
    if bytes.is_empty() {
        return Err(PreviewError::Empty { path });
    }
    Ok(to_data_url(&bytes, file.mime_type.as_deref()))
}

pub fn to_data_url(bytes: &[u8], mime_type: Option<&str>) -> String {
    let mime = mime_type.unwrap_or(FALLBACK_MIME);
    format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes))
}
