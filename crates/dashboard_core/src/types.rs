use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies one file selection within a session.
pub type FileId = u64;
/// Identifies one prediction submission within a session.
pub type SubmissionId = u64;

/// A file chosen on the local filesystem. Bytes are read lazily by the
/// preview decoder and by the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub path: PathBuf,
    pub mime_type: Option<String>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, mime_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            mime_type,
        }
    }

    /// Builds a handle from a path, taking the display name from the file name
    /// and guessing the MIME type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self {
            name,
            path: path.to_path_buf(),
            mime_type: guess_image_mime(path),
        }
    }
}

fn guess_image_mime(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Classification result for one submitted image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_class: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(predicted_class: impl Into<String>, confidence: f64) -> Self {
        Self {
            predicted_class: predicted_class.into(),
            confidence,
        }
    }
}

/// A previously recorded prediction as listed by the history service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub image_url: Option<String>,
    pub predicted_class: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

/// Identity of the signed-in user. Only `username` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: None,
            email: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Why a history load was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTrigger {
    SessionStart,
    AfterPrediction,
    Manual,
}

/// Formats a confidence in `[0, 1]` as a percentage with two decimals.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}
