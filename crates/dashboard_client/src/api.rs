use std::time::Duration;

use dashboard_core::{HistoryEntry, LocalFile, Prediction, UserProfile};
use dashboard_logging::dashboard_debug;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::preview::DEFAULT_MAX_PREVIEW_BYTES;
use crate::{ClientError, FailureKind, ServiceError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const PROFILE_PATH: &str = "auth/profile/";
const LOGIN_PATH: &str = "auth/login/";
const PREDICT_PATH: &str = "predict/";
const HISTORY_PATH: &str = "predictions/";
const UPLOAD_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_upload_bytes: u64,
    pub max_preview_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_preview_bytes: DEFAULT_MAX_PREVIEW_BYTES,
        }
    }
}

#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    async fn load_profile(&self) -> Result<UserProfile, ServiceError>;
}

#[async_trait::async_trait]
pub trait HistoryService: Send + Sync {
    async fn load_history(&self) -> Result<Vec<HistoryEntry>, ServiceError>;
}

#[async_trait::async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, file: &LocalFile) -> Result<Prediction, ServiceError>;
}

/// Tokens and identity returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

/// HTTP client for the auth, prediction and history endpoints.
#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
    max_upload_bytes: u64,
}

impl ReqwestApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(&settings.base_url)?;
        // `Url::join` replaces the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            bearer_token: settings.bearer_token.clone(),
            max_upload_bytes: settings.max_upload_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchange credentials for an access token. The token is returned, not stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ServiceError> {
        let url = self.endpoint(LOGIN_PATH)?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = self.endpoint(path)?;
        dashboard_debug!("GET {}", url);
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn read_upload(&self, file: &LocalFile) -> Result<Vec<u8>, ServiceError> {
        let io_err = |err: std::io::Error| {
            ServiceError::new(
                FailureKind::Io,
                format!("failed to read {}: {err}", file.path.display()),
            )
        };
        let meta = tokio::fs::metadata(&file.path).await.map_err(io_err)?;
        if meta.len() > self.max_upload_bytes {
            return Err(ServiceError::new(
                FailureKind::TooLarge {
                    max_bytes: self.max_upload_bytes,
                    actual: meta.len(),
                },
                "upload too large",
            ));
        }
        tokio::fs::read(&file.path).await.map_err(io_err)
    }
}

#[async_trait::async_trait]
impl ProfileService for ReqwestApi {
    async fn load_profile(&self) -> Result<UserProfile, ServiceError> {
        self.get_json(PROFILE_PATH).await
    }
}

#[async_trait::async_trait]
impl HistoryService for ReqwestApi {
    async fn load_history(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        self.get_json(HISTORY_PATH).await
    }
}

#[async_trait::async_trait]
impl PredictionService for ReqwestApi {
    async fn predict(&self, file: &LocalFile) -> Result<Prediction, ServiceError> {
        let url = self.endpoint(PREDICT_PATH)?;
        let bytes = self.read_upload(file).await?;
        let byte_len = bytes.len();

        let mut part = Part::bytes(bytes).file_name(file.name.clone());
        if let Some(mime) = file.mime_type.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string()))?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        dashboard_debug!("POST {} ({} bytes from {})", url, byte_len, file.name);
        let response = self
            .authorize(self.client.post(url))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(
            ServiceError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                .with_service_message(extract_service_message(&body)),
        );
    }

    serde_json::from_slice(&body)
        .map_err(|err| ServiceError::new(FailureKind::InvalidResponse, err.to_string()))
}

/// The `error` string of a JSON error body, as sent. Any other shape (including
/// the framework's `{"detail": ...}`) carries no message for the user.
fn extract_service_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(|error| error.as_str())
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ServiceError::new(FailureKind::InvalidResponse, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
