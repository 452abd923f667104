//! Dashboard client: service collaborators and effect execution.
mod api;
mod handle;
mod preview;
mod types;

pub use api::{
    ApiSettings, HistoryService, LoginResponse, PredictionService, ProfileService, ReqwestApi,
    DEFAULT_BASE_URL, DEFAULT_MAX_UPLOAD_BYTES,
};
pub use handle::{ClientHandle, Services};
pub use preview::{decode_preview, to_data_url, PreviewError, DEFAULT_MAX_PREVIEW_BYTES};
pub use types::{ClientError, ClientEvent, FailureKind, ServiceError};
