//! Dashboard core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    SelectedFile, Session, DEFAULT_DISPLAY_NAME, EMPTY_FILE_LABEL, EMPTY_HISTORY_MESSAGE,
    NO_FILE_ERROR, PREDICTION_FALLBACK_ERROR, SUBMIT_LABEL, SUBMIT_LABEL_LOADING,
};
pub use types::{
    format_confidence, FileId, HistoryEntry, HistoryTrigger, LocalFile, Prediction,
    SubmissionId, UserProfile,
};
pub use update::update;
pub use view_model::{DashboardViewModel, HistoryRowView, PredictionView};
