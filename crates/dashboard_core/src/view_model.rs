use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    pub display_name: String,
    pub file_label: String,
    pub has_preview: bool,
    pub prediction: Option<PredictionView>,
    pub error: Option<String>,
    pub loading: bool,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub clear_visible: bool,
    pub history: Vec<HistoryRowView>,
    pub empty_history_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionView {
    pub label: String,
    /// Confidence as shown to the user, e.g. `"97.00%"`.
    pub confidence_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: u64,
    pub image_url: Option<String>,
    pub label: String,
    pub confidence_text: String,
    pub created_at: DateTime<Utc>,
}
