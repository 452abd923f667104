use crate::view_model::{DashboardViewModel, HistoryRowView, PredictionView};
use crate::{format_confidence, FileId, HistoryEntry, LocalFile, Prediction, SubmissionId, UserProfile};

pub const NO_FILE_ERROR: &str = "Please select an image";
pub const PREDICTION_FALLBACK_ERROR: &str = "Prediction failed. Please try again.";
pub const DEFAULT_DISPLAY_NAME: &str = "User";
pub const EMPTY_FILE_LABEL: &str = "Choose an image";
pub const SUBMIT_LABEL: &str = "Detect Object";
pub const SUBMIT_LABEL_LOADING: &str = "Analyzing...";
pub const EMPTY_HISTORY_MESSAGE: &str = "No predictions yet. Upload an image to get started!";

/// A file that has been selected, tagged with the id its preview decode refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub id: FileId,
    pub file: LocalFile,
}

/// Client-side state for one dashboard visit.
///
/// Every mutation goes through a method so that the following hold after each call:
/// - `prediction` and `error` are never both present;
/// - `preview` is only present for the currently selected file;
/// - `loading` mirrors the in-flight submission unless a caller overrides it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    started: bool,
    selected_file: Option<SelectedFile>,
    preview: Option<String>,
    prediction: Option<Prediction>,
    loading: bool,
    error: Option<String>,
    user: Option<UserProfile>,
    history: Vec<HistoryEntry>,
    in_flight: Option<SubmissionId>,
    last_file_id: FileId,
    last_submission_id: SubmissionId,
    dirty: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Name shown in the header; falls back when the profile is unknown.
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Selects a new file. The previous preview is stale and dropped; a new one
    /// arrives through [`Session::set_preview`] once decoded.
    pub fn set_file(&mut self, file: LocalFile) -> FileId {
        self.last_file_id += 1;
        let id = self.last_file_id;
        self.selected_file = Some(SelectedFile { id, file });
        self.preview = None;
        self.prediction = None;
        self.error = None;
        self.dirty = true;
        id
    }

    /// Stores a decoded preview. Returns `false` (and changes nothing) when
    /// `file_id` is no longer the current selection.
    pub fn set_preview(&mut self, file_id: FileId, data_url: String) -> bool {
        match &self.selected_file {
            Some(selected) if selected.id == file_id => {
                self.preview = Some(data_url);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.dirty = true;
        }
    }

    pub fn set_prediction(&mut self, prediction: Prediction) {
        self.prediction = Some(prediction);
        self.error = None;
        self.dirty = true;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.prediction = None;
        self.dirty = true;
    }

    /// Clears the error without touching the prediction.
    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.dirty = true;
    }

    /// Replaces the history wholesale, keeping the server's order.
    pub fn set_history(&mut self, history: Vec<HistoryEntry>) {
        self.history = history;
        self.dirty = true;
    }

    /// Drops the selection and its outcome. `user`, `history` and any in-flight
    /// submission are kept.
    pub fn reset(&mut self) {
        self.selected_file = None;
        self.preview = None;
        self.prediction = None;
        self.error = None;
        self.dirty = true;
    }

    /// Starts a submission for the selected file. Returns `None` while another
    /// submission is in flight or when nothing is selected.
    pub fn begin_submission(&mut self) -> Option<(SubmissionId, LocalFile)> {
        if self.in_flight.is_some() {
            return None;
        }
        let file = self.selected_file.as_ref()?.file.clone();
        self.last_submission_id += 1;
        let id = self.last_submission_id;
        self.in_flight = Some(id);
        self.set_loading(true);
        self.clear_error();
        Some((id, file))
    }

    /// Ends the in-flight submission. Returns `false` for an id that is not
    /// the one in flight.
    pub fn finish_submission(&mut self, submission_id: SubmissionId) -> bool {
        if self.in_flight != Some(submission_id) {
            return false;
        }
        self.in_flight = None;
        self.set_loading(false);
        true
    }

    pub(crate) fn mark_started(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> DashboardViewModel {
        let has_file = self.selected_file.is_some();
        DashboardViewModel {
            display_name: self.display_name().to_string(),
            file_label: self
                .selected_file
                .as_ref()
                .map(|selected| selected.file.name.clone())
                .unwrap_or_else(|| EMPTY_FILE_LABEL.to_string()),
            has_preview: self.preview.is_some(),
            prediction: self.prediction.as_ref().map(|prediction| PredictionView {
                label: prediction.predicted_class.clone(),
                confidence_text: format_confidence(prediction.confidence),
            }),
            error: self.error.clone(),
            loading: self.loading,
            submit_enabled: has_file && !self.loading,
            submit_label: if self.loading {
                SUBMIT_LABEL_LOADING
            } else {
                SUBMIT_LABEL
            }
            .to_string(),
            clear_visible: has_file || self.prediction.is_some(),
            history: self
                .history
                .iter()
                .map(|entry| HistoryRowView {
                    id: entry.id,
                    image_url: entry.image_url.clone(),
                    label: entry.predicted_class.clone(),
                    confidence_text: format_confidence(entry.confidence),
                    created_at: entry.created_at,
                })
                .collect(),
            empty_history_message: self
                .history
                .is_empty()
                .then(|| EMPTY_HISTORY_MESSAGE.to_string()),
        }
    }
}
