use crate::{FileId, HistoryEntry, LocalFile, Prediction, SubmissionId, UserProfile};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Dashboard opened; kicks off the profile and history loads.
    SessionStarted,
    /// Profile service answered.
    ProfileLoaded(UserProfile),
    /// Profile service failed; the reason is only logged.
    ProfileFailed(String),
    /// User asked to reload the profile.
    ProfileRequested,
    /// History service answered with the full list.
    HistoryLoaded(Vec<HistoryEntry>),
    /// History service failed; the reason is only logged.
    HistoryFailed(String),
    /// User asked to reload the history.
    HistoryRequested,
    /// User picked a file. `None` when the picker was closed without a choice.
    FileSelected(Option<LocalFile>),
    /// Preview decode for a selection finished.
    PreviewDecoded { file_id: FileId, data_url: String },
    /// Preview decode for a selection failed.
    PreviewFailed { file_id: FileId, reason: String },
    /// User clicked "Detect Object".
    SubmitClicked,
    /// Prediction service accepted the upload.
    PredictionSucceeded {
        submission_id: SubmissionId,
        prediction: Prediction,
    },
    /// Prediction service rejected the upload or could not be reached.
    /// `message` is the service-provided reason, if any.
    PredictionFailed {
        submission_id: SubmissionId,
        message: Option<String>,
    },
    /// User clicked "Clear".
    ClearClicked,
    /// User clicked "Logout".
    LogoutClicked,
}
