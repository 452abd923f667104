use dashboard_logging::{dashboard_debug, dashboard_info, dashboard_warn};

use crate::state::{NO_FILE_ERROR, PREDICTION_FALLBACK_ERROR};
use crate::{Effect, HistoryTrigger, Msg, Session};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: Session, msg: Msg) -> (Session, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => {
            if state.mark_started() {
                // Profile and history load independently; neither waits on the other.
                vec![
                    Effect::LoadProfile,
                    Effect::LoadHistory {
                        trigger: HistoryTrigger::SessionStart,
                    },
                ]
            } else {
                dashboard_debug!("session already started; ignoring");
                Vec::new()
            }
        }
        Msg::ProfileLoaded(profile) => {
            dashboard_info!("profile loaded for {}", profile.username);
            state.set_user(profile);
            Vec::new()
        }
        Msg::ProfileFailed(reason) => {
            dashboard_warn!("failed to fetch profile: {}", reason);
            Vec::new()
        }
        Msg::ProfileRequested => vec![Effect::LoadProfile],
        Msg::HistoryLoaded(entries) => {
            dashboard_debug!("history loaded with {} entries", entries.len());
            state.set_history(entries);
            Vec::new()
        }
        Msg::HistoryFailed(reason) => {
            dashboard_warn!("failed to fetch history: {}", reason);
            Vec::new()
        }
        Msg::HistoryRequested => vec![Effect::LoadHistory {
            trigger: HistoryTrigger::Manual,
        }],
        Msg::FileSelected(None) => Vec::new(),
        Msg::FileSelected(Some(file)) => {
            let file_id = state.set_file(file.clone());
            vec![Effect::DecodePreview { file_id, file }]
        }
        Msg::PreviewDecoded { file_id, data_url } => {
            if !state.set_preview(file_id, data_url) {
                dashboard_debug!("dropping preview for stale selection {}", file_id);
            }
            Vec::new()
        }
        Msg::PreviewFailed { file_id, reason } => {
            // Best effort: the preview stays absent and the user is not told.
            dashboard_warn!("preview decode failed for selection {}: {}", file_id, reason);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::PredictionSucceeded {
            submission_id,
            prediction,
        } => {
            if state.in_flight() == Some(submission_id) {
                dashboard_info!(
                    "prediction {} resolved: {} ({})",
                    submission_id,
                    prediction.predicted_class,
                    prediction.confidence
                );
                state.set_prediction(prediction);
                state.finish_submission(submission_id);
                vec![Effect::LoadHistory {
                    trigger: HistoryTrigger::AfterPrediction,
                }]
            } else {
                dashboard_warn!("ignoring result for unknown submission {}", submission_id);
                Vec::new()
            }
        }
        Msg::PredictionFailed {
            submission_id,
            message,
        } => {
            if state.in_flight() == Some(submission_id) {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PREDICTION_FALLBACK_ERROR.to_string());
                dashboard_warn!("prediction {} failed: {}", submission_id, message);
                state.set_error(message);
                state.finish_submission(submission_id);
            } else {
                dashboard_warn!("ignoring failure for unknown submission {}", submission_id);
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            state.reset();
            Vec::new()
        }
        Msg::LogoutClicked => vec![Effect::Logout],
    };

    (state, effects)
}

fn submit(state: &mut Session) -> Vec<Effect> {
    if let Some(in_flight) = state.in_flight() {
        dashboard_debug!("submission {} still in flight; ignoring submit", in_flight);
        return Vec::new();
    }
    match state.begin_submission() {
        Some((submission_id, file)) => {
            dashboard_info!("submitting {} as submission {}", file.name, submission_id);
            vec![Effect::SubmitPrediction {
                submission_id,
                file,
            }]
        }
        None => {
            state.set_error(NO_FILE_ERROR);
            Vec::new()
        }
    }
}
