use std::time::Duration;

use dashboard_client::{ClientEvent, ClientHandle};
use dashboard_core::{Effect, Msg};
use dashboard_logging::{dashboard_info, dashboard_warn};

/// Forwards core effects to the client and turns client events back into messages.
pub struct EffectRunner {
    client: ClientHandle,
    pending: usize,
    logout_requested: bool,
}

impl EffectRunner {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            client,
            pending: 0,
            logout_requested: false,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadProfile => {
                    self.client.load_profile();
                    self.pending += 1;
                }
                Effect::LoadHistory { trigger } => {
                    self.client.load_history(trigger);
                    self.pending += 1;
                }
                Effect::DecodePreview { file_id, file } => {
                    self.client.decode_preview(file_id, file);
                    self.pending += 1;
                }
                Effect::SubmitPrediction {
                    submission_id,
                    file,
                } => {
                    dashboard_info!(
                        "SubmitPrediction id={} file={} path={}",
                        submission_id,
                        file.name,
                        file.path.display()
                    );
                    self.client.submit_prediction(submission_id, file);
                    self.pending += 1;
                }
                Effect::Logout => {
                    self.logout_requested = true;
                }
            }
        }
    }

    /// Effects sent to the client whose completion has not been received yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn logout_requested(&self) -> bool {
        self.logout_requested
    }

    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.client.recv_timeout(timeout)?;
        self.pending = self.pending.saturating_sub(1);
        Some(event_to_msg(event))
    }
}

pub fn event_to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::ProfileLoaded(Ok(profile)) => Msg::ProfileLoaded(profile),
        ClientEvent::ProfileLoaded(Err(err)) => Msg::ProfileFailed(err.to_string()),
        ClientEvent::HistoryLoaded {
            result: Ok(entries),
            ..
        } => Msg::HistoryLoaded(entries),
        ClientEvent::HistoryLoaded {
            trigger,
            result: Err(err),
        } => Msg::HistoryFailed(format!("{err} (trigger {trigger:?})")),
        ClientEvent::PreviewDecoded {
            file_id,
            result: Ok(data_url),
        } => Msg::PreviewDecoded { file_id, data_url },
        ClientEvent::PreviewDecoded {
            file_id,
            result: Err(err),
        } => Msg::PreviewFailed {
            file_id,
            reason: err.to_string(),
        },
        ClientEvent::PredictionCompleted {
            submission_id,
            result: Ok(prediction),
        } => Msg::PredictionSucceeded {
            submission_id,
            prediction,
        },
        ClientEvent::PredictionCompleted {
            submission_id,
            result: Err(err),
        } => {
            dashboard_warn!("Prediction {} failed: {}", submission_id, err);
            Msg::PredictionFailed {
                submission_id,
                message: err.service_message,
            }
        }
    }
}
