use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dashboard_core::{FileId, HistoryTrigger, LocalFile, SubmissionId};
use dashboard_logging::{dashboard_debug, dashboard_warn};
use tokio::sync::mpsc as async_mpsc;

use crate::api::{ApiSettings, HistoryService, PredictionService, ProfileService, ReqwestApi};
use crate::preview::decode_preview;
use crate::{ClientError, ClientEvent};

enum ClientCommand {
    LoadProfile,
    LoadHistory {
        trigger: HistoryTrigger,
    },
    DecodePreview {
        file_id: FileId,
        file: LocalFile,
    },
    SubmitPrediction {
        submission_id: SubmissionId,
        file: LocalFile,
    },
}

/// The collaborators effects are executed against.
#[derive(Clone)]
pub struct Services {
    pub profile: Arc<dyn ProfileService>,
    pub history: Arc<dyn HistoryService>,
    pub prediction: Arc<dyn PredictionService>,
    pub max_preview_bytes: u64,
}

impl Services {
    pub fn from_api(api: ReqwestApi, max_preview_bytes: u64) -> Self {
        let api = Arc::new(api);
        Self {
            profile: api.clone(),
            history: api.clone(),
            prediction: api,
            max_preview_bytes,
        }
    }
}

/// Runs effects as detached tasks on a single-threaded runtime owned by a
/// worker thread, and hands completions back through a channel.
pub struct ClientHandle {
    cmd_tx: async_mpsc::UnboundedSender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: &ApiSettings) -> Result<Self, ClientError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_services(Services::from_api(api, settings.max_preview_bytes))
    }

    pub fn with_services(services: Services) -> Result<Self, ClientError> {
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("dashboard-effects".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        let services = services.clone();
                        let event_tx = event_tx.clone();
                        // Detached: nobody joins these; completions only travel through `event_tx`.
                        tokio::spawn(async move {
                            handle_command(&services, command, event_tx).await;
                        });
                    }
                    dashboard_debug!("effect worker shutting down");
                });
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_profile(&self) {
        self.send(ClientCommand::LoadProfile);
    }

    pub fn load_history(&self, trigger: HistoryTrigger) {
        self.send(ClientCommand::LoadHistory { trigger });
    }

    pub fn decode_preview(&self, file_id: FileId, file: LocalFile) {
        self.send(ClientCommand::DecodePreview { file_id, file });
    }

    pub fn submit_prediction(&self, submission_id: SubmissionId, file: LocalFile) {
        self.send(ClientCommand::SubmitPrediction {
            submission_id,
            file,
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            dashboard_warn!("effect worker is gone; dropping command");
        }
    }
}

async fn handle_command(services: &Services, command: ClientCommand, event_tx: mpsc::Sender<ClientEvent>) {
    let event = match command {
        ClientCommand::LoadProfile => ClientEvent::ProfileLoaded(services.profile.load_profile().await),
        ClientCommand::LoadHistory { trigger } => {
            dashboard_debug!("loading history ({:?})", trigger);
            ClientEvent::HistoryLoaded {
                trigger,
                result: services.history.load_history().await,
            }
        }
        ClientCommand::DecodePreview { file_id, file } => ClientEvent::PreviewDecoded {
            file_id,
            result: decode_preview(&file, services.max_preview_bytes).await,
        },
        ClientCommand::SubmitPrediction {
            submission_id,
            file,
        } => ClientEvent::PredictionCompleted {
            submission_id,
            result: services.prediction.predict(&file).await,
        },
    };
    let _ = event_tx.send(event);
}
