use std::time::{Duration, Instant};

use dashboard_client::ClientHandle;
use dashboard_core::{update, DashboardViewModel, Msg, Session};
use dashboard_logging::{clear_session_label, dashboard_info, set_session_label};

use crate::effects::EffectRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Owns the session state and drives it: messages in, effects out, client
/// completions back in as messages.
pub struct SessionRunner {
    state: Session,
    effects: EffectRunner,
    closed: bool,
}

impl SessionRunner {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            state: Session::new(),
            effects: EffectRunner::new(client),
            closed: false,
        }
    }

    pub fn start(&mut self) {
        self.dispatch(Msg::SessionStarted);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        if self.closed {
            return;
        }
        if let Msg::ProfileLoaded(profile) = &msg {
            set_session_label(profile.username.clone());
        }

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.enqueue(effects);

        if self.effects.logout_requested() {
            dashboard_info!("logout requested; closing session");
            clear_session_label();
            self.closed = true;
        }
    }

    /// Apply client completions until nothing is outstanding. Returns `false`
    /// if `timeout` elapsed first.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.effects.pending() > 0 && !self.closed {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            if let Some(msg) = self.effects.next_msg(POLL_INTERVAL.min(deadline - now)) {
                self.dispatch(msg);
            }
        }
        true
    }

    pub fn state(&self) -> &Session {
        &self.state
    }

    pub fn view(&self) -> DashboardViewModel {
        self.state.view()
    }

    /// The view to draw, if anything changed since the last call.
    pub fn take_render(&mut self) -> Option<DashboardViewModel> {
        let view = self.state.view();
        self.state.consume_dirty().then_some(view)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
