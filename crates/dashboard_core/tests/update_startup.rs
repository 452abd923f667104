use std::sync::Once;

use chrono::{TimeZone, Utc};
use dashboard_core::{
    update, Effect, HistoryEntry, HistoryTrigger, Msg, Session, UserProfile, DEFAULT_DISPLAY_NAME,
    EMPTY_HISTORY_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn entry(id: u64, class: &str, confidence: f64) -> HistoryEntry {
    HistoryEntry {
        id,
        image_url: Some(format!("http://localhost:8000/media/predictions/{id}.png")),
        predicted_class: class.to_string(),
        confidence,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, id as u32).unwrap(),
    }
}

#[test]
fn session_start_requests_profile_and_history() {
    init_logging();
    let state = Session::new();
    assert!(!state.loading());

    let (state, effects) = update(state, Msg::SessionStarted);

    assert!(state.is_started());
    assert!(!state.loading());
    assert_eq!(
        effects,
        vec![
            Effect::LoadProfile,
            Effect::LoadHistory {
                trigger: HistoryTrigger::SessionStart
            },
        ]
    );
}

#[test]
fn session_start_is_only_honoured_once() {
    init_logging();
    let (state, _) = update(Session::new(), Msg::SessionStarted);
    let (_state, effects) = update(state, Msg::SessionStarted);
    assert!(effects.is_empty());
}

#[test]
fn profile_and_history_apply_in_any_order() {
    init_logging();
    let (started, _) = update(Session::new(), Msg::SessionStarted);

    let (a, _) = update(started.clone(), Msg::ProfileLoaded(UserProfile::new("alice")));
    let (a, _) = update(a, Msg::HistoryLoaded(Vec::new()));

    let (b, _) = update(started, Msg::HistoryLoaded(Vec::new()));
    let (b, _) = update(b, Msg::ProfileLoaded(UserProfile::new("alice")));

    assert_eq!(a.view(), b.view());
    assert_eq!(a.user().map(|u| u.username.as_str()), Some("alice"));
    assert!(a.history().is_empty());
    assert_eq!(
        a.view().empty_history_message.as_deref(),
        Some(EMPTY_HISTORY_MESSAGE)
    );
}

#[test]
fn profile_failure_keeps_default_display_name() {
    init_logging();
    let (state, _) = update(Session::new(), Msg::SessionStarted);
    let (mut state, effects) = update(state, Msg::ProfileFailed("401 Unauthorized".into()));

    assert!(effects.is_empty());
    assert!(state.user().is_none());
    assert!(state.error().is_none());
    assert_eq!(state.view().display_name, DEFAULT_DISPLAY_NAME);
    assert!(!state.consume_dirty());
}

#[test]
fn history_failure_keeps_previous_entries() {
    init_logging();
    let history = vec![entry(2, "Tabby", 0.8), entry(1, "Golden Retriever", 0.6)];
    let (state, _) = update(Session::new(), Msg::HistoryLoaded(history.clone()));

    let (state, effects) = update(state, Msg::HistoryFailed("connection refused".into()));

    assert!(effects.is_empty());
    assert_eq!(state.history(), history.as_slice());
    assert!(state.error().is_none());
}

#[test]
fn history_is_replaced_wholesale_in_server_order() {
    init_logging();
    let (state, _) = update(Session::new(), Msg::HistoryLoaded(vec![entry(1, "Tabby", 0.8)]));
    let newer = vec![entry(3, "Zebra", 0.4), entry(5, "Aardvark", 0.9), entry(1, "Tabby", 0.8)];

    let (state, _) = update(state, Msg::HistoryLoaded(newer.clone()));

    assert_eq!(state.history(), newer.as_slice());
    let view = state.view();
    let labels: Vec<_> = view.history.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["Zebra", "Aardvark", "Tabby"]);
    assert_eq!(view.history[1].confidence_text, "90.00%");
    assert!(view.empty_history_message.is_none());
}

#[test]
fn manual_reloads_emit_loads() {
    init_logging();
    let (state, effects) = update(Session::new(), Msg::ProfileRequested);
    assert_eq!(effects, vec![Effect::LoadProfile]);

    let (_state, effects) = update(state, Msg::HistoryRequested);
    assert_eq!(
        effects,
        vec![Effect::LoadHistory {
            trigger: HistoryTrigger::Manual
        }]
    );
}

#[test]
fn logout_emits_effect_without_state_change() {
    init_logging();
    let (state, _) = update(Session::new(), Msg::ProfileLoaded(UserProfile::new("alice")));
    let before = state.view();

    let (next, effects) = update(state, Msg::LogoutClicked);

    assert_eq!(next.view(), before);
    assert_eq!(effects, vec![Effect::Logout]);
}
