use dashboard_core::{update, Msg, Session};

#[test]
fn cancelled_file_selection_is_noop() {
    let state = Session::new();
    let (next, effects) = update(state.clone(), Msg::FileSelected(None));

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
