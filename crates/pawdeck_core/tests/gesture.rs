//! Drives the gesture interpreter through the public update function:
//! drag, release, fling, settle-back, and the deferred resolve that only
//! lands once the exit animation completes.

use std::sync::Once;

use pawdeck_core::{update, AppState, CandidateCard, Msg, Phase};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

fn card(index: u32, address: &str) -> CandidateCard {
    CandidateCard {
        index,
        address: address.to_string(),
        verified: true,
    }
}

fn playing_state(cards: Vec<CandidateCard>) -> AppState {
    let state = AppState::new(cards.len() as u32);
    let (state, _effects) = update(state, Msg::ResetRequested);
    let session = state.session();
    let (state, _effects) = update(state, Msg::BatchLoaded { session, cards });
    state
}

fn drag(state: AppState, dx: f32, dy: f32) -> AppState {
    update(state, Msg::PointerDragged { dx, dy }).0
}

fn release(state: AppState, velocity_x: f32) -> AppState {
    update(state, Msg::PointerReleased { velocity_x }).0
}

/// Advances time in frame-sized steps.
fn tick(mut state: AppState, total_ms: f32) -> AppState {
    let mut remaining = total_ms;
    while remaining > 0.0 {
        let step = remaining.min(16.0);
        state = update(state, Msg::Tick { dt_ms: step }).0;
        remaining -= step;
    }
    state
}

#[test]
fn drag_past_threshold_resolves_like_after_exit_completes() {
    init_logging();
    let state = playing_state(vec![card(0, "a"), card(1, "b"), card(2, "c")]);

    // 100 px is past the 88 px threshold even with zero velocity.
    let state = drag(state, 100.0, 0.0);
    let state = release(state, 0.0);

    // Deferred mutation: nothing pops until the exit animation finishes.
    assert_eq!(state.view().cards.len(), 3);
    let state = tick(state, 100.0);
    assert_eq!(state.view().cards.len(), 3);

    let state = tick(state, 200.0);
    let view = state.view();
    assert_eq!(view.cards.len(), 2);
    assert_eq!(view.liked.len(), 1);
    assert_eq!(view.liked[0].address, "c");
}

#[test]
fn small_drag_springs_back_without_mutation() {
    init_logging();
    let state = playing_state(vec![card(0, "a"), card(1, "b")]);

    let state = drag(state, 20.0, 0.0);
    let state = release(state, 0.0);
    assert!(state.view().top.unwrap().animating);

    let state = tick(state, 1000.0);
    let view = state.view();

    assert_eq!(view.cards.len(), 2);
    assert!(view.liked.is_empty());
    let top = view.top.unwrap();
    assert!(top.offset_x.abs() < 1.0);
    assert!(top.offset_y.abs() < 1.0);
    assert!(!top.animating);
}

#[test]
fn fling_resolves_under_the_distance_threshold() {
    init_logging();
    let state = playing_state(vec![card(0, "a"), card(1, "b")]);

    let state = drag(state, 20.0, 0.0);
    // 0.8 px/ms beats the 0.5 px/ms fling threshold.
    let state = release(state, 0.8);
    let state = tick(state, 300.0);

    let view = state.view();
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.liked.len(), 1);
}

#[test]
fn leftward_drag_resolves_nope() {
    init_logging();
    let state = playing_state(vec![card(0, "a"), card(1, "b")]);

    let state = drag(state, -100.0, 0.0);
    let state = release(state, 0.0);
    let state = tick(state, 300.0);

    let view = state.view();
    assert_eq!(view.cards.len(), 1);
    assert!(view.liked.is_empty());
    assert_eq!(view.resolved, 1);
}

#[test]
fn drag_offset_is_clamped_to_the_viewport() {
    init_logging();
    // Default viewport is 360 px wide: horizontal clamp is 0.35 * 360.
    let state = playing_state(vec![card(0, "a")]);

    let state = drag(state, 1000.0, 500.0);
    let top = state.view().top.unwrap();

    assert!((top.offset_x - 126.0).abs() < 0.001);
    assert!((top.offset_y - 100.0).abs() < 0.001);
}

#[test]
fn rotation_follows_horizontal_offset_linearly() {
    init_logging();
    let state = playing_state(vec![card(0, "a")]);
    // Widen the viewport so the drag clamp sits past the rotation range.
    let (state, _effects) = update(
        state,
        Msg::ViewportResized {
            width: 1000.0,
            height: 800.0,
            pixels_per_point: 1.0,
        },
    );

    let state = drag(state, 150.0, 0.0);
    assert!((state.view().top.unwrap().rotation_deg - 7.5).abs() < 0.001);

    // 150 + 200 = 350, clamped to the ±300 rotation input range.
    let state = drag(state, 200.0, 0.0);
    assert!((state.view().top.unwrap().rotation_deg - 15.0).abs() < 0.001);
}

#[test]
fn hint_opacity_ramps_with_drag_distance() {
    init_logging();
    let state = playing_state(vec![card(0, "a")]);

    let state = drag(state, 100.0, 0.0);
    let top = state.view().top.unwrap();

    assert!((top.like_opacity - 0.5).abs() < 0.001);
    assert_eq!(top.nope_opacity, 0.0);
}

#[test]
fn like_button_runs_the_same_exit_path() {
    init_logging();
    let state = playing_state(vec![card(0, "a"), card(1, "b")]);

    let (state, _effects) = update(state, Msg::LikeClicked);
    assert_eq!(state.view().cards.len(), 2);

    let state = tick(state, 300.0);
    let view = state.view();
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.liked.len(), 1);
    assert_eq!(view.liked[0].address, "b");
}

#[test]
fn double_command_resolves_only_one_card() {
    init_logging();
    let state = playing_state(vec![card(0, "a"), card(1, "b"), card(2, "c")]);

    let (state, _effects) = update(state, Msg::LikeClicked);
    // Pressed again while the exit is in flight; must be ignored.
    let (state, _effects) = update(state, Msg::NopeClicked);
    let state = tick(state, 300.0);

    let view = state.view();
    assert_eq!(view.cards.len(), 2);
    assert_eq!(view.liked.len(), 1);
    assert_eq!(view.resolved, 1);
}

#[test]
fn release_without_a_drag_is_ignored() {
    init_logging();
    let state = playing_state(vec![card(0, "a")]);

    // A tap or stray fling with no drag behind it.
    let state = release(state, 2.0);
    let state = tick(state, 300.0);

    assert_eq!(state.view().cards.len(), 1);
    assert!(state.view().liked.is_empty());
}

#[test]
fn input_is_inert_outside_the_playing_phase() {
    init_logging();
    let state = AppState::new(5);
    let (state, _effects) = update(state, Msg::ResetRequested);
    assert_eq!(state.view().phase, Phase::Loading);

    let state = drag(state, 100.0, 0.0);
    let (state, _effects) = update(state, Msg::LikeClicked);
    let state = tick(state, 300.0);

    let view = state.view();
    assert_eq!(view.phase, Phase::Loading);
    assert!(view.liked.is_empty());
}
