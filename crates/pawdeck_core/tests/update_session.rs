use std::sync::Once;

use pawdeck_core::{update, AppState, BatchRequest, CandidateCard, Effect, Msg, Phase};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

fn card(index: u32) -> CandidateCard {
    CandidateCard {
        index,
        address: format!("https://cats.example/cat/{index}"),
        verified: true,
    }
}

#[test]
fn reset_starts_a_session_and_requests_a_load() {
    init_logging();
    let state = AppState::new(10);

    let (mut state, effects) = update(state, Msg::ResetRequested);

    // Default viewport is 360 logical px wide at 1x; 3:4 aspect.
    assert_eq!(
        effects,
        vec![Effect::StartLoad {
            session: 1,
            request: BatchRequest {
                count: 10,
                width: 360,
                height: 480,
            },
        }]
    );
    assert_eq!(state.view().phase, Phase::Loading);
    assert!(state.consume_dirty());
}

#[test]
fn viewport_drives_request_geometry() {
    init_logging();
    let state = AppState::new(10);
    let (state, _effects) = update(
        state,
        Msg::ViewportResized {
            width: 600.0,
            height: 800.0,
            pixels_per_point: 3.0,
        },
    );

    let (_state, effects) = update(state, Msg::ResetRequested);

    // Pixel ratio caps at 2 and width caps at 900: min(900, 600 * 2).
    assert_eq!(
        effects,
        vec![Effect::StartLoad {
            session: 1,
            request: BatchRequest {
                count: 10,
                width: 900,
                height: 1200,
            },
        }]
    );
}

#[test]
fn stale_batch_after_reset_is_ignored() {
    init_logging();
    let state = AppState::new(3);
    let (state, _effects) = update(state, Msg::ResetRequested);
    let stale_session = state.session();
    let (mut state, _effects) = update(state, Msg::ResetRequested);
    assert!(state.consume_dirty());

    // The first session's load resolves late; it must not touch the deck.
    let (mut state, effects) = update(
        state,
        Msg::BatchLoaded {
            session: stale_session,
            cards: vec![card(0), card(1)],
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, Phase::Loading);
    assert!(state.view().cards.is_empty());
    assert!(!state.consume_dirty());

    // The current session's load still lands normally.
    let session = state.session();
    let (state, _effects) = update(
        state,
        Msg::BatchLoaded {
            session,
            cards: vec![card(0), card(1), card(2)],
        },
    );
    assert_eq!(state.view().phase, Phase::Playing);
    assert_eq!(state.view().cards.len(), 3);
}

#[test]
fn reset_clears_deck_and_likes() {
    init_logging();
    let state = AppState::new(2);
    let (state, _effects) = update(state, Msg::ResetRequested);
    let session = state.session();
    let (state, _effects) = update(
        state,
        Msg::BatchLoaded {
            session,
            cards: vec![card(0), card(1)],
        },
    );
    let (state, _effects) = update(
        state,
        Msg::CardResolved {
            decision: pawdeck_core::Decision::Like,
        },
    );
    assert_eq!(state.view().liked_count, 1);

    let (state, effects) = update(state, Msg::ResetRequested);
    let view = state.view();

    assert_eq!(view.phase, Phase::Loading);
    assert!(view.cards.is_empty());
    assert!(view.liked.is_empty());
    assert_eq!(view.resolved, 0);
    assert_eq!(view.attempts_done, 0);
    assert!(matches!(
        effects.as_slice(),
        [Effect::StartLoad { session: 2, .. }]
    ));
}

#[test]
fn attempt_progress_counts_only_the_current_session() {
    init_logging();
    let state = AppState::new(4);
    let (state, _effects) = update(state, Msg::ResetRequested);
    let session = state.session();

    let (state, _effects) = update(state, Msg::AttemptFinished { session });
    let (state, _effects) = update(state, Msg::AttemptFinished { session });
    assert_eq!(state.view().attempts_done, 2);

    let (state, _effects) = update(
        state,
        Msg::AttemptFinished {
            session: session + 7,
        },
    );
    assert_eq!(state.view().attempts_done, 2);
}
