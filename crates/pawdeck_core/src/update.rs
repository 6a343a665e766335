use crate::{AppState, Decision, Effect, Msg, Viewport};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::BatchLoaded { session, cards } => {
            // A load finishing after a newer reset must not touch the new
            // session; the token comparison is the staleness check.
            if session != state.session() {
                return (state, Vec::new());
            }
            state.install_batch(cards);
            Vec::new()
        }
        Msg::AttemptFinished { session } => {
            if session != state.session() {
                return (state, Vec::new());
            }
            state.note_attempt();
            Vec::new()
        }
        Msg::PointerDragged { dx, dy } => {
            if state.top_accepts_input() {
                state.gesture_drag(dx, dy);
            }
            Vec::new()
        }
        Msg::PointerReleased { velocity_x } => {
            if state.top_accepts_input() {
                state.gesture_release(velocity_x);
            }
            Vec::new()
        }
        Msg::LikeClicked => {
            if state.top_accepts_input() {
                state.gesture_command(Decision::Like);
            }
            Vec::new()
        }
        Msg::NopeClicked => {
            if state.top_accepts_input() {
                state.gesture_command(Decision::Nope);
            }
            Vec::new()
        }
        Msg::CardResolved { decision } => {
            state.resolve_top(decision);
            Vec::new()
        }
        Msg::Tick { dt_ms } => {
            if state.top_accepts_input() {
                if let Some(decision) = state.gesture_tick(dt_ms) {
                    state.resolve_top(decision);
                }
            }
            Vec::new()
        }
        Msg::ViewportResized {
            width,
            height,
            pixels_per_point,
        } => {
            state.set_viewport(Viewport {
                width,
                height,
                pixels_per_point,
            });
            Vec::new()
        }
        Msg::ResetRequested => {
            let request = state.begin_session();
            vec![Effect::StartLoad {
                session: state.session(),
                request,
            }]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
