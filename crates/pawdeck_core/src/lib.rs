//! Pawdeck core: pure swipe-deck state machine and gesture interpreter.
mod effect;
mod gesture;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{BatchRequest, Effect};
pub use msg::Msg;
pub use state::{AppState, CandidateCard, Decision, Phase, SessionToken, Viewport};
pub use update::update;
pub use view_model::{CardView, DeckViewModel, TopCardView};
