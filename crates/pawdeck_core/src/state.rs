use crate::effect::BatchRequest;
use crate::gesture::CardGesture;
use crate::view_model::{CardView, DeckViewModel, TopCardView};

/// Generation counter bumped on every reset; stamps batch requests and
/// results so a stale in-flight load cannot touch a newer session.
pub type SessionToken = u64;

/// Request width is capped to keep transfers reasonable.
const MAX_REQUEST_WIDTH: u32 = 900;
/// Device pixel ratio is capped to avoid huge files on dense displays.
const MAX_PIXEL_RATIO: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Playing,
    Summary,
}

/// Terminal classification of a card when it leaves the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Like,
    Nope,
}

impl Decision {
    /// Screen direction the card exits toward: like right, nope left.
    pub fn direction(self) -> f32 {
        match self {
            Decision::Like => 1.0,
            Decision::Nope => -1.0,
        }
    }
}

/// One loaded card: generation index plus its image address. `verified`
/// is false only for fallback batches whose preloads all failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCard {
    pub index: u32,
    pub address: String,
    pub verified: bool,
}

/// Logical window geometry, fed in by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixels_per_point: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 480.0,
            pixels_per_point: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionToken,
    phase: Phase,
    card_count: u32,
    /// Presentation order; the last element is the current top.
    deck: Vec<CandidateCard>,
    liked: Vec<CandidateCard>,
    resolved: usize,
    batch_len: usize,
    attempts_done: usize,
    gesture: CardGesture,
    viewport: Viewport,
    dirty: bool,
}

impl AppState {
    pub fn new(card_count: u32) -> Self {
        Self {
            card_count,
            ..Self::default()
        }
    }

    pub fn session(&self) -> SessionToken {
        self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> DeckViewModel {
        let top = self.deck.last().map(|_| {
            let offset = self.gesture.offset();
            TopCardView {
                offset_x: offset.x,
                offset_y: offset.y,
                rotation_deg: self.gesture.rotation_deg(),
                scale: self.gesture.scale(),
                like_opacity: self.gesture.like_opacity(),
                nope_opacity: self.gesture.nope_opacity(),
                animating: self.gesture.is_animating(),
            }
        });
        DeckViewModel {
            phase: self.phase,
            cards: self.deck.iter().map(card_view).collect(),
            top,
            liked: self.liked.iter().map(card_view).collect(),
            batch_len: self.batch_len,
            resolved: self.resolved,
            liked_count: self.liked.len(),
            attempts_done: self.attempts_done,
            requested: self.card_count,
        }
    }

    /// Returns the dirty flag and clears it; the render loop uses this to
    /// skip frames with no visible change.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Starts a new session: bumps the token, clears everything, and
    /// returns the batch request for the loader.
    pub(crate) fn begin_session(&mut self) -> BatchRequest {
        self.session += 1;
        self.phase = Phase::Loading;
        self.deck.clear();
        self.liked.clear();
        self.resolved = 0;
        self.batch_len = 0;
        self.attempts_done = 0;
        self.gesture = CardGesture::default();
        self.dirty = true;
        let (width, height) = request_geometry(self.viewport);
        BatchRequest {
            count: self.card_count,
            width,
            height,
        }
    }

    /// Installs a freshly loaded batch and enters the playing phase.
    pub(crate) fn install_batch(&mut self, cards: Vec<CandidateCard>) {
        debug_assert!(
            self.phase == Phase::Loading,
            "batch arrived outside the loading phase"
        );
        self.batch_len = cards.len();
        self.deck = cards;
        self.gesture = CardGesture::default();
        self.phase = Phase::Playing;
        self.dirty = true;
    }

    pub(crate) fn note_attempt(&mut self) {
        self.attempts_done += 1;
        self.dirty = true;
    }

    /// Pops the top card with its decision. Reaching this with an empty
    /// deck or outside the playing phase is a caller bug.
    pub(crate) fn resolve_top(&mut self, decision: Decision) {
        debug_assert!(
            self.phase == Phase::Playing && !self.deck.is_empty(),
            "card resolved without an active deck"
        );
        if self.phase != Phase::Playing {
            return;
        }
        let Some(card) = self.deck.pop() else {
            return;
        };
        if decision == Decision::Like {
            self.liked.push(card);
        }
        self.resolved += 1;
        self.gesture = CardGesture::default();
        if self.deck.is_empty() {
            self.phase = Phase::Summary;
        }
        self.dirty = true;
    }

    /// True when the top card may receive gesture or command input.
    pub(crate) fn top_accepts_input(&self) -> bool {
        self.phase == Phase::Playing && !self.deck.is_empty()
    }

    pub(crate) fn gesture_drag(&mut self, dx: f32, dy: f32) {
        self.gesture.drag_by(dx, dy, self.viewport.width);
        self.dirty = true;
    }

    pub(crate) fn gesture_release(&mut self, velocity_x: f32) {
        self.gesture.release(velocity_x);
        self.dirty = true;
    }

    pub(crate) fn gesture_command(&mut self, decision: Decision) {
        self.gesture.command(decision);
        self.dirty = true;
    }

    /// Advances gesture animations; returns a decision once an exit
    /// animation has fully completed.
    pub(crate) fn gesture_tick(&mut self, dt_ms: f32) -> Option<Decision> {
        if !self.gesture.is_animating() {
            return None;
        }
        self.dirty = true;
        self.gesture.tick(dt_ms, self.viewport.width)
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.dirty = true;
        }
    }
}

fn card_view(card: &CandidateCard) -> CardView {
    CardView {
        index: card.index,
        address: card.address.clone(),
        verified: card.verified,
    }
}

/// Derives the batch request size from the viewport: capped device pixel
/// ratio, capped width, 3:4 aspect ratio.
fn request_geometry(viewport: Viewport) -> (u32, u32) {
    let ratio = viewport.pixels_per_point.clamp(1.0, MAX_PIXEL_RATIO);
    let width = ((viewport.width.max(1.0) * ratio).ceil() as u32).min(MAX_REQUEST_WIDTH);
    let height = (width as f32 * 4.0 / 3.0).ceil() as u32;
    (width, height)
}
