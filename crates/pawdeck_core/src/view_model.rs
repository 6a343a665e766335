use crate::Phase;

/// Render snapshot of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub index: u32,
    pub address: String,
    pub verified: bool,
}

/// Motion snapshot of the top card; everything here is cosmetic output of
/// the gesture interpreter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopCardView {
    pub offset_x: f32,
    pub offset_y: f32,
    pub rotation_deg: f32,
    pub scale: f32,
    pub like_opacity: f32,
    pub nope_opacity: f32,
    /// True while a settle or exit animation is running (keeps repainting).
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeckViewModel {
    pub phase: Phase,
    /// Remaining cards bottom-to-top; the last entry is the top card.
    pub cards: Vec<CardView>,
    pub top: Option<TopCardView>,
    pub liked: Vec<CardView>,
    /// Size of the batch the session started with.
    pub batch_len: usize,
    /// Cards popped so far this session.
    pub resolved: usize,
    pub liked_count: usize,
    /// Preload attempts finished so far (loading screen progress).
    pub attempts_done: usize,
    /// Cards asked of the loader.
    pub requested: u32,
}
