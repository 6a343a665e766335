#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Loader finished for a session; carries the cards in generation order.
    /// Results stamped with a stale session token are ignored.
    BatchLoaded {
        session: crate::SessionToken,
        cards: Vec<crate::CandidateCard>,
    },
    /// One preload attempt finished (drives the loading-screen counter).
    AttemptFinished { session: crate::SessionToken },
    /// Pointer moved while dragging the top card; deltas in logical px.
    PointerDragged { dx: f32, dy: f32 },
    /// Pointer released over the top card; horizontal velocity in px/ms.
    PointerReleased { velocity_x: f32 },
    /// Like button or its keyboard equivalent.
    LikeClicked,
    /// Nope button or its keyboard equivalent.
    NopeClicked,
    /// Apply a decision to the top card. Sent internally once the exit
    /// animation completes; correct callers never send this with an empty
    /// deck or outside the playing phase.
    CardResolved { decision: crate::Decision },
    /// Frame tick advancing gesture animations.
    Tick { dt_ms: f32 },
    /// Window geometry changed; feeds drag clamping and batch geometry.
    ViewportResized {
        width: f32,
        height: f32,
        pixels_per_point: f32,
    },
    /// Start a fresh session: clear deck and likes, reload a batch.
    ResetRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
