#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartLoad {
        session: crate::SessionToken,
        request: BatchRequest,
    },
}

/// Geometry and size of one batch load, derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub count: u32,
    pub width: u32,
    pub height: u32,
}
