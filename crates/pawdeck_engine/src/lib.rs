//! Pawdeck engine: candidate generation and concurrent image preloading.
mod batch;
mod engine;
mod fetch;
mod source;
mod types;

pub use batch::preload_batch;
pub use engine::EngineHandle;
pub use fetch::{PreloadSettings, Preloader, ProgressSink, ReqwestPreloader};
pub use source::{ImageSource, DEFAULT_ENDPOINT};
pub use types::{
    BatchRequest, CandidateImage, EngineEvent, PreloadError, PreloadedCard, SessionToken,
};
