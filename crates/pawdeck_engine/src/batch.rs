//! Batch preload policy: every attempt runs concurrently, the batch joins
//! all-settled, and the output keeps generation order. A batch where every
//! attempt failed falls back to the unfiltered candidate list so the deck
//! is never empty just because the network was.

use std::time::Duration;

use deck_logging::{deck_debug, deck_warn};
use futures_util::future::join_all;

use crate::fetch::{Preloader, ProgressSink};
use crate::{CandidateImage, EngineEvent, PreloadedCard, SessionToken};

pub async fn preload_batch(
    preloader: &dyn Preloader,
    session: SessionToken,
    candidates: Vec<CandidateImage>,
    attempt_timeout: Duration,
    sink: &dyn ProgressSink,
) -> Vec<PreloadedCard> {
    let attempts = candidates.iter().map(|candidate| async move {
        let outcome = tokio::time::timeout(attempt_timeout, preloader.preload(candidate)).await;
        let bytes = match outcome {
            Ok(Ok(bytes)) => Some(bytes),
            Ok(Err(err)) => {
                deck_debug!("preload {} failed: {}", candidate.index, err);
                None
            }
            Err(_elapsed) => {
                deck_debug!(
                    "preload {} timed out after {:?}",
                    candidate.index,
                    attempt_timeout
                );
                None
            }
        };
        sink.emit(EngineEvent::AttemptFinished {
            session,
            ok: bytes.is_some(),
        });
        bytes
    });

    // join_all keeps generation order regardless of completion order, and
    // no attempt is cancelled because a sibling finished first.
    let results = join_all(attempts).await;

    let loaded: Vec<PreloadedCard> = candidates
        .iter()
        .zip(results)
        .filter_map(|(candidate, bytes)| {
            bytes.map(|bytes| PreloadedCard {
                index: candidate.index,
                url: candidate.url.clone(),
                bytes: Some(bytes),
            })
        })
        .collect();

    if loaded.is_empty() && !candidates.is_empty() {
        // Hand the unverified addresses through rather than showing
        // nothing; per-card render failures are the accepted cost.
        deck_warn!(
            "all {} preloads failed; falling back to the unfiltered batch",
            candidates.len()
        );
        return candidates
            .into_iter()
            .map(|candidate| PreloadedCard {
                index: candidate.index,
                url: candidate.url,
                bytes: None,
            })
            .collect();
    }

    deck_debug!(
        "batch ready: {} of {} candidates loaded",
        loaded.len(),
        candidates.len()
    );
    loaded
}
