use std::sync::{mpsc, Arc};
use std::thread;

use deck_logging::{deck_error, deck_info};

use crate::fetch::{ChannelProgressSink, PreloadSettings, Preloader, ReqwestPreloader};
use crate::{preload_batch, BatchRequest, EngineEvent, ImageSource, SessionToken};

enum EngineCommand {
    LoadBatch {
        session: SessionToken,
        request: BatchRequest,
    },
}

/// Command side of the engine. The engine owns a tokio runtime on its own
/// thread; batch loads are spawned onto it and report back over the event
/// channel returned by [`EngineHandle::spawn`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        settings: PreloadSettings,
        source: ImageSource,
    ) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let attempt_timeout = settings.attempt_timeout;

        thread::spawn(move || {
            let preloader: Arc<dyn Preloader> = match ReqwestPreloader::new(settings) {
                Ok(preloader) => Arc::new(preloader),
                Err(err) => {
                    deck_error!("failed to build preloader: {}", err);
                    return;
                }
            };
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let preloader = preloader.clone();
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(preloader.as_ref(), &source, command, attempt_timeout, event_tx)
                        .await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn load_batch(&self, session: SessionToken, request: BatchRequest) {
        let _ = self.cmd_tx.send(EngineCommand::LoadBatch { session, request });
    }
}

async fn handle_command(
    preloader: &dyn Preloader,
    source: &ImageSource,
    command: EngineCommand,
    attempt_timeout: std::time::Duration,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::LoadBatch { session, request } => {
            deck_info!(
                "load batch session={} count={} {}x{}",
                session,
                request.count,
                request.width,
                request.height
            );
            let candidates = source.candidates(&request);
            let sink = ChannelProgressSink::new(event_tx.clone());
            let cards = preload_batch(preloader, session, candidates, attempt_timeout, &sink).await;
            let _ = event_tx.send(EngineEvent::BatchReady { session, cards });
        }
    }
}
