use std::sync::mpsc;
use std::thread;

use deck_logging::deck_info;
use eframe::egui;
use pawdeck_core::{CandidateCard, Effect, Msg};
use pawdeck_engine::{EngineEvent, EngineHandle, ImageSource, PreloadSettings};

use super::settings::Settings;
use super::textures::DecodeJob;

/// Bridges core effects to the engine and engine events back to messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        msg_tx: mpsc::Sender<Msg>,
        decode_tx: mpsc::Sender<DecodeJob>,
        ctx: egui::Context,
        settings: &Settings,
    ) -> Self {
        let preload_settings = PreloadSettings {
            attempt_timeout: std::time::Duration::from_millis(settings.attempt_timeout_ms),
            ..PreloadSettings::default()
        };
        let source = ImageSource::new(&settings.endpoint).unwrap_or_else(|err| {
            deck_logging::deck_warn!(
                "endpoint {:?} rejected ({}); using the default",
                settings.endpoint,
                err
            );
            ImageSource::default()
        });

        let (engine, event_rx) = EngineHandle::spawn(preload_settings, source);
        spawn_event_pump(event_rx, msg_tx, decode_tx, ctx);
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartLoad { session, request } => {
                    deck_info!(
                        "StartLoad session={} count={} {}x{}",
                        session,
                        request.count,
                        request.width,
                        request.height
                    );
                    self.engine.load_batch(
                        session,
                        pawdeck_engine::BatchRequest {
                            count: request.count,
                            width: request.width,
                            height: request.height,
                        },
                    );
                }
            }
        }
    }
}

fn spawn_event_pump(
    event_rx: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
    decode_tx: mpsc::Sender<DecodeJob>,
    ctx: egui::Context,
) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            match event {
                EngineEvent::AttemptFinished { session, ok: _ } => {
                    let _ = msg_tx.send(Msg::AttemptFinished { session });
                }
                EngineEvent::BatchReady { session, cards } => {
                    // Bytes go to the decode worker; the state machine only
                    // ever sees addresses.
                    for card in &cards {
                        if let Some(bytes) = &card.bytes {
                            let _ = decode_tx.send(DecodeJob {
                                session,
                                index: card.index,
                                bytes: bytes.clone(),
                            });
                        }
                    }
                    let cards = cards
                        .into_iter()
                        .map(|card| CandidateCard {
                            index: card.index,
                            address: card.url,
                            verified: card.bytes.is_some(),
                        })
                        .collect();
                    let _ = msg_tx.send(Msg::BatchLoaded { session, cards });
                }
            }
            ctx.request_repaint();
        }
    });
}
