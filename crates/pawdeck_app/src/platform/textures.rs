//! Background image decoding and throttled texture upload.
//!
//! Fetched bytes are decoded off the UI thread; the store drains decoded
//! frames into GPU textures a few per frame so a large batch landing at
//! once cannot stall rendering.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use deck_logging::deck_warn;
use eframe::egui;
use pawdeck_core::SessionToken;

// Keep UI responsive by hard-capping per-frame upload work.
const UPLOADS_PER_FRAME: usize = 4;

/// Raw bytes handed to the decode worker.
pub struct DecodeJob {
    pub session: SessionToken,
    pub index: u32,
    pub bytes: bytes::Bytes,
}

pub struct DecodedImage {
    session: SessionToken,
    index: u32,
    image: egui::ColorImage,
}

/// Spawns the decode worker; returns its job sender and the decoded-frame
/// receiver the [`TextureStore`] drains.
pub fn spawn_decoder(ctx: egui::Context) -> (Sender<DecodeJob>, Receiver<DecodedImage>) {
    let (job_tx, job_rx) = std::sync::mpsc::channel::<DecodeJob>();
    let (decoded_tx, decoded_rx) = std::sync::mpsc::channel::<DecodedImage>();

    thread::spawn(move || {
        while let Ok(job) = job_rx.recv() {
            match image::load_from_memory(&job.bytes) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    let _ = decoded_tx.send(DecodedImage {
                        session: job.session,
                        index: job.index,
                        image,
                    });
                    ctx.request_repaint();
                }
                Err(err) => {
                    // The card still renders as a placeholder.
                    deck_warn!("failed to decode card {}: {}", job.index, err);
                }
            }
        }
    });

    (job_tx, decoded_rx)
}

pub struct TextureStore {
    inbox: Receiver<DecodedImage>,
    textures: HashMap<(SessionToken, u32), egui::TextureHandle>,
}

impl TextureStore {
    pub fn new(inbox: Receiver<DecodedImage>) -> Self {
        Self {
            inbox,
            textures: HashMap::new(),
        }
    }

    /// Uploads a bounded number of decoded frames as textures.
    pub fn poll_uploads(&mut self, ctx: &egui::Context) {
        for _ in 0..UPLOADS_PER_FRAME {
            let Ok(decoded) = self.inbox.try_recv() else {
                break;
            };
            let name = format!("card-{}-{}", decoded.session, decoded.index);
            let handle =
                ctx.load_texture(name, decoded.image, egui::TextureOptions::LINEAR);
            self.textures
                .insert((decoded.session, decoded.index), handle);
        }
    }

    pub fn get(&self, session: SessionToken, index: u32) -> Option<&egui::TextureHandle> {
        self.textures.get(&(session, index))
    }

    /// Frees textures from earlier sessions after a reset.
    pub fn retain_session(&mut self, session: SessionToken) {
        self.textures.retain(|(owner, _), _| *owner == session);
    }
}
