use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use eframe::egui;
use pawdeck_core::{update, AppState, Msg, Phase};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::settings;
use super::textures::{spawn_decoder, TextureStore};
use super::ui;

pub fn run_app() -> eframe::Result<()> {
    logging::initialize(LogDestination::Both);
    let settings = settings::load(Path::new("."));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([320.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pawdeck",
        options,
        Box::new(move |cc| Box::new(DeckApp::new(cc, settings))),
    )
}

struct DeckApp {
    state: AppState,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    textures: TextureStore,
    /// Frame delta clock for gesture animations.
    last_tick: Instant,
    booted: bool,
    last_viewport: Option<(egui::Vec2, f32)>,
}

impl DeckApp {
    fn new(cc: &eframe::CreationContext<'_>, settings: settings::Settings) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let (decode_tx, decoded_rx) = spawn_decoder(cc.egui_ctx.clone());
        let effects = EffectRunner::new(msg_tx, decode_tx, cc.egui_ctx.clone(), &settings);

        Self {
            state: AppState::new(settings.card_count),
            effects,
            msg_rx,
            textures: TextureStore::new(decoded_rx),
            last_tick: Instant::now(),
            booted: false,
            last_viewport: None,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.enqueue(effects);
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Engine events and anything else queued from other threads.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }

        let screen = ctx.screen_rect();
        let pixels_per_point = ctx.pixels_per_point();
        if self.last_viewport != Some((screen.size(), pixels_per_point)) {
            self.last_viewport = Some((screen.size(), pixels_per_point));
            self.dispatch(Msg::ViewportResized {
                width: screen.width(),
                height: screen.height(),
                pixels_per_point,
            });
        }

        // First measured frame kicks off the initial session.
        if !self.booted {
            self.booted = true;
            self.dispatch(Msg::ResetRequested);
        }

        let now = Instant::now();
        let dt_ms = (now - self.last_tick).as_secs_f32() * 1000.0;
        self.last_tick = now;
        self.dispatch(Msg::Tick {
            dt_ms: dt_ms.min(250.0),
        });

        let mut msgs = Vec::new();
        ctx.input(|input| {
            if input.key_pressed(egui::Key::ArrowRight) {
                msgs.push(Msg::LikeClicked);
            }
            if input.key_pressed(egui::Key::ArrowLeft) {
                msgs.push(Msg::NopeClicked);
            }
        });

        self.textures.poll_uploads(ctx);
        self.textures.retain_session(self.state.session());

        let view = self.state.view();
        ui::render(ctx, &view, &self.textures, self.state.session(), &mut msgs);

        // UI input lands a frame behind the render that produced it.
        for msg in msgs {
            self.dispatch(msg);
        }

        let animating = view.top.is_some_and(|top| top.animating);
        if self.state.consume_dirty() || animating || view.phase == Phase::Loading {
            ctx.request_repaint();
        } else {
            // Idle heartbeat so queued channel traffic is never stuck.
            ctx.request_repaint_after(Duration::from_millis(75));
        }
    }
}
