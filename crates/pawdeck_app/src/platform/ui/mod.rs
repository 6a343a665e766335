//! Immediate-mode rendering of the deck, controls, and summary.

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Vec2,
};
use pawdeck_core::{CardView, DeckViewModel, Msg, Phase, SessionToken, TopCardView};

use super::textures::TextureStore;

const CARD_ROUNDING: f32 = 12.0;
const CONTROLS_HEIGHT: f32 = 72.0;
const BUTTON_SIZE: Vec2 = Vec2::new(104.0, 44.0);
const BUTTON_GAP: f32 = 24.0;
const LIKE_COLOR: Color32 = Color32::from_rgb(0x2f, 0xbf, 0x71);
const NOPE_COLOR: Color32 = Color32::from_rgb(0xe5, 0x48, 0x4d);

pub fn render(
    ctx: &egui::Context,
    view: &DeckViewModel,
    textures: &TextureStore,
    session: SessionToken,
    msgs: &mut Vec<Msg>,
) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Pawdeck");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reset").clicked() {
                    msgs.push(Msg::ResetRequested);
                }
            });
        });
    });

    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.small("Cat images from cataas.com — find your purrfect match.");
    });

    egui::CentralPanel::default().show(ctx, |ui| match view.phase {
        Phase::Loading => render_loading(ui, view),
        Phase::Playing => render_deck(ui, view, textures, session, msgs),
        Phase::Summary => render_summary(ui, view, textures, session, msgs),
    });
}

fn render_loading(ui: &mut egui::Ui, view: &DeckViewModel) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.spinner();
        ui.add_space(8.0);
        ui.label(format!(
            "Fetching cats… {} of {}",
            view.attempts_done, view.requested
        ));
    });
}

fn render_deck(
    ui: &mut egui::Ui,
    view: &DeckViewModel,
    textures: &TextureStore,
    session: SessionToken,
    msgs: &mut Vec<Msg>,
) {
    if view.cards.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.4);
            ui.label("No cats loaded.");
        });
        return;
    }

    let Some(top) = view.top else {
        return;
    };

    let avail = ui.available_rect_before_wrap();
    let card_width = (avail.width() - 24.0)
        .min((avail.height() - CONTROLS_HEIGHT - 24.0) * 0.75)
        .max(120.0);
    let card_size = Vec2::new(card_width, card_width * 4.0 / 3.0);
    let stack_center = Pos2::new(avail.center().x, avail.top() + 12.0 + card_size.y * 0.5);

    let top_position = view.cards.len() - 1;
    for (position, card) in view.cards.iter().enumerate() {
        if position == top_position {
            render_top_card(
                ui,
                view,
                card,
                &top,
                position,
                textures,
                session,
                card_size,
                stack_center,
                msgs,
            );
        } else {
            render_under_card(ui, card, textures, session, card_size, stack_center);
        }
    }

    let controls = Rect::from_min_max(
        Pos2::new(avail.left(), avail.bottom() - CONTROLS_HEIGHT),
        avail.max,
    );
    ui.allocate_ui_at_rect(controls, |ui| {
        ui.add_space((CONTROLS_HEIGHT - BUTTON_SIZE.y) * 0.5);
        ui.horizontal(|ui| {
            let total = BUTTON_SIZE.x * 2.0 + BUTTON_GAP;
            ui.add_space(((ui.available_width() - total) * 0.5).max(0.0));
            if ui
                .add_sized(BUTTON_SIZE, egui::Button::new("Nope"))
                .clicked()
            {
                msgs.push(Msg::NopeClicked);
            }
            ui.add_space(BUTTON_GAP);
            if ui
                .add_sized(BUTTON_SIZE, egui::Button::new("Like"))
                .clicked()
            {
                msgs.push(Msg::LikeClicked);
            }
        });
    });
}

fn render_under_card(
    ui: &mut egui::Ui,
    card: &CardView,
    textures: &TextureStore,
    session: SessionToken,
    card_size: Vec2,
    stack_center: Pos2,
) {
    let rect = Rect::from_center_size(stack_center, card_size);
    match textures.get(session, card.index) {
        Some(texture) => {
            egui::Image::from_texture(texture)
                .rounding(Rounding::same(CARD_ROUNDING))
                .paint_at(ui, rect);
        }
        None => paint_placeholder(ui, rect, card.verified),
    }
}

#[allow(clippy::too_many_arguments)]
fn render_top_card(
    ui: &mut egui::Ui,
    view: &DeckViewModel,
    card: &CardView,
    top: &TopCardView,
    position: usize,
    textures: &TextureStore,
    session: SessionToken,
    card_size: Vec2,
    stack_center: Pos2,
    msgs: &mut Vec<Msg>,
) {
    let center = stack_center + Vec2::new(top.offset_x, top.offset_y);
    let rect = Rect::from_center_size(center, card_size * top.scale);

    // Only the top card takes pointer input; the rest stay inert.
    let response = ui.allocate_rect(rect, Sense::click_and_drag());
    if response.dragged() {
        let delta = response.drag_delta();
        if delta != Vec2::ZERO {
            msgs.push(Msg::PointerDragged {
                dx: delta.x,
                dy: delta.y,
            });
        }
    }
    if response.drag_stopped() {
        let velocity = ui.ctx().input(|input| input.pointer.velocity());
        msgs.push(Msg::PointerReleased {
            // Core thresholds are in px/ms.
            velocity_x: velocity.x / 1000.0,
        });
    }

    let rotation = top.rotation_deg.to_radians();
    match textures.get(session, card.index) {
        Some(texture) => {
            egui::Image::from_texture(texture)
                .rotate(rotation, Vec2::splat(0.5))
                .paint_at(ui, rect);
        }
        None => paint_placeholder(ui, rect, card.verified),
    }

    if top.like_opacity > 0.0 {
        paint_hint(
            ui,
            rect.left_top() + Vec2::new(16.0, 16.0),
            Align2::LEFT_TOP,
            "LIKE",
            LIKE_COLOR,
            top.like_opacity,
        );
    }
    if top.nope_opacity > 0.0 {
        paint_hint(
            ui,
            rect.right_top() + Vec2::new(-16.0, 16.0),
            Align2::RIGHT_TOP,
            "NOPE",
            NOPE_COLOR,
            top.nope_opacity,
        );
    }

    ui.painter().text(
        rect.left_bottom() + Vec2::new(12.0, -10.0),
        Align2::LEFT_BOTTOM,
        format!("Cat {} of {}", position + 1, view.requested),
        FontId::proportional(13.0),
        Color32::WHITE,
    );
}

fn render_summary(
    ui: &mut egui::Ui,
    view: &DeckViewModel,
    textures: &TextureStore,
    session: SessionToken,
    msgs: &mut Vec<Msg>,
) {
    // A fresh scroll id per session starts the summary at the top.
    egui::ScrollArea::vertical()
        .id_source(("summary", session))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading("Here are your favourite kitties");
                ui.add_space(4.0);
                ui.label(format!(
                    "You liked {} out of {} cats.",
                    view.liked_count, view.requested
                ));
                if view.liked.is_empty() {
                    ui.add_space(8.0);
                    ui.label("No favourites this round — try again!");
                }
                ui.add_space(12.0);

                let tile = Vec2::new(150.0, 200.0);
                egui::Grid::new(("liked-grid", session))
                    .spacing([10.0, 10.0])
                    .show(ui, |ui| {
                        for (i, card) in view.liked.iter().enumerate() {
                            let (rect, _response) = ui.allocate_exact_size(tile, Sense::hover());
                            match textures.get(session, card.index) {
                                Some(texture) => {
                                    egui::Image::from_texture(texture)
                                        .rounding(Rounding::same(8.0))
                                        .paint_at(ui, rect);
                                }
                                None => paint_placeholder(ui, rect, card.verified),
                            }
                            if i % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });

                ui.add_space(16.0);
                if ui.button("Swipe Again").clicked() {
                    msgs.push(Msg::ResetRequested);
                }
                ui.add_space(16.0);
            });
        });
}

fn paint_placeholder(ui: &egui::Ui, rect: Rect, verified: bool) {
    let painter = ui.painter();
    painter.rect_filled(rect, Rounding::same(CARD_ROUNDING), Color32::from_gray(32));
    let text = if verified { "…" } else { "Image unavailable" };
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(15.0),
        Color32::from_gray(160),
    );
}

fn paint_hint(
    ui: &egui::Ui,
    pos: Pos2,
    anchor: Align2,
    text: &str,
    color: Color32,
    opacity: f32,
) {
    ui.painter().text(
        pos,
        anchor,
        text,
        FontId::proportional(24.0),
        color.gamma_multiply(opacity),
    );
}
