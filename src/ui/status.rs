//! Status-Bar am unteren Bildschirmrand.

use crate::app::{AppState, HighlightState};
use crate::surface::SceneSurface;

/// Rendert die Status-Bar
pub fn render_status_bar(ctx: &egui::Context, state: &AppState, surface: &SceneSurface) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let active = state.overlay.active_id();
            match state.layers.get(active) {
                Some(collection) => {
                    ui.label(format!("Layer: {} ({} Features)", active, collection.len()))
                }
                None => ui.label(format!("Layer: {} (keine Daten)", active)),
            };

            ui.separator();

            if let Some(label) = state.active_basemap_label() {
                ui.label(format!("Karte: {}", label));
                ui.separator();
            }

            match state.highlight.state() {
                HighlightState::Idle => ui.label("Highlight: -"),
                HighlightState::Highlighted(set) => ui.label(format!(
                    "Highlight: {} aus {}",
                    set.features.len(),
                    set.source_layer_id
                )),
            };

            ui.separator();

            let camera = surface.camera();
            ui.label(format!(
                "Zoom: {:.2} | Position: ({:.4}, {:.4})",
                camera.zoom, camera.position.x, camera.position.y
            ));

            if let Some(ref msg) = state.ui.status_message {
                ui.separator();
                ui.label(egui::RichText::new(format!("⚠ {}", msg)).color(egui::Color32::YELLOW));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let pending = state.layers.pending_count();
                if pending > 0 {
                    ui.spinner();
                    ui.label(format!("{} Layer laden", pending));
                }
            });
        });
    });
}
