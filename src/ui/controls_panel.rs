//! Leiste mit Basemap- und Layer-Buttons.

use crate::app::{AppIntent, AppState, LoadStatus};

/// Rendert die Button-Leiste und gibt erzeugte Events zurück.
pub fn render_controls_panel(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Karte:");
            for (index, basemap) in state.options.basemaps.iter().enumerate() {
                let selected = index == state.view.basemap_index;
                if ui
                    .add(egui::Button::new(&basemap.label).selected(selected))
                    .clicked()
                    && !selected
                {
                    events.push(AppIntent::BasemapSelected { index });
                }
            }

            ui.separator();
            ui.label("Layer:");

            for layer in state.overlay.descriptors() {
                let selected = state.overlay.is_active(&layer.id);
                let label = match state.layers.status(&layer.id) {
                    LoadStatus::Pending => format!("{} …", layer.label),
                    LoadStatus::Absent => format!("{} ⚠", layer.label),
                    LoadStatus::NotAttempted | LoadStatus::Loaded => layer.label.clone(),
                };
                if ui
                    .add(egui::Button::new(label).selected(selected))
                    .on_hover_text(&layer.source_endpoint)
                    .clicked()
                    && !selected
                {
                    events.push(AppIntent::LayerSelected {
                        layer_id: layer.id.clone(),
                    });
                }
            }
        });
    });

    events
}
