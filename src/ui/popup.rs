//! Feature-Popup an der Klickposition.

use glam::DVec2;

use crate::app::{AppIntent, AppState};
use crate::surface::SceneSurface;

/// Zeigt das offene Popup und gibt erzeugte Events zurück.
pub fn show_feature_popup(
    ctx: &egui::Context,
    state: &AppState,
    surface: &SceneSurface,
    map_origin: egui::Pos2,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let Some(popup) = state.ui.popup.as_ref() else {
        return events;
    };

    let anchor = surface
        .camera()
        .world_to_screen(DVec2::from(popup.position), surface.viewport_size());
    let title = state
        .overlay
        .descriptors()
        .iter()
        .find(|l| l.fill_layer_id() == popup.layer_id)
        .map(|l| l.label.clone())
        .unwrap_or_else(|| popup.layer_id.clone());

    let mut open = true;
    egui::Window::new(title)
        .id(egui::Id::new("feature_popup"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_pos(map_origin + egui::vec2(anchor.x + 12.0, anchor.y + 12.0))
        .show(ctx, |ui| {
            let description = &popup.description;
            if let Some(notice) = &description.notice {
                ui.label(notice);
                return;
            }
            if let Some(headline) = description.headline_text() {
                ui.heading(headline);
                ui.separator();
            }
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                egui::Grid::new("feature_popup_grid")
                    .striped(true)
                    .show(ui, |ui| {
                        for pair in &description.properties {
                            ui.label(egui::RichText::new(&pair.key).strong());
                            ui.label(&pair.value);
                            ui.end_row();
                        }
                    });
            });
        });

    if !open {
        events.push(AppIntent::PopupCloseRequested);
    }
    events
}
