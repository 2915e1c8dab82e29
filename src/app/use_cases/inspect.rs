//! Use-Cases für Feature-Popup und Karten-Controls.

use crate::app::state::PopupState;
use crate::app::AppState;
use crate::core::{describe, Feature};
use crate::surface::{ControlHandle, RenderSurface};

/// Öffnet das Popup für ein angeklicktes Feature an der Klickposition.
pub fn show_popup(state: &mut AppState, layer_id: String, feature: &Feature, position: [f64; 2]) {
    let description = describe(feature);
    log::debug!(
        "Popup für Layer '{}' mit {} Properties",
        layer_id,
        description.properties.len()
    );
    state.ui.popup = Some(PopupState {
        layer_id,
        position,
        description,
    });
}

pub fn close_popup(state: &mut AppState) {
    state.ui.popup = None;
}

/// Führt das Control hinter `handle` aus.
pub fn activate_control(state: &mut AppState, surface: &mut dyn RenderSurface, handle: ControlHandle) {
    if !state.session.controls.activate(surface, handle) {
        log::warn!("Unbekanntes Control-Handle {:?}", handle);
    }
}
