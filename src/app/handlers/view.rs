//! Handler für Basemap, Popup und Karten-Controls.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::Feature;
use crate::surface::{ControlHandle, RenderSurface};

/// Wechselt die Basemap.
pub fn set_basemap(
    state: &mut AppState,
    surface: &mut dyn RenderSurface,
    index: usize,
) -> anyhow::Result<()> {
    use_cases::overlay::set_basemap(state, surface, index)
}

/// Öffnet das Feature-Popup.
pub fn show_popup(state: &mut AppState, layer_id: String, feature: &Feature, position: [f64; 2]) {
    use_cases::inspect::show_popup(state, layer_id, feature, position);
}

/// Schließt das Feature-Popup.
pub fn close_popup(state: &mut AppState) {
    use_cases::inspect::close_popup(state);
}

/// Aktiviert ein Karten-Control.
pub fn activate_control(
    state: &mut AppState,
    surface: &mut dyn RenderSurface,
    handle: ControlHandle,
) {
    use_cases::inspect::activate_control(state, surface, handle);
}
