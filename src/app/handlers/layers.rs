//! Handler für Datasets und aktiven Layer.

use std::sync::Arc;

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::FeatureCollection;
use crate::surface::RenderSurface;

/// Merkt Fetches für alle Layer vor.
pub fn request_fetches(state: &mut AppState) {
    use_cases::datasets::request_fetches(state);
}

/// Legt eine geladene Collection im Cache ab.
pub fn store(
    state: &mut AppState,
    layer_id: &str,
    collection: Arc<FeatureCollection>,
) -> anyhow::Result<()> {
    use_cases::datasets::store(state, layer_id, collection)
}

/// Markiert einen Layer als abwesend.
pub fn mark_absent(state: &mut AppState, layer_id: &str, reason: &str) -> anyhow::Result<()> {
    use_cases::datasets::mark_absent(state, layer_id, reason)
}

/// Stellt einen geladenen Layer dar.
pub fn render(
    state: &mut AppState,
    surface: &mut dyn RenderSurface,
    layer_id: &str,
) -> anyhow::Result<()> {
    use_cases::datasets::render(state, surface, layer_id)
}

/// Rahmt die Ansicht auf die Start-Daten ein.
pub fn frame_initial(state: &mut AppState, surface: &mut dyn RenderSurface, layer_id: &str) {
    use_cases::datasets::frame_initial(state, surface, layer_id);
}

/// Wechselt den aktiven Layer.
pub fn set_active(
    state: &mut AppState,
    surface: &mut dyn RenderSurface,
    layer_id: &str,
) -> anyhow::Result<()> {
    use_cases::overlay::set_active(state, surface, layer_id)
}
