//! Handler für Draw-Events: Abfrage und Highlight.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::Feature;
use crate::surface::RenderSurface;

/// Startet die Polygon-Abfrage gegen den aktiven Layer.
pub fn run_query(state: &mut AppState, surface: &mut dyn RenderSurface, drawn: &Feature) {
    use_cases::spatial_query::run_query(state, surface, drawn);
}

/// Entfernt das Highlight.
pub fn clear_highlight(state: &mut AppState, surface: &mut dyn RenderSurface) {
    use_cases::spatial_query::clear_highlight(state, surface);
}
