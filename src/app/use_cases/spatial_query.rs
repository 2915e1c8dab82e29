//! Use-Cases für Polygon-Abfrage und Highlight.

use crate::app::AppState;
use crate::core::{query_prepared, Feature, QueryReport, ViewerError};
use crate::surface::RenderSurface;

/// Fragt den aktiven Layer mit dem gezeichneten Polygon ab und ersetzt das Highlight.
///
/// Ohne geladene Daten ist das Ergebnis leer; ein altes Highlight wird
/// dabei ebenfalls entfernt.
pub fn run_query(state: &mut AppState, surface: &mut dyn RenderSurface, drawn: &Feature) {
    let active = state.overlay.active_id().to_string();
    let report = match state.layers.get_prepared(&active) {
        Some((collection, prepared)) => query_prepared(drawn, collection, prepared),
        None => {
            log::warn!("{}", ViewerError::MissingActiveData(active.clone()));
            QueryReport::default()
        }
    };
    let hits = report.matches.len();
    state.highlight.replace(surface, &active, report.matches);

    state.ui.status_message = Some(match report.skipped {
        0 => format!("{} Treffer in '{}'", hits, active),
        skipped => format!(
            "{} Treffer in '{}' ({} ungültige Geometrien übersprungen)",
            hits, active, skipped
        ),
    });
}

/// Entfernt das Highlight (gezeichnetes Polygon gelöscht).
pub fn clear_highlight(state: &mut AppState, surface: &mut dyn RenderSurface) {
    state.highlight.clear(surface);
    state.ui.status_message = None;
}
