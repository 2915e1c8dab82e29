//! Use-Cases für Layer- und Basemap-Wechsel.

use anyhow::bail;

use crate::app::AppState;
use crate::surface::RenderSurface;

/// Setzt den aktiven Layer und überträgt alle Sichtbarkeiten auf die Surface.
///
/// Nicht vorhandene Artefakte (Layer nicht geladen oder leer) werden übersprungen.
pub fn set_active(
    state: &mut AppState,
    surface: &mut dyn RenderSurface,
    layer_id: &str,
) -> anyhow::Result<()> {
    let updates = state.overlay.set_active(layer_id)?;
    for update in updates {
        if surface.has_visual_layer(&update.artifact_id) {
            surface.set_visibility(&update.artifact_id, update.visible);
        }
    }
    Ok(())
}

/// Wechselt die Basemap. Die Sitzung (Cache, Highlight, Abonnements) bleibt erhalten.
pub fn set_basemap(
    state: &mut AppState,
    surface: &mut dyn RenderSurface,
    index: usize,
) -> anyhow::Result<()> {
    let Some(basemap) = state.options.basemaps.get(index) else {
        bail!(
            "Basemap-Index {} außerhalb von 0..{}",
            index,
            state.options.basemaps.len()
        );
    };
    surface.set_basemap(basemap);
    log::info!("Basemap: {}", basemap.label);
    state.view.basemap_index = index;
    Ok(())
}
