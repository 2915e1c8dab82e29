//! Use-Cases für Laden, Ablegen und Darstellen der Overlay-Datasets.

use std::sync::Arc;

use anyhow::bail;

use crate::app::state::{CacheOutcome, OverlayManager};
use crate::app::AppState;
use crate::core::{parse_hex_color, FeatureCollection, OverlayLayerDescriptor, ViewerError};
use crate::surface::{
    EventKind, LayerFilter, Paint, RenderSurface, Subscription, VisualLayerSpec,
};

/// Fallback-Farbe bei unlesbarer Layer-Farbe.
const FALLBACK_COLOR: [u8; 3] = [0x19, 0x76, 0xd2];

/// Merkt für jeden registrierten Layer einen Fetch vor.
///
/// Bereits geladene oder laufende Layer werden übersprungen.
pub fn request_fetches(state: &mut AppState) {
    let descriptors = state.overlay.descriptors().to_vec();
    let issued = descriptors
        .iter()
        .filter(|layer| state.layers.load(layer))
        .count();
    log::info!("{} Fetches angefordert", issued);
}

/// Legt eine erfolgreich geladene Collection im Cache ab.
pub fn store(
    state: &mut AppState,
    layer_id: &str,
    collection: Arc<FeatureCollection>,
) -> anyhow::Result<()> {
    ensure_registered(state, layer_id)?;
    let count = collection.len();

    match state.layers.complete(layer_id, Ok(collection)) {
        CacheOutcome::Stored => {
            log::info!("Layer '{}' geladen: {} Features", layer_id, count);
        }
        CacheOutcome::StoredEmpty => {
            let diagnostic = ViewerError::EmptyDataset(layer_id.to_string());
            log::warn!("{}", diagnostic);
            state.ui.status_message = Some(diagnostic.to_string());
        }
        CacheOutcome::Absent | CacheOutcome::Ignored => {}
    }
    Ok(())
}

/// Markiert einen Layer nach fehlgeschlagenem Fetch als abwesend.
pub fn mark_absent(state: &mut AppState, layer_id: &str, reason: &str) -> anyhow::Result<()> {
    ensure_registered(state, layer_id)?;
    if state.layers.complete(layer_id, Err(reason.to_string())) == CacheOutcome::Absent {
        let diagnostic = ViewerError::FetchFailure {
            layer_id: layer_id.to_string(),
            reason: reason.to_string(),
        };
        log::error!("{}", diagnostic);
        state.ui.status_message = Some(diagnostic.to_string());
    }
    Ok(())
}

/// Legt Dataset, Fill- und Outline-Layer an und abonniert Klicks auf den Fill-Layer.
///
/// Die Sichtbarkeit folgt dem aktuell aktiven Layer.
pub fn render(
    state: &mut AppState,
    surface: &mut dyn RenderSurface,
    layer_id: &str,
) -> anyhow::Result<()> {
    let Some(descriptor) = state.overlay.descriptor(layer_id).cloned() else {
        bail!(ViewerError::UnknownLayer(layer_id.to_string()));
    };
    let Some(collection) = state.layers.get(layer_id).cloned() else {
        log::warn!("Layer '{}' ohne Daten, nichts darzustellen", layer_id);
        return Ok(());
    };
    if collection.is_empty() {
        return Ok(());
    }

    let visible = state.overlay.is_active(layer_id);
    surface.add_dataset(layer_id, collection);
    for spec in artifact_specs(state, &descriptor, visible) {
        surface.add_visual_layer(spec);
    }

    let click = EventKind::Click {
        layer_id: descriptor.fill_layer_id(),
    };
    if state.session.mounted && !state.session.subscriptions.contains(&click) {
        state
            .session
            .subscriptions
            .push(Subscription::acquire(surface, click));
    }
    Ok(())
}

/// Rahmt die Ansicht einmalig auf die Daten des Layers ein.
pub fn frame_initial(state: &mut AppState, surface: &mut dyn RenderSurface, layer_id: &str) {
    if state.view.initial_frame_done {
        return;
    }
    let Some(collection) = state.layers.get(layer_id) else {
        return;
    };
    state.view.initial_frame_done = true;
    if let Some(bounds) = OverlayManager::initial_bounds(layer_id, collection) {
        log::info!("Start-Einrahmung auf Layer '{}'", layer_id);
        surface.frame_view(bounds);
    }
}

fn artifact_specs(
    state: &AppState,
    descriptor: &OverlayLayerDescriptor,
    visible: bool,
) -> [VisualLayerSpec; 2] {
    let color = parse_hex_color(&descriptor.color).unwrap_or(FALLBACK_COLOR);
    [
        VisualLayerSpec {
            id: descriptor.fill_layer_id(),
            source: descriptor.id.clone(),
            paint: Paint::Fill {
                color,
                opacity: state.options.fill_opacity,
            },
            filter: LayerFilter::PolygonsOnly,
            visible,
        },
        VisualLayerSpec {
            id: descriptor.outline_layer_id(),
            source: descriptor.id.clone(),
            paint: Paint::Line {
                color,
                width: state.options.outline_width_px,
            },
            filter: LayerFilter::PolygonsOnly,
            visible,
        },
    ]
}

fn ensure_registered(state: &AppState, layer_id: &str) -> anyhow::Result<()> {
    if state.overlay.descriptor(layer_id).is_none() {
        bail!(ViewerError::UnknownLayer(layer_id.to_string()));
    }
    Ok(())
}
