//! Lebenszyklus des Highlight-Artefakts (Dataset + Fill-Layer).

use std::sync::Arc;

use crate::core::FeatureCollection;
use crate::shared::{HIGHLIGHT_DATASET_ID, HIGHLIGHT_LAYER_ID};
use crate::surface::{LayerFilter, Paint, RenderSurface, VisualLayerSpec};

/// Treffer einer Abfrage samt Quell-Layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSet {
    pub source_layer_id: String,
    pub features: Arc<FeatureCollection>,
}

/// Zustände des Highlight-Artefakts.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted(HighlightSet),
}

/// Einziger Schreiber des Highlight-Artefakts.
#[derive(Debug, Clone)]
pub struct HighlightManager {
    state: HighlightState,
    color: [u8; 3],
    opacity: f32,
}

impl HighlightManager {
    pub fn new(color: [u8; 3], opacity: f32) -> Self {
        Self {
            state: HighlightState::Idle,
            color,
            opacity,
        }
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    pub fn current(&self) -> Option<&HighlightSet> {
        match &self.state {
            HighlightState::Highlighted(set) => Some(set),
            HighlightState::Idle => None,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self.state, HighlightState::Highlighted(_))
    }

    /// Ersetzt das Highlight durch `features`.
    ///
    /// Das alte Artefakt wird vor dem Anlegen des neuen entfernt. Ohne
    /// Treffer bleibt der Manager im Zustand `Idle`.
    pub fn replace(
        &mut self,
        surface: &mut dyn RenderSurface,
        source_layer_id: &str,
        features: FeatureCollection,
    ) {
        self.teardown(surface);

        if features.is_empty() {
            self.state = HighlightState::Idle;
            return;
        }

        let features = Arc::new(features);
        surface.add_dataset(HIGHLIGHT_DATASET_ID, Arc::clone(&features));
        surface.add_visual_layer(VisualLayerSpec {
            id: HIGHLIGHT_LAYER_ID.to_string(),
            source: HIGHLIGHT_DATASET_ID.to_string(),
            paint: Paint::Fill {
                color: self.color,
                opacity: self.opacity,
            },
            filter: LayerFilter::PolygonsOnly,
            visible: true,
        });
        log::info!(
            "Highlight: {} Features aus '{}'",
            features.len(),
            source_layer_id
        );
        self.state = HighlightState::Highlighted(HighlightSet {
            source_layer_id: source_layer_id.to_string(),
            features,
        });
    }

    /// Entfernt das Highlight und kehrt nach `Idle` zurück.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        if self.is_highlighted() {
            log::info!("Highlight entfernt");
        }
        self.teardown(surface);
        self.state = HighlightState::Idle;
    }

    fn teardown(&self, surface: &mut dyn RenderSurface) {
        // Layer vor Dataset, sonst verweist der Layer ins Leere
        if surface.has_visual_layer(HIGHLIGHT_LAYER_ID) {
            surface.remove_visual_layer(HIGHLIGHT_LAYER_ID);
        }
        if surface.has_dataset(HIGHLIGHT_DATASET_ID) {
            surface.remove_dataset(HIGHLIGHT_DATASET_ID);
        }
    }
}
