//! Aktiver Overlay-Layer und daraus abgeleitete Sichtbarkeiten.

use std::collections::HashSet;

use crate::core::{collection_bounds, BoundingBox, FeatureCollection, OverlayLayerDescriptor, ViewerError};

/// Sichtbarkeit eines visuellen Artefakts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityUpdate {
    /// ID des Fill- oder Outline-Layers auf der Surface
    pub artifact_id: String,
    pub visible: bool,
}

/// Hält die registrierten Layer und genau einen aktiven.
#[derive(Debug, Clone)]
pub struct OverlayManager {
    layers: Vec<OverlayLayerDescriptor>,
    active: String,
}

impl OverlayManager {
    /// Registriert die Layer; der erste ist initial aktiv.
    pub fn new(layers: Vec<OverlayLayerDescriptor>) -> Result<Self, ViewerError> {
        let mut seen = HashSet::new();
        for layer in &layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(ViewerError::DuplicateLayer(layer.id.clone()));
            }
        }
        let active = layers
            .first()
            .map(|l| l.id.clone())
            .ok_or(ViewerError::NoLayersConfigured)?;
        Ok(Self { layers, active })
    }

    pub fn descriptors(&self) -> &[OverlayLayerDescriptor] {
        &self.layers
    }

    pub fn descriptor(&self, layer_id: &str) -> Option<&OverlayLayerDescriptor> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, layer_id: &str) -> bool {
        self.active == layer_id
    }

    /// Wechselt den aktiven Layer und liefert die Sichtbarkeit aller Artefakte.
    ///
    /// Unbekannte IDs lassen den Zustand unverändert. Der Cache wird nie berührt.
    pub fn set_active(&mut self, layer_id: &str) -> Result<Vec<VisibilityUpdate>, ViewerError> {
        if self.descriptor(layer_id).is_none() {
            return Err(ViewerError::UnknownLayer(layer_id.to_string()));
        }
        if self.active != layer_id {
            log::info!("Aktiver Layer: '{}' -> '{}'", self.active, layer_id);
            self.active = layer_id.to_string();
        }
        Ok(self.visibility_plan())
    }

    /// Sichtbarkeit von Fill und Outline jedes registrierten Layers.
    pub fn visibility_plan(&self) -> Vec<VisibilityUpdate> {
        self.layers
            .iter()
            .flat_map(|layer| {
                let visible = self.is_active(&layer.id);
                [layer.fill_layer_id(), layer.outline_layer_id()]
                    .into_iter()
                    .map(move |artifact_id| VisibilityUpdate {
                        artifact_id,
                        visible,
                    })
            })
            .collect()
    }

    /// Bounding Box für die Start-Einrahmung.
    ///
    /// Leere, degenerierte oder nicht-endliche Daten liefern `None` und
    /// werden nur geloggt.
    pub fn initial_bounds(layer_id: &str, collection: &FeatureCollection) -> Option<BoundingBox> {
        match collection_bounds(collection) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                log::warn!(
                    "Keine Start-Einrahmung für Layer '{}': {}",
                    layer_id,
                    ViewerError::GeometryFailure(e)
                );
                None
            }
        }
    }
}
