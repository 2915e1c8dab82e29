use std::sync::Arc;

use crate::core::{Feature, FeatureCollection};
use crate::surface::{ControlHandle, SurfaceEvent};

/// App-Intent Events.
/// Intents sind Eingaben aus UI, Surface und Fetch-Pool ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Ansicht wird aufgebaut (Abonnements, Controls, Basemap)
    ViewMountRequested,
    /// Surface hat ihr Setup abgeschlossen
    SurfaceLoaded,
    /// Fetch eines Layers erfolgreich
    DatasetFetched {
        layer_id: String,
        collection: Arc<FeatureCollection>,
    },
    /// Fetch eines Layers fehlgeschlagen
    DatasetFetchFailed { layer_id: String, reason: String },
    /// Layer-Button gedrückt
    LayerSelected { layer_id: String },
    /// Basemap-Button gedrückt
    BasemapSelected { index: usize },
    /// Draw-Tool hat ein Polygon abgeschlossen
    DrawCreated { drawn: Feature },
    /// Gezeichnetes Polygon gelöscht
    DrawDeleted,
    /// Klick auf ein Feature eines Fill-Layers
    FeatureClicked {
        layer_id: String,
        feature: Feature,
        position: [f64; 2],
    },
    /// Popup schließen
    PopupCloseRequested,
    /// Karten-Control aktiviert
    ControlActivated { handle: ControlHandle },
    /// Ansicht wird abgebaut
    ViewTeardownRequested,
    /// Anwendung beenden
    ExitRequested,
}

impl From<SurfaceEvent> for AppIntent {
    fn from(event: SurfaceEvent) -> Self {
        match event {
            SurfaceEvent::Loaded => AppIntent::SurfaceLoaded,
            SurfaceEvent::FeatureClicked {
                layer_id,
                feature,
                position,
            } => AppIntent::FeatureClicked {
                layer_id,
                feature,
                position,
            },
            SurfaceEvent::DrawCreated { feature } => AppIntent::DrawCreated { drawn: feature },
            SurfaceEvent::DrawDeleted => AppIntent::DrawDeleted,
            SurfaceEvent::ControlActivated { handle } => AppIntent::ControlActivated { handle },
        }
    }
}
