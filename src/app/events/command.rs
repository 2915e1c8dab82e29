use std::sync::Arc;

use crate::core::{Feature, FeatureCollection};
use crate::surface::ControlHandle;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Abonnements und Controls registrieren, Basemap setzen
    MountView,
    /// Surface-Setup vermerken
    MarkSurfaceLoaded,
    /// Fetches aller registrierten Layer vormerken
    RequestDatasetFetches,
    /// Collection im Cache ablegen
    StoreDataset {
        layer_id: String,
        collection: Arc<FeatureCollection>,
    },
    /// Layer dauerhaft als abwesend markieren
    MarkDatasetAbsent { layer_id: String, reason: String },
    /// Fill- und Outline-Artefakt eines geladenen Layers anlegen
    RenderDataset { layer_id: String },
    /// Ansicht einmalig auf die Daten des Layers einrahmen
    FrameInitialBounds { layer_id: String },
    /// Aktiven Layer wechseln und Sichtbarkeiten setzen
    SetActiveLayer { layer_id: String },
    /// Basemap wechseln
    SetBasemap { index: usize },
    /// Polygon-Abfrage gegen den aktiven Layer
    RunSpatialQuery { drawn: Feature },
    /// Highlight entfernen
    ClearHighlight,
    /// Popup für ein Feature öffnen
    ShowFeaturePopup {
        layer_id: String,
        feature: Feature,
        position: [f64; 2],
    },
    /// Popup schließen
    ClosePopup,
    /// Control hinter Handle ausführen
    ActivateControl { handle: ControlHandle },
    /// Abonnements, Controls und Highlight abbauen
    UnmountView,
    /// Anwendung beenden
    RequestExit,
}
