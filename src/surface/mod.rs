//! Schnittstelle zur Render-Surface (Kartenansicht) und ihre Begleittypen.
//!
//! Der Kern spricht die Karte nur über [`RenderSurface`] an. Die
//! In-Memory-Implementierung [`SceneSurface`] dient dem egui-Frontend als
//! Zeichenvorlage und den Tests als Beobachtungspunkt.

pub mod control;
pub mod scene;
pub mod subscription;

use std::sync::Arc;

use crate::core::{Basemap, BoundingBox, Feature, FeatureCollection};

pub use control::{Control, ControlRegistry, HomeControl};
pub use scene::{SceneSurface, SurfaceCall};
pub use subscription::{Subscription, SubscriptionSet};

/// Darstellungsart eines visuellen Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualLayerKind {
    Fill,
    Line,
}

/// Paint-Eigenschaften eines visuellen Layers.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Fill { color: [u8; 3], opacity: f32 },
    Line { color: [u8; 3], width: f32 },
}

impl Paint {
    pub fn kind(&self) -> VisualLayerKind {
        match self {
            Paint::Fill { .. } => VisualLayerKind::Fill,
            Paint::Line { .. } => VisualLayerKind::Line,
        }
    }
}

/// Feature-Filter eines visuellen Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFilter {
    All,
    /// Nur Polygon/MultiPolygon
    PolygonsOnly,
}

impl LayerFilter {
    pub fn accepts(&self, feature: &Feature) -> bool {
        match self {
            LayerFilter::All => true,
            LayerFilter::PolygonsOnly => feature
                .geometry
                .as_ref()
                .is_some_and(|geometry| geometry.is_polygonal()),
        }
    }
}

/// Vollständige Beschreibung eines visuellen Layers.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualLayerSpec {
    pub id: String,
    /// Dataset-ID, aus der gezeichnet wird
    pub source: String,
    pub paint: Paint,
    pub filter: LayerFilter,
    pub visible: bool,
}

impl VisualLayerSpec {
    pub fn kind(&self) -> VisualLayerKind {
        self.paint.kind()
    }
}

/// Ereignisarten, für die sich der Kern registrieren kann.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Klick auf ein Feature eines bestimmten Fill-Layers
    Click { layer_id: String },
    DrawCreate,
    DrawDelete,
}

/// Von der Surface vergebene Abonnement-ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Von der Surface vergebenes Handle eines montierten Controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlHandle(pub u64);

/// Ecke der Kartenansicht, in der ein Control sitzt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Sichtbare Beschreibung eines Controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSpec {
    pub label: String,
    pub tooltip: String,
    pub position: ControlPosition,
}

/// Ereignisse, die die Surface an den Host meldet.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Setup abgeschlossen, Draw-Tool nutzbar
    Loaded,
    FeatureClicked {
        layer_id: String,
        feature: Feature,
        /// Klickposition in Lon/Lat
        position: [f64; 2],
    },
    DrawCreated {
        feature: Feature,
    },
    DrawDeleted,
    ControlActivated {
        handle: ControlHandle,
    },
}

/// Schmale Schnittstelle zur Kartenansicht.
pub trait RenderSurface {
    fn add_dataset(&mut self, id: &str, collection: Arc<FeatureCollection>);
    fn remove_dataset(&mut self, id: &str);
    fn has_dataset(&self, id: &str) -> bool;

    fn add_visual_layer(&mut self, spec: VisualLayerSpec);
    fn remove_visual_layer(&mut self, id: &str);
    fn has_visual_layer(&self, id: &str) -> bool;
    fn set_visibility(&mut self, id: &str, visible: bool);

    /// Rahmt die Box mit dem konfigurierten Padding ein.
    fn frame_view(&mut self, bounds: BoundingBox);
    fn fly_to(&mut self, center: [f64; 2], zoom: f64);
    fn set_basemap(&mut self, basemap: &Basemap);

    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);

    fn add_control(&mut self, spec: ControlSpec) -> ControlHandle;
    fn remove_control(&mut self, handle: ControlHandle);

    /// Entnimmt alle seit dem letzten Aufruf angefallenen Ereignisse.
    fn drain_events(&mut self) -> Vec<SurfaceEvent>;
}
