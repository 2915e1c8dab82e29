//! In-Memory-Surface: hält Datasets, visuelle Layer, Abonnements, Controls
//! und das Draw-Tool. Das egui-Frontend zeichnet daraus, Tests beobachten sie.

use std::collections::VecDeque;
use std::sync::Arc;

use geo::MultiPolygon;
use glam::{DVec2, Vec2};
use indexmap::IndexMap;

use crate::core::geometry::{contains_point, outline_rings, to_multi_polygon, triangulate};
use crate::core::{Basemap, BoundingBox, Camera2D, Feature, FeatureCollection};

use super::{
    ControlHandle, ControlSpec, EventKind, RenderSurface, SubscriptionId, SurfaceEvent,
    VisualLayerKind, VisualLayerSpec,
};

/// Protokollierter Surface-Aufruf (für Tests und Diagnose).
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    AddDataset { id: String, features: usize },
    RemoveDataset { id: String },
    AddVisualLayer { id: String, visible: bool },
    RemoveVisualLayer { id: String },
    SetVisibility { id: String, visible: bool },
    FrameView { bounds: BoundingBox },
    FlyTo { center: [f64; 2], zoom: f64 },
    SetBasemap { label: String },
    Subscribe { id: SubscriptionId, kind: EventKind },
    Unsubscribe { id: SubscriptionId },
    AddControl { handle: ControlHandle },
    RemoveControl { handle: ControlHandle },
}

/// Für das Zeichnen vorbereitetes Feature.
#[derive(Debug, Clone)]
pub struct PreparedFeature {
    /// Index in der Quell-Collection
    pub index: usize,
    pub shape: MultiPolygon<f64>,
    pub triangles: Vec<[[f64; 2]; 3]>,
    pub outlines: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone)]
struct SceneDataset {
    collection: Arc<FeatureCollection>,
    prepared: Vec<PreparedFeature>,
}

impl SceneDataset {
    fn prepare(id: &str, collection: Arc<FeatureCollection>) -> Self {
        let mut skipped = 0;
        let prepared = collection
            .iter()
            .enumerate()
            .filter_map(|(index, feature)| {
                let geometry = feature.geometry.as_ref()?;
                match to_multi_polygon(geometry) {
                    Ok(shape) => Some(PreparedFeature {
                        index,
                        triangles: triangulate(&shape),
                        outlines: outline_rings(&shape),
                        shape,
                    }),
                    Err(e) => {
                        log::debug!("Dataset '{}': Feature #{} nicht darstellbar: {}", id, index, e);
                        skipped += 1;
                        None
                    }
                }
            })
            .collect();
        if skipped > 0 {
            log::warn!("Dataset '{}': {} Features nicht darstellbar", id, skipped);
        }
        Self {
            collection,
            prepared,
        }
    }
}

/// Zustand des Polygon-Zeichenwerkzeugs.
#[derive(Debug, Clone, Default)]
struct DrawTool {
    vertices: Vec<[f64; 2]>,
    drawn: Option<Feature>,
}

/// Headless-Implementierung von [`RenderSurface`].
#[derive(Debug)]
pub struct SceneSurface {
    datasets: IndexMap<String, SceneDataset>,
    layers: Vec<VisualLayerSpec>,
    subscriptions: IndexMap<SubscriptionId, EventKind>,
    controls: IndexMap<ControlHandle, ControlSpec>,
    events: VecDeque<SurfaceEvent>,
    camera: Camera2D,
    viewport_size: Vec2,
    frame_padding: f32,
    basemap: Option<Basemap>,
    loaded: bool,
    draw: DrawTool,
    journal: Vec<SurfaceCall>,
    next_id: u64,
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new(Camera2D::default(), 40.0)
    }
}

impl SceneSurface {
    /// Standard-Viewport bis zum ersten gemeldeten Frame.
    pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);

    pub fn new(camera: Camera2D, frame_padding: f32) -> Self {
        Self {
            datasets: IndexMap::new(),
            layers: Vec::new(),
            subscriptions: IndexMap::new(),
            controls: IndexMap::new(),
            events: VecDeque::new(),
            camera,
            viewport_size: Self::DEFAULT_VIEWPORT,
            frame_padding,
            basemap: None,
            loaded: false,
            draw: DrawTool::default(),
            journal: Vec::new(),
            next_id: 1,
        }
    }

    /// Meldet den Abschluss des Setups (einmalig).
    pub fn finish_setup(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.events.push_back(SurfaceEvent::Loaded);
        log::info!("Surface bereit");
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size.max(Vec2::ONE);
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    pub fn basemap(&self) -> Option<&Basemap> {
        self.basemap.as_ref()
    }

    // ── Abfragen ────────────────────────────────────────────────────

    pub fn dataset(&self, id: &str) -> Option<&Arc<FeatureCollection>> {
        self.datasets.get(id).map(|d| &d.collection)
    }

    pub fn dataset_ids(&self) -> Vec<&str> {
        self.datasets.keys().map(String::as_str).collect()
    }

    /// Vorbereitete Geometrien eines Datasets.
    pub fn prepared(&self, id: &str) -> &[PreparedFeature] {
        self.datasets
            .get(id)
            .map(|d| d.prepared.as_slice())
            .unwrap_or(&[])
    }

    /// Visuelle Layer in Zeichenreihenfolge (unten zuerst).
    pub fn visual_layers(&self) -> &[VisualLayerSpec] {
        &self.layers
    }

    pub fn visual_layer(&self, id: &str) -> Option<&VisualLayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// IDs aller sichtbaren Layer einer Art.
    pub fn visible_layer_ids(&self, kind: VisualLayerKind) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|l| l.visible && l.kind() == kind)
            .map(|l| l.id.as_str())
            .collect()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn has_subscription(&self, kind: &EventKind) -> bool {
        self.subscriptions.values().any(|k| k == kind)
    }

    pub fn controls(&self) -> Vec<(ControlHandle, &ControlSpec)> {
        self.controls.iter().map(|(h, s)| (*h, s)).collect()
    }

    pub fn journal(&self) -> &[SurfaceCall] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    // ── Nutzer-Interaktion ──────────────────────────────────────────

    /// Oberster sichtbarer, abonnierter Fill-Layer mit einem Feature an `position`.
    fn hit_test(&self, position: [f64; 2]) -> Option<(String, &Feature)> {
        self.layers.iter().rev().find_map(|layer| {
            if !layer.visible || layer.kind() != VisualLayerKind::Fill {
                return None;
            }
            let kind = EventKind::Click {
                layer_id: layer.id.clone(),
            };
            if !self.has_subscription(&kind) {
                return None;
            }
            let dataset = self.datasets.get(&layer.source)?;
            dataset.prepared.iter().rev().find_map(|prepared| {
                let feature = dataset.collection.features.get(prepared.index)?;
                (layer.filter.accepts(feature) && contains_point(&prepared.shape, position))
                    .then(|| (layer.id.clone(), feature))
            })
        })
    }

    /// Liegt `position` über einem anklickbaren Feature (Zeiger-Cursor)?
    pub fn hovers_feature(&self, position: [f64; 2]) -> bool {
        self.hit_test(position).is_some()
    }

    /// Klick an einer Lon/Lat-Position.
    ///
    /// Trifft den obersten sichtbaren Fill-Layer mit Klick-Abonnement.
    /// Liefert `true`, wenn ein Feature getroffen wurde.
    pub fn click(&mut self, position: [f64; 2]) -> bool {
        let hit = self
            .hit_test(position)
            .map(|(layer_id, feature)| (layer_id, feature.clone()));

        match hit {
            Some((layer_id, feature)) => {
                self.events.push_back(SurfaceEvent::FeatureClicked {
                    layer_id,
                    feature,
                    position,
                });
                true
            }
            None => false,
        }
    }

    /// Klick an einer Screen-Position im aktuellen Viewport.
    pub fn click_screen(&mut self, screen_pos: Vec2) -> bool {
        let world = self.camera.screen_to_world(screen_pos, self.viewport_size);
        self.click([world.x, world.y])
    }

    /// Fügt dem Polygon im Aufbau einen Eckpunkt hinzu.
    ///
    /// Erst nach [`SceneSurface::finish_setup`] möglich.
    pub fn add_draw_vertex(&mut self, position: [f64; 2]) -> bool {
        if !self.loaded {
            return false;
        }
        self.draw.vertices.push(position);
        true
    }

    /// Eckpunkte des Polygons im Aufbau.
    pub fn draw_vertices(&self) -> &[[f64; 2]] {
        &self.draw.vertices
    }

    /// Schließt das Polygon im Aufbau ab.
    ///
    /// Weniger als drei Eckpunkte verwerfen den Entwurf. Ein neues Polygon
    /// ersetzt das bisher gezeichnete.
    pub fn finish_drawing(&mut self) -> Option<Feature> {
        let mut ring = std::mem::take(&mut self.draw.vertices);
        if ring.len() < 3 {
            if !ring.is_empty() {
                log::debug!("Entwurf mit {} Eckpunkten verworfen", ring.len());
            }
            return None;
        }
        ring.push(ring[0]);
        let feature = Feature::polygon(&[ring]);
        self.draw.drawn = Some(feature.clone());
        if self.has_subscription(&EventKind::DrawCreate) {
            self.events.push_back(SurfaceEvent::DrawCreated {
                feature: feature.clone(),
            });
        }
        Some(feature)
    }

    pub fn cancel_drawing(&mut self) {
        self.draw.vertices.clear();
    }

    /// Löscht das gezeichnete Polygon (Papierkorb).
    pub fn delete_drawn(&mut self) -> bool {
        if self.draw.drawn.take().is_none() {
            return false;
        }
        if self.has_subscription(&EventKind::DrawDelete) {
            self.events.push_back(SurfaceEvent::DrawDeleted);
        }
        true
    }

    pub fn drawn_polygon(&self) -> Option<&Feature> {
        self.draw.drawn.as_ref()
    }

    /// Aktiviert ein montiertes Control.
    pub fn activate_control(&mut self, handle: ControlHandle) -> bool {
        if !self.controls.contains_key(&handle) {
            return false;
        }
        self.events
            .push_back(SurfaceEvent::ControlActivated { handle });
        true
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderSurface for SceneSurface {
    fn add_dataset(&mut self, id: &str, collection: Arc<FeatureCollection>) {
        if self.datasets.contains_key(id) {
            log::warn!("Dataset '{}' existiert bereits und wird ersetzt", id);
        }
        self.journal.push(SurfaceCall::AddDataset {
            id: id.to_string(),
            features: collection.len(),
        });
        let dataset = SceneDataset::prepare(id, collection);
        self.datasets.insert(id.to_string(), dataset);
    }

    fn remove_dataset(&mut self, id: &str) {
        if self.layers.iter().any(|l| l.source == id) {
            log::warn!("Dataset '{}' wird noch von visuellen Layern genutzt", id);
        }
        if self.datasets.shift_remove(id).is_some() {
            self.journal.push(SurfaceCall::RemoveDataset { id: id.to_string() });
        }
    }

    fn has_dataset(&self, id: &str) -> bool {
        self.datasets.contains_key(id)
    }

    fn add_visual_layer(&mut self, spec: VisualLayerSpec) {
        if !self.datasets.contains_key(&spec.source) {
            log::warn!(
                "Layer '{}' verweist auf unbekanntes Dataset '{}'",
                spec.id,
                spec.source
            );
            return;
        }
        self.journal.push(SurfaceCall::AddVisualLayer {
            id: spec.id.clone(),
            visible: spec.visible,
        });
        match self.layers.iter_mut().find(|l| l.id == spec.id) {
            Some(existing) => {
                log::warn!("Layer '{}' existiert bereits und wird ersetzt", spec.id);
                *existing = spec;
            }
            None => self.layers.push(spec),
        }
    }

    fn remove_visual_layer(&mut self, id: &str) {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() != before {
            self.journal
                .push(SurfaceCall::RemoveVisualLayer { id: id.to_string() });
        }
    }

    fn has_visual_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    fn set_visibility(&mut self, id: &str, visible: bool) {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.visible = visible;
                self.journal.push(SurfaceCall::SetVisibility {
                    id: id.to_string(),
                    visible,
                });
            }
            None => log::warn!("Sichtbarkeit für unbekannten Layer '{}' ignoriert", id),
        }
    }

    fn frame_view(&mut self, bounds: BoundingBox) {
        self.camera
            .fit_bounds(&bounds, self.viewport_size, self.frame_padding);
        self.journal.push(SurfaceCall::FrameView { bounds });
    }

    fn fly_to(&mut self, center: [f64; 2], zoom: f64) {
        self.camera = Camera2D::new(DVec2::from(center), zoom);
        self.journal.push(SurfaceCall::FlyTo { center, zoom });
    }

    fn set_basemap(&mut self, basemap: &Basemap) {
        self.basemap = Some(basemap.clone());
        self.journal.push(SurfaceCall::SetBasemap {
            label: basemap.label.clone(),
        });
    }

    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        self.journal.push(SurfaceCall::Subscribe {
            id,
            kind: kind.clone(),
        });
        self.subscriptions.insert(id, kind);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        if self.subscriptions.shift_remove(&id).is_none() {
            log::warn!("Unbekanntes Abonnement {:?}", id);
            return;
        }
        self.journal.push(SurfaceCall::Unsubscribe { id });
    }

    fn add_control(&mut self, spec: ControlSpec) -> ControlHandle {
        let handle = ControlHandle(self.next_id());
        self.controls.insert(handle, spec);
        self.journal.push(SurfaceCall::AddControl { handle });
        handle
    }

    fn remove_control(&mut self, handle: ControlHandle) {
        if self.controls.shift_remove(&handle).is_some() {
            self.journal.push(SurfaceCall::RemoveControl { handle });
        }
    }

    fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        self.events.drain(..).collect()
    }
}
