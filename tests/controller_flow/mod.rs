//! Gemeinsame Test-Helfer: Controller + In-Memory-Surface + Fixture-Quelle.

pub mod layers;
pub mod query;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use geo_overlay_viewer::surface::{VisualLayerKind, SurfaceCall};
use geo_overlay_viewer::{
    AppController, AppIntent, AppState, DatasetSource, FeatureCollection, FetchError,
    OverlayLayerDescriptor, RenderSurface, SceneSurface, ViewerOptions,
};

pub const ATCO: &str = "reportarea_atco";
pub const SUMMIT: &str = "breadcrumb_summit";

pub const ATCO_JSON: &str = include_str!("../fixtures/reportarea_atco.geojson");
pub const SUMMIT_JSON: &str = include_str!("../fixtures/breadcrumb_summit.geojson");
pub const EMPTY_JSON: &str = include_str!("../fixtures/empty.geojson");
pub const BROKEN_JSON: &str = include_str!("../fixtures/broken_geometries.geojson");

/// Liefert GeoJSON-Texte je Layer-ID; unbekannte Layer antworten mit 404.
#[derive(Default)]
pub struct FixtureSource {
    bodies: HashMap<String, &'static str>,
}

impl FixtureSource {
    pub fn with(mut self, layer_id: &str, body: &'static str) -> Self {
        self.bodies.insert(layer_id.to_string(), body);
        self
    }
}

impl DatasetSource for FixtureSource {
    fn fetch(&self, layer: &OverlayLayerDescriptor) -> Result<FeatureCollection, FetchError> {
        match self.bodies.get(&layer.id) {
            Some(body) => FeatureCollection::from_geojson_str(body),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Eine montierte Ansicht mit Standard-Optionen.
pub struct Harness {
    pub controller: AppController,
    pub state: AppState,
    pub surface: SceneSurface,
}

impl Harness {
    /// Montiert die Ansicht und meldet die Surface als geladen.
    pub fn mounted() -> Self {
        let state = AppState::new(ViewerOptions::default()).expect("Standard-Optionen gültig");
        let mut harness = Self {
            controller: AppController::new(),
            state,
            surface: SceneSurface::default(),
        };
        harness.dispatch(AppIntent::ViewMountRequested);
        harness.surface.finish_setup();
        harness.pump();
        harness
    }

    /// Montiert und lädt beide Standard-Layer aus den Fixtures.
    pub fn loaded() -> Self {
        let mut harness = Self::mounted();
        harness.resolve_fetches(&FixtureSource::default().with(ATCO, ATCO_JSON).with(SUMMIT, SUMMIT_JSON));
        harness
    }

    pub fn dispatch(&mut self, intent: AppIntent) {
        self.controller
            .handle_intent(&mut self.state, &mut self.surface, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    pub fn try_dispatch(&mut self, intent: AppIntent) -> anyhow::Result<()> {
        self.controller
            .handle_intent(&mut self.state, &mut self.surface, intent)
    }

    /// Leitet alle offenen Surface-Ereignisse an den Controller weiter.
    pub fn pump(&mut self) {
        for event in self.surface.drain_events() {
            self.dispatch(AppIntent::from(event));
        }
    }

    /// Beantwortet alle angeforderten Fetches synchron aus `source`.
    pub fn resolve_fetches(&mut self, source: &dyn DatasetSource) {
        for layer in self.state.layers.take_fetch_requests() {
            let intent = match source.fetch(&layer) {
                Ok(collection) => AppIntent::DatasetFetched {
                    layer_id: layer.id.clone(),
                    collection: Arc::new(collection),
                },
                Err(e) => AppIntent::DatasetFetchFailed {
                    layer_id: layer.id.clone(),
                    reason: e.to_string(),
                },
            };
            self.dispatch(intent);
        }
    }

    /// Zeichnet ein Polygon mit dem Draw-Tool und verarbeitet das Ereignis.
    pub fn draw(&mut self, ring: &[[f64; 2]]) {
        for vertex in ring {
            assert!(self.surface.add_draw_vertex(*vertex));
        }
        assert!(self.surface.finish_drawing().is_some());
        self.pump();
    }

    pub fn delete_drawn(&mut self) {
        assert!(self.surface.delete_drawn());
        self.pump();
    }

    /// Sichtbare Fill-Layer ohne Highlight.
    pub fn visible_overlay_fills(&self) -> Vec<String> {
        self.surface
            .visible_layer_ids(VisualLayerKind::Fill)
            .into_iter()
            .filter(|id| *id != "highlight-fill")
            .map(str::to_string)
            .collect()
    }

    pub fn highlight_layer_count(&self) -> usize {
        self.surface
            .visual_layers()
            .iter()
            .filter(|l| l.id == "highlight-fill")
            .count()
    }

    pub fn frame_view_calls(&self) -> usize {
        self.surface
            .journal()
            .iter()
            .filter(|c| matches!(c, SurfaceCall::FrameView { .. }))
            .count()
    }
}

/// Achsenparalleles Quadrat als offener Ring für das Draw-Tool.
pub fn square(min: f64, max: f64) -> [[f64; 2]; 4] {
    [[min, min], [max, min], [max, max], [min, max]]
}

/// `ReportAreaID` aller Features in Reihenfolge.
pub fn report_ids(collection: &FeatureCollection) -> Vec<String> {
    collection
        .iter()
        .filter_map(|f| f.properties.as_ref()?.get("ReportAreaID")?.as_str().map(str::to_string))
        .collect()
}
