//! Geo Overlay Viewer.
//!
//! Kartenansicht für GeoJSON-Overlay-Layer: Layer umschalten, Features per
//! Klick inspizieren, Polygon zeichnen und getroffene Features hervorheben.

use std::sync::Arc;

use eframe::egui;
use geo_overlay_viewer::{
    fetch::{FetchPool, HttpDatasetSource},
    ui, AppController, AppIntent, AppState, Camera2D, RenderSurface, SceneSurface, ViewerOptions,
};
use geo_overlay_viewer::core::ViewerError;
use glam::DVec2;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Geo Overlay Viewer v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 800.0])
                .with_title("Geo Overlay Viewer"),
            ..Default::default()
        };

        eframe::run_native(
            "Geo Overlay Viewer",
            options,
            Box::new(|_cc| Ok(Box::new(ViewerApp::new()?))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct ViewerApp {
    state: AppState,
    controller: AppController,
    surface: SceneSurface,
    fetches: FetchPool,
    map_view: ui::MapViewState,
    teardown_sent: bool,
}

impl ViewerApp {
    fn new() -> Result<Self, ViewerError> {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = ViewerOptions::config_path();
        let viewer_options = ViewerOptions::load_from_file(&config_path);

        let state = match AppState::new(viewer_options) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Konfiguration ungültig, nutze Standardwerte: {:#}", e);
                AppState::new(ViewerOptions::default())?
            }
        };

        let home = Camera2D::new(
            DVec2::from(state.options.home_center),
            state.options.home_zoom,
        );
        let surface = SceneSurface::new(home, state.options.frame_padding_px);

        let mut app = Self {
            state,
            controller: AppController::new(),
            surface,
            fetches: FetchPool::new(Arc::new(HttpDatasetSource::new())),
            map_view: ui::MapViewState::new(),
            teardown_sent: false,
        };
        app.process_events(vec![AppIntent::ViewMountRequested]);
        Ok(app)
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.teardown_sent {
            self.teardown_sent = true;
            self.process_events(vec![AppIntent::ViewTeardownRequested]);
        }

        let mut events = self.collect_fetch_events();
        events.extend(self.collect_ui_events(ctx));

        // Der erste Frame hat die Surface aufgebaut
        self.surface.finish_setup();
        events.extend(self.surface.drain_events().into_iter().map(AppIntent::from));

        let has_meaningful_events = !events.is_empty();
        self.process_events(events);

        self.issue_fetches();

        self.maybe_request_repaint(ctx, has_meaningful_events);
    }
}

impl ViewerApp {
    fn collect_fetch_events(&mut self) -> Vec<AppIntent> {
        self.fetches
            .drain()
            .into_iter()
            .map(|completion| match completion.result {
                Ok(collection) => AppIntent::DatasetFetched {
                    layer_id: completion.layer_id,
                    collection: Arc::new(collection),
                },
                Err(e) => AppIntent::DatasetFetchFailed {
                    layer_id: completion.layer_id,
                    reason: e.to_string(),
                },
            })
            .collect()
    }

    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        events.extend(ui::render_controls_panel(ctx, &self.state));
        ui::render_status_bar(ctx, &self.state, &self.surface);
        let map_rect = ui::render_map_view(ctx, &mut self.surface, &mut self.map_view);
        events.extend(ui::show_feature_popup(
            ctx,
            &self.state,
            &self.surface,
            map_rect.min,
        ));

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) =
                self.controller
                    .handle_intent(&mut self.state, &mut self.surface, event)
            {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    fn issue_fetches(&mut self) {
        for layer in self.state.layers.take_fetch_requests() {
            let layer_id = layer.id.clone();
            if let Err(e) = self.fetches.issue(layer) {
                log::error!("Fetch-Thread für '{}' nicht startbar: {}", layer_id, e);
                self.process_events(vec![AppIntent::DatasetFetchFailed {
                    layer_id,
                    reason: e.to_string(),
                }]);
            }
        }
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        if has_meaningful_events || ctx.input(|i| i.pointer.is_moving()) {
            ctx.request_repaint();
        }
        if self.fetches.in_flight() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
