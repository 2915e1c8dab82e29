//! Geo Overlay Viewer Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod fetch;
pub mod shared;
pub mod surface;
pub mod ui;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, HighlightManager, HighlightState, LayerCache,
    OverlayManager, UiState, ViewState,
};
pub use core::{
    describe, query, Basemap, BoundingBox, Camera2D, Feature, FeatureCollection, FetchError,
    OverlayLayerDescriptor, PopupDescription, ViewerError,
};
pub use fetch::DatasetSource;
pub use shared::ViewerOptions;
pub use surface::{RenderSurface, SceneSurface, SurfaceEvent};
