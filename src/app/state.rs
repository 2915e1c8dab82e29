//! Application State: zentrale Datenhaltung einer Kartenansicht.

mod highlight;
mod layer_cache;
mod overlay;

pub use highlight::{HighlightManager, HighlightSet, HighlightState};
pub use layer_cache::{CacheOutcome, LayerCache, LayerCacheEntry, LoadStatus};
pub use overlay::{OverlayManager, VisibilityUpdate};

use super::CommandLog;
use crate::core::{PopupDescription, ViewerError};
use crate::shared::ViewerOptions;
use crate::surface::{ControlRegistry, SubscriptionSet};

/// View-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct ViewState {
    /// Index der aktiven Basemap in `options.basemaps`
    pub basemap_index: usize,
    /// Ob die Start-Einrahmung bereits erfolgt ist
    pub initial_frame_done: bool,
    /// Surface hat ihr Setup abgeschlossen
    pub surface_loaded: bool,
}

/// Offenes Feature-Popup
#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    /// Fill-Layer, auf dem geklickt wurde
    pub layer_id: String,
    /// Anker in Lon/Lat
    pub position: [f64; 2],
    pub description: PopupDescription,
}

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    pub popup: Option<PopupState>,
    /// Temporäre Statusnachricht (z.B. Trefferzahl)
    pub status_message: Option<String>,
}

/// Ressourcen, die zwischen Mount und Unmount einer Ansicht leben.
#[derive(Debug, Default)]
pub struct SessionState {
    pub mounted: bool,
    pub subscriptions: SubscriptionSet,
    pub controls: ControlRegistry,
}

/// Hauptzustand der Anwendung
#[derive(Debug)]
pub struct AppState {
    /// Laufzeit-Optionen
    pub options: ViewerOptions,
    /// Geladene Datasets
    pub layers: LayerCache,
    /// Aktiver Layer
    pub overlay: OverlayManager,
    /// Treffer-Hervorhebung
    pub highlight: HighlightManager,
    pub view: ViewState,
    pub ui: UiState,
    pub session: SessionState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Signalisiert dem Host (eframe), die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt den Zustand aus validierten Optionen.
    pub fn new(options: ViewerOptions) -> Result<Self, ViewerError> {
        options.validate()?;
        let overlay = OverlayManager::new(options.layers.clone())?;
        let highlight = HighlightManager::new(options.highlight_rgb(), options.highlight_opacity);
        Ok(Self {
            options,
            layers: LayerCache::new(),
            overlay,
            highlight,
            view: ViewState::default(),
            ui: UiState::default(),
            session: SessionState::default(),
            command_log: CommandLog::new(),
            should_exit: false,
        })
    }

    /// Name der aktiven Basemap (für UI-Anzeige)
    pub fn active_basemap_label(&self) -> Option<&str> {
        self.options
            .basemaps
            .get(self.view.basemap_index)
            .map(|b| b.label.as_str())
    }
}
