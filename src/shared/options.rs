//! Zentrale Konfiguration des Overlay-Viewers.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{parse_hex_color, Basemap, OverlayLayerDescriptor, ViewerError};

// ── Startansicht ────────────────────────────────────────────────────

/// Home-Mittelpunkt `[lon, lat]` (geografische Mitte der USA).
pub const HOME_CENTER: [f64; 2] = [-98.5795, 39.8283];
/// Home-Zoomstufe.
pub const HOME_ZOOM: f64 = 3.5;
/// Abstand in Pixeln beim Einrahmen der Startdaten.
pub const FRAME_PADDING_PX: f32 = 40.0;

// ── Overlay-Darstellung ─────────────────────────────────────────────

/// Deckkraft der Layer-Füllung.
pub const FILL_OPACITY: f32 = 0.3;
/// Linienbreite der Layer-Umrisse in Pixeln.
pub const OUTLINE_WIDTH_PX: f32 = 2.0;

// ── Highlight ───────────────────────────────────────────────────────

/// Füllfarbe der Treffer-Hervorhebung.
pub const HIGHLIGHT_COLOR: &str = "#ffeb3b";
/// Deckkraft der Treffer-Hervorhebung.
pub const HIGHLIGHT_OPACITY: f32 = 0.6;
/// Dataset-ID des Highlight-Artefakts.
pub const HIGHLIGHT_DATASET_ID: &str = "highlight";
/// Layer-ID des Highlight-Artefakts.
pub const HIGHLIGHT_LAYER_ID: &str = "highlight-fill";

fn default_basemaps() -> Vec<Basemap> {
    vec![
        Basemap::new("Streets", "mapbox://styles/mapbox/streets-v12"),
        Basemap::new("Satellite", "mapbox://styles/mapbox/satellite-v9"),
        Basemap::new("Light", "mapbox://styles/mapbox/light-v11"),
        Basemap::new("Dark", "mapbox://styles/mapbox/dark-v11"),
    ]
}

fn default_layers() -> Vec<OverlayLayerDescriptor> {
    vec![
        OverlayLayerDescriptor::new(
            "reportarea_atco",
            "Report Area",
            "http://localhost:5000/api/reportarea_atco",
            "#1976d2",
        ),
        OverlayLayerDescriptor::new(
            "breadcrumb_summit",
            "Breadcrumb Summit",
            "http://localhost:5000/api/breadcrumb_summit",
            "#d2691e",
        ),
    ]
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `geo_overlay_viewer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    // ── Startansicht ────────────────────────────────────────────
    /// Home-Mittelpunkt `[lon, lat]`
    pub home_center: [f64; 2],
    /// Home-Zoomstufe
    pub home_zoom: f64,
    /// Rand beim Einrahmen der ersten Daten
    pub frame_padding_px: f32,

    // ── Darstellung ─────────────────────────────────────────────
    pub fill_opacity: f32,
    pub outline_width_px: f32,
    /// Highlight-Farbe als `#rrggbb`
    pub highlight_color: String,
    pub highlight_opacity: f32,

    // ── Karten ──────────────────────────────────────────────────
    /// Verfügbare Basemaps, die erste ist aktiv
    pub basemaps: Vec<Basemap>,
    /// Overlay-Layer, der erste ist initial aktiv
    pub layers: Vec<OverlayLayerDescriptor>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            home_center: HOME_CENTER,
            home_zoom: HOME_ZOOM,
            frame_padding_px: FRAME_PADDING_PX,
            fill_opacity: FILL_OPACITY,
            outline_width_px: OUTLINE_WIDTH_PX,
            highlight_color: HIGHLIGHT_COLOR.to_string(),
            highlight_opacity: HIGHLIGHT_OPACITY,
            basemaps: default_basemaps(),
            layers: default_layers(),
        }
    }
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => match opts.validate() {
                    Ok(()) => {
                        log::info!("Optionen geladen aus: {}", path.display());
                        opts
                    }
                    Err(e) => {
                        log::warn!("Optionen ungültig, verwende Standardwerte: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("geo-overlay-viewer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("geo_overlay_viewer.toml")
    }

    /// Prüft Layer-Liste und Farben.
    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.layers.is_empty() {
            return Err(ViewerError::NoLayersConfigured);
        }
        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(ViewerError::DuplicateLayer(layer.id.clone()));
            }
            if layer.id == HIGHLIGHT_DATASET_ID {
                return Err(ViewerError::ReservedLayerId(layer.id.clone()));
            }
            if parse_hex_color(&layer.color).is_none() {
                log::warn!("Layer '{}': Farbe '{}' nicht lesbar", layer.id, layer.color);
            }
        }
        Ok(())
    }

    /// Highlight-Farbe als RGB (Fallback: Standardgelb).
    pub fn highlight_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.highlight_color)
            .or_else(|| parse_hex_color(HIGHLIGHT_COLOR))
            .unwrap_or([255, 235, 59])
    }
}
