//! Statische Layer-Beschreibungen: Overlay-Layer und Basemaps.

use serde::{Deserialize, Serialize};

/// Beschreibung eines Overlay-Layers aus der Konfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLayerDescriptor {
    /// Eindeutige Layer-ID (auch Dataset-ID auf der Surface)
    pub id: String,
    /// Anzeigename im Layer-Panel
    pub label: String,
    /// URL, unter der die FeatureCollection abgerufen wird
    #[serde(alias = "api")]
    pub source_endpoint: String,
    /// Füll- und Linienfarbe als `#rrggbb`
    pub color: String,
}

impl OverlayLayerDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        source_endpoint: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            source_endpoint: source_endpoint.into(),
            color: color.into(),
        }
    }

    /// ID des Füll-Artefakts auf der Surface.
    pub fn fill_layer_id(&self) -> String {
        fill_layer_id(&self.id)
    }

    /// ID des Umriss-Artefakts auf der Surface.
    pub fn outline_layer_id(&self) -> String {
        outline_layer_id(&self.id)
    }
}

pub fn fill_layer_id(layer_id: &str) -> String {
    format!("{layer_id}-fill")
}

pub fn outline_layer_id(layer_id: &str) -> String {
    format!("{layer_id}-outline")
}

/// Hintergrund-Kartenstil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basemap {
    pub label: String,
    /// Style-URL des Kartenanbieters
    pub style: String,
}

impl Basemap {
    pub fn new(label: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: style.into(),
        }
    }
}

/// Parst `#rrggbb` (oder `rrggbb`) zu RGB.
pub fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
