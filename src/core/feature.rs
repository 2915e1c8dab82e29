//! GeoJSON-Datenmodell: Feature, FeatureCollection und opake Geometrie.
//!
//! Geometrien werden beim Dekodieren nicht interpretiert. Eine kaputte
//! Geometrie macht so nur das einzelne Feature unbrauchbar, nicht die
//! gesamte Collection.

use std::io::Read;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::error::FetchError;

/// Attribut-Tabelle eines Features in Dokument-Reihenfolge.
pub type Properties = IndexMap<String, Value>;

/// Rohe GeoJSON-Geometrie (`type` + `coordinates`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    /// GeoJSON-Typname, z.B. `Polygon`
    #[serde(rename = "type")]
    pub kind: String,
    /// Unverarbeitete Koordinaten-Verschachtelung
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// Baut eine Polygon-Geometrie aus Ringen von `[lon, lat]`-Positionen.
    pub fn polygon(rings: &[Vec<[f64; 2]>]) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates: rings_to_value(rings),
        }
    }

    /// Baut eine MultiPolygon-Geometrie.
    pub fn multi_polygon(polygons: &[Vec<Vec<[f64; 2]>>]) -> Self {
        Self {
            kind: "MultiPolygon".to_string(),
            coordinates: Value::Array(polygons.iter().map(|p| rings_to_value(p)).collect()),
        }
    }

    /// `true` für Polygon und MultiPolygon.
    pub fn is_polygonal(&self) -> bool {
        matches!(self.kind.as_str(), "Polygon" | "MultiPolygon")
    }
}

fn rings_to_value(rings: &[Vec<[f64; 2]>]) -> Value {
    Value::Array(
        rings
            .iter()
            .map(|ring| {
                Value::Array(
                    ring.iter()
                        .map(|[x, y]| serde_json::json!([x, y]))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Einzelnes GeoJSON-Feature.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Feature {
    /// Optionale Feature-ID auf oberster Ebene
    #[serde(default)]
    pub id: Option<Value>,
    /// Geometrie (`None` bei `"geometry": null`)
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Properties (`None` bei fehlendem oder `null`-Objekt)
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    /// Erstellt ein Feature mit Geometrie und optionalen Properties.
    pub fn new(geometry: Geometry, properties: Option<Properties>) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties,
        }
    }

    /// Kurzform für ein Polygon-Feature ohne Properties.
    pub fn polygon(rings: &[Vec<[f64; 2]>]) -> Self {
        Self::new(Geometry::polygon(rings), None)
    }

    /// Setzt eine Property (Builder-Stil, vor allem für Tests und Fixtures).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Geordnete Sammlung von Features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    /// Features in Quell-Reihenfolge
    pub features: Vec<Feature>,
}

#[derive(Deserialize)]
struct RawFeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Option<Vec<Feature>>,
}

impl FeatureCollection {
    /// Erstellt eine Collection aus einer Feature-Liste.
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Leere Collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Anzahl der Features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// `true` wenn keine Features enthalten sind.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iteriert über die Features in Quell-Reihenfolge.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Dekodiert eine FeatureCollection aus GeoJSON-Text.
    pub fn from_geojson_str(text: &str) -> Result<Self, FetchError> {
        let raw: RawFeatureCollection = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Dekodiert eine FeatureCollection direkt aus einem Reader (HTTP-Body).
    pub fn from_reader(reader: impl Read) -> Result<Self, FetchError> {
        let raw: RawFeatureCollection = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawFeatureCollection) -> Result<Self, FetchError> {
        if raw.kind != "FeatureCollection" {
            return Err(FetchError::NotAFeatureCollection(raw.kind));
        }
        let features = raw
            .features
            .ok_or_else(|| FetchError::NotAFeatureCollection("FeatureCollection ohne features".into()))?;
        Ok(Self { features })
    }
}
