//! Fehler-Taxonomie des Overlay-Kerns.
//!
//! Alle Varianten sind lokal behebbar: Aufrufer loggen sie als Diagnose
//! und setzen die Interaktion fort.

use thiserror::Error;

/// Fehler beim Interpretieren einer Feature-Geometrie.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Feature ohne Geometrie (`"geometry": null`)
    #[error("Feature hat keine Geometrie")]
    Missing,
    /// Geometrietyp ist weder Polygon noch MultiPolygon
    #[error("Nicht unterstützter Geometrietyp: {0}")]
    UnsupportedType(String),
    /// Koordinaten haben nicht die erwartete Verschachtelung
    #[error("Ungültige Koordinatenstruktur: {0}")]
    MalformedCoordinates(&'static str),
    /// NaN oder ±∞ in einer Position
    #[error("Nicht-endliche Koordinate")]
    NonFiniteCoordinate,
    /// Ring mit weniger als vier Positionen
    #[error("Ring mit {0} Positionen (mindestens 4 erforderlich)")]
    TooFewPositions(usize),
    /// Erste und letzte Position eines Rings weichen ab
    #[error("Ring ist nicht geschlossen")]
    UnclosedRing,
    /// Nicht benachbarte Kanten eines Rings schneiden sich
    #[error("Ring schneidet sich selbst")]
    SelfIntersection,
    /// Keine einzige Position vorhanden
    #[error("Geometrie ist leer")]
    Empty,
    /// Ausdehnung ohne Fläche (alle Positionen identisch)
    #[error("Ausdehnung ist degeneriert")]
    Degenerate,
}

/// Fehler beim Abrufen oder Dekodieren eines Datensatzes.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Netzwerk- oder I/O-Fehler
    #[error("Transportfehler: {0}")]
    Transport(String),
    /// Antwort mit Status außerhalb von 2xx
    #[error("HTTP-Status {0}")]
    Status(u16),
    /// Body ist kein gültiges JSON bzw. passt nicht zum GeoJSON-Schema
    #[error("Antwort nicht dekodierbar: {0}")]
    Decode(#[from] serde_json::Error),
    /// GeoJSON-Objekt, aber keine FeatureCollection
    #[error("Erwartet FeatureCollection, erhalten: {0}")]
    NotAFeatureCollection(String),
}

/// Fehler auf Ebene der Layer-Verwaltung.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Datensatz konnte nicht geladen werden; Layer bleibt abwesend
    #[error("Laden von Layer '{layer_id}' fehlgeschlagen: {reason}")]
    FetchFailure { layer_id: String, reason: String },
    /// Gültige, aber leere FeatureCollection
    #[error("Layer '{0}' enthält keine Features")]
    EmptyDataset(String),
    /// Geometrie einer Operation nicht auswertbar
    #[error("Geometriefehler: {0}")]
    GeometryFailure(#[from] GeometryError),
    /// Abfrage gegen einen Layer ohne geladene Daten
    #[error("Keine Daten für aktiven Layer '{0}'")]
    MissingActiveData(String),
    /// Layer-ID ist nicht registriert
    #[error("Unbekannter Layer '{0}'")]
    UnknownLayer(String),
    /// Konfiguration enthält keinen Overlay-Layer
    #[error("Keine Overlay-Layer konfiguriert")]
    NoLayersConfigured,
    /// Layer-ID mehrfach vergeben
    #[error("Layer-ID '{0}' ist mehrfach konfiguriert")]
    DuplicateLayer(String),
    /// Layer-ID kollidiert mit dem Highlight-Artefakt
    #[error("Layer-ID '{0}' ist für die Hervorhebung reserviert")]
    ReservedLayerId(String),
}
