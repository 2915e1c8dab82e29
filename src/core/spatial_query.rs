//! Räumliche Abfrage: welche Features schneiden ein gezeichnetes Polygon?
//!
//! Die Feature-Geometrien werden einmal pro Dataset konvertiert und validiert
//! ([`PreparedShapes`]); jede Abfrage prüft danach nur noch Bounding Boxes und
//! das Schnitt-Prädikat.

use geo::{BoundingRect, Intersects, MultiPolygon, Rect};

use super::error::GeometryError;
use super::feature::{Feature, FeatureCollection};
use super::geometry::{intersects, to_simple_multi_polygon};

/// Ergebnis einer Abfrage inklusive übersprungener Features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryReport {
    /// Treffer in Quell-Reihenfolge (eigene Kopie, kein Alias)
    pub matches: FeatureCollection,
    /// Anzahl der Features, deren Geometrie nicht auswertbar war
    pub skipped: usize,
}

/// Validierte Form eines Features samt Bounding Box.
#[derive(Debug, Clone)]
pub struct PreparedShape {
    pub shape: MultiPolygon<f64>,
    pub bounds: Rect<f64>,
}

impl PreparedShape {
    fn from_feature(feature: &Feature) -> Result<Self, GeometryError> {
        let shape = feature
            .geometry
            .as_ref()
            .ok_or(GeometryError::Missing)
            .and_then(to_simple_multi_polygon)?;
        let bounds = shape.bounding_rect().ok_or(GeometryError::Empty)?;
        Ok(Self { shape, bounds })
    }
}

/// Vorbereitete Formen einer Collection, Index-gleich zu deren Features.
#[derive(Debug, Clone, Default)]
pub struct PreparedShapes {
    shapes: Vec<Result<PreparedShape, GeometryError>>,
}

impl PreparedShapes {
    /// Konvertiert und validiert alle Features einmalig.
    pub fn prepare(collection: &FeatureCollection) -> Self {
        let shapes: Vec<_> = collection.iter().map(PreparedShape::from_feature).collect();
        let invalid = shapes.iter().filter(|s| s.is_err()).count();
        if invalid > 0 {
            log::info!(
                "{} von {} Features ohne auswertbare Geometrie",
                invalid,
                shapes.len()
            );
        }
        Self { shapes }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Anzahl der Features, die keine Abfrage treffen kann.
    pub fn invalid_count(&self) -> usize {
        self.shapes.iter().filter(|s| s.is_err()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Result<PreparedShape, GeometryError>> {
        self.shapes.get(index)
    }
}

/// Liefert alle Features aus `collection`, die `drawn` schneiden.
///
/// Eine fehlende Collection ergibt ein leeres Ergebnis.
pub fn query(drawn: &Feature, collection: Option<&FeatureCollection>) -> FeatureCollection {
    query_with_report(drawn, collection).matches
}

/// Wie [`query`], meldet aber zusätzlich die Zahl übersprungener Features.
///
/// Bereitet die Collection für genau diese Abfrage vor; für wiederholte
/// Abfragen auf denselben Daten [`query_prepared`] verwenden.
pub fn query_with_report(drawn: &Feature, collection: Option<&FeatureCollection>) -> QueryReport {
    let Some(collection) = collection else {
        return QueryReport::default();
    };
    let prepared = PreparedShapes::prepare(collection);
    query_prepared(drawn, collection, &prepared)
}

/// Abfrage gegen bereits vorbereitete Formen.
///
/// `prepared` muss aus `collection` entstanden sein; Features ohne
/// passende Form zählen als übersprungen.
pub fn query_prepared(
    drawn: &Feature,
    collection: &FeatureCollection,
    prepared: &PreparedShapes,
) -> QueryReport {
    let drawn_shape = match PreparedShape::from_feature(drawn) {
        Ok(shape) => shape,
        Err(e) => {
            log::warn!("Gezeichnetes Polygon nicht auswertbar: {}", e);
            return QueryReport::default();
        }
    };

    let mut skipped = 0;
    let matches = collection
        .iter()
        .enumerate()
        .filter(|(index, _)| match prepared.get(*index) {
            Some(Ok(candidate)) => {
                candidate.bounds.intersects(&drawn_shape.bounds)
                    && intersects(&candidate.shape, &drawn_shape.shape)
            }
            Some(Err(e)) => {
                log::debug!("Feature #{} übersprungen: {}", index, e);
                skipped += 1;
                false
            }
            None => {
                skipped += 1;
                false
            }
        })
        .map(|(_, feature)| feature.clone())
        .collect();

    if skipped > 0 {
        log::warn!(
            "{} von {} Features mit ungültiger Geometrie übersprungen",
            skipped,
            collection.len()
        );
    }

    QueryReport {
        matches: FeatureCollection::new(matches),
        skipped,
    }
}
