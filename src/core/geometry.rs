//! Geometrie-Kernel: Polygon-Konvertierung, Validierung, Schnitt-Prädikat,
//! Bounding Box und Triangulierung.
//!
//! Alle Funktionen arbeiten auf der opaken [`Geometry`] und liefern bei
//! unbrauchbaren Eingaben einen [`GeometryError`] statt zu paniken.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Intersects, LineString, MultiPolygon, Point, Polygon, TriangulateEarcut};
use serde_json::Value;

use super::error::GeometryError;
use super::feature::{FeatureCollection, Geometry};

/// Achsenparallele Bounding Box in Lon/Lat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Erweitert die Box um eine Position.
    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn is_finite(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Konvertiert eine Polygon- oder MultiPolygon-Geometrie in ein `MultiPolygon`.
///
/// Prüft Struktur, Endlichkeit, Mindestlänge und Geschlossenheit jedes Rings,
/// aber keine Selbstüberschneidung (siehe [`validate_simple`]).
pub fn to_multi_polygon(geometry: &Geometry) -> Result<MultiPolygon<f64>, GeometryError> {
    match geometry.kind.as_str() {
        "Polygon" => Ok(MultiPolygon::new(vec![parse_polygon(&geometry.coordinates)?])),
        "MultiPolygon" => {
            let polygons = as_array(&geometry.coordinates, "MultiPolygon erwartet Array")?;
            if polygons.is_empty() {
                return Err(GeometryError::Empty);
            }
            let parsed = polygons
                .iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(MultiPolygon::new(parsed))
        }
        other => Err(GeometryError::UnsupportedType(other.to_string())),
    }
}

/// Konvertiert und validiert streng: zusätzlich keine selbstschneidenden Ringe.
pub fn to_simple_multi_polygon(geometry: &Geometry) -> Result<MultiPolygon<f64>, GeometryError> {
    let shape = to_multi_polygon(geometry)?;
    validate_simple(&shape)?;
    Ok(shape)
}

/// Prüft alle Ringe eines MultiPolygons auf Selbstüberschneidung.
///
/// Überschneidungen zwischen Außenring und Löchern werden nicht geprüft.
pub fn validate_simple(shape: &MultiPolygon<f64>) -> Result<(), GeometryError> {
    for polygon in shape {
        if ring_self_intersects(polygon.exterior()) {
            return Err(GeometryError::SelfIntersection);
        }
        if polygon.interiors().iter().any(ring_self_intersects) {
            return Err(GeometryError::SelfIntersection);
        }
    }
    Ok(())
}

/// Schnitt-Prädikat: Flächenüberlappung, gemeinsamer Rand oder Enthaltensein.
pub fn intersects(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    a.intersects(b)
}

/// Prüft, ob eine Position innerhalb oder auf dem Rand der Form liegt.
pub fn contains_point(shape: &MultiPolygon<f64>, position: [f64; 2]) -> bool {
    shape.intersects(&Point::new(position[0], position[1]))
}

/// Berechnet die Bounding Box über alle Positionen aller Features.
///
/// Features ohne Geometrie werden übersprungen. Eine Collection ohne
/// Positionen, nicht-numerische Koordinaten oder eine Box ohne Ausdehnung
/// liefern einen Fehler.
pub fn collection_bounds(collection: &FeatureCollection) -> Result<BoundingBox, GeometryError> {
    let mut bounds: Option<BoundingBox> = None;
    for geometry in collection.iter().filter_map(|f| f.geometry.as_ref()) {
        visit_positions(&geometry.coordinates, &mut |x, y| {
            bounds
                .get_or_insert(BoundingBox::new(x, y, x, y))
                .include(x, y);
        })?;
    }

    let bounds = bounds.ok_or(GeometryError::Empty)?;
    if !bounds.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate);
    }
    if bounds.width() <= 0.0 && bounds.height() <= 0.0 {
        return Err(GeometryError::Degenerate);
    }
    Ok(bounds)
}

/// Zerlegt ein MultiPolygon in Dreiecke (Earcut) für das Füll-Rendering.
pub fn triangulate(shape: &MultiPolygon<f64>) -> Vec<[[f64; 2]; 3]> {
    shape
        .iter()
        .flat_map(|polygon| polygon.earcut_triangles())
        .map(|triangle| triangle.to_array().map(|c| [c.x, c.y]))
        .collect()
}

/// Liefert alle Ringe (außen + innen) als Positionslisten für Umriss-Rendering.
pub fn outline_rings(shape: &MultiPolygon<f64>) -> Vec<Vec<[f64; 2]>> {
    shape
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
        .collect()
}

// ── Parsing ─────────────────────────────────────────────────────────

fn as_array<'a>(value: &'a Value, context: &'static str) -> Result<&'a Vec<Value>, GeometryError> {
    value
        .as_array()
        .ok_or(GeometryError::MalformedCoordinates(context))
}

fn parse_polygon(value: &Value) -> Result<Polygon<f64>, GeometryError> {
    let rings = as_array(value, "Polygon erwartet Array von Ringen")?;
    let (exterior, interiors) = rings.split_first().ok_or(GeometryError::Empty)?;
    let exterior = parse_ring(exterior)?;
    let interiors = interiors
        .iter()
        .map(parse_ring)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(value: &Value) -> Result<LineString<f64>, GeometryError> {
    let positions = as_array(value, "Ring erwartet Array von Positionen")?;
    if positions.len() < 4 {
        return Err(GeometryError::TooFewPositions(positions.len()));
    }
    let coords = positions
        .iter()
        .map(parse_position)
        .collect::<Result<Vec<_>, _>>()?;

    let ring = LineString::new(coords);
    if !ring.is_closed() {
        return Err(GeometryError::UnclosedRing);
    }
    Ok(ring)
}

fn parse_position(value: &Value) -> Result<Coord<f64>, GeometryError> {
    let parts = as_array(value, "Position erwartet Array")?;
    if parts.len() < 2 {
        return Err(GeometryError::MalformedCoordinates("Position mit weniger als 2 Werten"));
    }
    let x = parts[0]
        .as_f64()
        .ok_or(GeometryError::MalformedCoordinates("Position nicht numerisch"))?;
    let y = parts[1]
        .as_f64()
        .ok_or(GeometryError::MalformedCoordinates("Position nicht numerisch"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate);
    }
    Ok(Coord { x, y })
}

/// Läuft rekursiv über beliebig verschachtelte Koordinaten-Arrays.
fn visit_positions(
    value: &Value,
    visit: &mut impl FnMut(f64, f64),
) -> Result<(), GeometryError> {
    let Some(items) = value.as_array() else {
        // Geometrien ohne `coordinates` (z.B. GeometryCollection) tragen nichts bei
        return if value.is_null() {
            Ok(())
        } else {
            Err(GeometryError::MalformedCoordinates("Koordinaten erwartet Array"))
        };
    };

    if items.first().is_some_and(Value::is_number) {
        let position = parse_position(value)?;
        visit(position.x, position.y);
        return Ok(());
    }

    for item in items {
        visit_positions(item, visit)?;
    }
    Ok(())
}

// ── Selbstüberschneidung ────────────────────────────────────────────

fn ring_self_intersects(ring: &LineString<f64>) -> bool {
    // Doppelte aufeinanderfolgende Positionen erzeugen Null-Kanten
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &c in &ring.0 {
        if coords.last() != Some(&c) {
            coords.push(c);
        }
    }
    if coords.len() < 4 {
        // Weniger als drei verschiedene Ecken: Ring ohne Fläche
        return true;
    }

    let segments: Vec<geo::Line<f64>> = LineString::new(coords).lines().collect();
    let n = segments.len();

    // Sweep über x: nur Kanten mit überlappender x-Ausdehnung werden verglichen
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| min_x(&segments[a]).total_cmp(&min_x(&segments[b])));

    for (pos, &i) in order.iter().enumerate() {
        let reach = max_x(&segments[i]);
        for &j in &order[pos + 1..] {
            if min_x(&segments[j]) > reach {
                break;
            }
            if !y_ranges_overlap(&segments[i], &segments[j]) {
                continue;
            }
            let (lo, hi) = (i.min(j), i.max(j));
            let adjacent = hi == lo + 1 || (lo == 0 && hi == n - 1);
            match line_intersection(segments[i], segments[j]) {
                None => {}
                Some(LineIntersection::Collinear { .. }) => return true,
                Some(LineIntersection::SinglePoint { .. }) if !adjacent => return true,
                Some(LineIntersection::SinglePoint { is_proper, .. }) => {
                    if is_proper {
                        return true;
                    }
                }
            }
        }
    }
    false
}

fn min_x(line: &geo::Line<f64>) -> f64 {
    line.start.x.min(line.end.x)
}

fn max_x(line: &geo::Line<f64>) -> f64 {
    line.start.x.max(line.end.x)
}

fn y_ranges_overlap(a: &geo::Line<f64>, b: &geo::Line<f64>) -> bool {
    let (a_min, a_max) = (a.start.y.min(a.end.y), a.start.y.max(a.end.y));
    let (b_min, b_max) = (b.start.y.min(b.end.y), b.start.y.max(b.end.y));
    a_min <= b_max && b_min <= a_max
}
