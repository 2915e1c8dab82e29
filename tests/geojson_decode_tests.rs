use geo_overlay_viewer::core::{collection_bounds, describe, query_with_report, GeometryError};
use geo_overlay_viewer::{query, Feature, FeatureCollection, FetchError};

const ATCO_JSON: &str = include_str!("fixtures/reportarea_atco.geojson");
const SUMMIT_JSON: &str = include_str!("fixtures/breadcrumb_summit.geojson");
const EMPTY_JSON: &str = include_str!("fixtures/empty.geojson");
const BROKEN_JSON: &str = include_str!("fixtures/broken_geometries.geojson");

fn drawn(min: f64, max: f64) -> Feature {
    Feature::polygon(&[vec![[min, min], [max, min], [max, max], [min, max], [min, min]]])
}

#[test]
fn test_fixtures_decode() {
    let atco = FeatureCollection::from_geojson_str(ATCO_JSON).expect("ATCO dekodierbar");
    let summit = FeatureCollection::from_geojson_str(SUMMIT_JSON).expect("Summit dekodierbar");
    let empty = FeatureCollection::from_geojson_str(EMPTY_JSON).expect("Leere Collection dekodierbar");
    let broken = FeatureCollection::from_geojson_str(BROKEN_JSON).expect("Kaputte Geometrien dekodierbar");

    assert_eq!(atco.len(), 3);
    assert_eq!(summit.len(), 2);
    assert!(empty.is_empty());
    assert_eq!(broken.len(), 5);
    assert!(summit.features[1].properties.is_none());
    assert!(broken.features[3].geometry.is_none());
}

#[test]
fn test_from_reader_matches_from_str() {
    let from_str = FeatureCollection::from_geojson_str(ATCO_JSON).expect("dekodierbar");
    let from_reader =
        FeatureCollection::from_reader(std::io::Cursor::new(ATCO_JSON.as_bytes())).expect("dekodierbar");

    assert_eq!(from_str, from_reader);
}

#[test]
fn test_non_collection_documents_are_rejected() {
    let single = r#"{"type": "Feature", "geometry": null, "properties": {}}"#;
    let missing_features = r#"{"type": "FeatureCollection"}"#;

    assert!(matches!(
        FeatureCollection::from_geojson_str(single),
        Err(FetchError::NotAFeatureCollection(kind)) if kind == "Feature"
    ));
    assert!(matches!(
        FeatureCollection::from_geojson_str(missing_features),
        Err(FetchError::NotAFeatureCollection(_))
    ));
    assert!(matches!(
        FeatureCollection::from_geojson_str("<html>502</html>"),
        Err(FetchError::Decode(_))
    ));
}

#[test]
fn test_query_example_returns_p2_and_p3() {
    let atco = FeatureCollection::from_geojson_str(ATCO_JSON).expect("dekodierbar");

    let result = query(&drawn(-1.0, 4.0), Some(&atco));

    assert_eq!(result.features, vec![atco.features[1].clone(), atco.features[2].clone()]);
}

#[test]
fn test_query_touching_edge_counts_as_match() {
    let atco = FeatureCollection::from_geojson_str(ATCO_JSON).expect("dekodierbar");

    // Teilt nur die Kante x = 1 mit P2
    let result = query(
        &Feature::polygon(&[vec![[1.0, 0.0], [1.5, 0.0], [1.5, 0.5], [1.0, 0.5], [1.0, 0.0]]]),
        Some(&atco),
    );

    assert_eq!(result.len(), 1);
}

#[test]
fn test_query_absent_collection_is_empty() {
    assert!(query(&drawn(-1.0, 4.0), None).is_empty());
}

#[test]
fn test_query_report_counts_broken_features() {
    let broken = FeatureCollection::from_geojson_str(BROKEN_JSON).expect("dekodierbar");

    let report = query_with_report(&drawn(-1.0, 4.0), Some(&broken));

    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.skipped, 3);
}

#[test]
fn test_bounds_over_multipolygon_fixture() {
    let summit = FeatureCollection::from_geojson_str(SUMMIT_JSON).expect("dekodierbar");

    let bounds = collection_bounds(&summit).expect("Bounds berechenbar");

    approx::assert_relative_eq!(bounds.min_x, 0.5);
    approx::assert_relative_eq!(bounds.min_y, 0.5);
    approx::assert_relative_eq!(bounds.max_x, 9.0);
    approx::assert_relative_eq!(bounds.max_y, 9.0);
}

#[test]
fn test_bounds_of_empty_collection_fail() {
    let empty = FeatureCollection::from_geojson_str(EMPTY_JSON).expect("dekodierbar");

    assert_eq!(collection_bounds(&empty), Err(GeometryError::Empty));
}

#[test]
fn test_describe_fixture_features() {
    let summit = FeatureCollection::from_geojson_str(SUMMIT_JSON).expect("dekodierbar");

    let named = describe(&summit.features[0]);
    let bare = describe(&summit.features[1]);

    assert_eq!(named.headline.map(|h| h.value), Some("Summit Ridge".to_string()));
    assert_eq!(named.properties[1].value, "2410");
    assert!(bare.notice.is_some());
}
