#![no_main]

use geo_overlay_viewer::core::{collection_bounds, describe};
use geo_overlay_viewer::{query, Feature, FeatureCollection};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(collection) = FeatureCollection::from_geojson_str(text) else {
        return;
    };

    let _ = collection_bounds(&collection);
    for feature in collection.iter() {
        let _ = describe(feature);
    }

    // Jede dekodierte Geometrie einmal als gezeichnetes Polygon verwenden
    for drawn in collection.iter().take(4) {
        let result = query(drawn, Some(&collection));
        assert!(result.len() <= collection.len());
    }
    let probe = Feature::polygon(&[vec![[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0]]]);
    let _ = query(&probe, Some(&collection));
});
