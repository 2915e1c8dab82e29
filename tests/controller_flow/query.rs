use geo_overlay_viewer::surface::{RenderSurface, SurfaceCall};
use geo_overlay_viewer::{AppIntent, HighlightState};

use super::{
    report_ids, square, FixtureSource, Harness, ATCO, ATCO_JSON, BROKEN_JSON, SUMMIT,
    SUMMIT_JSON,
};

#[test]
fn test_draw_over_p2_and_p3_highlights_them_in_source_order() {
    let mut harness = Harness::loaded();

    harness.draw(&square(-1.0, 4.0));

    let set = harness.state.highlight.current().expect("Highlight aktiv");
    assert_eq!(set.source_layer_id, ATCO);
    assert_eq!(report_ids(&set.features), vec!["P2", "P3"]);
    assert_eq!(harness.highlight_layer_count(), 1);
    let dataset = harness.surface.dataset("highlight").expect("Highlight-Dataset");
    assert_eq!(report_ids(dataset), vec!["P2", "P3"]);
}

#[test]
fn test_highlight_is_a_subset_of_the_cached_collection() {
    let mut harness = Harness::loaded();

    harness.draw(&square(-1.0, 4.0));

    let cached = harness.state.layers.get(ATCO).expect("ATCO geladen").clone();
    let set = harness.state.highlight.current().expect("Highlight aktiv");
    for feature in set.features.iter() {
        assert!(cached.features.contains(feature));
    }
    assert_eq!(cached.len(), 3);
}

#[test]
fn test_disjoint_draw_leaves_highlight_idle() {
    let mut harness = Harness::loaded();

    harness.draw(&square(50.0, 51.0));

    assert_eq!(*harness.state.highlight.state(), HighlightState::Idle);
    assert_eq!(harness.highlight_layer_count(), 0);
    assert!(!harness.surface.has_dataset("highlight"));
}

#[test]
fn test_containing_draw_highlights_all_features_in_one_artifact() {
    let mut harness = Harness::loaded();

    harness.draw(&square(-10.0, 30.0));

    let set = harness.state.highlight.current().expect("Highlight aktiv");
    assert_eq!(set.features.len(), 3);
    assert_eq!(harness.highlight_layer_count(), 1);
    let highlight = harness
        .surface
        .visual_layer("highlight-fill")
        .expect("Highlight-Layer");
    assert!(highlight.visible);
}

#[test]
fn test_second_draw_replaces_highlight_before_creating_new_one() {
    let mut harness = Harness::loaded();
    harness.draw(&square(-1.0, 4.0));
    harness.surface.clear_journal();

    harness.draw(&square(19.5, 22.0));

    let calls: Vec<&SurfaceCall> = harness
        .surface
        .journal()
        .iter()
        .filter(|c| match c {
            SurfaceCall::AddVisualLayer { id, .. } | SurfaceCall::RemoveVisualLayer { id } => {
                id == "highlight-fill"
            }
            _ => false,
        })
        .collect();
    assert!(matches!(calls[0], SurfaceCall::RemoveVisualLayer { .. }));
    assert!(matches!(calls[1], SurfaceCall::AddVisualLayer { .. }));
    assert_eq!(calls.len(), 2);

    assert_eq!(harness.highlight_layer_count(), 1);
    let set = harness.state.highlight.current().expect("Highlight aktiv");
    assert_eq!(report_ids(&set.features), vec!["P1"]);
}

#[test]
fn test_second_draw_without_hits_tears_down_old_highlight() {
    let mut harness = Harness::loaded();
    harness.draw(&square(-1.0, 4.0));

    harness.draw(&square(50.0, 51.0));

    assert_eq!(*harness.state.highlight.state(), HighlightState::Idle);
    assert_eq!(harness.highlight_layer_count(), 0);
    assert!(!harness.surface.has_dataset("highlight"));
}

#[test]
fn test_deleting_drawn_polygon_returns_to_idle() {
    let mut harness = Harness::loaded();
    harness.draw(&square(-1.0, 4.0));
    assert!(harness.state.highlight.is_highlighted());

    harness.delete_drawn();

    assert_eq!(*harness.state.highlight.state(), HighlightState::Idle);
    assert_eq!(harness.highlight_layer_count(), 0);
    assert!(!harness.surface.has_dataset("highlight"));
    assert!(harness.surface.drawn_polygon().is_none());
}

#[test]
fn test_query_uses_the_active_layer() {
    let mut harness = Harness::loaded();
    harness.dispatch(AppIntent::LayerSelected {
        layer_id: SUMMIT.to_string(),
    });

    harness.draw(&square(-1.0, 4.0));

    let set = harness.state.highlight.current().expect("Highlight aktiv");
    assert_eq!(set.source_layer_id, SUMMIT);
    assert_eq!(set.features.len(), 1);
}

#[test]
fn test_draw_against_absent_layer_yields_empty_result() {
    let mut harness = Harness::mounted();
    harness.resolve_fetches(&FixtureSource::default().with(SUMMIT, SUMMIT_JSON));

    harness.draw(&square(-10.0, 30.0));

    assert_eq!(*harness.state.highlight.state(), HighlightState::Idle);
    assert_eq!(harness.highlight_layer_count(), 0);
}

#[test]
fn test_broken_geometries_are_skipped_and_reported() {
    let mut harness = Harness::mounted();
    harness.resolve_fetches(
        &FixtureSource::default()
            .with(ATCO, BROKEN_JSON)
            .with(SUMMIT, SUMMIT_JSON),
    );

    harness.draw(&square(-1.0, 4.0));

    let set = harness.state.highlight.current().expect("Highlight aktiv");
    let ids: Vec<i64> = set
        .features
        .iter()
        .filter_map(|f| f.properties.as_ref()?.get("id")?.as_i64())
        .collect();
    assert_eq!(ids, vec![1, 5]);
    let message = harness.state.ui.status_message.as_deref().unwrap_or_default();
    assert!(message.contains("3 ungültige Geometrien"));
}

#[test]
fn test_highlight_survives_layer_switch() {
    let mut harness = Harness::loaded();
    harness.draw(&square(-1.0, 4.0));

    harness.dispatch(AppIntent::LayerSelected {
        layer_id: SUMMIT.to_string(),
    });

    let set = harness.state.highlight.current().expect("Highlight aktiv");
    assert_eq!(set.source_layer_id, ATCO);
    assert_eq!(harness.highlight_layer_count(), 1);
}

#[test]
fn test_query_leaves_cached_collection_untouched() {
    let mut harness = Harness::mounted();
    harness.resolve_fetches(
        &FixtureSource::default()
            .with(ATCO, ATCO_JSON)
            .with(SUMMIT, SUMMIT_JSON),
    );
    let before = harness.state.layers.get(ATCO).expect("ATCO geladen").clone();
    let snapshot = (*before).clone();

    harness.draw(&square(-1.0, 4.0));

    let after = harness.state.layers.get(ATCO).expect("ATCO geladen");
    assert!(std::sync::Arc::ptr_eq(&before, after));
    assert_eq!(**after, snapshot);
}

#[test]
fn test_repeated_draws_reuse_prepared_shapes() {
    let mut harness = Harness::loaded();
    let (_, prepared) = harness.state.layers.get_prepared(ATCO).expect("ATCO geladen");
    let prepared = prepared.clone();

    harness.draw(&square(-1.0, 4.0));
    harness.draw(&square(19.5, 20.5));

    let (_, after) = harness.state.layers.get_prepared(ATCO).expect("ATCO geladen");
    assert!(std::sync::Arc::ptr_eq(&prepared, after));
    let set = harness.state.highlight.current().expect("Highlight aktiv");
    assert_eq!(report_ids(&set.features), vec!["P1"]);
}
