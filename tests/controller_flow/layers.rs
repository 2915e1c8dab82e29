use geo_overlay_viewer::app::LoadStatus;
use geo_overlay_viewer::surface::{RenderSurface, SurfaceCall};
use geo_overlay_viewer::AppIntent;

use super::{FixtureSource, Harness, ATCO, ATCO_JSON, EMPTY_JSON, SUMMIT, SUMMIT_JSON};

#[test]
fn test_loaded_layers_render_fill_and_outline_with_active_visible() {
    let harness = Harness::loaded();

    for id in [ATCO, SUMMIT] {
        assert!(harness.surface.has_dataset(id));
        assert!(harness.surface.has_visual_layer(&format!("{id}-fill")));
        assert!(harness.surface.has_visual_layer(&format!("{id}-outline")));
    }
    assert_eq!(harness.visible_overlay_fills(), vec![format!("{ATCO}-fill")]);
    let outline = harness
        .surface
        .visual_layer(&format!("{ATCO}-outline"))
        .expect("Outline-Layer vorhanden");
    assert!(outline.visible);
}

#[test]
fn test_exactly_one_layer_visible_after_every_switch() {
    let mut harness = Harness::loaded();

    for target in [SUMMIT, ATCO, SUMMIT, SUMMIT, ATCO] {
        harness.dispatch(AppIntent::LayerSelected {
            layer_id: target.to_string(),
        });

        assert_eq!(harness.state.overlay.active_id(), target);
        assert_eq!(harness.visible_overlay_fills(), vec![format!("{target}-fill")]);
        for other in [ATCO, SUMMIT].into_iter().filter(|id| *id != target) {
            let outline = harness
                .surface
                .visual_layer(&format!("{other}-outline"))
                .expect("Outline-Layer vorhanden");
            assert!(!outline.visible);
        }
    }
}

#[test]
fn test_unknown_layer_selection_fails_and_keeps_state() {
    let mut harness = Harness::loaded();
    harness.surface.clear_journal();

    let result = harness.try_dispatch(AppIntent::LayerSelected {
        layer_id: "gibt_es_nicht".to_string(),
    });

    assert!(result.is_err());
    assert_eq!(harness.state.overlay.active_id(), ATCO);
    assert!(harness.surface.journal().is_empty());
}

#[test]
fn test_initial_frame_happens_once_for_active_layer() {
    let mut harness = Harness::loaded();

    assert_eq!(harness.frame_view_calls(), 1);
    let framed = harness.surface.journal().iter().find_map(|call| match call {
        SurfaceCall::FrameView { bounds } => Some(*bounds),
        _ => None,
    });
    let bounds = framed.expect("FrameView protokolliert");
    approx::assert_relative_eq!(bounds.min_x, 0.0);
    approx::assert_relative_eq!(bounds.max_x, 21.0);

    harness.dispatch(AppIntent::LayerSelected {
        layer_id: SUMMIT.to_string(),
    });
    harness.dispatch(AppIntent::LayerSelected {
        layer_id: ATCO.to_string(),
    });

    assert_eq!(harness.frame_view_calls(), 1);
}

#[test]
fn test_inactive_layer_arriving_first_does_not_frame() {
    let mut harness = Harness::mounted();
    let requests = harness.state.layers.take_fetch_requests();
    let summit = requests
        .iter()
        .find(|l| l.id == SUMMIT)
        .expect("Summit angefordert")
        .clone();
    let atco = requests
        .iter()
        .find(|l| l.id == ATCO)
        .expect("ATCO angefordert")
        .clone();
    let source = FixtureSource::default()
        .with(ATCO, ATCO_JSON)
        .with(SUMMIT, SUMMIT_JSON);

    for layer in [summit, atco] {
        let collection = geo_overlay_viewer::DatasetSource::fetch(&source, &layer)
            .expect("Fixture dekodierbar");
        harness.dispatch(AppIntent::DatasetFetched {
            layer_id: layer.id.clone(),
            collection: std::sync::Arc::new(collection),
        });
        if layer.id == SUMMIT {
            assert_eq!(harness.frame_view_calls(), 0);
        }
    }

    assert_eq!(harness.frame_view_calls(), 1);
}

#[test]
fn test_empty_dataset_produces_no_visual_layer_and_a_diagnostic() {
    let mut harness = Harness::mounted();

    harness.resolve_fetches(
        &FixtureSource::default()
            .with(ATCO, EMPTY_JSON)
            .with(SUMMIT, SUMMIT_JSON),
    );

    assert_eq!(harness.state.layers.status(ATCO), LoadStatus::Loaded);
    assert!(harness.state.layers.get(ATCO).is_some_and(|c| c.is_empty()));
    assert!(!harness.surface.has_dataset(ATCO));
    assert!(!harness.surface.has_visual_layer(&format!("{ATCO}-fill")));
    assert!(harness.visible_overlay_fills().is_empty());
    let message = harness.state.ui.status_message.as_deref().unwrap_or_default();
    assert!(message.contains(ATCO));
    assert_eq!(harness.frame_view_calls(), 0);
}

#[test]
fn test_failed_fetch_leaves_layer_absent_without_error() {
    let mut harness = Harness::mounted();

    harness.resolve_fetches(&FixtureSource::default().with(ATCO, ATCO_JSON));

    assert_eq!(harness.state.layers.status(SUMMIT), LoadStatus::Absent);
    assert!(harness.state.layers.get(SUMMIT).is_none());
    assert!(!harness.surface.has_dataset(SUMMIT));
    assert!(harness
        .state
        .ui
        .status_message
        .as_deref()
        .is_some_and(|m| m.contains("404")));

    harness.dispatch(AppIntent::LayerSelected {
        layer_id: SUMMIT.to_string(),
    });

    assert_eq!(harness.state.overlay.active_id(), SUMMIT);
    assert!(harness.visible_overlay_fills().is_empty());
    assert!(harness.state.layers.take_fetch_requests().is_empty());
}

#[test]
fn test_malformed_body_counts_as_fetch_failure() {
    let mut harness = Harness::mounted();

    harness.resolve_fetches(
        &FixtureSource::default()
            .with(ATCO, "{\"type\": \"Feature\"}")
            .with(SUMMIT, "kein json"),
    );

    assert_eq!(harness.state.layers.status(ATCO), LoadStatus::Absent);
    assert_eq!(harness.state.layers.status(SUMMIT), LoadStatus::Absent);
    assert!(harness.surface.visual_layers().is_empty());
}

#[test]
fn test_click_on_visible_feature_opens_popup_with_headline() {
    let mut harness = Harness::loaded();

    assert!(harness.surface.click([0.5, 0.5]));
    harness.pump();

    let popup = harness.state.ui.popup.as_ref().expect("Popup offen");
    assert_eq!(popup.layer_id, format!("{ATCO}-fill"));
    assert_eq!(popup.position, [0.5, 0.5]);
    let headline = popup.description.headline.as_ref().expect("Headline");
    assert_eq!(headline.key, "ReportAreaID");
    assert_eq!(headline.value, "P2");
    assert_eq!(popup.description.headline_text().as_deref(), Some("ReportAreaID: P2"));
    let keys: Vec<&str> = popup
        .description
        .properties
        .iter()
        .map(|p| p.key.as_str())
        .collect();
    assert_eq!(keys, vec!["ReportAreaID", "county", "population"]);

    harness.dispatch(AppIntent::PopupCloseRequested);
    assert!(harness.state.ui.popup.is_none());
}

#[test]
fn test_click_on_feature_without_properties_shows_notice() {
    let mut harness = Harness::loaded();
    harness.dispatch(AppIntent::LayerSelected {
        layer_id: SUMMIT.to_string(),
    });

    assert!(harness.surface.click([5.5, 5.5]));
    harness.pump();

    let popup = harness.state.ui.popup.as_ref().expect("Popup offen");
    assert_eq!(
        popup.description.notice.as_deref(),
        Some("Keine Eigenschaften gefunden.")
    );
    assert!(popup.description.properties.is_empty());
}

#[test]
fn test_click_on_hidden_layer_does_not_hit() {
    let mut harness = Harness::loaded();

    // Nur im ausgeblendeten Summit-Layer vorhanden
    assert!(!harness.surface.click([5.5, 5.5]));
    harness.pump();

    assert!(harness.state.ui.popup.is_none());
}
