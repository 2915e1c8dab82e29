use geo_overlay_viewer::surface::{EventKind, RenderSurface, SurfaceCall};
use geo_overlay_viewer::{AppCommand, AppIntent, HighlightState};

use super::{square, Harness, ATCO, SUMMIT};

#[test]
fn test_mount_subscribes_draw_events_and_mounts_home_control() {
    let harness = Harness::mounted();

    assert!(harness.state.session.mounted);
    assert!(harness.surface.has_subscription(&EventKind::DrawCreate));
    assert!(harness.surface.has_subscription(&EventKind::DrawDelete));
    assert_eq!(harness.surface.controls().len(), 1);
    assert_eq!(
        harness.surface.basemap().map(|b| b.label.as_str()),
        Some("Streets")
    );
    assert!(harness.state.view.surface_loaded);
}

#[test]
fn test_surface_loaded_requests_one_fetch_per_layer() {
    let mut harness = Harness::mounted();

    let requested: Vec<String> = harness
        .state
        .layers
        .take_fetch_requests()
        .into_iter()
        .map(|l| l.id)
        .collect();

    assert_eq!(requested, vec![ATCO.to_string(), SUMMIT.to_string()]);
    assert_eq!(harness.state.layers.pending_count(), 2);
}

#[test]
fn test_second_mount_is_noop() {
    let mut harness = Harness::mounted();
    let subscriptions = harness.surface.subscription_count();

    harness.dispatch(AppIntent::ViewMountRequested);

    assert_eq!(harness.surface.subscription_count(), subscriptions);
    assert_eq!(harness.surface.controls().len(), 1);
}

#[test]
fn test_teardown_releases_all_subscriptions_and_controls() {
    let mut harness = Harness::loaded();
    harness.draw(&square(-1.0, 4.0));
    assert!(harness.state.highlight.is_highlighted());
    assert!(harness.surface.subscription_count() >= 4);

    harness.dispatch(AppIntent::ViewTeardownRequested);

    assert_eq!(harness.surface.subscription_count(), 0);
    assert!(harness.state.session.subscriptions.is_empty());
    assert!(harness.surface.controls().is_empty());
    assert!(harness.state.session.controls.is_empty());
    assert_eq!(*harness.state.highlight.state(), HighlightState::Idle);
    assert!(!harness.surface.has_dataset("highlight"));
    assert!(!harness.state.session.mounted);
}

#[test]
fn test_remount_restores_click_subscriptions_for_rendered_layers() {
    let mut harness = Harness::loaded();
    harness.dispatch(AppIntent::ViewTeardownRequested);
    assert!(!harness.surface.click([0.5, 0.5]));

    harness.dispatch(AppIntent::ViewMountRequested);

    assert!(harness.surface.has_subscription(&EventKind::Click {
        layer_id: format!("{}-fill", ATCO)
    }));
    assert!(harness.surface.has_subscription(&EventKind::Click {
        layer_id: format!("{}-fill", SUMMIT)
    }));
    assert!(harness.surface.click([0.5, 0.5]));
}

#[test]
fn test_events_after_teardown_are_not_delivered() {
    let mut harness = Harness::loaded();
    harness.dispatch(AppIntent::ViewTeardownRequested);

    for vertex in square(-1.0, 4.0) {
        harness.surface.add_draw_vertex(vertex);
    }
    harness.surface.finish_drawing();

    assert!(harness.surface.drain_events().is_empty());
}

#[test]
fn test_home_control_flies_to_configured_home() {
    let mut harness = Harness::loaded();
    let (handle, _) = harness.surface.controls()[0];
    let home_center = harness.state.options.home_center;
    let home_zoom = harness.state.options.home_zoom;

    assert!(harness.surface.activate_control(handle));
    harness.pump();

    assert_eq!(
        harness.surface.journal().last(),
        Some(&SurfaceCall::FlyTo {
            center: home_center,
            zoom: home_zoom
        })
    );
    approx::assert_relative_eq!(harness.surface.camera().position.x, home_center[0]);
    approx::assert_relative_eq!(harness.surface.camera().position.y, home_center[1]);
    approx::assert_relative_eq!(harness.surface.camera().zoom, home_zoom);
}

#[test]
fn test_basemap_switch_keeps_cache_and_highlight() {
    let mut harness = Harness::loaded();
    harness.draw(&square(-1.0, 4.0));

    harness.dispatch(AppIntent::BasemapSelected { index: 3 });

    assert_eq!(harness.state.view.basemap_index, 3);
    assert_eq!(harness.state.active_basemap_label(), Some("Dark"));
    assert_eq!(harness.surface.basemap().map(|b| b.label.as_str()), Some("Dark"));
    assert!(harness.state.layers.get(ATCO).is_some());
    assert!(harness.state.layers.get(SUMMIT).is_some());
    assert!(harness.state.highlight.is_highlighted());
    assert!(harness.state.layers.take_fetch_requests().is_empty());
}

#[test]
fn test_basemap_index_out_of_range_is_rejected() {
    let mut harness = Harness::mounted();

    let result = harness.try_dispatch(AppIntent::BasemapSelected { index: 42 });

    assert!(result.is_err());
    assert_eq!(harness.state.view.basemap_index, 0);
}

#[test]
fn test_exit_requested_unmounts_and_sets_exit_flag() {
    let mut harness = Harness::loaded();

    harness.dispatch(AppIntent::ExitRequested);

    assert!(harness.state.should_exit);
    assert_eq!(harness.surface.subscription_count(), 0);
    match harness.state.command_log.entries().last() {
        Some(AppCommand::RequestExit) => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}
