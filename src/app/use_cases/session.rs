//! Use-Cases für Auf- und Abbau einer Kartenansicht.

use crate::app::AppState;
use crate::surface::{EventKind, HomeControl, RenderSurface, Subscription};

/// Registriert Draw-Abonnements, montiert das Home-Control und setzt die Basemap.
///
/// Mehrfacher Aufruf ohne Unmount ist ein No-op.
pub fn mount(state: &mut AppState, surface: &mut dyn RenderSurface) {
    if state.session.mounted {
        log::debug!("Ansicht ist bereits montiert");
        return;
    }

    for kind in [EventKind::DrawCreate, EventKind::DrawDelete] {
        state
            .session
            .subscriptions
            .push(Subscription::acquire(surface, kind));
    }

    // Nach erneutem Mount: Klicks auf bereits dargestellte Layer wieder abonnieren
    for layer in state.overlay.descriptors() {
        let fill_id = layer.fill_layer_id();
        if surface.has_visual_layer(&fill_id) {
            state.session.subscriptions.push(Subscription::acquire(
                surface,
                EventKind::Click { layer_id: fill_id },
            ));
        }
    }

    let home = HomeControl::new(state.options.home_center, state.options.home_zoom);
    state.session.controls.mount(surface, Box::new(home));

    if let Some(basemap) = state.options.basemaps.get(state.view.basemap_index) {
        surface.set_basemap(basemap);
    }

    state.session.mounted = true;
    log::info!("Ansicht montiert");
}

/// Vermerkt, dass die Surface bereit ist (Draw-Tool nutzbar).
pub fn mark_surface_loaded(state: &mut AppState) {
    state.view.surface_loaded = true;
}

/// Baut Highlight, Abonnements und Controls ab.
pub fn unmount(state: &mut AppState, surface: &mut dyn RenderSurface) {
    if !state.session.mounted {
        return;
    }

    state.highlight.clear(surface);
    let released = state.session.subscriptions.release_all(surface);
    let removed = state.session.controls.unmount_all(surface);
    state.ui.popup = None;
    state.session.mounted = false;

    log::info!(
        "Ansicht abgebaut ({} Abonnements, {} Controls freigegeben)",
        released,
        removed
    );
}
