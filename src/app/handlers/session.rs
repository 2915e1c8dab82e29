//! Handler für Lebenszyklus der Ansicht und Beenden.

use crate::app::use_cases;
use crate::app::AppState;
use crate::surface::RenderSurface;

/// Baut die Ansicht auf (Abonnements, Controls, Basemap).
pub fn mount(state: &mut AppState, surface: &mut dyn RenderSurface) {
    use_cases::session::mount(state, surface);
}

/// Vermerkt das abgeschlossene Surface-Setup.
pub fn mark_surface_loaded(state: &mut AppState) {
    use_cases::session::mark_surface_loaded(state);
}

/// Baut die Ansicht ab.
pub fn unmount(state: &mut AppState, surface: &mut dyn RenderSurface) {
    use_cases::session::unmount(state, surface);
}

/// Signalisiert dem Host das Beenden.
pub fn request_exit(state: &mut AppState) {
    state.should_exit = true;
}
