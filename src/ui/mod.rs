//! UI-Komponenten: Button-Leiste, Kartenansicht, Popup, Status-Bar.

pub mod controls_panel;
/// Kartenansicht mit Pan/Zoom, Klick-Inspektion und Draw-Tool
pub mod map_view;
pub mod popup;
pub mod status;

pub use controls_panel::render_controls_panel;
pub use map_view::{render_map_view, MapViewState};
pub use popup::show_feature_popup;
pub use status::render_status_bar;
