//! Geteilte Typen für schichtübergreifende Verträge.
//!
//! Enthält die Konfiguration, die `app`, `ui` und der Host gemeinsam nutzen.

pub mod options;

pub use options::ViewerOptions;
pub use options::{HIGHLIGHT_DATASET_ID, HIGHLIGHT_LAYER_ID};
