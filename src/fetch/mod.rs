//! Abruf der Overlay-Datensätze: Quelle als Trait, HTTP-Implementierung
//! und ein Thread-Pool, der Ergebnisse über einen Channel zurückmeldet.

pub mod http;
pub mod pool;

use crate::core::{FeatureCollection, FetchError, OverlayLayerDescriptor};

pub use http::HttpDatasetSource;
pub use pool::{FetchCompletion, FetchPool};

/// Liefert die FeatureCollection eines Layers.
///
/// Wird auf Worker-Threads aufgerufen.
pub trait DatasetSource: Send + Sync {
    fn fetch(&self, layer: &OverlayLayerDescriptor) -> Result<FeatureCollection, FetchError>;
}
