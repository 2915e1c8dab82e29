//! Core-Domänentypen: GeoJSON-Modell, Geometrie-Kernel, Abfrage, Popup, Kamera.

pub mod camera;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod layer;
pub mod popup;
pub mod spatial_query;

pub use camera::Camera2D;
pub use error::{FetchError, GeometryError, ViewerError};
pub use feature::{Feature, FeatureCollection, Geometry, Properties};
pub use geometry::{collection_bounds, BoundingBox};
pub use layer::{parse_hex_color, Basemap, OverlayLayerDescriptor};
pub use popup::{describe, PopupDescription, PropertyPair};
pub use spatial_query::{query, query_prepared, query_with_report, PreparedShapes, QueryReport};
