//! Use-Cases der Application-Layer-Orchestrierung.

pub mod datasets;
pub mod inspect;
pub mod overlay;
pub mod session;
pub mod spatial_query;
