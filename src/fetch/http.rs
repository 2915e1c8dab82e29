//! HTTP-Quelle: ein GET pro Endpoint, Body als GeoJSON.

use std::io::BufReader;

use crate::core::{FeatureCollection, FetchError, OverlayLayerDescriptor};

use super::DatasetSource;

const USER_AGENT: &str = concat!("geo-overlay-viewer/", env!("CARGO_PKG_VERSION"));

/// [`DatasetSource`] über `ureq`.
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    agent: ureq::Agent,
}

impl HttpDatasetSource {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }
}

impl Default for HttpDatasetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSource for HttpDatasetSource {
    fn fetch(&self, layer: &OverlayLayerDescriptor) -> Result<FeatureCollection, FetchError> {
        log::debug!("GET {} ({})", layer.source_endpoint, layer.id);
        let response = self
            .agent
            .get(&layer.source_endpoint)
            .set("Accept", "application/geo+json, application/json")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => FetchError::Status(code),
                ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
            })?;

        FeatureCollection::from_reader(BufReader::new(response.into_reader()))
    }
}
