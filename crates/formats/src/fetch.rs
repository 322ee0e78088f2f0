//! One-time network fetch of the boundary dataset, cached for the session.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use crate::topology::{Topology, TopologyError};

pub const DEFAULT_TOPOLOGY_URL: &str =
    "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status { url: String, status: u16 },
    Topology(TopologyError),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "boundary dataset request failed: {e}"),
            FetchError::Status { url, status } => {
                write!(f, "boundary dataset request to {url} returned HTTP {status}")
            }
            FetchError::Topology(e) => write!(f, "boundary dataset is not usable: {e}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(e) => Some(e),
            FetchError::Topology(e) => Some(e),
            FetchError::Status { .. } => None,
        }
    }
}

/// Raw response body; the caller decides whether to parse or store it.
pub async fn fetch_topology_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let resp = client.get(url).send().await.map_err(FetchError::Http)?;
    if !resp.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }
    resp.text().await.map_err(FetchError::Http)
}

pub async fn fetch_topology(client: &reqwest::Client, url: &str) -> Result<Topology, FetchError> {
    let body = fetch_topology_text(client, url).await?;
    Topology::from_json_str(&body).map_err(FetchError::Topology)
}

/// Session cache: the dataset is fetched at most once successfully.
///
/// Failures are not cached, so the next open retries.
#[derive(Debug, Default, Clone)]
pub struct TopologyCache {
    cached: Option<Arc<Topology>>,
}

impl TopologyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<Topology>> {
        self.cached.clone()
    }

    pub fn insert(&mut self, topology: Topology) -> Arc<Topology> {
        let topology = Arc::new(topology);
        self.cached = Some(topology.clone());
        topology
    }

    pub async fn get_or_try_load_with<F, Fut, E>(&mut self, load: F) -> Result<Arc<Topology>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Topology, E>>,
    {
        if let Some(cached) = &self.cached {
            return Ok(cached.clone());
        }
        let topology = load().await?;
        Ok(self.insert(topology))
    }

    pub async fn get_or_fetch(
        &mut self,
        client: &reqwest::Client,
        url: &str,
    ) -> Result<Arc<Topology>, FetchError> {
        let fresh = self.cached.is_none();
        let result = self
            .get_or_try_load_with(|| fetch_topology(client, url))
            .await;
        match &result {
            Ok(topology) if fresh => info!(url, arcs = topology.arcs.len(), "boundary dataset fetched"),
            Ok(_) => {}
            Err(e) => warn!(url, error = %e, "boundary dataset fetch failed"),
        }
        result
    }
}
