use std::sync::Arc;

use mt_domain::config::{Config, ResolutionConfig};

use crate::handle::{HandleAdapter, ProxyAdapter};
use crate::registry::{PackageRegistry, StaticRegistry};

/// Collaborators a token needs to be resolved or restored.
#[derive(Clone)]
pub struct TokenContext {
    pub registry: Arc<dyn PackageRegistry>,
    pub adapter: Arc<dyn HandleAdapter>,
    pub resolution: ResolutionConfig,
}

impl TokenContext {
    pub fn new(registry: Arc<dyn PackageRegistry>, adapter: Arc<dyn HandleAdapter>) -> Self {
        Self {
            registry,
            adapter,
            resolution: ResolutionConfig::default(),
        }
    }

    /// Context backed by a [`StaticRegistry`] built from `config`, wrapping
    /// restored handles as proxies.
    pub fn from_config(config: &Config) -> Self {
        Self {
            registry: Arc::new(StaticRegistry::from_config(&config.registry)),
            adapter: Arc::new(ProxyAdapter),
            resolution: config.resolution.clone(),
        }
    }

    pub fn with_resolution(mut self, resolution: ResolutionConfig) -> Self {
        self.resolution = resolution;
        self
    }
}

impl std::fmt::Debug for TokenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenContext")
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}
