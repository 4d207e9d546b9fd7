//! In-memory feature catalog with built-in features.

use std::sync::{Arc, RwLock};

use forge_core::{
    application::{ApplicationError, ports::FeatureCatalog},
    domain::{DomainError, Feature},
    error::ForgeResult,
};
use tracing::{debug, warn};

use crate::features;

/// Thread-safe catalog keeping features in registration order.
///
/// Clones share the same registry. Lookups are read-only, so any number of
/// runs can resolve against one catalog at once.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<Vec<Arc<dyn Feature>>>>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the built-in features registered.
    pub fn with_builtin() -> ForgeResult<Self> {
        let catalog = Self::new();
        for feature in features::builtin_features() {
            catalog.register(feature)?;
        }
        Ok(catalog)
    }

    /// Register a feature. Names must be unique.
    pub fn register(&self, feature: Arc<dyn Feature>) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        if inner.iter().any(|f| f.name() == feature.name()) {
            return Err(DomainError::DuplicateFeature {
                name: feature.name().to_string(),
            }
            .into());
        }

        debug!(feature = feature.name(), "registered feature");
        inner.push(feature);
        Ok(())
    }

    /// Register every feature, stopping at the first duplicate.
    pub fn extend<I>(&self, features: I) -> ForgeResult<()>
    where
        I: IntoIterator<Item = Arc<dyn Feature>>,
    {
        features.into_iter().try_for_each(|f| self.register(f))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> ApplicationError {
    ApplicationError::LockPoisoned {
        resource: "feature catalog",
    }
}

impl FeatureCatalog for InMemoryCatalog {
    fn lookup(&self, name: &str) -> Option<Arc<dyn Feature>> {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => {
                warn!(error = %poisoned(), "lookup failed");
                return None;
            }
        };
        inner.iter().find(|f| f.name() == name).cloned()
    }

    fn features(&self) -> Vec<Arc<dyn Feature>> {
        self.inner
            .read()
            .map(|inner| inner.clone())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for InMemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .features()
            .iter()
            .map(|feature| feature.name().to_string())
            .collect();
        f.debug_struct("InMemoryCatalog").field("features", &names).finish()
    }
}
