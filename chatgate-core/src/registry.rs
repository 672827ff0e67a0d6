// ABOUTME: Registry pattern for runtime chat provider selection.
// ABOUTME: Providers register factories by name, the gateway creates adapters from config.

use crate::error::{GatewayError, Result};
use crate::traits::ChatAdapter;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Factory function that builds an adapter from provider settings
pub type AdapterFactory = Box<dyn Fn(&Value) -> anyhow::Result<Arc<dyn ChatAdapter>> + Send + Sync>;

/// Registry of chat provider factories keyed by provider name
pub struct AdapterRegistry {
    factories: HashMap<String, AdapterFactory>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a provider factory by name. Re-registering a name replaces
    /// the previous factory.
    pub fn register<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Arc<dyn ChatAdapter>> + Send + Sync + 'static,
    {
        if self
            .factories
            .insert(name.to_string(), Box::new(factory))
            .is_some()
        {
            tracing::debug!(service = %name, "replacing registered chat service");
        }
        self
    }

    /// Look up the factory registered under `name`
    pub fn lookup(&self, name: &str) -> Option<&AdapterFactory> {
        self.factories.get(name)
    }

    /// Registered provider names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build an adapter by name with the given settings
    pub fn create(&self, name: &str, settings: &Value) -> Result<Arc<dyn ChatAdapter>> {
        let factory = self
            .lookup(name)
            .ok_or_else(|| GatewayError::UnknownService {
                name: name.to_string(),
                available: self.names(),
            })?;
        Ok(factory(settings)?)
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        crate::adapters::mock::register(Self::new())
    }
}
