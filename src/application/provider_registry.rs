//! Provider Registry - maps provider identifiers to capabilities.
//!
//! The registry is composed once at startup from the process configuration
//! (only providers with credentials get registered) and is read-only
//! afterwards. It is passed explicitly into the dispatcher and executor so
//! tests can substitute a registry of mocks.

use std::sync::Arc;
use thiserror::Error;

use crate::ports::AiProvider;

/// Read-only mapping from provider identifier to capability.
pub struct ProviderRegistry {
    providers: Vec<(String, Arc<dyn AiProvider>)>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Registers a capability under the given identifier (builder-style).
    ///
    /// Registering an id twice replaces the earlier capability; ids keep
    /// their original registration order.
    pub fn register(mut self, id: impl Into<String>, provider: Arc<dyn AiProvider>) -> Self {
        let id = id.into();
        if let Some(entry) = self.providers.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = provider;
        } else {
            self.providers.push((id, provider));
        }
        self
    }

    /// Resolves an identifier to its capability.
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn AiProvider>, RegistryError> {
        self.providers
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, provider)| provider.clone())
            .ok_or_else(|| RegistryError::UnknownProvider {
                id: id.to_string(),
                available: self.available_providers().join(", "),
            })
    }

    /// Registered identifiers in registration order.
    pub fn available_providers(&self) -> Vec<String> {
        self.providers.iter().map(|(id, _)| id.clone()).collect()
    }

    /// The first registered identifier, used when a request names none.
    pub fn default_provider(&self) -> Option<&str> {
        self.providers.first().map(|(id, _)| id.as_str())
    }

    /// True when no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry resolution errors.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The identifier is not registered.
    #[error("unknown provider '{id}' (available: {available})")]
    UnknownProvider { id: String, available: String },
}
