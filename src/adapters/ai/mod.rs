//! AI provider adapters.
//!
//! One adapter per vendor plus a configurable mock for tests. The registry
//! builder mirrors the startup rule that only credentialed providers get
//! registered.

mod anthropic_provider;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockFailure, MockProvider};
pub use openai_provider::{OpenAiConfig, OpenAiProvider};

use std::sync::Arc;

use tracing::warn;

use crate::application::ProviderRegistry;
use crate::config::{AiConfig, ProviderKind};

/// Builds the process-wide provider registry from configuration.
///
/// Providers without an API key are skipped with a warning, so an id that
/// resolves is always backed by a usable capability. The configured default
/// provider is registered first and therefore becomes the registry default.
pub fn build_registry(config: &AiConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    let order = match config.default_provider {
        ProviderKind::Anthropic => [ProviderKind::Anthropic, ProviderKind::OpenAI],
        ProviderKind::OpenAI => [ProviderKind::OpenAI, ProviderKind::Anthropic],
    };

    for kind in order {
        match kind {
            ProviderKind::Anthropic => {
                if let Some(key) = config.anthropic_api_key.as_deref().filter(|k| !k.is_empty()) {
                    let provider = AnthropicProvider::new(
                        AnthropicConfig::new(key).with_timeout(config.timeout()),
                        config.max_output_tokens,
                    );
                    registry = registry.register(kind.id(), Arc::new(provider));
                } else {
                    warn!("Anthropic provider not available - API key not configured");
                }
            }
            ProviderKind::OpenAI => {
                if let Some(key) = config.openai_api_key.as_deref().filter(|k| !k.is_empty()) {
                    let provider = OpenAiProvider::new(
                        OpenAiConfig::new(key).with_timeout(config.timeout()),
                        config.max_output_tokens,
                    );
                    registry = registry.register(kind.id(), Arc::new(provider));
                } else {
                    warn!("OpenAI provider not available - API key not configured");
                }
            }
        }
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_skips_unconfigured_providers() {
        let config = AiConfig {
            anthropic_api_key: Some("sk-ant-xxx".to_string()),
            openai_api_key: None,
            ..Default::default()
        };

        let registry = build_registry(&config);
        assert_eq!(registry.available_providers(), vec!["anthropic".to_string()]);
    }

    #[test]
    fn default_provider_registers_first() {
        let config = AiConfig {
            anthropic_api_key: Some("sk-ant-xxx".to_string()),
            openai_api_key: Some("sk-xxx".to_string()),
            default_provider: ProviderKind::OpenAI,
            ..Default::default()
        };

        let registry = build_registry(&config);
        assert_eq!(registry.default_provider(), Some("openai"));
        assert_eq!(registry.available_providers().len(), 2);
    }

    #[test]
    fn no_keys_yields_empty_registry() {
        let registry = build_registry(&AiConfig::default());
        assert!(registry.is_empty());
    }
}
