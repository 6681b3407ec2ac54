//! Provider registry: one gateway per configured [`ProviderKind`].

use super::{ChatCompletionsGateway, GeminiGateway, ProviderSettings};
use remedy_application::ports::llm_gateway::{GatewayError, GatewayRegistry, LlmGateway};
use remedy_domain::ProviderKind;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

#[derive(Default)]
pub struct ProviderRegistry {
    gateways: HashMap<ProviderKind, Arc<dyn LlmGateway>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the matching adapter for every resolved provider
    pub fn from_settings(settings: Vec<ProviderSettings>) -> Result<Self, GatewayError> {
        let mut registry = Self::new();
        for provider in settings {
            let gateway: Arc<dyn LlmGateway> = match provider.kind {
                ProviderKind::OpenAi | ProviderKind::Groq => {
                    Arc::new(ChatCompletionsGateway::new(provider)?)
                }
                ProviderKind::Gemini => Arc::new(GeminiGateway::new(provider)?),
            };
            registry.register(gateway);
        }
        Ok(registry)
    }

    /// Add or replace the gateway for its kind
    pub fn register(&mut self, gateway: Arc<dyn LlmGateway>) {
        info!(provider = %gateway.kind(), "Registered provider");
        self.gateways.insert(gateway.kind(), gateway);
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }
}

impl GatewayRegistry for ProviderRegistry {
    fn gateway(&self, kind: ProviderKind) -> Option<Arc<dyn LlmGateway>> {
        self.gateways.get(&kind).cloned()
    }

    fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.gateways.contains_key(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_settings;

    #[test]
    fn test_only_resolved_providers_are_registered() {
        let registry = ProviderRegistry::from_settings(vec![
            test_settings(ProviderKind::Gemini, "http://localhost:1".to_string()),
            test_settings(ProviderKind::Groq, "http://localhost:2".to_string()),
        ])
        .unwrap();

        assert_eq!(
            registry.configured(),
            vec![ProviderKind::Gemini, ProviderKind::Groq]
        );
        assert!(registry.gateway(ProviderKind::OpenAi).is_none());
        assert_eq!(
            registry.gateway(ProviderKind::Groq).unwrap().kind(),
            ProviderKind::Groq
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProviderRegistry::from_settings(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.configured().is_empty());
    }
}
