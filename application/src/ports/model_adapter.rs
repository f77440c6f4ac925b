//! Model adapter port
//!
//! Defines the interface for invoking one external LLM provider. Every
//! provider wire format gets its own implementation in the infrastructure
//! layer; the consensus engine only ever sees this trait.

use async_trait::async_trait;
use consensus_domain::{AdapterId, AdapterProfile};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// What went wrong in an adapter call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unparseable payload: {0}")]
    Payload(String),

    #[error("timed out after {0}s")]
    Timeout(u64),

    #[error("not configured: {0}")]
    Configuration(String),
}

/// Error returned by [`ModelAdapter::invoke`]
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{provider}: {cause}")]
pub struct AdapterError {
    /// Provider identifier of the failing adapter
    pub provider: String,
    pub cause: AdapterFailure,
}

impl AdapterError {
    pub fn new(provider: impl Into<String>, cause: AdapterFailure) -> Self {
        Self {
            provider: provider.into(),
            cause,
        }
    }

    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, AdapterFailure::Transport(message.into()))
    }

    pub fn payload(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, AdapterFailure::Payload(message.into()))
    }

    /// Whether another attempt could succeed.
    ///
    /// Missing credentials or configuration will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        !matches!(self.cause, AdapterFailure::Configuration(_))
    }
}

/// One LLM provider integration
///
/// Implementations prepend the language instruction for `language` to the
/// request and return the generated text.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Static metadata of this adapter
    fn profile(&self) -> &AdapterProfile;

    fn id(&self) -> &AdapterId {
        &self.profile().id
    }

    /// Generate text for `prompt`, answering in `language`
    async fn invoke(&self, prompt: &str, language: &str) -> Result<String, AdapterError>;
}

/// The configured adapters, addressable by id
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<AdapterId, Arc<dyn ModelAdapter>>,
    /// Registration order, used for stable listings
    order: Vec<AdapterId>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter, replacing any adapter with the same id
    pub fn register(&mut self, adapter: Arc<dyn ModelAdapter>) {
        let id = adapter.id().clone();
        if self.adapters.insert(id.clone(), adapter).is_none() {
            self.order.push(id);
        }
    }

    pub fn with_adapter(mut self, adapter: Arc<dyn ModelAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, id: &AdapterId) -> Option<Arc<dyn ModelAdapter>> {
        self.adapters.get(id).cloned()
    }

    pub fn contains(&self, id: &AdapterId) -> bool {
        self.adapters.contains_key(id)
    }

    /// Ids in registration order
    pub fn ids(&self) -> Vec<AdapterId> {
        self.order.clone()
    }

    /// Profiles in registration order
    pub fn profiles(&self) -> Vec<AdapterProfile> {
        self.order
            .iter()
            .filter_map(|id| self.adapters.get(id))
            .map(|a| a.profile().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(AdapterProfile);

    #[async_trait]
    impl ModelAdapter for Fixed {
        fn profile(&self) -> &AdapterProfile {
            &self.0
        }

        async fn invoke(&self, _prompt: &str, _language: &str) -> Result<String, AdapterError> {
            Ok("ok".to_string())
        }
    }

    fn fixed(id: &str) -> Arc<dyn ModelAdapter> {
        Arc::new(Fixed(AdapterProfile::new(id, id, "test", "model")))
    }

    #[test]
    fn test_registry_keeps_registration_order() {
        let registry = AdapterRegistry::new()
            .with_adapter(fixed("b"))
            .with_adapter(fixed("a"))
            .with_adapter(fixed("b"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec![AdapterId::from("b"), AdapterId::from("a")]);
        assert!(registry.contains(&AdapterId::from("a")));
        assert!(registry.get(&AdapterId::from("c")).is_none());
    }

    #[test]
    fn test_error_display_and_retryability() {
        let err = AdapterError::new(
            "openai",
            AdapterFailure::Status {
                status: 500,
                body: "oops".to_string(),
            },
        );
        assert_eq!(err.to_string(), "openai: HTTP status 500: oops");
        assert!(err.is_retryable());

        let config = AdapterError::new(
            "openai",
            AdapterFailure::Configuration("OPENAI_API_KEY is not set".to_string()),
        );
        assert!(!config.is_retryable());
    }
}
