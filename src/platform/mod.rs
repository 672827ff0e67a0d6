// ABOUTME: Chat provider wiring for the chatgate application
// ABOUTME: Builds the adapter registry from every provider compiled into this binary

#[cfg(feature = "webhook")]
pub mod webhook;

use chatgate_core::AdapterRegistry;

#[cfg(feature = "webhook")]
pub use webhook::WebhookAdapter;

/// Registry containing every compiled-in provider.
/// "mock" is always present; the rest depend on cargo features.
pub fn registry() -> AdapterRegistry {
    let registry = chatgate_core::adapters::mock::register(AdapterRegistry::new());

    #[cfg(feature = "webhook")]
    let registry = webhook::register(registry);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_always_has_mock() {
        assert!(registry().names().contains(&"mock".to_string()));
    }

    #[cfg(feature = "webhook")]
    #[test]
    fn test_registry_has_webhook_when_enabled() {
        assert_eq!(registry().names(), vec!["mock", "webhook"]);
    }
}
