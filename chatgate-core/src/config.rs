// ABOUTME: The [chat] configuration section consumed by the gateway.
// ABOUTME: Names the provider, the default room, and carries provider settings through.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Chat section with a provider discriminator
#[derive(Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Provider name: "mock", "webhook", etc.
    #[serde(default = "default_service")]
    pub service: String,

    /// Room messages go to when the caller does not name one
    #[serde(default)]
    pub default_room: String,

    /// Discard messages through the mock adapter after setup
    #[serde(default)]
    pub mock: bool,

    /// Remaining fields passed to the provider factory
    #[serde(flatten)]
    pub settings: toml::Table,
}

fn default_service() -> String {
    "mock".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            default_room: String::new(),
            mock: false,
            settings: toml::Table::new(),
        }
    }
}

// Custom Debug impl to redact provider credentials
impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut settings = self.settings.clone();
        for key in ["token", "password", "api_key"] {
            if let Some(value) = settings.get_mut(key) {
                *value = toml::Value::String("[REDACTED]".to_string());
            }
        }
        f.debug_struct("ChatConfig")
            .field("service", &self.service)
            .field("default_room", &self.default_room)
            .field("mock", &self.mock)
            .field("settings", &settings)
            .finish()
    }
}

impl ChatConfig {
    /// Convert the settings table to the JSON value handed to factories
    pub fn settings_json(&self) -> anyhow::Result<serde_json::Value> {
        serde_json::to_value(&self.settings)
            .with_context(|| format!("Failed to convert [chat] settings for {}", self.service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        chat: ChatConfig,
    }

    #[test]
    fn test_parse_webhook_section() {
        let toml = r#"
[chat]
service = "webhook"
default_room = "builds"
url = "https://chat.example.com/hooks"
timeout_secs = 5

[chat.rooms]
1 = "builds"
2 = "general"
"#;
        let config: Wrapper = toml::from_str(toml).unwrap();
        assert_eq!(config.chat.service, "webhook");
        assert_eq!(config.chat.default_room, "builds");
        assert!(!config.chat.mock);

        let json = config.chat.settings_json().unwrap();
        assert_eq!(json["url"], "https://chat.example.com/hooks");
        assert_eq!(json["timeout_secs"], 5);
        assert_eq!(json["rooms"]["2"], "general");
        assert!(json.get("service").is_none());
    }

    #[test]
    fn test_defaults_to_mock() {
        let config: Wrapper = toml::from_str("[chat]\n").unwrap();
        assert_eq!(config.chat.service, "mock");
        assert!(config.chat.default_room.is_empty());
        assert_eq!(config.chat.settings_json().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_debug_redacts_token() {
        let toml = r#"
[chat]
service = "webhook"
token = "s3cret"
"#;
        let config: Wrapper = toml::from_str(toml).unwrap();
        let debug = format!("{:?}", config.chat);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_settings_json_keeps_nested_tables() {
        let toml = r#"
[chat]
service = "webhook"
retries = 3

[chat.headers]
x-team = "infra"
"#;
        let config: Wrapper = toml::from_str(toml).unwrap();
        let json = config.chat.settings_json().unwrap();
        assert_eq!(json, serde_json::json!({"retries": 3, "headers": {"x-team": "infra"}}));
    }
}
