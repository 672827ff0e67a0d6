// ABOUTME: Generic HTTP webhook chat provider.
// ABOUTME: Posts messages as JSON and lists rooms from config or a rooms endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chatgate_core::registry::{AdapterFactory, AdapterRegistry};
use chatgate_core::{ChatAdapter, Room};
use reqwest::{RequestBuilder, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Settings accepted by the webhook provider
#[derive(Clone, Deserialize)]
pub struct WebhookSettings {
    /// Base URL; messages go to `{url}/messages`, rooms come from `{url}/rooms`
    pub url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Static room map (id => name). Skips the rooms endpoint when present.
    #[serde(default)]
    pub rooms: Option<BTreeMap<String, String>>,
}

// Custom Debug impl to redact token
impl std::fmt::Debug for WebhookSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSettings")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("rooms", &self.rooms)
            .finish()
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Chat provider speaking a small JSON-over-HTTP protocol
pub struct WebhookAdapter {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    static_rooms: Option<Vec<Room>>,
    room_cache: OnceCell<Vec<Room>>,
}

impl std::fmt::Debug for WebhookAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookAdapter")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("static_rooms", &self.static_rooms)
            .finish()
    }
}

impl WebhookAdapter {
    pub fn new(settings: WebhookSettings) -> Result<Self> {
        let mut base_url = Url::parse(&settings.url)
            .with_context(|| format!("Invalid webhook url: {}", settings.url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!("Webhook url must be http or https, got: {}", settings.url);
        }
        base_url.set_fragment(None);

        let static_rooms = settings
            .rooms
            .map(|rooms| {
                rooms
                    .into_iter()
                    .map(|(id, name)| -> Result<Room> {
                        let id = id.trim().parse::<i64>().with_context(|| {
                            format!("Webhook room id must be an integer, got: {:?}", id)
                        })?;
                        Ok(Room::new(id, name))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .map(|mut rooms| {
                rooms.sort_by_key(|room| room.id);
                rooms
            });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build webhook HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token: settings.token,
            static_rooms,
            room_cache: OnceCell::new(),
        })
    }

    /// Build from the JSON settings handed over by the registry
    pub fn from_settings(settings: &Value) -> Result<Self> {
        let settings: WebhookSettings =
            serde_json::from_value(settings.clone()).context("Invalid webhook settings")?;
        Self::new(settings)
    }

    /// Factory function for the registry
    pub fn factory() -> AdapterFactory {
        Box::new(|settings: &Value| {
            Ok(Arc::new(WebhookAdapter::from_settings(settings)?) as Arc<dyn ChatAdapter>)
        })
    }

    /// Append `path` to the base URL's path, keeping its query string
    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Webhook url cannot take a path: {}", self.base_url))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_rooms(&self) -> Result<Vec<Room>> {
        let url = self.endpoint("rooms")?;
        tracing::debug!(url = %url, "Fetching webhook rooms");
        let response = self
            .authorize(self.client.get(url.clone()))
            .send()
            .await
            .with_context(|| format!("Failed to fetch rooms from {}", url))?
            .error_for_status()
            .context("Webhook rooms request rejected")?;
        response
            .json::<Vec<Room>>()
            .await
            .context("Webhook rooms response was not a room list")
    }
}

/// Register the webhook provider under "webhook"
pub fn register(registry: AdapterRegistry) -> AdapterRegistry {
    registry.register("webhook", WebhookAdapter::factory())
}

#[async_trait]
impl ChatAdapter for WebhookAdapter {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        if let Some(rooms) = &self.static_rooms {
            return Ok(rooms.clone());
        }
        let rooms = self.room_cache.get_or_try_init(|| self.fetch_rooms()).await?;
        Ok(rooms.clone())
    }

    async fn speak(&self, message: &str, room_id: i64, options: Option<&Value>) -> Result<()> {
        let url = self.endpoint("messages")?;
        let body = json!({
            "room_id": room_id,
            "message": message,
            "options": options,
        });
        self.authorize(self.client.post(url.clone()).json(&body))
            .send()
            .await
            .with_context(|| format!("Failed to post message to {}", url))?
            .error_for_status()
            .context("Webhook message rejected")?;
        Ok(())
    }
}
