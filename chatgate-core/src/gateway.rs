// ABOUTME: Gateway facade that owns the single active chat adapter.
// ABOUTME: Resolves room names and ids and forwards speak calls to the active adapter.

use crate::adapters::mock::MockAdapter;
use crate::config::ChatConfig;
use crate::error::{GatewayError, Result};
use crate::registry::AdapterRegistry;
use crate::traits::{ChatAdapter, Room};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};

/// Immutable snapshot of the gateway's configuration.
///
/// Writers swap the whole snapshot so readers always see an adapter and
/// default room that were configured together.
#[derive(Clone, Default)]
struct GatewayState {
    adapter: Option<Arc<dyn ChatAdapter>>,
    default_room_name: Option<String>,
}

/// Provider-agnostic entry point for sending chat notifications.
///
/// Construct one at startup and share it by reference (or `Arc`). `setup` and
/// `enable_mock` are meant for startup wiring; the remaining operations are
/// safe to call concurrently.
pub struct Gateway {
    registry: AdapterRegistry,
    state: RwLock<Arc<GatewayState>>,
}

impl Gateway {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            registry,
            state: RwLock::new(Arc::new(GatewayState::default())),
        }
    }

    /// Build a gateway and apply a `[chat]` config section to it.
    pub fn from_config(registry: AdapterRegistry, config: &ChatConfig) -> Result<Self> {
        let gateway = Self::new(registry);
        gateway.configure(config)?;
        Ok(gateway)
    }

    /// Apply a `[chat]` config section: `setup`, then the mock flag.
    pub fn configure(&self, config: &ChatConfig) -> Result<()> {
        let settings = config.settings_json()?;
        self.setup(&config.service, &settings, &config.default_room)?;
        if config.mock {
            self.enable_mock();
        }
        Ok(())
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Configure the active provider.
    ///
    /// Replaces the adapter and default room together. On failure (unknown
    /// name or a constructor error) the previous state is left untouched.
    pub fn setup(&self, name: &str, settings: &Value, default_room_name: &str) -> Result<()> {
        let adapter = self.registry.create(name, settings)?;

        self.replace(GatewayState {
            adapter: Some(adapter),
            default_room_name: Some(default_room_name.to_string()),
        });

        tracing::info!(
            service = %name,
            default_room = %default_room_name,
            "Chat service configured"
        );
        Ok(())
    }

    /// Swap in a fresh mock adapter. Messages are discarded from now on.
    /// The default room name is kept.
    pub fn enable_mock(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = Arc::new(GatewayState {
            adapter: Some(Arc::new(MockAdapter::new())),
            default_room_name: state.default_room_name.clone(),
        });
        tracing::info!("Chat mock enabled, messages will be discarded");
    }

    /// Inject rooms into the active adapter. Only the mock supports this.
    pub fn set_rooms(&self, rooms: BTreeMap<i64, String>) -> Result<()> {
        let adapter = self.adapter()?;
        let injector = adapter
            .room_injector()
            .ok_or(GatewayError::UnsupportedOperation {
                adapter: adapter.name(),
                operation: "room injection",
            })?;
        injector.set_rooms(rooms);
        Ok(())
    }

    /// Send a message to a room through the active adapter.
    pub async fn speak(&self, message: &str, room_id: i64, options: Option<&Value>) -> Result<()> {
        let adapter = self.adapter()?;
        tracing::debug!(service = adapter.name(), room_id, "Speaking to chat room");
        adapter.speak(message, room_id, options).await?;
        Ok(())
    }

    /// Rooms visible to the active adapter, exactly as it returns them.
    pub async fn rooms(&self) -> Result<Vec<Room>> {
        let adapter = self.adapter()?;
        Ok(adapter.rooms().await?)
    }

    /// Id of the first room named `name`, in the adapter's ordering.
    pub async fn room_id(&self, name: &str) -> Result<Option<i64>> {
        let rooms = self.rooms().await?;
        Ok(find_room_id(&rooms, name))
    }

    /// Name of the room whose id matches `id` once both are rendered as
    /// strings, so `1` and `"1"` find the same room.
    pub async fn room_name(&self, id: impl Display) -> Result<Option<String>> {
        let id = id.to_string();
        let rooms = self.rooms().await?;
        Ok(rooms
            .into_iter()
            .find(|room| room.id.to_string() == id)
            .map(|room| room.name))
    }

    /// All room names, sorted.
    pub async fn room_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.rooms().await?.into_iter().map(|r| r.name).collect();
        names.sort();
        Ok(names)
    }

    /// Resolve the configured default room name to an id.
    pub async fn default_room_id(&self) -> Result<Option<i64>> {
        let state = self.snapshot();
        let adapter = state.adapter.clone().ok_or(GatewayError::NotConfigured)?;
        let Some(name) = state.default_room_name.as_deref() else {
            return Ok(None);
        };
        let rooms = adapter.rooms().await?;
        Ok(find_room_id(&rooms, name))
    }

    pub fn default_room_name(&self) -> Option<String> {
        self.snapshot().default_room_name.clone()
    }

    /// Name of the active provider, if any
    pub fn adapter_name(&self) -> Option<&'static str> {
        self.snapshot().adapter.as_ref().map(|a| a.name())
    }

    pub fn is_configured(&self) -> bool {
        self.snapshot().adapter.is_some()
    }

    fn adapter(&self) -> Result<Arc<dyn ChatAdapter>> {
        self.snapshot()
            .adapter
            .clone()
            .ok_or(GatewayError::NotConfigured)
    }

    fn snapshot(&self) -> Arc<GatewayState> {
        Arc::clone(&self.state.read().unwrap_or_else(|e| e.into_inner()))
    }

    fn replace(&self, next: GatewayState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(next);
    }
}

fn find_room_id(rooms: &[Room], name: &str) -> Option<i64> {
    rooms.iter().find(|room| room.name == name).map(|room| room.id)
}
