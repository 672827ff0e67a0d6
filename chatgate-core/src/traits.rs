// ABOUTME: Core traits for the chat adapter abstraction
// ABOUTME: Room value type, the ChatAdapter contract, and the optional RoomInjector capability

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Room
// =============================================================================

/// A chat destination with a provider-assigned identifier.
///
/// Within a single adapter's room list both `id` and `name` are expected to be
/// unique. The gateway never mutates rooms; adapters produce fresh values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
}

impl Room {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// =============================================================================
// Adapter Contract
// =============================================================================

/// Capability set every chat provider implements, including the mock.
///
/// Failures from `rooms` and `speak` are provider-specific and travel through
/// the gateway untouched.
#[async_trait]
pub trait ChatAdapter: Send + Sync {
    /// Provider identifier (e.g., "mock", "webhook")
    fn name(&self) -> &'static str;

    /// Rooms currently visible to the backend. May be fetched or cached.
    async fn rooms(&self) -> Result<Vec<Room>>;

    /// Deliver `message` to the room identified by `room_id`.
    ///
    /// `options` is forwarded verbatim to the transport; which keys mean
    /// anything is up to the provider.
    async fn speak(&self, message: &str, room_id: i64, options: Option<&Value>) -> Result<()>;

    /// Optional: direct room injection (mock adapters only)
    fn room_injector(&self) -> Option<&dyn RoomInjector> {
        None
    }
}

// =============================================================================
// Optional Capabilities
// =============================================================================

/// Replace an adapter's room set without touching the network.
pub trait RoomInjector: Send + Sync {
    fn set_rooms(&self, rooms: BTreeMap<i64, String>);
}
