// ABOUTME: Mock chat adapter for testing and disabled-chat deployments.
// ABOUTME: Discards every message and serves an injectable in-memory room set.
//!
//! # Example
//!
//! ```no_run
//! use chatgate_core::{AdapterRegistry, Gateway};
//! use std::collections::BTreeMap;
//!
//! # async fn example() -> chatgate_core::Result<()> {
//! let gateway = Gateway::new(AdapterRegistry::default());
//! gateway.enable_mock();
//! gateway.set_rooms(BTreeMap::from([(1, "general".to_string()), (2, "eng".to_string())]))?;
//!
//! assert_eq!(gateway.room_id("eng").await?, Some(2));
//! gateway.speak("build 42 passed", 1, None).await?;
//! # Ok(())
//! # }
//! ```

use crate::registry::{AdapterFactory, AdapterRegistry};
use crate::traits::{ChatAdapter, Room, RoomInjector};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Adapter that never delivers anything
pub struct MockAdapter {
    rooms: RwLock<BTreeMap<i64, String>>,
}

impl MockAdapter {
    /// Create a mock adapter with no rooms
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a mock adapter seeded with rooms
    pub fn with_rooms<I, S>(rooms: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let rooms = rooms.into_iter().map(|(id, name)| (id, name.into())).collect();
        Self {
            rooms: RwLock::new(rooms),
        }
    }

    /// Factory function for the registry. Settings are ignored.
    pub fn factory() -> AdapterFactory {
        Box::new(|_settings: &Value| Ok(Arc::new(MockAdapter::new()) as Arc<dyn ChatAdapter>))
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the mock provider under "mock"
pub fn register(registry: AdapterRegistry) -> AdapterRegistry {
    registry.register("mock", MockAdapter::factory())
}

#[async_trait]
impl ChatAdapter for MockAdapter {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        let rooms = self.rooms.read().unwrap_or_else(|e| e.into_inner());
        Ok(rooms
            .iter()
            .map(|(id, name)| Room::new(*id, name.clone()))
            .collect())
    }

    async fn speak(&self, _message: &str, _room_id: i64, _options: Option<&Value>) -> Result<()> {
        Ok(())
    }

    fn room_injector(&self) -> Option<&dyn RoomInjector> {
        Some(self)
    }
}

impl RoomInjector for MockAdapter {
    fn set_rooms(&self, rooms: BTreeMap<i64, String>) {
        *self.rooms.write().unwrap_or_else(|e| e.into_inner()) = rooms;
    }
}
