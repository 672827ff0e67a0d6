// ABOUTME: Provider-agnostic chat notification gateway
// ABOUTME: Provides the adapter contract, registry, gateway facade, and mock adapter

pub mod adapters;
pub mod config;
pub mod error;
pub mod gateway;
pub mod registry;
pub mod traits;

pub use adapters::mock::MockAdapter;
pub use config::ChatConfig;
pub use error::{GatewayError, Result};
pub use gateway::Gateway;
pub use registry::{AdapterFactory, AdapterRegistry};
pub use traits::{ChatAdapter, Room, RoomInjector};
