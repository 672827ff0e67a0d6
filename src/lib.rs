// ABOUTME: Root library module exposing application wiring for the chat gateway
// ABOUTME: Provides config loading, XDG paths, logging setup, and the concrete provider set

pub mod config;
pub mod logging;
pub mod paths;
pub mod platform;

// Re-export the provider-agnostic core
pub use chatgate_core::{
    AdapterRegistry, ChatAdapter, ChatConfig, Gateway, GatewayError, MockAdapter, Room,
    RoomInjector,
};
