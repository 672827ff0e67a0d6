// ABOUTME: Adapter implementations shipped with the core crate.
// ABOUTME: Real network providers live in the application crate.

pub mod mock;
