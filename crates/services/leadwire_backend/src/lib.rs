//! Backend service assembly for Leadwire.
//!
//! Exposes the router construction and the credential store factory so
//! integration tests can drive the exact app the binary serves.

pub mod app;
pub mod store_factory;
