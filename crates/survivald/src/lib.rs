//! Survival daemon library - exposes modules for testing.

pub mod page;
pub mod relay;
pub mod routes;
pub mod server;
