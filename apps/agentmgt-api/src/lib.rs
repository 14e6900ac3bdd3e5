//! Agent management API server.
//!
//! Hosts the agents router behind request tracing plus an unauthenticated
//! health endpoint. The binary in `main.rs` wires configuration and logging
//! around [`app::build_app`].

pub mod app;
pub mod config;
pub mod logging;
