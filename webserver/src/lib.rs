//! Webserver library for the hackathon hub
//!
//! REST API over the hackathon records (teams, companies, problems, judges,
//! submissions, evaluations) plus the aggregate views behind the dashboard
//! and analytics pages.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use config::ServerConfig;
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::{WebServer, build_router};

// Re-export trait definitions
pub use traits::EntityStore;

// Re-export service implementations
pub use services::{DocumentStore, MemoryStore, Repository, open_store, seed_demo_data};
