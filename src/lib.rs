/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Persisted models
pub mod model;
/// Daily notification batch
pub mod notify;
/// Price lookup collaborators
pub mod quote;
/// Repositories
pub mod repo;
/// Flight search deep links
pub mod search;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
