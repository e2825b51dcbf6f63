/// Static front-end assets and the catch-all route
pub mod assets;
/// Daily check summary
pub mod check;
/// Placeholder email endpoint
pub mod email;
/// REST error responses
pub mod error;
/// Monitor CRUD endpoints
pub mod monitors;
