// gamegraph - games, reviews, and authors behind one graph-shaped API

// Record kinds and patch types
pub mod models;

// Document store boundary and the typed stores on top of it
pub mod store;

// Identifier allocation
pub mod allocator;

// Derived graph edges (read side)
pub mod relationship;

// Write-side orchestration
pub mod coordinator;

// Resolver map for the GraphQL engine
pub mod graphql;

// Service surface
pub mod app_state;
pub mod config;
pub mod seed;
pub mod server;

// Common utilities
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
