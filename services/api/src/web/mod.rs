pub mod callable;
pub mod events;
pub mod rest;
pub mod state;

// Re-export the router builder so the binary can assemble the server.
pub use rest::{api_router, ApiDoc};
