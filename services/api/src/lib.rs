//! services/api/src/lib.rs
//!
//! The MediSign backend service: configuration, adapters for the Gemini,
//! Cloud Translation and Postgres collaborators, and the axum web layer.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
