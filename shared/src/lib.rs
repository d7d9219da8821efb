//! Shared types and models for the farm dashboard
//!
//! This crate contains the entities, form drafts and view derivations shared
//! between the API client, the browser bindings (via WASM), and their tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
