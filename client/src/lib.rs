//! Farm Dashboard client
//!
//! Typed access to the farm management backend and the page controllers
//! that drive the dashboard, farm management, weather and yield prediction
//! views.

pub mod api;
pub mod config;
pub mod error;
pub mod pages;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ClientError, ClientResult};
