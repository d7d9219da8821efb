//! Domain models for the farm dashboard

mod dashboard;
mod farm;
mod field;
mod prediction;
mod weather;

pub use dashboard::*;
pub use farm::*;
pub use field::*;
pub use prediction::*;
pub use weather::*;
