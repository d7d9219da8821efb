//! Page controllers for the farm dashboard

pub mod dashboard;
pub mod farms;
pub mod prediction;
pub mod weather;

pub use dashboard::Dashboard;
pub use farms::{Entity, FarmManagement, FormKind, SaveOutcome};
pub use prediction::YieldPrediction;
pub use weather::{WeatherData, WeatherSource};
