//! Landing page summary

use serde::{Deserialize, Serialize};

use crate::types::{LineChart, SummaryCard};

/// Cards and charts shown on the dashboard landing page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub cards: Vec<SummaryCard>,
    pub yield_chart: LineChart,
    pub weather_chart: LineChart,
}

impl DashboardSummary {
    /// Fixed sample figures; the dashboard has no data source of its own yet
    pub fn sample() -> Self {
        let cards = vec![
            SummaryCard::new("Total Farms", "12"),
            SummaryCard::new("Active Predictions", "8"),
            SummaryCard::new("Weather Alerts", "3"),
            SummaryCard::new("Data Points", "1.2K"),
        ];

        let yield_chart = LineChart::new(["Jan", "Feb", "Mar", "Apr", "May", "Jun"])
            .with_series(
                "Predicted Yield",
                vec![65.0, 59.0, 80.0, 81.0, 56.0, 55.0],
            )
            .with_series("Actual Yield", vec![70.0, 62.0, 75.0, 85.0, 60.0, 58.0]);

        let weather_chart = LineChart::new(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
            .with_series(
                "Temperature (°C)",
                vec![22.0, 24.0, 27.0, 23.0, 25.0, 28.0, 26.0],
            )
            .with_series("Rainfall (mm)", vec![30.0, 10.0, 0.0, 15.0, 5.0, 0.0, 0.0]);

        Self {
            cards,
            yield_chart,
            weather_chart,
        }
    }
}
