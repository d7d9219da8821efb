//! Dashboard landing page

use shared::{DashboardSummary, LineChart, SummaryCard};

/// Landing page; renders fixed sample figures
#[derive(Debug, Clone)]
pub struct Dashboard {
    summary: DashboardSummary,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            summary: DashboardSummary::sample(),
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[SummaryCard] {
        &self.summary.cards
    }

    pub fn yield_chart(&self) -> &LineChart {
        &self.summary.yield_chart
    }

    pub fn weather_chart(&self) -> &LineChart {
        &self.summary.weather_chart
    }
}
