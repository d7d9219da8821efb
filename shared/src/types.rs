//! Common types used across the dashboard

use serde::{Deserialize, Deserializer, Serialize};

/// Parse numeric form text the way the browser form does.
///
/// Leading whitespace is skipped and the longest numeric prefix wins, so
/// `"6.5 pH"` parses to 6.5. Anything without a numeric prefix is NaN.
pub fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let end = numeric_prefix_len(trimmed.as_bytes());
    if end == 0 {
        return f64::NAN;
    }
    trimmed[..end].parse().unwrap_or(f64::NAN)
}

/// Length of the longest prefix matching `[+-]? digits? (. digits?)? ([eE][+-]? digits)?`
/// with at least one mantissa digit, or 0 when there is none.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = digits_from(pos);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = digits_from(pos + 1);
        if int_digits + frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0;
    }

    // Exponent counts only when it has digits; "1e" stops before the `e`
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    pos
}

/// Render a number for a text input. Non-finite values render empty.
pub fn display_numeric(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

/// Deserialize a float that may be `null` or missing. Both become NaN,
/// mirroring how NaN is encoded as `null` on the way out.
pub fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

pub(crate) fn nan() -> f64 {
    f64::NAN
}

/// Lifecycle of a single request issued by a page
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A titled metric card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
}

impl SummaryCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// One line of a line chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
}

/// Line chart data: shared x-axis labels plus one or more series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

impl LineChart {
    pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            datasets: Vec::new(),
        }
    }

    pub fn with_series(mut self, label: impl Into<String>, data: Vec<f64>) -> Self {
        self.datasets.push(ChartSeries {
            label: label.into(),
            data,
        });
        self
    }
}
