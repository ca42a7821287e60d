use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Irradiance measurement columns available for filtering and plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Global Horizontal Irradiance
    #[serde(rename = "GHI")]
    Ghi,
    /// Direct Normal Irradiance
    #[serde(rename = "DNI")]
    Dni,
    /// Diffuse Horizontal Irradiance
    #[serde(rename = "DHI")]
    Dhi,
}

impl Metric {
    /// Candidate metrics in display order.
    pub const CANDIDATES: [Metric; 3] = [Metric::Ghi, Metric::Dni, Metric::Dhi];

    pub fn column(&self) -> &'static str {
        match self {
            Metric::Ghi => "GHI",
            Metric::Dni => "DNI",
            Metric::Dhi => "DHI",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Ghi => "Global Horizontal Irradiance",
            Metric::Dni => "Direct Normal Irradiance",
            Metric::Dhi => "Diffuse Horizontal Irradiance",
        }
    }

    pub fn units(&self) -> &'static str {
        "W/m²"
    }

    /// Match a CSV header against the metric column names, ignoring case.
    pub fn from_column(header: &str) -> Option<Self> {
        Self::CANDIDATES
            .into_iter()
            .find(|m| m.column().eq_ignore_ascii_case(header.trim()))
    }

    pub fn candidate_columns() -> Vec<String> {
        Self::CANDIDATES
            .iter()
            .map(|m| m.column().to_string())
            .collect()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column(s).ok_or_else(|| DashboardError::UnknownMetric(s.to_string()))
    }
}
