use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::RecordId;

/// Profitability verdict of a QA analysis.
///
/// The server may grow new verdicts; unknown strings are preserved in
/// `Other` instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisStatus {
    HighlyProfitable,
    Profitable,
    Marginal,
    Unprofitable,
    Other(String),
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::HighlyProfitable => "highly_profitable",
            Self::Profitable => "profitable",
            Self::Marginal => "marginal",
            Self::Unprofitable => "unprofitable",
            Self::Other(s) => s,
        }
    }

    pub fn is_profitable(&self) -> bool {
        matches!(self, Self::HighlyProfitable | Self::Profitable)
    }
}

impl From<String> for AnalysisStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "highly_profitable" => Self::HighlyProfitable,
            "profitable" => Self::Profitable,
            "marginal" => Self::Marginal,
            "unprofitable" => Self::Unprofitable,
            _ => Self::Other(s),
        }
    }
}

impl From<AnalysisStatus> for String {
    fn from(status: AnalysisStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `POST /api/qa/analyze`. Produced per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub profit_margin: f64,
    pub competition_score: f64,
    pub status: AnalysisStatus,
    #[serde(default)]
    pub brand_id: Option<RecordId>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub product_count: Option<i64>,
}

/// Aggregated QA metrics for a brand (`GET /api/qa/metrics/{brand_id}`).
///
/// The metric set is server-defined, so it is kept as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QaMetrics(pub serde_json::Map<String, serde_json::Value>);
