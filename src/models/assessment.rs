// Final composed verdict returned to callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::analysis::{RiskLevel, ThreatAnalysis};
use super::input::InputKind;
use super::validation::ValidationReport;

/// Three-bucket classification shown to end users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Safe,
    Suspicious,
    Dangerous,
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThreatLevel::Safe => "safe",
            ThreatLevel::Suspicious => "suspicious",
            ThreatLevel::Dangerous => "dangerous",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub kind: InputKind,
    pub normalized_input: String,
    pub threat_level: ThreatLevel,
    /// 0-100, higher is safer
    pub score: u8,
    pub details: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub validation: ValidationReport,
    /// Missing when the assessment is degraded
    pub analysis: Option<ThreatAnalysis>,
    pub degraded: bool,
}

impl Assessment {
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.analysis.as_ref().map(|a| a.risk_level)
    }
}
