// Threat analysis results produced by the pattern-matching analyzer

use serde::{Deserialize, Serialize};
use std::fmt;

use super::assessment::ThreatLevel;

/// Five-bucket granular risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket an additive analyzer score
    pub fn from_score(score: u32) -> Self {
        match score {
            70..=u32::MAX => RiskLevel::Critical,
            50..=69 => RiskLevel::High,
            30..=49 => RiskLevel::Medium,
            15..=29 => RiskLevel::Low,
            _ => RiskLevel::Safe,
        }
    }

    /// Fixed score shown to end users; higher is safer
    pub fn display_score(&self) -> u8 {
        match self {
            RiskLevel::Safe => 95,
            RiskLevel::Low => 70,
            RiskLevel::Medium => 50,
            RiskLevel::High => 25,
            RiskLevel::Critical => 10,
        }
    }

    /// Coarsen into the three user-facing buckets
    pub fn threat_level(&self) -> ThreatLevel {
        match self {
            RiskLevel::Critical | RiskLevel::High => ThreatLevel::Dangerous,
            RiskLevel::Medium | RiskLevel::Low => ThreatLevel::Suspicious,
            RiskLevel::Safe => ThreatLevel::Safe,
        }
    }

    pub fn is_high_or_worse(&self) -> bool {
        *self >= RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// A single severity-tagged observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub category: String,
    pub severity: Severity,
    pub description: String,
}

impl Indicator {
    pub fn new(category: impl Into<String>, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            severity,
            description: description.into(),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatAnalysis {
    pub risk_level: RiskLevel,
    /// Additive rule score; only used to pick `risk_level`
    pub raw_score: u32,
    /// 0-100
    pub confidence: u8,
    pub threats: Vec<String>,
    pub indicators: Vec<Indicator>,
    pub recommendations: Vec<String>,
    pub security_tips: Vec<String>,
}
