// Structured logging of composed assessments
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Assessment, InputKind, RiskLevel, ThreatLevel};

/// Summary written to the `assessment` log target; never contains the raw input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentLog {
    pub id: Uuid,
    pub kind: InputKind,
    pub input_chars: usize,
    pub threat_level: ThreatLevel,
    pub risk_level: Option<RiskLevel>,
    pub score: u8,
    pub raw_score: Option<u32>,
    pub threat_count: usize,
    pub exists: bool,
    pub degraded: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<&Assessment> for AssessmentLog {
    fn from(assessment: &Assessment) -> Self {
        Self {
            id: assessment.id,
            kind: assessment.kind,
            input_chars: assessment.normalized_input.chars().count(),
            threat_level: assessment.threat_level,
            risk_level: assessment.risk_level(),
            score: assessment.score,
            raw_score: assessment.analysis.as_ref().map(|a| a.raw_score),
            threat_count: assessment
                .analysis
                .as_ref()
                .map_or(0, |a| a.threats.len()),
            exists: assessment.validation.exists,
            degraded: assessment.degraded,
            timestamp: assessment.timestamp,
        }
    }
}

pub struct AssessmentLogger;

impl AssessmentLogger {
    pub fn log(assessment: &Assessment) {
        let entry = AssessmentLog::from(assessment);

        let json_log = serde_json::to_string(&entry).unwrap_or_else(|e| {
            warn!("Failed to serialize assessment log: {}", e);
            format!("{:?}", entry)
        });

        info!(target: "assessment", "{}", json_log);
    }
}
