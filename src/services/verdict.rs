// Verdict composer: merges validation and analysis into one assessment

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::models::{Assessment, InputKind, ThreatAnalysis, ThreatLevel, ValidationReport};

const VALIDATION_HEADER: &str = "=== VALIDATION RESULTS ===";
const WARNINGS_HEADER: &str = "⚠️ VALIDATION WARNINGS:";
const ANALYSIS_HEADER: &str = "=== AI THREAT ANALYSIS ===";
const RECOMMENDATIONS_HEADER: &str = "📋 RECOMMENDATIONS:";
const EXISTENCE_NOTE: &str = "🚨 CRITICAL: Input does not exist or is not reachable";

const TOP_RECOMMENDATIONS: usize = 3;
const DEGRADED_SCORE: u8 = 50;

pub struct VerdictComposer;

impl VerdictComposer {
    /// Combine a validation report and threat analysis into the final verdict
    pub fn compose(
        kind: InputKind,
        input: &str,
        validation: ValidationReport,
        analysis: ThreatAnalysis,
    ) -> Assessment {
        let mut threat_level = analysis.risk_level.threat_level();
        let score = analysis.risk_level.display_score().min(100);

        let mut details = vec![VALIDATION_HEADER.to_string()];
        details.extend(validation.details.iter().cloned());

        if !validation.warnings.is_empty() {
            details.push(String::new());
            details.push(WARNINGS_HEADER.to_string());
            details.extend(validation.warnings.iter().cloned());
        }

        details.push(String::new());
        details.push(ANALYSIS_HEADER.to_string());
        details.extend(analysis.threats.iter().cloned());
        details.extend(analysis.indicators.iter().map(|i| i.to_string()));

        if !analysis.recommendations.is_empty() {
            details.push(String::new());
            details.push(RECOMMENDATIONS_HEADER.to_string());
            details.extend(
                analysis
                    .recommendations
                    .iter()
                    .take(TOP_RECOMMENDATIONS)
                    .cloned(),
            );
        }

        if kind.has_existence() && !validation.exists {
            threat_level = ThreatLevel::Dangerous;
            details.push(String::new());
            details.push(EXISTENCE_NOTE.to_string());
        }

        if analysis.threats.is_empty() && threat_level == ThreatLevel::Safe {
            details.push("✓ No immediate threats detected".to_string());
            details.push("✓ Analysis complete - exercise normal caution".to_string());
        }

        Assessment {
            id: Uuid::new_v4(),
            kind,
            normalized_input: input.trim().to_string(),
            threat_level,
            score,
            details,
            timestamp: Utc::now(),
            validation,
            analysis: Some(analysis),
            degraded: false,
        }
    }

    /// Fallback verdict when validation or analysis could not complete
    pub fn degraded(kind: InputKind, input: &str, reason: &str) -> Assessment {
        warn!(kind = %kind, reason = %reason, "Returning degraded assessment");

        Assessment {
            id: Uuid::new_v4(),
            kind,
            normalized_input: input.trim().to_string(),
            threat_level: ThreatLevel::Suspicious,
            score: DEGRADED_SCORE,
            details: vec![
                "Error occurred during analysis".to_string(),
                reason.to_string(),
                "Unable to complete full threat assessment".to_string(),
                "Please try again or contact support".to_string(),
            ],
            timestamp: Utc::now(),
            validation: ValidationReport::unavailable(kind, reason),
            analysis: None,
            degraded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Indicator, RiskLevel, Severity, ValidationMetadata};

    fn analysis(risk_level: RiskLevel, threats: &[&str]) -> ThreatAnalysis {
        ThreatAnalysis {
            risk_level,
            raw_score: 0,
            confidence: 80,
            threats: threats.iter().map(|t| t.to_string()).collect(),
            indicators: vec![Indicator::new("Scam Risk", Severity::Danger, "bad")],
            recommendations: vec!["one".into(), "two".into(), "three".into(), "four".into()],
            security_tips: Vec::new(),
        }
    }

    fn report(kind: InputKind, exists: bool) -> ValidationReport {
        let mut report = ValidationReport::new(ValidationMetadata::empty(kind));
        report.is_valid = true;
        report.exists = exists;
        report.details.push("detail".to_string());
        report
    }

    #[test]
    fn test_details_order() {
        let mut validation = report(InputKind::Phone, true);
        validation.warnings.push("careful".to_string());
        let assessment = VerdictComposer::compose(
            InputKind::Phone,
            " 555 ",
            validation,
            analysis(RiskLevel::High, &["threat"]),
        );

        assert_eq!(
            assessment.details,
            vec![
                VALIDATION_HEADER,
                "detail",
                "",
                WARNINGS_HEADER,
                "careful",
                "",
                ANALYSIS_HEADER,
                "threat",
                "Scam Risk: bad",
                "",
                RECOMMENDATIONS_HEADER,
                "one",
                "two",
                "three",
            ]
        );
        assert_eq!(assessment.normalized_input, "555");
        assert_eq!(assessment.score, 25);
        assert_eq!(assessment.threat_level, ThreatLevel::Dangerous);
    }

    #[test]
    fn test_existence_override() {
        let assessment = VerdictComposer::compose(
            InputKind::Url,
            "gone.example",
            report(InputKind::Url, false),
            analysis(RiskLevel::Safe, &[]),
        );
        assert_eq!(assessment.threat_level, ThreatLevel::Dangerous);
        assert_eq!(assessment.score, 95);
        assert_eq!(assessment.details.last().unwrap(), EXISTENCE_NOTE);
    }

    #[test]
    fn test_messages_skip_existence_override() {
        let assessment = VerdictComposer::compose(
            InputKind::Message,
            "hello there",
            report(InputKind::Message, false),
            analysis(RiskLevel::Safe, &[]),
        );
        assert_eq!(assessment.threat_level, ThreatLevel::Safe);
        assert!(assessment
            .details
            .contains(&"✓ No immediate threats detected".to_string()));
    }

    #[test]
    fn test_degraded_assessment() {
        let assessment = VerdictComposer::degraded(InputKind::Url, "x.com", "boom");
        assert!(assessment.degraded);
        assert_eq!(assessment.threat_level, ThreatLevel::Suspicious);
        assert_eq!(assessment.score, 50);
        assert_eq!(assessment.details[1], "boom");
        assert_eq!(assessment.validation.kind(), InputKind::Url);
        assert!(assessment.analysis.is_none());
    }
}
