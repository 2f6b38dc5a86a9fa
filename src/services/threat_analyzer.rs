// Threat analyzer: applies the pattern library and ad-hoc heuristics to an input
// Scoring is a pure function of the input; no simulated data is consulted

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::models::{Indicator, InputKind, RiskLevel, Severity, ThreatAnalysis};
use crate::utils::engine_errors::EngineResult;
use crate::utils::message_validator::extract_urls;
use crate::utils::patterns::{
    count_terms, PatternLibrary, RuleSubjects, FINANCIAL_TERMS, IMPERSONATED_BRANDS,
    PERSONAL_INFO_TERMS, SEQUENTIAL_RUNS,
};

lazy_static! {
    static ref WRITING_QUALITY_PATTERN: Regex =
        Regex::new(r"(?i)\b(ur|u|thru|plz|asap)\b").expect("Invalid writing quality regex");
}

const DANGEROUS_LINK_PENALTY: u32 = 25;

// =============================================================================
// FINDINGS ACCUMULATOR
// =============================================================================

#[derive(Debug, Default)]
struct Findings {
    score: u32,
    threats: Vec<String>,
    indicators: Vec<Indicator>,
}

impl Findings {
    fn flag(&mut self, weight: u32, threat: Option<&str>, indicator: Indicator) {
        self.score = self.score.saturating_add(weight);
        if let Some(threat) = threat {
            self.threats.push(threat.to_string());
        }
        self.indicators.push(indicator);
    }
}

/// Per-kind confidence parameters: (cap, base, step per threat)
fn confidence_params(kind: InputKind) -> (u32, u32, u32) {
    match kind {
        InputKind::Phone => (95, 70, 8),
        InputKind::Url => (98, 75, 6),
        InputKind::Message => (96, 72, 7),
    }
}

// =============================================================================
// ANALYZER
// =============================================================================

#[derive(Debug, Clone)]
pub struct ThreatAnalyzer {
    library: Arc<PatternLibrary>,
}

impl ThreatAnalyzer {
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    #[instrument(skip(self, input), fields(len = input.len()))]
    pub fn analyze(&self, kind: InputKind, input: &str) -> EngineResult<ThreatAnalysis> {
        let mut findings = self.apply_rule_groups(kind, input)?;

        match kind {
            InputKind::Phone => phone_heuristics(input, &mut findings),
            InputKind::Url => url_heuristics(input, &mut findings),
            InputKind::Message => self.message_heuristics(input, &mut findings)?,
        }

        let risk_level = RiskLevel::from_score(findings.score);
        let (cap, base, step) = confidence_params(kind);
        let confidence = (base + step * findings.threats.len() as u32).min(cap) as u8;

        debug!(
            kind = %kind,
            score = findings.score,
            risk = %risk_level,
            threats = findings.threats.len(),
            "Threat analysis complete"
        );

        Ok(ThreatAnalysis {
            risk_level,
            raw_score: findings.score,
            confidence,
            threats: findings.threats,
            indicators: findings.indicators,
            recommendations: recommendations(kind, findings.score),
            security_tips: security_tips(kind),
        })
    }

    fn apply_rule_groups(&self, kind: InputKind, input: &str) -> EngineResult<Findings> {
        let table = self.library.table(kind)?;
        let subjects = RuleSubjects::new(kind, input);
        let mut findings = Findings::default();

        for outcome in table.evaluate(&subjects).into_iter().filter(|m| m.matched) {
            let group = outcome.group;
            findings.flag(
                group.weight,
                group.threat.as_deref(),
                Indicator::new(&group.indicator, group.severity, &group.description),
            );
        }

        Ok(findings)
    }

    fn message_heuristics(&self, message: &str, findings: &mut Findings) -> EngineResult<()> {
        let urls = extract_urls(message);
        if !urls.is_empty() {
            findings.flag(
                15,
                None,
                Indicator::new(
                    "Contains Links",
                    Severity::Warning,
                    format!("Message contains {} link(s)", urls.len()),
                ),
            );

            let mut any_dangerous = false;
            for url in &urls {
                if self.analyze(InputKind::Url, url)?.risk_level.is_high_or_worse() {
                    any_dangerous = true;
                }
            }
            if any_dangerous {
                findings.score = findings.score.saturating_add(DANGEROUS_LINK_PENALTY);
                findings
                    .threats
                    .push("Message contains dangerous links".to_string());
            }
        }

        if count_terms(message, PERSONAL_INFO_TERMS) > 0 {
            findings.flag(
                20,
                None,
                Indicator::new(
                    "Personal Information Request",
                    Severity::Danger,
                    "Message asks for passwords, PINs or identity details",
                ),
            );
        }

        let financial_terms = count_terms(message, FINANCIAL_TERMS);
        if financial_terms > 2 {
            findings.flag(
                10,
                None,
                Indicator::new(
                    "Financial Content",
                    Severity::Warning,
                    format!("Message mentions {} financial terms", financial_terms),
                ),
            );
        }

        let total = message.chars().count();
        let capitals = message.chars().filter(|c| c.is_uppercase()).count();
        if total > 0 && capitals * 2 > total {
            findings.flag(
                15,
                None,
                Indicator::new(
                    "Excessive Capitalization",
                    Severity::Info,
                    "Unusual use of capital letters (attention-grabbing tactic)",
                ),
            );
        }

        if WRITING_QUALITY_PATTERN.find_iter(message).count() > 2 {
            findings.flag(
                10,
                None,
                Indicator::new(
                    "Poor Writing Quality",
                    Severity::Info,
                    "Unprofessional language may indicate spam",
                ),
            );
        }

        Ok(())
    }
}

fn phone_heuristics(phone: &str, findings: &mut Findings) {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if SEQUENTIAL_RUNS.iter().any(|run| digits.contains(run)) {
        findings.flag(
            15,
            None,
            Indicator::new(
                "Sequential Pattern",
                Severity::Info,
                "Contains sequential number pattern",
            ),
        );
    }

    if digits.len() < 10 {
        findings.flag(
            10,
            None,
            Indicator::new(
                "Incomplete Number",
                Severity::Warning,
                "Number length is unusually short",
            ),
        );
    }
}

fn url_heuristics(url: &str, findings: &mut Findings) {
    // Judged on what was typed; a missing scheme counts as insecure
    if !url.trim().to_lowercase().starts_with("https://") {
        findings.flag(
            20,
            None,
            Indicator::new(
                "No Secure Connection",
                Severity::Warning,
                "Website does not use HTTPS encryption",
            ),
        );
    }

    let subjects = RuleSubjects::new(InputKind::Url, url);
    let host = subjects.host().unwrap_or_default();
    let url_lower = url.to_lowercase();

    for brand in IMPERSONATED_BRANDS {
        if !url_lower.contains(brand) {
            continue;
        }
        let official = format!("{}.com", brand);
        let is_official = host == official || host.ends_with(&format!(".{}", official));
        if !is_official {
            findings.flag(
                30,
                Some("Possible brand impersonation"),
                Indicator::new(
                    "Typosquatting",
                    Severity::Danger,
                    format!("URL mimics \"{}\" but is not the official domain", brand),
                ),
            );
        }
    }

    if host.split('.').count() > 4 {
        findings.flag(
            20,
            None,
            Indicator::new(
                "Complex Domain",
                Severity::Warning,
                "Unusually deep subdomain structure",
            ),
        );
    }
}

// =============================================================================
// CANNED ADVICE
// =============================================================================

fn recommendations(kind: InputKind, score: u32) -> Vec<String> {
    let lines: &[&str] = match kind {
        InputKind::Phone if score > 30 => &[
            "Do not answer calls from this number",
            "Block this number in your phone settings",
            "Report to your carrier if you receive calls",
        ],
        InputKind::Phone if score > 15 => &[
            "Let unknown calls from this number go to voicemail",
            "Verify caller identity before sharing information",
            "Look the number up before calling back",
        ],
        InputKind::Phone => &[
            "Exercise caution when answering",
            "Verify caller identity before sharing information",
        ],
        InputKind::Url if score > 40 => &[
            "DO NOT visit this website",
            "DO NOT enter any personal information",
            "Report this URL to security authorities",
            "Delete any messages containing this link",
        ],
        InputKind::Url if score > 20 => &[
            "Proceed with extreme caution",
            "Verify the website is legitimate before visiting",
            "Never enter sensitive information",
        ],
        InputKind::Url => &[
            "Verify URL matches the expected website",
            "Check for HTTPS and valid certificate",
        ],
        InputKind::Message if score > 50 => &[
            "Delete this message immediately",
            "DO NOT click any links in the message",
            "DO NOT respond or provide any information",
            "Report as spam/phishing to your provider",
            "Block the sender",
        ],
        InputKind::Message if score > 25 => &[
            "Treat with extreme caution",
            "Verify sender through official channels",
            "Do not click links or download attachments",
        ],
        InputKind::Message => &[
            "Verify sender identity before taking action",
            "Contact the organization directly if unsure",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

fn security_tips(kind: InputKind) -> Vec<String> {
    let tips: &[&str] = match kind {
        InputKind::Phone => &[
            "Never share personal information over unexpected calls",
            "Legitimate organizations won't ask for passwords via phone",
            "Use call blocking features to filter spam calls",
        ],
        InputKind::Url => &[
            "Always verify URLs before clicking links",
            "Look for HTTPS and a padlock icon in your browser",
            "Hover over links to see the actual destination",
            "Bookmark important websites instead of clicking links",
        ],
        InputKind::Message => &[
            "Legitimate organizations rarely request sensitive info via text/email",
            "When in doubt, contact the company directly using official contact info",
            "Never click links from unknown or suspicious senders",
            "Enable two-factor authentication on all important accounts",
        ],
    };
    tips.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ThreatAnalyzer {
        ThreatAnalyzer::new(Arc::new(PatternLibrary::builtin().unwrap()))
    }

    fn indicator_names(analysis: &ThreatAnalysis) -> Vec<&str> {
        analysis
            .indicators
            .iter()
            .map(|i| i.category.as_str())
            .collect()
    }

    #[test]
    fn test_clean_phone() {
        let analysis = analyzer().analyze(InputKind::Phone, "(212) 867-5309").unwrap();
        assert_eq!(analysis.risk_level, RiskLevel::Safe);
        assert_eq!(analysis.raw_score, 0);
        assert_eq!(analysis.confidence, 70);
        assert_eq!(analysis.recommendations.len(), 2);
    }

    #[test]
    fn test_fake_phone_is_high() {
        let analysis = analyzer().analyze(InputKind::Phone, "555-0100").unwrap();
        // spoofed 50 + short 10
        assert_eq!(analysis.raw_score, 60);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert_eq!(indicator_names(&analysis), vec!["Spoofing Detected", "Incomplete Number"]);
        assert_eq!(analysis.confidence, 78);
    }

    #[test]
    fn test_group_weight_added_once() {
        // toll-free prefix and a repeated run both hit the spam group
        let analysis = analyzer().analyze(InputKind::Phone, "1-800-777-7777").unwrap();
        assert_eq!(analysis.raw_score, 25);
        assert_eq!(analysis.threats, vec!["Matches known spam number patterns"]);
    }

    #[test]
    fn test_ip_url_over_http() {
        let analysis = analyzer()
            .analyze(InputKind::Url, "http://189.24.5.10/login")
            .unwrap();
        assert_eq!(analysis.raw_score, 35);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
        assert_eq!(
            indicator_names(&analysis),
            vec!["Suspicious Structure", "No Secure Connection"]
        );
    }

    #[test]
    fn test_official_domains_are_not_impersonation() {
        let a = analyzer();
        for url in ["https://google.com", "HTTPS://Google.com", "https://mail.google.com/inbox"] {
            let analysis = a.analyze(InputKind::Url, url).unwrap();
            assert_eq!(analysis.risk_level, RiskLevel::Safe, "{}", url);
            assert!(analysis.threats.is_empty(), "{}", url);
        }
    }

    #[test]
    fn test_schemeless_url_is_not_secure() {
        let a = analyzer();
        for url in ["google.com", "  example.org "] {
            let analysis = a.analyze(InputKind::Url, url).unwrap();
            assert!(indicator_names(&analysis).contains(&"No Secure Connection"), "{}", url);
            assert_eq!(analysis.risk_level, RiskLevel::Low, "{}", url);
        }
        let google = a.analyze(InputKind::Url, "google.com").unwrap();
        assert_eq!(google.raw_score, 20);
    }

    #[test]
    fn test_any_hyphen_in_host_is_suspicious() {
        let analysis = analyzer()
            .analyze(InputKind::Url, "https://secure-login.com")
            .unwrap();
        assert_eq!(indicator_names(&analysis), vec!["Suspicious Structure"]);
        assert_eq!(analysis.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_score_saturates_on_huge_weights() {
        let json = r#"{"phone": {"groups": [
            {"name": "a", "weight": 4294967295, "severity": "danger",
             "indicator": "A", "description": "a", "scope": "digits", "patterns": ["\\d"]},
            {"name": "b", "weight": 4294967295, "severity": "danger",
             "indicator": "B", "description": "b", "scope": "digits", "patterns": ["\\d"]}
        ]}}"#;
        let library = PatternLibrary::from_json_str(json).unwrap();
        let analysis = ThreatAnalyzer::new(Arc::new(library))
            .analyze(InputKind::Phone, "2128675309")
            .unwrap();
        assert_eq!(analysis.raw_score, u32::MAX);
        assert_eq!(analysis.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_brand_impersonation() {
        let analysis = analyzer()
            .analyze(InputKind::Url, "https://paypal-login.support.com")
            .unwrap();
        assert!(analysis
            .threats
            .contains(&"Possible brand impersonation".to_string()));
        // impersonation 30 + hyphenated host 15
        assert_eq!(analysis.raw_score, 45);
    }

    #[test]
    fn test_deep_subdomains() {
        let analysis = analyzer()
            .analyze(InputKind::Url, "https://a.b.c.d.example.org")
            .unwrap();
        assert!(indicator_names(&analysis).contains(&"Complex Domain"));
    }

    #[test]
    fn test_scam_message_is_critical() {
        let analysis = analyzer()
            .analyze(
                InputKind::Message,
                "URGENT: verify your account now, send your SSN to claim your prize",
            )
            .unwrap();
        // phishing 35 + scam 40 + urgency 25 + personal info 20
        assert_eq!(analysis.raw_score, 120);
        assert_eq!(analysis.risk_level, RiskLevel::Critical);
        let names = indicator_names(&analysis);
        for expected in [
            "Phishing Language",
            "Scam Content",
            "Urgency Pressure",
            "Personal Information Request",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
        assert_eq!(analysis.confidence, 86);
        assert_eq!(analysis.recommendations.len(), 5);
    }

    #[test]
    fn test_dangerous_embedded_link_penalized_once() {
        let analysis = analyzer()
            .analyze(
                InputKind::Message,
                "see http://paypal-verify.tk and http://paypal-verify.ml",
            )
            .unwrap();
        let count = analysis
            .threats
            .iter()
            .filter(|t| *t == "Message contains dangerous links")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_shouting_and_text_speak() {
        let analysis = analyzer()
            .analyze(InputKind::Message, "HEY U GOT UR PARCEL PLZ CALL")
            .unwrap();
        let names = indicator_names(&analysis);
        assert!(names.contains(&"Excessive Capitalization"));
        assert!(names.contains(&"Poor Writing Quality"));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let a = analyzer();
        let input = "Your package is held. Pay the fee at http://track-parcel.xyz";
        let first = a.analyze(InputKind::Message, input).unwrap();
        let second = a.analyze(InputKind::Message, input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_table_is_error() {
        let analyzer = ThreatAnalyzer::new(Arc::new(PatternLibrary::from_tables(Vec::new())));
        assert!(analyzer.analyze(InputKind::Phone, "2128675309").is_err());
    }
}
