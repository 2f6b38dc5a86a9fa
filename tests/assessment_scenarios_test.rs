// Integration tests for end-to-end assessments of known inputs

use scamguard_core::models::{RiskLevel, ThreatLevel, ValidationMetadata};
use scamguard_core::services::{examples_for, CheckHistory, EXAMPLE_THREATS};
use scamguard_core::{CheckRequest, EngineError, InputKind};

mod common;
use common::{fixed_service, indicator_categories};

const REASSURANCE: &str = "✓ No immediate threats detected";
const EXISTENCE_NOTE: &str = "🚨 CRITICAL: Input does not exist or is not reachable";

#[test]
fn test_phishing_message_is_critical() {
    let assessment = fixed_service()
        .check_message("URGENT: verify your account now, send your SSN to claim your prize");

    let analysis = assessment.analysis.as_ref().unwrap();
    assert_eq!(analysis.risk_level, RiskLevel::Critical);
    assert_eq!(analysis.raw_score, 120);
    assert_eq!(analysis.confidence, 86);
    assert_eq!(assessment.threat_level, ThreatLevel::Dangerous);
    assert_eq!(assessment.score, 10);

    let categories = indicator_categories(&assessment);
    for expected in [
        "Phishing Language",
        "Scam Content",
        "Urgency Pressure",
        "Personal Information Request",
    ] {
        assert!(
            categories.iter().any(|c| c == expected),
            "missing {} in {:?}",
            expected,
            categories
        );
    }

    match &assessment.validation.metadata {
        ValidationMetadata::Message(meta) => {
            assert_eq!(meta.contains.personal_info_requests, 2);
            assert_eq!(meta.contains.financial_terms, 2);
            assert_eq!(meta.spam_score, 70);
        }
        other => panic!("unexpected metadata {:?}", other),
    }
}

#[test]
fn test_ip_literal_url_is_suspicious() {
    let assessment = fixed_service().check_url("http://189.24.5.10/login");
    let analysis = assessment.analysis.as_ref().unwrap();

    assert_eq!(analysis.risk_level, RiskLevel::Medium);
    assert_eq!(analysis.raw_score, 35);
    assert_eq!(
        indicator_categories(&assessment),
        vec!["Suspicious Structure", "No Secure Connection"]
    );
    assert_eq!(assessment.threat_level, ThreatLevel::Suspicious);
    assert_eq!(assessment.score, 50);
}

#[test]
fn test_official_site_is_safe() {
    let assessment = fixed_service().check_url("https://google.com");

    assert_eq!(assessment.risk_level(), Some(RiskLevel::Safe));
    assert_eq!(assessment.threat_level, ThreatLevel::Safe);
    assert_eq!(assessment.score, 95);
    assert!(assessment.details.iter().any(|d| d == REASSURANCE));

    match &assessment.validation.metadata {
        ValidationMetadata::Url(meta) => {
            assert_eq!(meta.domain, "google.com");
            assert_eq!(meta.protocol, "https");
            assert_eq!(meta.reputation_score, Some(100));
        }
        other => panic!("unexpected metadata {:?}", other),
    }
}

#[test]
fn test_typosquatting_url_is_critical() {
    let assessment = fixed_service().check_url("http://paypal-verify-account.tk");
    let analysis = assessment.analysis.as_ref().unwrap();

    assert_eq!(analysis.risk_level, RiskLevel::Critical);
    // phishing 45 + hyphens 15 + free tld 35 + no https 20 + impersonation 30
    assert_eq!(analysis.raw_score, 145);
    assert_eq!(analysis.confidence, 93);
    assert!(analysis
        .threats
        .contains(&"Possible brand impersonation".to_string()));

    let categories = indicator_categories(&assessment);
    assert!(categories.contains(&"Typosquatting".to_string()));
    assert!(categories.contains(&"High Risk Domain".to_string()));
    assert!(categories.contains(&"Suspicious Structure".to_string()));
}

#[test]
fn test_schemeless_url_is_flagged_insecure() {
    let assessment = fixed_service().check_url("google.com");

    assert_eq!(assessment.risk_level(), Some(RiskLevel::Low));
    assert_eq!(assessment.threat_level, ThreatLevel::Suspicious);
    assert_eq!(assessment.score, 70);
    assert_eq!(indicator_categories(&assessment), vec!["No Secure Connection"]);
}

#[test]
fn test_hyphenated_host_is_low_risk() {
    let assessment = fixed_service().check_url("https://secure-login.com");

    assert_eq!(assessment.risk_level(), Some(RiskLevel::Low));
    assert_eq!(indicator_categories(&assessment), vec!["Suspicious Structure"]);
}

#[test]
fn test_reserved_phone_number_does_not_exist() {
    let assessment = fixed_service().check_phone("555-0100");

    assert!(assessment.validation.is_valid);
    assert!(!assessment.validation.exists);
    assert_eq!(assessment.risk_level(), Some(RiskLevel::High));
    assert_eq!(assessment.threat_level, ThreatLevel::Dangerous);
    assert_eq!(assessment.details.last().map(String::as_str), Some(EXISTENCE_NOTE));
}

#[test]
fn test_ordinary_phone_number_is_safe() {
    let assessment = fixed_service().check_phone("(212) 867-5309");

    assert!(assessment.validation.exists);
    assert_eq!(assessment.threat_level, ThreatLevel::Safe);
    assert_eq!(assessment.score, 95);
    assert!(assessment.details.iter().any(|d| d == REASSURANCE));
}

#[test]
fn test_message_with_dangerous_link() {
    let assessment = fixed_service().check_message(
        "Your parcel is held, pay the fee at http://paypal-verify-account.tk today",
    );
    let analysis = assessment.analysis.as_ref().unwrap();

    assert_eq!(analysis.risk_level, RiskLevel::Critical);
    assert!(analysis
        .threats
        .contains(&"Message contains dangerous links".to_string()));
    assert!(indicator_categories(&assessment).contains(&"Contains Links".to_string()));
}

#[test]
fn test_friendly_message_is_safe() {
    let assessment =
        fixed_service().check_message("See you at lunch tomorrow, I will bring the notes.");

    assert!(assessment.validation.exists);
    assert_eq!(assessment.threat_level, ThreatLevel::Safe);
    assert!(assessment.details.iter().any(|d| d == REASSURANCE));
}

#[test]
fn test_check_request_rejects_bad_input() {
    let service = fixed_service();

    let too_short = service.check_request(&CheckRequest::new(InputKind::Message, "hey"));
    assert!(matches!(too_short, Err(EngineError::InvalidInput(_))));

    let empty = service.check_request(&CheckRequest::new(InputKind::Url, ""));
    assert!(matches!(empty, Err(EngineError::InvalidInput(_))));

    let ok = service
        .check_request(&CheckRequest::new(InputKind::Phone, " 555-0100 "))
        .unwrap();
    assert_eq!(ok.normalized_input, "555-0100");
}

#[test]
fn test_examples_run_end_to_end() {
    let service = fixed_service();
    for example in EXAMPLE_THREATS {
        let assessment = service.check(example.kind, example.input);
        assert!(!assessment.degraded, "{} degraded", example.input);
        assert_eq!(assessment.kind, example.kind);
    }

    let known_scam = examples_for(InputKind::Phone).next().unwrap();
    assert_eq!(
        service.check(known_scam.kind, known_scam.input).threat_level,
        ThreatLevel::Dangerous
    );
}

#[test]
fn test_history_keeps_latest_checks() {
    let service = fixed_service();
    let mut history = CheckHistory::default();

    for example in EXAMPLE_THREATS {
        history.record(service.check(example.kind, example.input));
    }

    assert_eq!(history.len(), 5);
    let last = EXAMPLE_THREATS.last().unwrap();
    assert_eq!(history.latest().unwrap().normalized_input, last.input);
}
