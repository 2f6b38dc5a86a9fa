// Integration tests for properties every assessment must satisfy

use scamguard_core::models::{RiskLevel, ThreatLevel, ValidationMetadata};
use scamguard_core::services::{FixedSimulation, RandomSimulation};
use scamguard_core::InputKind;

mod common;
use common::{hashed_service, service_with, SAMPLE_INPUTS};

fn expected_level(risk: RiskLevel) -> ThreatLevel {
    match risk {
        RiskLevel::Critical | RiskLevel::High => ThreatLevel::Dangerous,
        RiskLevel::Medium | RiskLevel::Low => ThreatLevel::Suspicious,
        RiskLevel::Safe => ThreatLevel::Safe,
    }
}

#[test]
fn test_scores_and_details_are_well_formed() {
    let service = hashed_service();

    for (kind, input) in SAMPLE_INPUTS {
        let assessment = service.check(*kind, input);
        assert!(assessment.score <= 100, "{}", input);
        assert!(!assessment.details.is_empty(), "{}", input);
        assert_eq!(assessment.kind, *kind);
        assert_eq!(assessment.validation.kind(), *kind);
        assert_eq!(assessment.id.get_version_num(), 4);

        let analysis = assessment.analysis.as_ref().unwrap();
        assert!(analysis.confidence <= 100, "{}", input);
        assert_eq!(analysis.risk_level, RiskLevel::from_score(analysis.raw_score));
    }
}

#[test]
fn test_threat_level_follows_risk_level() {
    // Every simulated fact at 0.99 makes most inputs "not exist"
    for service in [hashed_service(), service_with(FixedSimulation(0.99))] {
        for (kind, input) in SAMPLE_INPUTS {
            let assessment = service.check(*kind, input);
            let risk = assessment.risk_level().unwrap();
            let mapped = expected_level(risk);

            if kind.has_existence() && !assessment.validation.exists {
                assert_eq!(assessment.threat_level, ThreatLevel::Dangerous, "{}", input);
            } else {
                assert_eq!(assessment.threat_level, mapped, "{}", input);
            }
        }
    }
}

#[test]
fn test_analysis_ignores_simulation() {
    let hashed = hashed_service();
    let random = service_with(RandomSimulation);

    for (kind, input) in SAMPLE_INPUTS {
        let first = hashed.check(*kind, input).analysis.unwrap();
        let second = hashed.check(*kind, input).analysis.unwrap();
        let third = random.check(*kind, input).analysis.unwrap();

        assert_eq!(first.risk_level, second.risk_level);
        assert_eq!(first.threats, second.threats);
        assert_eq!(first.indicators, second.indicators);
        assert_eq!(first.risk_level, third.risk_level);
        assert_eq!(first.threats, third.threats);
        assert_eq!(first.indicators, third.indicators);
    }
}

#[test]
fn test_hashed_validation_is_repeatable() {
    let service = hashed_service();
    for (kind, input) in SAMPLE_INPUTS {
        let first = service.validate(*kind, input);
        let second = service.validate(*kind, input);
        assert_eq!(first, second, "{}", input);
    }
}

#[test]
fn test_phone_numbers_with_seven_digits_are_valid() {
    let service = hashed_service();
    for phone in ["8675309", "867-5309", "+1 (212) 867-5309", "0044 20 7946 0958"] {
        assert!(service.validate(InputKind::Phone, phone).is_valid, "{}", phone);
    }
    assert!(!service.validate(InputKind::Phone, "12-34").is_valid);
}

#[test]
fn test_schemeless_urls_default_to_https() {
    let service = hashed_service();
    for url in ["google.com", "shop.example.org/cart", "news.ycombinator.com"] {
        let report = service.validate(InputKind::Url, url);
        match report.metadata {
            ValidationMetadata::Url(meta) => {
                assert_eq!(meta.protocol, "https", "{}", url);
                assert!(meta.has_ssl);
            }
            other => panic!("unexpected metadata {:?}", other),
        }
    }
}

#[test]
fn test_messages_are_always_valid() {
    let service = hashed_service();
    for (kind, input) in SAMPLE_INPUTS.iter().filter(|(k, _)| *k == InputKind::Message) {
        let report = service.validate(*kind, input);
        assert!(report.is_valid);
        assert!(report.exists);
    }
}
