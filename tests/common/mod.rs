// Common test utilities shared across integration test files

#![allow(dead_code)]

use scamguard_core::services::{FixedSimulation, HashedSimulation, SimulationSource, ThreatCheckService};
use scamguard_core::{Assessment, InputKind, PatternLibrary};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Inputs covering every kind, clean and hostile
pub const SAMPLE_INPUTS: &[(InputKind, &str)] = &[
    (InputKind::Phone, "(212) 867-5309"),
    (InputKind::Phone, "555-0100"),
    (InputKind::Phone, "+1 800 555 0199"),
    (InputKind::Phone, "+44 20 7946 0958"),
    (InputKind::Phone, "1-900-123-4567"),
    (InputKind::Phone, "12"),
    (InputKind::Url, "https://google.com"),
    (InputKind::Url, "google.com"),
    (InputKind::Url, "http://189.24.5.10/login"),
    (InputKind::Url, "http://paypal-verify-account.tk"),
    (InputKind::Url, "https://a.b.c.d.example.com/path"),
    (InputKind::Url, "not a url at all"),
    (InputKind::Message, "See you at lunch tomorrow, I will bring the notes."),
    (InputKind::Message, "URGENT: verify your account now, send your SSN to claim your prize"),
    (InputKind::Message, "FREE PRIZE!!! CLICK NOW u r a winner plz thx"),
    (InputKind::Message, "Your parcel is held, pay the fee at http://paypal-verify-account.tk today"),
];

pub fn builtin_library() -> Arc<PatternLibrary> {
    Arc::new(PatternLibrary::builtin().expect("built-in rules compile"))
}

/// Service whose simulated facts are all drawn at 0.5
pub fn fixed_service() -> ThreatCheckService {
    ThreatCheckService::with_components(Arc::new(FixedSimulation(0.5)), builtin_library())
}

pub fn hashed_service() -> ThreatCheckService {
    ThreatCheckService::with_components(Arc::new(HashedSimulation::default()), builtin_library())
}

pub fn service_with(simulation: impl SimulationSource + 'static) -> ThreatCheckService {
    ThreatCheckService::with_components(Arc::new(simulation), builtin_library())
}

pub fn indicator_categories(assessment: &Assessment) -> Vec<String> {
    assessment
        .analysis
        .as_ref()
        .map(|a| a.indicators.iter().map(|i| i.category.clone()).collect())
        .unwrap_or_default()
}

/// Write `content` to a unique file under the system temp dir
pub fn temp_rule_file(content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("scamguard_rules_{}.json", Uuid::new_v4().simple()));
    std::fs::write(&path, content).expect("write temp rule file");
    path
}
