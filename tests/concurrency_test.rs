// Integration tests for concurrent use of a shared service

use scamguard_core::InputKind;
use std::sync::Arc;

mod common;
use common::{hashed_service, SAMPLE_INPUTS};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_service_gives_same_verdicts() {
    let service = Arc::new(hashed_service());

    let expected: Vec<_> = SAMPLE_INPUTS
        .iter()
        .map(|(kind, input)| {
            let a = service.check(*kind, input);
            (a.threat_level, a.score, a.analysis.map(|x| x.raw_score))
        })
        .collect();

    let mut handles = Vec::new();
    for round in 0..8 {
        for (index, (kind, input)) in SAMPLE_INPUTS.iter().enumerate() {
            let service = Arc::clone(&service);
            let (kind, input) = (*kind, input.to_string());
            handles.push(tokio::task::spawn_blocking(move || {
                let a = service.check(kind, &input);
                (round, index, (a.threat_level, a.score, a.analysis.map(|x| x.raw_score)))
            }));
        }
    }

    for handle in handles {
        let (round, index, outcome) = handle.await.unwrap();
        assert_eq!(outcome, expected[index], "round {} input {}", round, index);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_global_entry_points_from_many_tasks() {
    let inputs = [
        (InputKind::Phone, "555-0100"),
        (InputKind::Url, "http://189.24.5.10/login"),
        (InputKind::Message, "URGENT: verify your account now, send your SSN to claim your prize"),
    ];

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let (kind, input) = inputs[i % inputs.len()];
            tokio::task::spawn_blocking(move || match kind {
                InputKind::Phone => scamguard_core::check_phone(input),
                InputKind::Url => scamguard_core::check_url(input),
                InputKind::Message => scamguard_core::check_message(input),
            })
        })
        .collect();

    for handle in handles {
        let assessment = handle.await.unwrap();
        assert!(!assessment.degraded);
        assert!(!assessment.details.is_empty());
    }
}
