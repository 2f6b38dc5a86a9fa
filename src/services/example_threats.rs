// Sample inputs callers can offer as "try an example"

use serde::Serialize;

use crate::models::{InputKind, ThreatLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExampleThreat {
    pub kind: InputKind,
    pub input: &'static str,
    pub label: &'static str,
    /// Level the sample is presented as; the engine may rate it differently
    pub presented_as: ThreatLevel,
}

const fn example(
    kind: InputKind,
    input: &'static str,
    label: &'static str,
    presented_as: ThreatLevel,
) -> ExampleThreat {
    ExampleThreat {
        kind,
        input,
        label,
        presented_as,
    }
}

pub static EXAMPLE_THREATS: &[ExampleThreat] = &[
    example(InputKind::Phone, "555-0100", "Known Scam", ThreatLevel::Dangerous),
    example(InputKind::Phone, "555-0150", "Suspicious Pattern", ThreatLevel::Suspicious),
    example(InputKind::Phone, "+1-555-1234", "Safe Example", ThreatLevel::Safe),
    example(
        InputKind::Url,
        "https://urgent-verify-account.com",
        "Phishing Site",
        ThreatLevel::Dangerous,
    ),
    example(InputKind::Url, "https://bit.ly/suspicious", "URL Shortener", ThreatLevel::Suspicious),
    example(InputKind::Url, "https://google.com", "Legitimate Site", ThreatLevel::Safe),
    example(
        InputKind::Message,
        "URGENT: Your account has been suspended. Click here now to verify: bit.ly/verify123",
        "Phishing Message",
        ThreatLevel::Dangerous,
    ),
    example(
        InputKind::Message,
        "Congratulations! You won a prize. Limited time offer, act now!",
        "Suspicious Spam",
        ThreatLevel::Suspicious,
    ),
    example(
        InputKind::Message,
        "Your package will be delivered tomorrow between 2-4pm. Track: amazon.com/track",
        "Normal Message",
        ThreatLevel::Safe,
    ),
];

pub fn examples_for(kind: InputKind) -> impl Iterator<Item = &'static ExampleThreat> {
    EXAMPLE_THREATS.iter().filter(move |e| e.kind == kind)
}
