// As-you-type hints computed from partial input

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::InputKind;

lazy_static! {
    static ref IP_LITERAL: Regex =
        Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").expect("Invalid IP literal regex");
    static ref URGENCY_WORDS: Regex =
        Regex::new(r"(?i)urgent|immediately|act now").expect("Invalid urgency regex");
    static ref PHISHING_WORDS: Regex =
        Regex::new(r"(?i)click|verify|confirm|suspended").expect("Invalid phishing regex");
    static ref FINANCIAL_WORDS: Regex =
        Regex::new(r"(?i)\$\d+|money|prize|won").expect("Invalid financial regex");
    static ref LINK_SCHEME: Regex = Regex::new(r"https?://").expect("Invalid link regex");
}

const MIN_INSIGHT_CHARS: usize = 3;
const READY_DIGITS: usize = 10;
const REPEAT_RUN: usize = 4;
const SUFFICIENT_MESSAGE_CHARS: usize = 20;
const URL_KEYWORDS: [&str; 5] = ["paypal", "amazon", "bank", "secure", "verify"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveInsights {
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub live_indicators: Vec<String>,
}

impl LiveInsights {
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.suggestions.is_empty() && self.live_indicators.is_empty()
    }
}

/// Hints for partially typed input; anything shorter than three characters yields none
pub fn live_insights(kind: InputKind, partial: &str) -> LiveInsights {
    let mut insights = LiveInsights::default();
    let char_count = partial.chars().count();
    if char_count < MIN_INSIGHT_CHARS {
        return insights;
    }

    match kind {
        InputKind::Phone => {
            let digits = partial.chars().filter(|c| c.is_ascii_digit()).count();
            if digits > 0 {
                insights
                    .live_indicators
                    .push(format!("{} digits detected", digits));
            }
            if has_repeated_run(partial, REPEAT_RUN) {
                insights
                    .warnings
                    .push("Repeated digits detected - common in spam numbers".to_string());
            }
            if digits >= READY_DIGITS {
                insights.suggestions.push("Ready for analysis".to_string());
            } else if digits > 0 {
                insights.suggestions.push(format!(
                    "Need {} more digits for full analysis",
                    READY_DIGITS - digits
                ));
            }
        }
        InputKind::Url => {
            if !partial.starts_with("http") {
                insights
                    .warnings
                    .push("Missing protocol - will add https:// automatically".to_string());
            }
            if partial.contains("..") {
                insights
                    .warnings
                    .push("Suspicious URL pattern detected".to_string());
            }
            if IP_LITERAL.is_match(partial) {
                insights
                    .warnings
                    .push("IP address detected - unusual for legitimate sites".to_string());
            }
            let lower = partial.to_lowercase();
            for keyword in URL_KEYWORDS {
                if lower.contains(keyword) {
                    insights
                        .live_indicators
                        .push(format!("Contains \"{}\" - verify authenticity", keyword));
                }
            }
        }
        InputKind::Message => {
            insights
                .live_indicators
                .push(format!("{} characters", char_count));

            if URGENCY_WORDS.is_match(partial) {
                insights
                    .warnings
                    .push("Urgency language detected - common scam tactic".to_string());
            }
            if PHISHING_WORDS.is_match(partial) {
                insights
                    .warnings
                    .push("Phishing keywords detected".to_string());
            }
            if FINANCIAL_WORDS.is_match(partial) {
                insights
                    .warnings
                    .push("Financial content - verify sender carefully".to_string());
            }

            let links = LINK_SCHEME.find_iter(partial).count();
            if links > 0 {
                insights
                    .live_indicators
                    .push(format!("{} link(s) found", links));
            }
            if char_count >= SUFFICIENT_MESSAGE_CHARS {
                insights
                    .suggestions
                    .push("Sufficient content for detailed analysis".to_string());
            }
        }
    }

    insights
}

// Any character repeated `run` or more times in a row
fn has_repeated_run(text: &str, run: usize) -> bool {
    let mut previous = None;
    let mut length = 0;
    for c in text.chars() {
        if Some(c) == previous {
            length += 1;
        } else {
            previous = Some(c);
            length = 1;
        }
        if length >= run {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_has_no_insights() {
        assert!(live_insights(InputKind::Message, "hi").is_empty());
        assert!(live_insights(InputKind::Phone, "55").is_empty());
    }

    #[test]
    fn test_phone_insights() {
        let partial = live_insights(InputKind::Phone, "555-0000");
        assert_eq!(partial.live_indicators, vec!["7 digits detected"]);
        assert_eq!(partial.suggestions, vec!["Need 3 more digits for full analysis"]);
        assert_eq!(partial.warnings.len(), 1);

        let ready = live_insights(InputKind::Phone, "(212) 867-5309");
        assert_eq!(ready.suggestions, vec!["Ready for analysis"]);
        assert!(ready.warnings.is_empty());
    }

    #[test]
    fn test_url_insights() {
        let insights = live_insights(InputKind::Url, "192.168.0.1/paypal..verify");
        assert_eq!(insights.warnings.len(), 3);
        assert_eq!(
            insights.live_indicators,
            vec![
                "Contains \"paypal\" - verify authenticity",
                "Contains \"verify\" - verify authenticity",
            ]
        );

        let clean = live_insights(InputKind::Url, "https://example.org");
        assert!(clean.warnings.is_empty());
        assert!(clean.live_indicators.is_empty());
    }

    #[test]
    fn test_message_insights() {
        let insights = live_insights(
            InputKind::Message,
            "URGENT: you won $500, click https://a.example and https://b.example",
        );
        assert_eq!(insights.warnings.len(), 3);
        assert!(insights.live_indicators.contains(&"2 link(s) found".to_string()));
        assert_eq!(insights.suggestions, vec!["Sufficient content for detailed analysis"]);
    }

    #[test]
    fn test_repeated_run() {
        assert!(has_repeated_run("1233334", 4));
        assert!(!has_repeated_run("1233324", 4));
    }
}
