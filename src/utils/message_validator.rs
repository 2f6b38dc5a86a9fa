// Message content validation: extraction, language, sentiment and scoring

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::{
    ContentCounts, ExtractedContent, MessageMetadata, Sentiment, ValidationMetadata,
    ValidationReport,
};
use crate::utils::patterns::{count_terms, FINANCIAL_TERMS, PERSONAL_INFO_TERMS};

// =============================================================================
// STATIC REGEX PATTERNS
// =============================================================================

lazy_static! {
    pub static ref EMBEDDED_URL_PATTERN: Regex =
        Regex::new(r"(?i)https?://[^\s]+").expect("Invalid embedded URL regex");

    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex");

    static ref PHONE_PATTERN: Regex =
        Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
            .expect("Invalid phone regex");

    static ref URGENT_PATTERN: Regex =
        Regex::new(r"(?i)\b(urgent|immediately|now|asap|hurry|quick|deadline|expire)")
            .expect("Invalid urgent sentiment regex");

    static ref NEGATIVE_PATTERN: Regex = Regex::new(
        r"(?i)\b(problem|issue|suspended|locked|alert|warning|fraud|unauthorized)"
    )
    .expect("Invalid negative sentiment regex");

    static ref POSITIVE_PATTERN: Regex =
        Regex::new(r"(?i)\b(congratulations|winner|won|free|prize|bonus|reward)")
            .expect("Invalid positive sentiment regex");

    static ref TEXT_SPEAK_PATTERN: Regex =
        Regex::new(r"(?i)\b(ur|u|plz|thx|lol|omg)\b").expect("Invalid text-speak regex");

    static ref SENTENCE_SPLIT: Regex = Regex::new(r"[.!?]+").expect("Invalid sentence regex");
}

const LANGUAGE_WORDS: &[(&str, &[&str])] = &[
    ("English", &["the", "and", "is", "are", "you", "your", "have", "this"]),
    ("Spanish", &["el", "la", "de", "que", "es", "en", "un", "por"]),
    ("French", &["le", "de", "un", "être", "et", "à", "avoir", "que"]),
];

/// Every URL embedded in a message, in order of appearance
pub fn extract_urls(text: &str) -> Vec<String> {
    EMBEDDED_URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Analyze message content; messages are always structurally valid
pub fn validate_message(input: &str) -> ValidationReport {
    let extracted = ExtractedContent {
        urls: extract_urls(input),
        emails: EMAIL_PATTERN
            .find_iter(input)
            .map(|m| m.as_str().to_string())
            .collect(),
        phones: PHONE_PATTERN
            .find_iter(input)
            .map(|m| m.as_str().to_string())
            .collect(),
    };

    let contains = ContentCounts {
        urls: extracted.urls.len(),
        emails: extracted.emails.len(),
        phones: extracted.phones.len(),
        financial_terms: count_terms(input, FINANCIAL_TERMS),
        personal_info_requests: count_terms(input, PERSONAL_INFO_TERMS),
    };

    let sentiment = analyze_sentiment(input);
    let metadata = MessageMetadata {
        length: input.chars().count(),
        language: detect_language(input).to_string(),
        sentiment,
        contains,
        spam_score: spam_score(&contains, sentiment),
        readability_score: readability_score(input),
        encoding: "UTF-8".to_string(),
        extracted,
    };

    let mut details = vec![
        format!("Message length: {} characters", metadata.length),
        format!("Language: {}", metadata.language),
        format!("Sentiment: {}", metadata.sentiment),
        format!("Readability score: {}/100", metadata.readability_score),
        format!("Spam likelihood: {}/100", metadata.spam_score),
    ];

    let listings: [(&str, &str, &[String]); 3] = [
        ("📎", "URL(s)", metadata.extracted.urls.as_slice()),
        ("📧", "email address(es)", metadata.extracted.emails.as_slice()),
        ("📞", "phone number(s)", metadata.extracted.phones.as_slice()),
    ];
    for (icon, noun, items) in listings {
        if items.is_empty() {
            continue;
        }
        details.push(format!("{} Contains {} {}", icon, items.len(), noun));
        let label = match noun {
            "URL(s)" => "URL",
            "email address(es)" => "Email",
            _ => "Phone",
        };
        for (i, item) in items.iter().enumerate() {
            details.push(format!("  {} {}: {}", label, i + 1, item));
        }
    }

    let mut warnings = Vec::new();
    if contains.financial_terms > 2 {
        warnings.push("⚠ Multiple financial terms detected - verify sender".to_string());
    }
    if contains.personal_info_requests > 0 {
        warnings.push("🚨 Message requests personal information - likely phishing".to_string());
    }
    if sentiment == Sentiment::Urgent {
        warnings.push("⚠ Urgent/pressuring language detected".to_string());
    }
    if metadata.spam_score > 70 {
        warnings.push("🚨 High spam probability detected".to_string());
    } else if metadata.spam_score > 40 {
        warnings.push("⚠ Moderate spam indicators present".to_string());
    }
    if metadata.readability_score < 40 {
        warnings.push("⚠ Poor writing quality - may indicate spam".to_string());
    }

    debug!(
        length = metadata.length,
        spam_score = metadata.spam_score,
        sentiment = %sentiment,
        "Message validation complete"
    );

    ValidationReport {
        is_valid: true,
        // Messages have no existence concept
        exists: true,
        metadata: ValidationMetadata::Message(metadata),
        details,
        warnings,
    }
}

fn detect_language(text: &str) -> &'static str {
    let padded = format!(" {} ", text.to_lowercase());
    LANGUAGE_WORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| padded.contains(&format!(" {} ", w))))
        .map(|(language, _)| *language)
        .unwrap_or("English (assumed)")
}

fn analyze_sentiment(text: &str) -> Sentiment {
    if URGENT_PATTERN.is_match(text) {
        Sentiment::Urgent
    } else if NEGATIVE_PATTERN.is_match(text) {
        Sentiment::Negative
    } else if POSITIVE_PATTERN.is_match(text) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

/// 0-100, higher is worse
fn spam_score(contains: &ContentCounts, sentiment: Sentiment) -> u8 {
    let mut score: u32 = 0;
    if contains.urls > 2 {
        score += 20;
    }
    if contains.financial_terms > 1 {
        score += 25;
    }
    if contains.personal_info_requests > 0 {
        score += 30;
    }
    if sentiment == Sentiment::Urgent {
        score += 15;
    }
    if sentiment == Sentiment::Positive && contains.financial_terms > 0 {
        score += 10;
    }
    score.min(100) as u8
}

/// 0-100, higher is better
fn readability_score(text: &str) -> u8 {
    let words = text.split_whitespace().count();
    let sentences = SENTENCE_SPLIT
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);
    let avg_words = words as f64 / sentences as f64;

    let mut score: i32 = 100;
    if avg_words > 25.0 {
        score -= 20;
    }
    if avg_words < 5.0 {
        score -= 15;
    }
    score -= 10 * TEXT_SPEAK_PATTERN.find_iter(text).count() as i32;

    score.clamp(0, 100) as u8
}
