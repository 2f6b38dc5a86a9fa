// Validation report produced by the format validators

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::input::InputKind;

// =============================================================================
// VALIDATION REPORT
// =============================================================================

/// Structural and simulated-existence findings for one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub exists: bool,
    pub metadata: ValidationMetadata,
    pub details: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Start an invalid, non-existent report around the given metadata
    pub fn new(metadata: ValidationMetadata) -> Self {
        Self {
            is_valid: false,
            exists: false,
            metadata,
            details: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Placeholder report attached to degraded assessments
    pub fn unavailable(kind: InputKind, reason: &str) -> Self {
        let mut report = Self::new(ValidationMetadata::empty(kind));
        report
            .details
            .push(format!("Validation unavailable: {}", reason));
        report
    }

    pub fn kind(&self) -> InputKind {
        self.metadata.kind()
    }

    /// Metadata flattened into a field-name to value map
    pub fn metadata_map(&self) -> BTreeMap<String, serde_json::Value> {
        match serde_json::to_value(&self.metadata) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        }
    }
}

/// Kind-specific metadata carried by a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValidationMetadata {
    Phone(PhoneMetadata),
    Url(UrlMetadata),
    Message(MessageMetadata),
}

impl ValidationMetadata {
    pub fn empty(kind: InputKind) -> Self {
        match kind {
            InputKind::Phone => ValidationMetadata::Phone(PhoneMetadata::default()),
            InputKind::Url => ValidationMetadata::Url(UrlMetadata::default()),
            InputKind::Message => ValidationMetadata::Message(MessageMetadata::default()),
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            ValidationMetadata::Phone(_) => InputKind::Phone,
            ValidationMetadata::Url(_) => InputKind::Url,
            ValidationMetadata::Message(_) => InputKind::Message,
        }
    }
}

// =============================================================================
// PHONE METADATA
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineType {
    Mobile,
    Landline,
    Voip,
    TollFree,
    Premium,
    Unknown,
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LineType::Mobile => "MOBILE",
            LineType::Landline => "LANDLINE",
            LineType::Voip => "VOIP",
            LineType::TollFree => "TOLL-FREE",
            LineType::Premium => "PREMIUM",
            LineType::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneMetadata {
    pub digits: String,
    pub format: String,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub carrier: Option<String>,
    pub line_type: Option<LineType>,
    pub is_active: Option<bool>,
    pub registration_date: Option<NaiveDate>,
}

// =============================================================================
// URL METADATA
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostingInfo {
    pub provider: String,
    pub location: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainInfo {
    pub registrar: String,
    pub registration_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub age_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecords {
    pub a_record: bool,
    pub mx_record: bool,
    pub txt_record: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScan {
    pub malware: bool,
    pub phishing: bool,
    pub spam: bool,
}

impl SecurityScan {
    pub fn is_clean(&self) -> bool {
        !self.malware && !self.phishing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlMetadata {
    pub normalized_url: Option<String>,
    pub domain: String,
    pub protocol: String,
    pub has_ssl: bool,
    pub ssl_valid: Option<bool>,
    pub ip_address: Option<String>,
    pub hosting: Option<HostingInfo>,
    pub domain_info: Option<DomainInfo>,
    pub dns_records: Option<DnsRecords>,
    pub status_code: Option<u16>,
    pub redirect: Option<String>,
    pub security: Option<SecurityScan>,
    pub reputation_score: Option<u8>,
}

// =============================================================================
// MESSAGE METADATA
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
    Urgent,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Urgent => "urgent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounts {
    pub urls: usize,
    pub emails: usize,
    pub phones: usize,
    pub financial_terms: usize,
    pub personal_info_requests: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub urls: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub length: usize,
    pub language: String,
    pub sentiment: Sentiment,
    pub contains: ContentCounts,
    pub extracted: ExtractedContent,
    pub encoding: String,
    pub readability_score: u8,
    pub spam_score: u8,
}
