pub mod analysis;
pub mod assessment;
pub mod input;
pub mod validation;

// Re-export common types
pub use analysis::{Indicator, RiskLevel, Severity, ThreatAnalysis};
pub use assessment::{Assessment, ThreatLevel};
pub use input::{CheckRequest, InputKind};
pub use validation::{
    ContentCounts, DnsRecords, DomainInfo, ExtractedContent, HostingInfo, LineType,
    MessageMetadata, PhoneMetadata, Sentiment, SecurityScan, UrlMetadata, ValidationMetadata,
    ValidationReport,
};
