// URL format validation with simulated hosting, DNS and reputation data

use chrono::{Duration, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::{
    DnsRecords, DomainInfo, HostingInfo, SecurityScan, UrlMetadata, ValidationMetadata,
    ValidationReport,
};
use crate::services::simulation::SimulationSource;
use crate::utils::patterns::{FAKE_DOMAIN_SUBSTRINGS, SUSPICIOUS_TLDS, TYPOSQUAT_MARKERS};

// =============================================================================
// STATIC REGEX PATTERNS
// =============================================================================

lazy_static! {
    /// Matches an explicit http or https scheme
    static ref SCHEME_PATTERN: Regex =
        Regex::new(r"(?i)^https?://").expect("Invalid scheme pattern regex");

    static ref IPV4_PATTERN: Regex =
        Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("Invalid IPv4 pattern regex");

    static ref LOCALHOST_PATTERN: Regex =
        Regex::new(r"^(localhost|127\.|0\.0\.0\.0$)").expect("Invalid localhost pattern regex");
}

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlFormatError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Missing host in URL")]
    MissingHost,
}

// =============================================================================
// CONSTANTS
// =============================================================================

const HOSTING_PROVIDERS: &[(&str, &str, &str)] = &[
    ("AWS (Amazon Web Services)", "Virginia", "USA"),
    ("Google Cloud", "Iowa", "USA"),
    ("Microsoft Azure", "Amsterdam", "Netherlands"),
    ("DigitalOcean", "New York", "USA"),
    ("Cloudflare", "San Francisco", "USA"),
    ("GoDaddy", "Arizona", "USA"),
    ("Bluehost", "Utah", "USA"),
    ("Unknown Provider", "Unknown", "Unknown"),
];

const REGISTRARS: &[&str] = &[
    "GoDaddy",
    "Namecheap",
    "Google Domains",
    "Network Solutions",
    "Cloudflare",
    "Tucows",
];

/// Hostname fragments that make a domain look freshly registered
const YOUNG_DOMAIN_MARKERS: &[&str] = &["verify", "secure", "urgent"];

const REDIRECT_TARGET: &str = "https://example-redirect.com";

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Prepend `https://` unless the input already carries an http(s) scheme
pub fn normalize_url_input(raw: &str) -> String {
    let trimmed = raw.trim();
    if SCHEME_PATTERN.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

pub fn parse_url_input(raw: &str) -> Result<Url, UrlFormatError> {
    let url = Url::parse(&normalize_url_input(raw))
        .map_err(|e| UrlFormatError::InvalidFormat(e.to_string()))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlFormatError::MissingHost),
    }
}

/// Lowercased hostname of a possibly scheme-less URL
pub fn extract_host(raw: &str) -> Option<String> {
    parse_url_input(raw)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.trim_matches(&['[', ']'][..]).to_lowercase()))
}

pub fn is_private_or_local_host(host: &str) -> bool {
    if IPV4_PATTERN.is_match(host) {
        let parts: Vec<u8> = host.split('.').filter_map(|s| s.parse().ok()).collect();
        if parts.len() == 4 {
            return matches!(
                (parts[0], parts[1]),
                (10, _) | (172, 16..=31) | (192, 168) | (127, _) | (169, 254)
            );
        }
    }
    LOCALHOST_PATTERN.is_match(host)
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate a URL and synthesize hosting, registration and scan data for it
pub fn validate_url(input: &str, sim: &dyn SimulationSource) -> ValidationReport {
    let url = match parse_url_input(input) {
        Ok(url) => url,
        Err(e) => {
            let mut report =
                ValidationReport::new(ValidationMetadata::Url(UrlMetadata::default()));
            report.warnings.push("Invalid URL format".to_string());
            report.details.push(e.to_string());
            return report;
        },
    };

    let domain = url.host_str().unwrap_or_default().to_lowercase();
    let protocol = url.scheme().to_string();
    let has_ssl = protocol == "https";

    let mut metadata = UrlMetadata {
        normalized_url: Some(url.to_string()),
        domain: domain.clone(),
        protocol,
        has_ssl,
        ..Default::default()
    };
    let mut details = Vec::new();
    let mut warnings = Vec::new();

    if !domain_exists(&domain, sim) {
        warnings.push("⚠ Domain does not appear to exist or is unreachable".to_string());
        details.push("Domain may be expired, suspended, or fake".to_string());
        return ValidationReport {
            is_valid: true,
            exists: false,
            metadata: ValidationMetadata::Url(metadata),
            details,
            warnings,
        };
    }

    // SSL
    if has_ssl {
        let ssl_valid = sim.chance(&domain, "ssl", 0.9);
        metadata.ssl_valid = Some(ssl_valid);
        if ssl_valid {
            details.push("✓ Valid SSL/TLS certificate detected".to_string());
            details.push("✓ Encrypted connection available".to_string());
        } else {
            warnings.push("⚠ SSL certificate issues detected".to_string());
        }
    } else {
        warnings.push("⚠ No SSL encryption - connection is not secure".to_string());
        details.push("Data transmitted may be visible to third parties".to_string());
    }

    if is_private_or_local_host(&domain) {
        warnings.push("⚠ Host points to a private or local network address".to_string());
    }

    let ip_address = fake_ip(&domain, sim);
    details.push(format!("IP Address: {}", ip_address));
    metadata.ip_address = Some(ip_address);

    let hosting = hosting_info(&domain);
    details.push(format!("Hosting: {}", hosting.provider));
    details.push(format!("Location: {}, {}", hosting.location, hosting.country));
    metadata.hosting = Some(hosting);

    let domain_info = simulate_domain_info(&domain, sim);
    details.push(format!("Registrar: {}", domain_info.registrar));
    details.push(format!(
        "Registered: {}",
        domain_info.registration_date.format("%m/%d/%Y")
    ));
    details.push(format!(
        "Expires: {}",
        domain_info.expiration_date.format("%m/%d/%Y")
    ));
    details.push(format!("Domain Age: {} days", domain_info.age_days));
    let age_days = domain_info.age_days;
    metadata.domain_info = Some(domain_info);

    metadata.dns_records = Some(DnsRecords {
        a_record: true,
        mx_record: sim.chance(&domain, "dns.mx", 0.7),
        txt_record: sim.chance(&domain, "dns.txt", 0.5),
    });

    let status_code = simulate_status_code(&domain, sim);
    metadata.status_code = Some(status_code);
    match status_code {
        200 => details.push("✓ Website is accessible (HTTP 200)".to_string()),
        300..=399 => {
            metadata.redirect = Some(REDIRECT_TARGET.to_string());
            warnings.push(format!(
                "⚠ Page redirects to another location ({})",
                status_code
            ));
        },
        400..=u16::MAX => {
            warnings.push(format!("⚠ Website returned error code {}", status_code))
        },
        _ => {},
    }

    let security = security_scan(&domain, sim);
    if security.malware {
        warnings.push("🚨 MALWARE DETECTED on this domain".to_string());
    }
    if security.phishing {
        warnings.push("🚨 PHISHING SITE - Do not enter credentials".to_string());
    }
    if security.spam {
        warnings.push("⚠ Domain associated with spam activities".to_string());
    }
    metadata.security = Some(security);

    let reputation = reputation_score(&metadata);
    details.push(format!("Domain Reputation Score: {}/100", reputation));
    metadata.reputation_score = Some(reputation);

    if age_days < 30 {
        warnings.push("⚠ Very new domain (less than 30 days old) - exercise caution".to_string());
    } else if age_days < 180 {
        warnings.push("⚠ Relatively new domain (less than 6 months old)".to_string());
    } else if age_days > 3650 {
        details.push(format!("✓ Established domain ({} years old)", age_days / 365));
    }

    if let Some(dot) = domain.rfind('.') {
        let tld = &domain[dot..];
        if SUSPICIOUS_TLDS.contains(&tld) {
            warnings.push(format!(
                "⚠ Domain uses {} TLD - commonly associated with malicious sites",
                tld
            ));
        }
    }

    debug!(
        domain = %domain,
        status_code,
        reputation,
        "URL validation complete"
    );

    ValidationReport {
        is_valid: true,
        exists: true,
        metadata: ValidationMetadata::Url(metadata),
        details,
        warnings,
    }
}

fn domain_exists(domain: &str, sim: &dyn SimulationSource) -> bool {
    let probability = if FAKE_DOMAIN_SUBSTRINGS.iter().any(|f| domain.contains(f)) {
        0.3
    } else if TYPOSQUAT_MARKERS.iter().any(|t| domain.contains(t)) {
        0.7
    } else {
        0.9
    };
    sim.chance(domain, "exists", probability)
}

fn host_hash(domain: &str) -> usize {
    domain.bytes().map(usize::from).sum()
}

fn fake_ip(domain: &str, sim: &dyn SimulationSource) -> String {
    let octets: Vec<String> = (0..4)
        .map(|i| sim.pick(domain, &format!("ip.{}", i), 256).to_string())
        .collect();
    octets.join(".")
}

fn hosting_info(domain: &str) -> HostingInfo {
    let (provider, location, country) = HOSTING_PROVIDERS[host_hash(domain) % HOSTING_PROVIDERS.len()];
    HostingInfo {
        provider: provider.to_string(),
        location: location.to_string(),
        country: country.to_string(),
    }
}

fn simulate_domain_info(domain: &str, sim: &dyn SimulationSource) -> DomainInfo {
    let max_days = if YOUNG_DOMAIN_MARKERS.iter().any(|m| domain.contains(m)) {
        90
    } else {
        3650
    };
    let age_days = sim.between(domain, "age", 1, max_days);
    let expires_in = sim.between(domain, "expiry", 30, 394);
    let today = Utc::now().date_naive();

    DomainInfo {
        registrar: REGISTRARS[host_hash(domain) % REGISTRARS.len()].to_string(),
        registration_date: today - Duration::days(i64::from(age_days)),
        expiration_date: today + Duration::days(i64::from(expires_in)),
        age_days,
    }
}

fn simulate_status_code(domain: &str, sim: &dyn SimulationSource) -> u16 {
    if domain.contains("error") || domain.contains("broken") {
        404
    } else if domain.contains("redirect") {
        301
    } else if sim.chance(domain, "status", 0.1) {
        404
    } else {
        200
    }
}

fn security_scan(domain: &str, sim: &dyn SimulationSource) -> SecurityScan {
    SecurityScan {
        malware: domain.contains("malware") || sim.chance(domain, "scan.malware", 0.02),
        phishing: domain.contains("paypa1")
            || domain.contains("verify-account")
            || sim.chance(domain, "scan.phishing", 0.05),
        spam: domain.contains("free-prize") || sim.chance(domain, "scan.spam", 0.1),
    }
}

/// 0-100, higher is better
fn reputation_score(metadata: &UrlMetadata) -> u8 {
    let mut score: i32 = 50;
    let age = metadata.domain_info.as_ref().map(|d| d.age_days);
    let security = metadata.security.unwrap_or_default();

    if metadata.has_ssl && metadata.ssl_valid == Some(true) {
        score += 20;
    }
    if age.is_some_and(|a| a > 365) {
        score += 20;
    }
    if metadata.security.is_some() && security.is_clean() {
        score += 10;
    }
    if metadata.status_code == Some(200) {
        score += 10;
    }

    if security.malware {
        score -= 50;
    }
    if security.phishing {
        score -= 40;
    }
    if !metadata.has_ssl {
        score -= 15;
    }
    if age.is_some_and(|a| a < 30) {
        score -= 20;
    }

    score.clamp(0, 100) as u8
}
