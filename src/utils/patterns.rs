// Pattern library: per-kind detection rule groups and keyword lists
// Built-in tables are compiled once; a JSON rule file can replace them per kind

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::app_config::config;
use crate::models::{InputKind, Severity};
use crate::utils::engine_errors::{EngineError, EngineResult};
use crate::utils::url_validator::extract_host;

// =============================================================================
// KEYWORD LISTS
// =============================================================================

/// Substrings counted as financial vocabulary in messages
pub const FINANCIAL_TERMS: &[&str] = &[
    "$",
    "payment",
    "bank",
    "credit card",
    "account",
    "wire",
    "transfer",
    "paypal",
    "venmo",
    "bitcoin",
    "refund",
    "gift card",
    "prize",
    "winner",
];

/// Substrings that indicate a request for sensitive personal data
pub const PERSONAL_INFO_TERMS: &[&str] = &[
    "password",
    "ssn",
    "social security",
    "pin",
    "cvv",
    "date of birth",
    "mothers maiden",
    "verify",
    "confirm your",
    "account number",
];

/// Brands commonly targeted by typosquatting, each owning `<brand>.com`
pub const IMPERSONATED_BRANDS: &[&str] = &[
    "google",
    "amazon",
    "paypal",
    "microsoft",
    "apple",
    "facebook",
    "netflix",
];

pub const SUSPICIOUS_TLDS: &[&str] = &[".tk", ".ml", ".ga", ".cf", ".gq", ".xyz", ".top"];

/// Digit runs reserved for fiction or never assigned
pub const FAKE_PHONE_SUBSTRINGS: &[&str] =
    &["5550100", "5550199", "0000000", "1111111", "9999999"];

pub const FAKE_DOMAIN_SUBSTRINGS: &[&str] = &["example.com", "test.com", "fake.tk", "scam.ml"];

pub const TYPOSQUAT_MARKERS: &[&str] = &["paypa1", "arnaz0n", "micros0ft"];

pub const TOLL_FREE_PREFIXES: &[&str] = &["1800", "1888", "1877", "1866", "800", "888"];

pub const PREMIUM_PREFIXES: &[&str] = &["1900", "900"];

/// Digit sequences treated as a "sequential" phone pattern
pub const SEQUENTIAL_RUNS: &[&str] = &[
    "012", "123", "234", "345", "456", "567", "678", "789", "890",
];

// =============================================================================
// RULE DEFINITIONS
// =============================================================================

/// Which part of the input a rule is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// The whole trimmed input
    #[default]
    Input,
    /// The URL hostname; falls back to the input when no host can be parsed
    Host,
    /// The input with every non-digit removed
    Digits,
}

/// Serializable description of one rule group, as found in a rule file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroupConfig {
    pub name: String,
    pub weight: u32,
    pub severity: Severity,
    #[serde(default)]
    pub threat: Option<String>,
    pub indicator: String,
    pub description: String,
    #[serde(default)]
    pub scope: RuleScope,
    pub patterns: Vec<RuleConfig>,
}

/// A pattern entry; either a bare string or an object with its own scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    Pattern(String),
    Scoped {
        pattern: String,
        scope: RuleScope,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTableConfig {
    pub groups: Vec<RuleGroupConfig>,
}

/// Top-level rule file layout; kinds left out keep their built-in tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    #[serde(default)]
    pub phone: Option<RuleTableConfig>,
    #[serde(default)]
    pub url: Option<RuleTableConfig>,
    #[serde(default)]
    pub message: Option<RuleTableConfig>,
}

impl RuleSetConfig {
    fn tables(self) -> impl Iterator<Item = (InputKind, RuleTableConfig)> {
        [
            (InputKind::Phone, self.phone),
            (InputKind::Url, self.url),
            (InputKind::Message, self.message),
        ]
        .into_iter()
        .filter_map(|(kind, table)| table.map(|t| (kind, t)))
    }
}

// Compact static form of the built-in groups
struct GroupSpec {
    name: &'static str,
    weight: u32,
    severity: Severity,
    threat: Option<&'static str>,
    indicator: &'static str,
    description: &'static str,
    rules: &'static [(RuleScope, &'static str)],
}

impl GroupSpec {
    fn to_config(&self) -> RuleGroupConfig {
        RuleGroupConfig {
            name: self.name.to_string(),
            weight: self.weight,
            severity: self.severity,
            threat: self.threat.map(str::to_string),
            indicator: self.indicator.to_string(),
            description: self.description.to_string(),
            scope: RuleScope::Input,
            patterns: self
                .rules
                .iter()
                .map(|(scope, pattern)| RuleConfig::Scoped {
                    pattern: pattern.to_string(),
                    scope: *scope,
                })
                .collect(),
        }
    }
}

use RuleScope::{Digits, Host, Input};

const PHONE_GROUPS: &[GroupSpec] = &[
    GroupSpec {
        name: "spam",
        weight: 25,
        severity: Severity::Warning,
        threat: Some("Matches known spam number patterns"),
        indicator: "Spam Pattern Detected",
        description: "This number structure is commonly used by telemarketers",
        rules: &[
            (Digits, r"^1?(800|888|877|866|855|844|833)"),
            (Digits, r"0{6,}|1{6,}|2{6,}|3{6,}|4{6,}|5{6,}|6{6,}|7{6,}|8{6,}|9{6,}"),
            (Digits, r"^(000|111|999)"),
        ],
    },
    GroupSpec {
        name: "scam",
        weight: 40,
        severity: Severity::Danger,
        threat: Some("Associated with scam operations"),
        indicator: "Scam Risk",
        description: "Number format linked to fraudulent activities",
        rules: &[(Digits, r"^(234|268|473|809|876)"), (Digits, r"^1?900")],
    },
    GroupSpec {
        name: "spoofed",
        weight: 50,
        severity: Severity::Danger,
        threat: Some("Likely spoofed or fake number"),
        indicator: "Spoofing Detected",
        description: "Number appears to be falsified or manipulated",
        rules: &[(Digits, r"^1?(555|000|111|999)")],
    },
];

const URL_GROUPS: &[GroupSpec] = &[
    GroupSpec {
        name: "phishing",
        weight: 45,
        severity: Severity::Danger,
        threat: Some("Phishing attempt detected"),
        indicator: "Phishing Indicators",
        description: "URL contains common phishing keywords",
        rules: &[
            (Input, r"paypal.*verify"),
            (Input, r"amazon.*account.*suspend"),
            (Input, r"bank.*secure.*update"),
            (Input, r"apple.*id.*locked"),
            (Input, r"microsoft.*security.*alert"),
            (Input, r"crypto.*wallet.*verify"),
            (Input, r"urgent.*action.*required"),
        ],
    },
    GroupSpec {
        name: "suspicious",
        weight: 15,
        severity: Severity::Warning,
        threat: None,
        indicator: "Suspicious Structure",
        description: "URL has unusual formatting or characters",
        rules: &[
            (Host, r"^\d{1,3}(\.\d{1,3}){3}$"),
            (Host, r"bit\.ly|tinyurl|goo\.gl"),
            (Host, r"-"),
            (Host, r"[^a-z0-9.-]"),
        ],
    },
    GroupSpec {
        name: "dangerous",
        weight: 35,
        severity: Severity::Danger,
        threat: Some("Dangerous website indicators"),
        indicator: "High Risk Domain",
        description: "Domain associated with malicious activity",
        rules: &[
            (Host, r"\.(tk|ml|ga|cf)$"),
            (Input, r"download.*exe|install.*now"),
            (Input, r"click.*here.*prize"),
            (Input, r"congratulations.*winner"),
        ],
    },
];

const MESSAGE_GROUPS: &[GroupSpec] = &[
    GroupSpec {
        name: "phishing",
        weight: 35,
        severity: Severity::Danger,
        threat: Some("Phishing attempt detected"),
        indicator: "Phishing Language",
        description: "Message uses common phishing tactics",
        rules: &[
            (Input, r"verify.*account|confirm.*identity"),
            (Input, r"suspended.*account|locked.*account"),
            (Input, r"click.*link.*immediately|urgent.*action"),
            (Input, r"claim.*prize|you.*won"),
            (Input, r"refund.*pending|tax.*return"),
        ],
    },
    GroupSpec {
        name: "scam",
        weight: 40,
        severity: Severity::Danger,
        threat: Some("Financial scam indicators"),
        indicator: "Scam Content",
        description: "Message contains financial scam keywords",
        rules: &[
            (Input, r"send.*money|transfer.*funds|wire.*payment"),
            (Input, r"gift.*card|itunes.*card|prepaid.*card"),
            (Input, r"bitcoin|cryptocurrency|crypto.*wallet"),
            (Input, r"social.*security.*number|\bssn\b|bank.*account"),
            (Input, r"password|\bpin\b.*code|verification.*code"),
        ],
    },
    GroupSpec {
        name: "urgency",
        weight: 25,
        severity: Severity::Warning,
        threat: None,
        indicator: "Urgency Pressure",
        description: "Message uses pressure tactics to force quick action",
        rules: &[
            (Input, r"urgent|immediately|right.*now|\basap\b"),
            (Input, r"limited.*time|expires.*today|act.*now"),
            (Input, r"last.*chance|final.*notice|deadline"),
        ],
    },
    GroupSpec {
        name: "impersonation",
        weight: 30,
        severity: Severity::Danger,
        threat: Some("Entity impersonation detected"),
        indicator: "Impersonation",
        description: "Message claims to be from trusted organization",
        rules: &[
            (Input, r"\birs\b|\bfbi\b|police|government.*agency"),
            (Input, r"amazon|paypal|microsoft|apple|google"),
            (Input, r"bank|credit.*union|financial.*institution"),
        ],
    },
];

// =============================================================================
// COMPILED RULES
// =============================================================================

#[derive(Debug, Clone)]
pub struct DetectionRule {
    pub pattern: Regex,
    pub scope: RuleScope,
}

impl DetectionRule {
    pub fn compile(pattern: &str, scope: RuleScope) -> EngineResult<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern, scope })
    }

    pub fn is_match(&self, subjects: &RuleSubjects) -> bool {
        self.pattern.is_match(subjects.subject(self.scope))
    }
}

#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub name: String,
    pub weight: u32,
    pub severity: Severity,
    /// Threat line pushed when the group matches; some groups only add an indicator
    pub threat: Option<String>,
    pub indicator: String,
    pub description: String,
    pub rules: Vec<DetectionRule>,
}

impl RuleGroup {
    pub fn from_config(config: RuleGroupConfig) -> EngineResult<Self> {
        if config.patterns.is_empty() {
            return Err(EngineError::RuleLoad(format!(
                "rule group '{}' has no patterns",
                config.name
            )));
        }

        let group_scope = config.scope;
        let rules = config
            .patterns
            .iter()
            .map(|rule| match rule {
                RuleConfig::Pattern(p) => DetectionRule::compile(p, group_scope),
                RuleConfig::Scoped { pattern, scope } => DetectionRule::compile(pattern, *scope),
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            name: config.name,
            weight: config.weight,
            severity: config.severity,
            threat: config.threat,
            indicator: config.indicator,
            description: config.description,
            rules,
        })
    }

    /// Number of rules in this group that match
    pub fn match_count(&self, subjects: &RuleSubjects) -> usize {
        self.rules.iter().filter(|r| r.is_match(subjects)).count()
    }
}

/// The strings a rule can be matched against, derived once per input
#[derive(Debug, Clone)]
pub struct RuleSubjects {
    input: String,
    host: Option<String>,
    digits: String,
}

impl RuleSubjects {
    pub fn new(kind: InputKind, input: &str) -> Self {
        let host = match kind {
            InputKind::Url => extract_host(input),
            _ => None,
        };

        Self {
            input: input.to_string(),
            host,
            digits: input.chars().filter(|c| c.is_ascii_digit()).collect(),
        }
    }

    pub fn subject(&self, scope: RuleScope) -> &str {
        match scope {
            RuleScope::Input => &self.input,
            RuleScope::Host => self.host.as_deref().unwrap_or(&self.input),
            RuleScope::Digits => &self.digits,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

/// Outcome of one group against one input
#[derive(Debug, Clone, Copy)]
pub struct GroupMatch<'a> {
    pub group: &'a RuleGroup,
    pub matched: bool,
    pub match_count: usize,
}

/// Ordered rule groups for one input kind
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub kind: InputKind,
    pub groups: Vec<RuleGroup>,
}

impl RuleTable {
    pub fn from_config(kind: InputKind, config: RuleTableConfig) -> EngineResult<Self> {
        let groups = config
            .groups
            .into_iter()
            .map(RuleGroup::from_config)
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self { kind, groups })
    }

    fn builtin(kind: InputKind) -> EngineResult<Self> {
        let specs = match kind {
            InputKind::Phone => PHONE_GROUPS,
            InputKind::Url => URL_GROUPS,
            InputKind::Message => MESSAGE_GROUPS,
        };
        let config = RuleTableConfig {
            groups: specs.iter().map(GroupSpec::to_config).collect(),
        };
        Self::from_config(kind, config)
    }

    /// Every group in declaration order with its match outcome
    pub fn evaluate<'a>(&'a self, subjects: &RuleSubjects) -> Vec<GroupMatch<'a>> {
        self.groups
            .iter()
            .map(|group| {
                let match_count = group.match_count(subjects);
                GroupMatch {
                    group,
                    matched: match_count > 0,
                    match_count,
                }
            })
            .collect()
    }

    pub fn group(&self, name: &str) -> Option<&RuleGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

// =============================================================================
// PATTERN LIBRARY
// =============================================================================

#[derive(Debug, Clone)]
pub struct PatternLibrary {
    tables: HashMap<InputKind, RuleTable>,
}

static GLOBAL_LIBRARY: Lazy<Result<Arc<PatternLibrary>, String>> = Lazy::new(|| {
    let library = match config().rules_path.as_deref() {
        Some(path) => PatternLibrary::builtin_with_overrides(path),
        None => PatternLibrary::builtin(),
    };
    library.map(Arc::new).map_err(|e| e.to_string())
});

impl PatternLibrary {
    /// Compile the built-in tables for every kind
    pub fn builtin() -> EngineResult<Self> {
        let tables = InputKind::ALL
            .iter()
            .map(|kind| RuleTable::builtin(*kind).map(|t| (*kind, t)))
            .collect::<EngineResult<HashMap<_, _>>>()?;
        Ok(Self { tables })
    }

    /// Build a library from explicit tables; kinds without a table fail at lookup
    pub fn from_tables(tables: impl IntoIterator<Item = RuleTable>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.kind, t)).collect(),
        }
    }

    /// Built-in tables with the kinds present in `json` replaced
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let rule_set: RuleSetConfig = serde_json::from_str(json)?;
        let mut library = Self::builtin()?;
        for (kind, table) in rule_set.tables() {
            let table = RuleTable::from_config(kind, table)?;
            debug!(kind = %kind, groups = table.groups.len(), "Replacing built-in rule table");
            library.tables.insert(kind, table);
        }
        Ok(library)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let library = Self::from_json_str(&content)?;
        info!(
            "Loaded rule file {} ({} groups)",
            path.as_ref().display(),
            library.group_count()
        );
        Ok(library)
    }

    /// Load a rule file, falling back to the built-in tables if it cannot be used
    pub fn builtin_with_overrides(path: impl AsRef<Path>) -> EngineResult<Self> {
        match Self::from_file(path.as_ref()) {
            Ok(library) => Ok(library),
            Err(e) => {
                warn!(
                    "Failed to load rule file {}: {}. Using built-in rules",
                    path.as_ref().display(),
                    e
                );
                Self::builtin()
            },
        }
    }

    /// Process-wide library, compiled on first use
    pub fn global() -> EngineResult<Arc<PatternLibrary>> {
        GLOBAL_LIBRARY
            .as_ref()
            .map(Arc::clone)
            .map_err(|msg| EngineError::RuleLoad(msg.clone()))
    }

    pub fn table(&self, kind: InputKind) -> EngineResult<&RuleTable> {
        self.tables
            .get(&kind)
            .ok_or_else(|| EngineError::Internal(format!("no rule table for {}", kind)))
    }

    /// Ordered `(group, matched, match_count)` sequence for an input
    pub fn evaluate(&self, kind: InputKind, input: &str) -> EngineResult<Vec<(String, bool, usize)>> {
        let table = self.table(kind)?;
        let subjects = RuleSubjects::new(kind, input);
        Ok(table
            .evaluate(&subjects)
            .into_iter()
            .map(|m| (m.group.name.clone(), m.matched, m.match_count))
            .collect())
    }

    pub fn group_count(&self) -> usize {
        self.tables.values().map(|t| t.groups.len()).sum()
    }
}

/// Count how many of `terms` occur in `text`, case-insensitively
pub fn count_terms(text: &str, terms: &[&str]) -> usize {
    let lower = text.to_lowercase();
    terms.iter().filter(|term| contains_term(&lower, term)).count()
}

/// Word terms must start on a word boundary; short ones must also end on one
pub fn contains_term(haystack: &str, term: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric();
    let starts_with_word = term.chars().next().is_some_and(is_word);
    let check_end = starts_with_word && term.chars().count() < 4;

    haystack.match_indices(term).any(|(start, _)| {
        let before_ok = !starts_with_word
            || !haystack[..start].chars().next_back().is_some_and(is_word);
        let after_ok =
            !check_end || !haystack[start + term.len()..].chars().next().is_some_and(is_word);
        before_ok && after_ok
    })
}
