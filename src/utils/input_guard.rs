// Caller-side input guard applied before a request reaches the engine
use lazy_static::lazy_static;
use regex::Regex;
use validator::Validate;

use crate::models::{CheckRequest, InputKind};
use crate::utils::engine_errors::{EngineError, EngineResult};
use crate::utils::url_validator::parse_url_input;

lazy_static! {
    static ref PHONE_CHARSET: Regex =
        Regex::new(r"^[\d\s+\-()]+$").expect("Invalid phone charset regex");
    static ref URL_SCHEME: Regex =
        Regex::new(r"(?i)^https?://").expect("Invalid URL scheme regex");
    static ref URL_DOMAIN_HINT: Regex =
        Regex::new(r"\w+\.\w+").expect("Invalid URL domain regex");
    static ref UNUSUAL_CHAR: Regex =
        Regex::new(r"[^\w\s.,!?@#$%&*()]").expect("Invalid unusual character regex");
}

pub struct InputGuard;

impl InputGuard {
    /// Validate a request and return its trimmed input
    pub fn check_request(request: &CheckRequest) -> EngineResult<String> {
        request.validate()?;
        Self::check(request.kind, &request.input)
    }

    /// Apply the per-kind precondition rules and return the trimmed input
    pub fn check(kind: InputKind, input: &str) -> EngineResult<String> {
        let trimmed = input.trim();
        let result = match kind {
            InputKind::Phone => Self::check_phone(trimmed),
            InputKind::Url => Self::check_url(trimmed),
            InputKind::Message => Self::check_message(trimmed),
        };
        result
            .map(|_| trimmed.to_string())
            .map_err(EngineError::InvalidInput)
    }

    fn check_phone(phone: &str) -> Result<(), String> {
        let len = phone.chars().count();
        if len == 0 {
            return Err("Phone number is required".to_string());
        }
        if len < 7 {
            return Err("Phone number is too short (minimum 7 digits)".to_string());
        }
        if len > 20 {
            return Err("Phone number is too long (maximum 20 characters)".to_string());
        }
        if phone.chars().filter(|c| c.is_ascii_digit()).count() < 7 {
            return Err("Phone number must contain at least 7 digits".to_string());
        }
        if !PHONE_CHARSET.is_match(phone) {
            return Err("Phone number contains invalid characters".to_string());
        }
        Ok(())
    }

    fn check_url(url: &str) -> Result<(), String> {
        let len = url.chars().count();
        if len == 0 {
            return Err("URL is required".to_string());
        }
        if len < 4 {
            return Err("URL is too short".to_string());
        }
        if len > 2048 {
            return Err("URL is too long (maximum 2048 characters)".to_string());
        }
        if !URL_SCHEME.is_match(url) && !URL_DOMAIN_HINT.is_match(url) {
            return Err("Please enter a valid URL (e.g., https://example.com)".to_string());
        }

        let parsed = parse_url_input(url).map_err(|_| "Invalid URL format".to_string())?;
        match parsed.host_str() {
            Some(host) if host.len() >= 3 => Ok(()),
            _ => Err("Invalid domain name".to_string()),
        }
    }

    fn check_message(message: &str) -> Result<(), String> {
        let len = message.chars().count();
        if len == 0 {
            return Err("Message is required".to_string());
        }
        if len < 5 {
            return Err("Message is too short (minimum 5 characters)".to_string());
        }
        if len > 5000 {
            return Err("Message is too long (maximum 5000 characters)".to_string());
        }
        if UNUSUAL_CHAR.find_iter(message).count() * 2 > len {
            return Err("Message contains too many unusual characters".to_string());
        }
        Ok(())
    }
}
