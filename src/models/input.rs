// Input kinds and check requests accepted by the engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::utils::engine_errors::EngineError;

/// The three kinds of untrusted input the engine can assess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Phone,
    Url,
    Message,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [InputKind::Phone, InputKind::Url, InputKind::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Phone => "phone",
            InputKind::Url => "url",
            InputKind::Message => "message",
        }
    }

    /// Message input has no existence concept
    pub fn has_existence(&self) -> bool {
        !matches!(self, InputKind::Message)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phone" | "tel" => Ok(InputKind::Phone),
            "url" | "website" | "link" => Ok(InputKind::Url),
            "message" | "text" | "sms" | "email" => Ok(InputKind::Message),
            other => Err(EngineError::InvalidInput(format!(
                "unknown input kind '{}'",
                other
            ))),
        }
    }
}

/// A caller-side check request, validated before it reaches the engine
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckRequest {
    pub kind: InputKind,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Input must be between 1 and 5000 characters"
    ))]
    pub input: String,
}

impl CheckRequest {
    pub fn new(kind: InputKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
        }
    }
}
