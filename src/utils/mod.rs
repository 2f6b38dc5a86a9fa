// Utility modules for the assessment engine

pub mod assessment_logger;
pub mod engine_errors;
pub mod input_guard;
pub mod message_validator;
pub mod patterns;
pub mod phone_validator;
pub mod url_validator;

pub use assessment_logger::{AssessmentLog, AssessmentLogger};
pub use engine_errors::{EngineError, EngineResult};
pub use input_guard::InputGuard;
pub use message_validator::{extract_urls, validate_message};
pub use patterns::{PatternLibrary, RuleGroup, RuleScope, RuleSetConfig, RuleTable};
pub use phone_validator::validate_phone;
pub use url_validator::{normalize_url_input, validate_url, UrlFormatError};
