// Library exports for the scamguard assessment engine
// Phone numbers, URLs and messages in; structured threat verdicts out

pub mod app_config;
pub mod models;
pub mod services;
pub mod utils;

use once_cell::sync::Lazy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export commonly used types
pub use app_config::{config, ConfigError, EngineConfig, CONFIG};
pub use models::{
    Assessment, CheckRequest, Indicator, InputKind, RiskLevel, Severity, ThreatAnalysis,
    ThreatLevel, ValidationMetadata, ValidationReport,
};
pub use services::{
    live_insights, CheckHistory, LiveInsights, SimulationSource, ThreatCheckService,
    VerdictComposer,
};
pub use utils::{EngineError, EngineResult, InputGuard, PatternLibrary};

/// Install the fmt subscriber with an env filter; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config().rust_log.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

// Default service shared by the free functions below
static DEFAULT_SERVICE: Lazy<EngineResult<ThreatCheckService>> =
    Lazy::new(ThreatCheckService::new);

pub fn default_service() -> EngineResult<&'static ThreatCheckService> {
    DEFAULT_SERVICE
        .as_ref()
        .map_err(|e| EngineError::Internal(e.to_string()))
}

pub fn check(kind: InputKind, input: &str) -> Assessment {
    match DEFAULT_SERVICE.as_ref() {
        Ok(service) => service.check(kind, input),
        Err(e) => VerdictComposer::degraded(kind, input, &e.to_string()),
    }
}

pub fn check_phone(input: &str) -> Assessment {
    check(InputKind::Phone, input)
}

pub fn check_url(input: &str) -> Assessment {
    check(InputKind::Url, input)
}

pub fn check_message(input: &str) -> Assessment {
    check(InputKind::Message, input)
}

pub fn check_request(request: &CheckRequest) -> EngineResult<Assessment> {
    default_service()?.check_request(request)
}
