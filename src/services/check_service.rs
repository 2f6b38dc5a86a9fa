// Threat check service: validation, analysis and verdict for one input
// Entry points are total; failures come back as degraded assessments

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::app_config::config;
use crate::models::{Assessment, CheckRequest, InputKind, ValidationReport};
use crate::services::simulation::SimulationSource;
use crate::services::threat_analyzer::ThreatAnalyzer;
use crate::services::verdict::VerdictComposer;
use crate::utils::assessment_logger::AssessmentLogger;
use crate::utils::engine_errors::EngineResult;
use crate::utils::input_guard::InputGuard;
use crate::utils::message_validator::validate_message;
use crate::utils::patterns::PatternLibrary;
use crate::utils::phone_validator::validate_phone;
use crate::utils::url_validator::validate_url;

#[derive(Debug, Clone)]
pub struct ThreatCheckService {
    simulation: Arc<dyn SimulationSource>,
    analyzer: ThreatAnalyzer,
    log_assessments: bool,
}

impl ThreatCheckService {
    /// Build from the global configuration and rule library
    pub fn new() -> EngineResult<Self> {
        let settings = config();
        let library = PatternLibrary::global()?;

        Ok(Self {
            simulation: settings.simulation.build(),
            analyzer: ThreatAnalyzer::new(library),
            log_assessments: settings.log_assessments,
        })
    }

    pub fn with_components(
        simulation: Arc<dyn SimulationSource>,
        library: Arc<PatternLibrary>,
    ) -> Self {
        Self {
            simulation,
            analyzer: ThreatAnalyzer::new(library),
            log_assessments: false,
        }
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_assessments = enabled;
        self
    }

    pub fn analyzer(&self) -> &ThreatAnalyzer {
        &self.analyzer
    }

    /// Assess any input kind
    #[instrument(skip(self, input), fields(kind = %kind))]
    pub fn check(&self, kind: InputKind, input: &str) -> Assessment {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.assess(kind, input)));

        let assessment = match outcome {
            Ok(Ok(assessment)) => assessment,
            Ok(Err(e)) => {
                warn!(code = e.code(), "Assessment failed: {}", e);
                VerdictComposer::degraded(kind, input, &e.to_string())
            }
            Err(panic) => {
                let reason = panic_reason(panic.as_ref());
                warn!("Assessment panicked: {}", reason);
                VerdictComposer::degraded(kind, input, &reason)
            }
        };

        if self.log_assessments {
            AssessmentLogger::log(&assessment);
        }
        assessment
    }

    pub fn check_phone(&self, input: &str) -> Assessment {
        self.check(InputKind::Phone, input)
    }

    pub fn check_url(&self, input: &str) -> Assessment {
        self.check(InputKind::Url, input)
    }

    pub fn check_message(&self, input: &str) -> Assessment {
        self.check(InputKind::Message, input)
    }

    /// Apply the input guard, then assess
    pub fn check_request(&self, request: &CheckRequest) -> EngineResult<Assessment> {
        let input = InputGuard::check_request(request)?;
        Ok(self.check(request.kind, &input))
    }

    /// Run the validator only
    pub fn validate(&self, kind: InputKind, input: &str) -> ValidationReport {
        match kind {
            InputKind::Phone => validate_phone(input, self.simulation.as_ref()),
            InputKind::Url => validate_url(input, self.simulation.as_ref()),
            InputKind::Message => validate_message(input),
        }
    }

    fn assess(&self, kind: InputKind, input: &str) -> EngineResult<Assessment> {
        let validation = self.validate(kind, input);
        debug!(
            is_valid = validation.is_valid,
            exists = validation.exists,
            "Validation complete"
        );

        let analysis = self.analyzer.analyze(kind, input)?;
        debug!(
            risk_level = %analysis.risk_level,
            raw_score = analysis.raw_score,
            "Analysis complete"
        );

        Ok(VerdictComposer::compose(kind, input, validation, analysis))
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unexpected internal failure".to_string()
    }
}
