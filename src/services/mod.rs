// Services for the assessment engine
// Pipeline: validate -> analyze -> compose

pub mod check_service;
pub mod example_threats;
pub mod history;
pub mod insights;
pub mod simulation;
pub mod threat_analyzer;
pub mod verdict;

// Re-export commonly used services
pub use check_service::ThreatCheckService;
pub use example_threats::{examples_for, ExampleThreat, EXAMPLE_THREATS};
pub use history::CheckHistory;
pub use insights::{live_insights, LiveInsights};
pub use simulation::{
    FixedSimulation, HashedSimulation, RandomSimulation, SimulationMode, SimulationSource,
};
pub use threat_analyzer::ThreatAnalyzer;
pub use verdict::VerdictComposer;
