pub mod generation;
pub mod preview;
pub mod run_log;

pub use generation::{GenerationService, RunSummary};
pub use run_log::RunLog;
