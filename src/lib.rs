pub mod driver;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use runner::{run_suite, RunOutcome};
pub use utils::config::SuiteConfig;
