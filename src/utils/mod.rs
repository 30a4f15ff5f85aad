pub mod browser_path;
pub mod config;
pub mod probe;

pub use config::SuiteConfig;
