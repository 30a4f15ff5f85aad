pub mod error;
#[cfg(test)]
pub(crate) mod scripted;
pub mod traits;
pub mod web;

pub use error::{DriverError, DriverResult};
pub use traits::{BrowserSession, ElementSnapshot, Selector, SessionLauncher};
