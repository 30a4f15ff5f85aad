mod driver;

pub use driver::{PlaywrightLauncher, PlaywrightSession};
