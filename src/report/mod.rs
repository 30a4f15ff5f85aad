pub mod console;

pub use console::{print_summary, render_summary};
