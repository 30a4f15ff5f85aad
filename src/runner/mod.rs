pub mod scenarios;
pub mod state;

use colored::Colorize;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

use crate::driver::{DriverError, SessionLauncher};
use crate::report;
use crate::utils::config::SuiteConfig;
use crate::utils::probe::{LivenessProbe, ProbeError};
use scenarios::ScenarioContext;

pub use state::*;

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The liveness probe failed; no browser was launched
    ServerUnavailable(ProbeError),
    /// The browser could not be started; no scenario ran
    BrowserUnavailable(DriverError),
    /// Scenarios ran and a summary was produced
    Completed(SuiteReport),
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        matches!(self, RunOutcome::Completed(report) if report.all_passed())
    }

    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Run the cart display suite end to end.
///
/// Precheck, open a session, run every scenario, close the session, print
/// the summary. The session is closed exactly once whatever the scenarios do.
pub async fn run_suite(
    config: &SuiteConfig,
    probe: &dyn LivenessProbe,
    launcher: &dyn SessionLauncher,
) -> RunOutcome {
    // 1. Server must be up before any browser work
    if let Err(e) = probe.check(&config.base_url).await {
        match &e {
            ProbeError::BadStatus { .. } => {
                println!("{} Local server not responding correctly", "✗".red());
            }
            _ => println!(
                "{} Local server not running at {}. Please start with: {}",
                "✗".red(),
                config.base_url,
                start_hint(&config.base_url)
            ),
        }
        log::debug!("Liveness probe failed: {}", e);
        return RunOutcome::ServerUnavailable(e);
    }
    println!("{} Local server is running", "✓".green());

    // 2. Browser session
    let session = match launcher.launch(&config.browser).await {
        Ok(session) => session,
        Err(e) => {
            println!("Failed to setup browser: {}", e);
            println!("Please ensure Chromium and the Playwright driver are installed.");
            return RunOutcome::BrowserUnavailable(e);
        }
    };

    // 3. Scenarios, with a single safety net for anything that escapes
    let mut results = SuiteResults::new();
    let mut ctx = ScenarioContext::new(session.as_ref(), config, &mut results);
    let outcome = AssertUnwindSafe(scenarios::run_all(&mut ctx))
        .catch_unwind()
        .await;

    let escaped = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(panic) => Some(panic_message(&*panic)),
    };
    if let Some(error) = escaped {
        println!("Test failed with error: {}", error);
        log::error!("Scenario sequence aborted: {}", error);
        results.record(EXECUTION_RESULT, false);
        if config.snapshot {
            scenarios::capture_failure(session.as_ref(), config, EXECUTION_RESULT).await;
        }
    }

    // 4. Teardown
    if let Err(e) = session.close().await {
        log::warn!("Failed to close browser session: {}", e);
    }

    // 5. Summary
    let report = results.into_report();
    report::print_summary(&report);
    RunOutcome::Completed(report)
}

/// Command that serves the storefront on the port `base_url` points at
fn start_hint(base_url: &str) -> String {
    let port = reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.port_or_known_default())
        .unwrap_or(8000);
    format!("python -m http.server {}", port)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "scenario panicked".to_string()
    }
}
