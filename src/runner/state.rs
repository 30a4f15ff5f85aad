/// Name of the synthetic record added when the scenario sequence aborts
pub const EXECUTION_RESULT: &str = "Test execution";

/// Outcome of a single scenario check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
}

impl ScenarioResult {
    pub fn new(name: &str, passed: bool) -> Self {
        Self {
            name: name.to_string(),
            passed,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// Ordered results of one run
#[derive(Debug, Clone, Default)]
pub struct SuiteResults {
    results: Vec<ScenarioResult>,
}

impl SuiteResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, passed: bool) {
        self.results.push(ScenarioResult::new(name, passed));
    }

    pub fn summary(&self) -> SuiteSummary {
        SuiteSummary {
            passed: self.results.iter().filter(|r| r.passed).count(),
            total: self.results.len(),
        }
    }

    pub fn into_report(self) -> SuiteReport {
        let summary = self.summary();
        SuiteReport {
            results: self.results,
            summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteSummary {
    pub passed: usize,
    pub total: usize,
}

impl SuiteSummary {
    /// True iff every recorded result passed
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Final state of a run that reached the summary step
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub results: Vec<ScenarioResult>,
    pub summary: SuiteSummary,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.summary.all_passed()
    }
}
