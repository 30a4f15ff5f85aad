use crate::runner::state::SuiteReport;
use colored::Colorize;

const RULE_WIDTH: usize = 50;

/// Render the end-of-run summary block
pub fn render_summary(report: &SuiteReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{}\nTEST RESULTS SUMMARY\n{}\n", rule, rule));

    for result in &report.results {
        let status = if result.passed {
            result.status_label().green().bold()
        } else {
            result.status_label().red().bold()
        };
        out.push_str(&format!("{}: {}\n", result.name, status));
    }

    let summary = &report.summary;
    out.push_str(&format!("\nPassed: {}/{}\n", summary.passed, summary.total));

    if summary.all_passed() {
        out.push_str(&format!("{} All tests passed!", "🎉"));
    } else {
        out.push_str(&format!("{} Some tests failed.", "❌"));
    }

    out
}

pub fn print_summary(report: &SuiteReport) {
    println!("{}", render_summary(report));
}
