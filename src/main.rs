use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use cart_display_tester::driver::web::PlaywrightLauncher;
use cart_display_tester::utils::probe::HttpProbe;
use cart_display_tester::{run_suite, SuiteConfig};

#[derive(Parser)]
#[command(name = "cart-display-tester")]
#[command(version)]
#[command(about = "Checks that adding to cart opens the sidebar, notifies, and updates the count", long_about = None)]
struct Cli {
    /// Storefront origin (defaults to $CART_TEST_BASE_URL or http://localhost:8000)
    #[arg(long)]
    base_url: Option<String>,

    /// Show the browser window
    #[arg(long, default_value = "false")]
    headed: bool,

    /// Also run the quick-view and cart-items scenarios
    #[arg(long, default_value = "false")]
    extended: bool,

    /// Save a screenshot for every failed check
    #[arg(long, short = 's', default_value = "false")]
    snapshot: bool,

    /// Output directory for snapshots
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Wait for product cards to render (ms)
    #[arg(long, default_value = "10000")]
    load_timeout_ms: u64,

    /// Wait for sidebar/notification after a click (ms)
    #[arg(long, default_value = "5000")]
    reaction_timeout_ms: u64,

    /// Pause before re-reading the cart count (ms)
    #[arg(long, default_value = "1000")]
    settle_ms: u64,

    /// Server liveness probe timeout (ms)
    #[arg(long, default_value = "5000")]
    probe_timeout_ms: u64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> SuiteConfig {
        let mut config = SuiteConfig::default();
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if self.headed {
            config.browser.headless = false;
        }
        config.extended = self.extended;
        config.snapshot = self.snapshot;
        config.output_dir = self.output;
        config.timeouts.load = Duration::from_millis(self.load_timeout_ms);
        config.timeouts.reaction = Duration::from_millis(self.reaction_timeout_ms);
        config.timeouts.settle = Duration::from_millis(self.settle_ms);
        config.timeouts.probe = Duration::from_millis(self.probe_timeout_ms);
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = cli.into_config();

    println!("Cart Display Test Suite");
    println!("=======================");
    log::info!("Target: {}", config.base_url);

    let probe = HttpProbe::new(config.timeouts.probe)?;
    let outcome = run_suite(&config, &probe, &PlaywrightLauncher).await;

    std::process::exit(outcome.exit_code());
}
