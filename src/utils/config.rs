use std::path::PathBuf;
use std::time::Duration;

/// Origin the storefront is expected to be served from
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Run configuration for the cart display suite
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Origin of the storefront under test (no trailing slash needed)
    pub base_url: String,

    /// Wait budgets used by the scenarios
    pub timeouts: Timeouts,

    /// Browser launch options
    pub browser: BrowserConfig,

    /// Class names the storefront is expected to expose
    pub dom: DomContract,

    /// Run the quick-view and cart-items scenarios after the core three
    pub extended: bool,

    /// Capture a screenshot for every failed result
    pub snapshot: bool,

    /// Directory for snapshots
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        let base_url =
            std::env::var("CART_TEST_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            timeouts: Timeouts::default(),
            browser: BrowserConfig::default(),
            dom: DomContract::default(),
            extended: false,
            snapshot: false,
            output_dir: PathBuf::from("./output"),
        }
    }
}

impl SuiteConfig {
    /// Join a site-relative path onto the base URL
    pub fn page_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Liveness probe request timeout
    pub probe: Duration,
    /// Initial page content (product cards) wait
    pub load: Duration,
    /// Post-click UI reactions (sidebar, notification, modal)
    pub reaction: Duration,
    /// Pause after the count-update click before re-reading the counter
    pub settle: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            probe: Duration::from_secs(5),
            load: Duration::from_secs(10),
            reaction: Duration::from_secs(5),
            settle: Duration::from_secs(1),
        }
    }
}

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit browser binary; discovered when unset
    pub executable: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        let headless = std::env::var("CART_TEST_HEADLESS")
            .map(|v| !(v == "false" || v == "0"))
            .unwrap_or(true);

        let executable = std::env::var("PLAYWRIGHT_CHROMIUM_EXECUTABLE_PATH")
            .ok()
            .map(PathBuf::from);

        Self {
            headless,
            viewport_width: 1920,
            viewport_height: 1080,
            executable,
        }
    }
}

/// Class names making up the storefront's DOM contract
#[derive(Debug, Clone)]
pub struct DomContract {
    pub product_card: String,
    pub add_to_cart: String,
    pub cart_sidebar: String,
    pub active_marker: String,
    pub notification: String,
    pub cart_count: String,
    pub view_details: String,
    pub quick_view_modal: String,
    pub modal_add_to_cart: String,
    pub cart_item: String,
    pub cart_item_title: String,
    pub cart_item_price: String,
}

impl Default for DomContract {
    fn default() -> Self {
        Self {
            product_card: "product-card".into(),
            add_to_cart: "add-to-cart-btn".into(),
            cart_sidebar: "cart-sidebar".into(),
            active_marker: "active".into(),
            notification: "notification".into(),
            cart_count: "cart-count".into(),
            view_details: "view-details-btn".into(),
            quick_view_modal: "quick-view-modal".into(),
            modal_add_to_cart: "modal-add-to-cart".into(),
            cart_item: "cart-item".into(),
            cart_item_title: "cart-item-title".into(),
            cart_item_price: "cart-item-price".into(),
        }
    }
}
