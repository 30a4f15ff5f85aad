//! Cart display scenarios.
//!
//! Every scenario drives the same session in order. Soft failures are
//! recorded and the sequence moves on; a `DriverError` returned from here
//! aborts the remaining scenarios and is turned into a single failure by the
//! caller.

use colored::Colorize;
use std::path::PathBuf;

use super::state::SuiteResults;
use crate::driver::{BrowserSession, DriverError, DriverResult, Selector};
use crate::utils::config::SuiteConfig;

pub const PRODUCTS_PAGE: &str = "Products page add to cart";
pub const NOTIFICATION: &str = "Notification display";
pub const INDEX_PAGE: &str = "Index page add to cart";
pub const CART_COUNT: &str = "Cart count update";
pub const QUICK_VIEW: &str = "Quick view add to cart";
pub const CART_ITEMS: &str = "Cart items display";

/// What the cart sidebar looked like after an add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Active,
    /// Visible but without the active marker
    Inactive,
    /// Never became visible within the reaction timeout
    Missing,
}

/// Shared state handed to every scenario
pub struct ScenarioContext<'a> {
    pub session: &'a dyn BrowserSession,
    pub config: &'a SuiteConfig,
    pub results: &'a mut SuiteResults,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(
        session: &'a dyn BrowserSession,
        config: &'a SuiteConfig,
        results: &'a mut SuiteResults,
    ) -> Self {
        Self {
            session,
            config,
            results,
        }
    }

    pub fn pass(&mut self, name: &str, message: &str) {
        println!("{} {}", "✓".green(), message);
        self.results.record(name, true);
    }

    pub async fn fail(&mut self, name: &str, message: &str) {
        println!("{} {}", "✗".red(), message);
        self.results.record(name, false);
        if self.config.snapshot {
            capture_failure(self.session, self.config, name).await;
        }
    }

    async fn check(&mut self, name: &str, passed: bool, ok: &str, not_ok: &str) {
        if passed {
            self.pass(name, ok);
        } else {
            self.fail(name, not_ok).await;
        }
    }

    /// Navigate to a catalogue page and wait for product cards to render.
    ///
    /// A timeout here propagates.
    async fn load_catalogue(&self, path: &str) -> DriverResult<()> {
        let url = self.config.page_url(path);
        log::debug!("Loading {}", url);
        self.session.goto(&url).await?;
        self.session
            .wait_for_present(
                &Selector::class(&self.config.dom.product_card),
                self.config.timeouts.load,
            )
            .await
    }

    async fn sidebar_state(&self) -> DriverResult<SidebarState> {
        let dom = &self.config.dom;
        let sidebar = self
            .session
            .wait_for_visible(
                &Selector::class(&dom.cart_sidebar),
                self.config.timeouts.reaction,
            )
            .await?;

        Ok(match sidebar {
            Some(el) if el.has_class(&dom.active_marker) => SidebarState::Active,
            Some(_) => SidebarState::Inactive,
            None => SidebarState::Missing,
        })
    }

    /// Record the sidebar outcome for `name`, phrased for `page_label`
    async fn record_sidebar(&mut self, name: &str, page_label: &str) -> DriverResult<()> {
        match self.sidebar_state().await? {
            SidebarState::Active => {
                self.pass(name, &format!("Cart sidebar opened on {}", page_label))
            }
            SidebarState::Inactive => {
                self.fail(name, &format!("Cart sidebar not opened on {}", page_label))
                    .await
            }
            SidebarState::Missing => {
                self.fail(name, &format!("Cart sidebar not found on {}", page_label))
                    .await
            }
        }
        Ok(())
    }
}

/// Run the scenario sequence in its fixed order
pub async fn run_all(ctx: &mut ScenarioContext<'_>) -> DriverResult<()> {
    products_page(ctx).await?;
    index_page(ctx).await?;
    cart_count(ctx).await?;

    if ctx.config.extended {
        quick_view(ctx).await?;
        cart_items(ctx).await?;
    }
    Ok(())
}

/// Add from the products listing: sidebar opens and a notification shows
pub async fn products_page(ctx: &mut ScenarioContext<'_>) -> DriverResult<()> {
    println!("Testing products page add to cart...");
    let config = ctx.config;
    let session = ctx.session;

    ctx.load_catalogue("products.html").await?;

    let add = Selector::class(&config.dom.add_to_cart);
    if session.count(&add).await? == 0 {
        ctx.fail(PRODUCTS_PAGE, "No add to cart buttons found").await;
        return Ok(());
    }
    session.click_nth(&add, 0).await?;

    ctx.record_sidebar(PRODUCTS_PAGE, "products page").await?;

    let notification = session
        .wait_for_visible(
            &Selector::class(&config.dom.notification),
            config.timeouts.reaction,
        )
        .await?;
    ctx.check(
        NOTIFICATION,
        notification.is_some(),
        "Notification displayed",
        "Notification not displayed",
    )
    .await;

    Ok(())
}

/// Add from the landing page: sidebar opens
pub async fn index_page(ctx: &mut ScenarioContext<'_>) -> DriverResult<()> {
    println!("\nTesting index page add to cart...");
    let config = ctx.config;
    let session = ctx.session;

    ctx.load_catalogue("index.html").await?;

    let add = Selector::class(&config.dom.add_to_cart);
    if session.count(&add).await? == 0 {
        ctx.fail(INDEX_PAGE, "No add to cart buttons found on index page")
            .await;
        return Ok(());
    }
    session.click_nth(&add, 0).await?;

    ctx.record_sidebar(INDEX_PAGE, "index page").await
}

/// A second add on the current page changes the cart counter.
///
/// Relies on whatever the cart already holds from the earlier scenarios.
pub async fn cart_count(ctx: &mut ScenarioContext<'_>) -> DriverResult<()> {
    println!("\nTesting cart count update...");
    let config = ctx.config;
    let session = ctx.session;

    let counter = Selector::class(&config.dom.cart_count);
    let initial = session.text_of(&counter).await?;
    println!("Initial cart count: {}", initial);

    let add = Selector::class(&config.dom.add_to_cart);
    if session.count(&add).await? < 2 {
        ctx.fail(CART_COUNT, "Not enough add to cart buttons for count test")
            .await;
        return Ok(());
    }
    session.click_nth(&add, 1).await?;
    tokio::time::sleep(config.timeouts.settle).await;

    let updated = session.text_of(&counter).await?;
    println!("Updated cart count: {}", updated);

    ctx.check(
        CART_COUNT,
        updated != initial,
        "Cart count updated correctly",
        "Cart count not updated",
    )
    .await;
    Ok(())
}

/// Add through the product quick-view modal
pub async fn quick_view(ctx: &mut ScenarioContext<'_>) -> DriverResult<()> {
    println!("\nTesting quick view add to cart...");
    let config = ctx.config;
    let session = ctx.session;
    let dom = &config.dom;

    ctx.load_catalogue("products.html").await?;

    let details = Selector::class(&dom.view_details);
    if session.count(&details).await? == 0 {
        ctx.fail(QUICK_VIEW, "No view details buttons found").await;
        return Ok(());
    }
    session.click_nth(&details, 0).await?;

    let modal = session
        .wait_for_visible(&Selector::class(&dom.quick_view_modal), config.timeouts.reaction)
        .await?;
    if modal.is_none() {
        ctx.fail(QUICK_VIEW, "Quick view modal not displayed").await;
        return Ok(());
    }

    let modal_add = Selector::class(&dom.modal_add_to_cart);
    if session.count(&modal_add).await? == 0 {
        ctx.fail(QUICK_VIEW, "No add to cart button in quick view modal")
            .await;
        return Ok(());
    }
    session.click_nth(&modal_add, 0).await?;

    ctx.record_sidebar(QUICK_VIEW, "quick view").await
}

/// The open sidebar lists cart items with a title and price
pub async fn cart_items(ctx: &mut ScenarioContext<'_>) -> DriverResult<()> {
    println!("\nTesting cart items display...");
    let config = ctx.config;
    let session = ctx.session;
    let dom = &config.dom;

    if ctx.sidebar_state().await? != SidebarState::Active {
        ctx.fail(CART_ITEMS, "Cart sidebar is not open").await;
        return Ok(());
    }

    let items = session.count(&Selector::class(&dom.cart_item)).await?;
    if items == 0 {
        ctx.fail(CART_ITEMS, "No items listed in cart sidebar").await;
        return Ok(());
    }

    let title = session.is_visible(&Selector::class(&dom.cart_item_title)).await?;
    let price = session.is_visible(&Selector::class(&dom.cart_item_price)).await?;
    ctx.check(
        CART_ITEMS,
        title && price,
        &format!("Cart sidebar lists {} item(s) with title and price", items),
        "Cart item title or price not visible",
    )
    .await;
    Ok(())
}

/// Save a screenshot for a failed result; problems are reported, never raised
pub(crate) async fn capture_failure(
    session: &dyn BrowserSession,
    config: &SuiteConfig,
    name: &str,
) {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let id = uuid::Uuid::new_v4().to_string();
    let filename = format!("fail_{}_{}_{}.png", slug(name), timestamp, &id[..8]);
    let path: PathBuf = config.output_dir.join(filename);

    let saved = async {
        let bytes = session.screenshot().await?;
        std::fs::create_dir_all(&config.output_dir)?;
        std::fs::write(&path, bytes)?;
        Ok::<(), DriverError>(())
    }
    .await;

    match saved {
        Ok(()) => println!("  {} Saved Screenshot: {}", "📸".green(), path.display()),
        Err(e) => println!("  {} Failed to take screenshot: {}", "⚠".yellow(), e),
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
