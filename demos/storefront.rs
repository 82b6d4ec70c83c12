//! Requires a WebDriver server on port 4444 (e.g. chromedriver --port=4444)
//! with an already-created session navigated to the demo storefront.
//!
//! Pass the session id as the first argument:
//!
//!     cargo run --example storefront -- 0ac0e048c19466fd369b0d2ebeaf4b72

use std::time::Duration;

use syncwait::prelude::*;
use syncwait::RemoteSession;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let session_id = std::env::args()
        .nth(1)
        .ok_or_else(|| color_eyre::eyre::eyre!("usage: storefront <session-id>"))?;

    let session = RemoteSession::attach("http://localhost:4444", session_id)?;
    let config = WaitConfig::default().with_wait_timeout(Duration::from_secs(10));
    let page = PageActions::new(&session, config);
    let shots = ScreenshotCapture::new(&session, "screenshots")?;

    let result = run_checkout(&page);
    if result.is_err() {
        // Diagnostics are the caller's call, not the waiter's.
        shots.capture_on_failure("storefront_checkout");
    }
    result?;

    Ok(())
}

fn run_checkout(page: &PageActions<'_>) -> WaitResult<()> {
    let waiter = page.waiter();

    // Search for a product and wait for the results grid to settle.
    page.send_keys_to_element(&Locator::Id("search".into()), "usb-c cable")?;
    page.click_element(&Locator::Css("button[type='submit']".into()))?;
    waiter.wait_for_element_to_disappear(&Locator::Css(".spinner".into()), None)?;

    // Product tiles render lazily; a bounded number of retries is the more
    // natural contract here than a deadline.
    let tile = waiter.retry_with_backoff(
        &Locator::Css(".product-tile[data-sku='usb-c-cable']".into()),
        5,
        Duration::from_secs(2),
    )?;
    tile.click()?;

    // Add to cart and confirm the badge update.
    page.click_element(&Locator::Id("add-to-cart".into()))?;
    waiter.wait_for_text_in_element(&Locator::Css(".cart-badge".into()), "1", None)?;

    // Check out.
    page.click_element(&Locator::Id("checkout".into()))?;
    waiter.wait_for_url_contains("checkout", None)?;
    waiter.wait_for_page_load(None)?;
    println!("order total: {}", page.element_text(&Locator::Css(".order-total".into()))?);

    Ok(())
}
