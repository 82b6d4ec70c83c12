use log::debug;

use crate::config::WaitConfig;
use crate::element::Element;
use crate::error::WaitResult;
use crate::locator::Locator;
use crate::poller::WaitPolicy;
use crate::conditions::WaitCondition;
use crate::session::BrowserSession;
use crate::waiter::{SyncWaiter, WaitOutcome};

/// The interaction helpers page objects chain their steps through.
///
/// Every action first synchronizes on the relevant condition - clicks wait
/// for clickability, typing waits for visibility - so page objects stay
/// free of ad-hoc sleeps. Concrete page objects (login page, cart page,
/// ...) are defined by the calling test suite, composed from these
/// helpers plus their own locators.
///
/// # Example:
/// ```no_run
/// use syncwait::prelude::*;
/// use syncwait::RemoteSession;
///
/// fn main() -> WaitResult<()> {
///     let session = RemoteSession::attach("http://localhost:4444", "0ac0e048")?;
///     let page = PageActions::new(&session, WaitConfig::default());
///
///     page.send_keys_to_element(&Locator::Id("search".into()), "wireless mouse")?;
///     page.click_element(&Locator::Css("button[type='submit']".into()))?;
///     page.wait_for_element_to_disappear(&Locator::Css(".spinner".into()))?;
///     println!("{}", page.element_text(&Locator::Css(".results-count".into()))?);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct PageActions<'a> {
    session: &'a dyn BrowserSession,
    waiter: SyncWaiter<'a>,
}

impl<'a> PageActions<'a> {
    pub fn new(session: &'a dyn BrowserSession, config: WaitConfig) -> Self {
        Self {
            session,
            waiter: SyncWaiter::new(session, config),
        }
    }

    /// The underlying waiter, for conditions with no interaction helper.
    pub fn waiter(&self) -> &SyncWaiter<'a> {
        &self.waiter
    }

    /// Find a single element, waiting for it to become visible.
    pub fn find_element(&self, locator: &Locator) -> WaitResult<Element<'a>> {
        self.waiter.wait_for_element_visible(locator, None)
    }

    /// Return all elements currently matching the locator, without waiting.
    pub fn find_elements(&self, locator: &Locator) -> WaitResult<Vec<Element<'a>>> {
        Ok(self
            .session
            .find_elements(locator)?
            .into_iter()
            .map(|handle| Element::new(self.session, handle))
            .collect())
    }

    /// Wait for the element to be clickable, then click it.
    pub fn click_element(&self, locator: &Locator) -> WaitResult<()> {
        let element = self.waiter.wait_for_element_clickable(locator, None)?;
        element.click()?;
        debug!("clicked element {}", locator);
        Ok(())
    }

    /// Wait for the element to be visible, clear it, then type into it.
    pub fn send_keys_to_element(&self, locator: &Locator, text: &str) -> WaitResult<()> {
        let element = self.find_element(locator)?;
        element.clear()?;
        element.send_keys(text)?;
        debug!("sent keys {:?} to element {}", text, locator);
        Ok(())
    }

    /// Wait for the element to be visible and return its rendered text.
    pub fn element_text(&self, locator: &Locator) -> WaitResult<String> {
        self.find_element(locator)?.text()
    }

    /// Non-throwing visibility check: a single immediate poll, with every
    /// failure reported as "not displayed".
    pub fn is_element_displayed(&self, locator: &Locator) -> bool {
        let condition = WaitCondition::ElementVisible(locator.clone());
        match self.waiter.wait_with_policy(&condition, WaitPolicy::NoWait) {
            Ok(WaitOutcome::Satisfied(_)) => true,
            Ok(WaitOutcome::TimedOut { .. }) => false,
            Err(e) => {
                debug!("element {} not displayed: {}", locator, e);
                false
            }
        }
    }

    /// Wait for specific text to show up in an element.
    pub fn wait_for_text_in_element(&self, locator: &Locator, text: &str) -> WaitResult<()> {
        self.waiter
            .wait_for_text_in_element(locator, text, None)
            .map(|_| ())
    }

    /// Wait for an element to disappear.
    pub fn wait_for_element_to_disappear(&self, locator: &Locator) -> WaitResult<()> {
        self.waiter
            .wait_for_element_to_disappear(locator, None)
            .map(|_| ())
    }

    /// Scroll the element into view.
    pub fn scroll_to_element(&self, locator: &Locator) -> WaitResult<()> {
        self.find_element(locator)?.scroll_into_view()
    }

    /// Scroll to the top of the page.
    pub fn scroll_to_top(&self) -> WaitResult<()> {
        self.session
            .execute_script("window.scrollTo(0, 0);", Vec::new())?;
        Ok(())
    }

    /// Scroll to the bottom of the page.
    pub fn scroll_to_bottom(&self) -> WaitResult<()> {
        self.session
            .execute_script("window.scrollTo(0, document.body.scrollHeight);", Vec::new())?;
        Ok(())
    }

    /// Wait for a native dialog and accept it.
    pub fn accept_alert(&self) -> WaitResult<()> {
        self.waiter.wait_for_alert(None)?.accept()
    }

    /// Wait for a native dialog and dismiss it.
    pub fn dismiss_alert(&self) -> WaitResult<()> {
        self.waiter.wait_for_alert(None)?.dismiss()
    }
}
