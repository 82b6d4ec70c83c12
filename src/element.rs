use crate::error::WaitResult;
use crate::session::{BrowserSession, ElementHandle, ElementState};

/// A resolved element bound to the session it was found in.
///
/// `Element` structs are generally not constructed manually; they are
/// returned from the wait operations on [`SyncWaiter`] once a condition
/// has been observed to hold.
///
/// The wrapper borrows its session, so an `Element` cannot outlive the
/// browser session that produced it. The underlying handle may still go
/// stale if the document re-renders; interactions then fail with
/// [`StaleElement`] and the caller decides whether to re-wait.
///
/// [`SyncWaiter`]: crate::waiter::SyncWaiter
/// [`StaleElement`]: crate::error::WaitError::StaleElement
#[derive(Debug, Clone)]
pub struct Element<'a> {
    session: &'a dyn BrowserSession,
    handle: ElementHandle,
}

impl<'a> Element<'a> {
    pub fn new(session: &'a dyn BrowserSession, handle: ElementHandle) -> Self {
        Self { session, handle }
    }

    pub fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Query the displayed/enabled/selected state of this element.
    pub fn state(&self) -> WaitResult<ElementState> {
        self.session.element_state(&self.handle)
    }

    pub fn is_displayed(&self) -> WaitResult<bool> {
        Ok(self.state()?.displayed)
    }

    pub fn is_enabled(&self) -> WaitResult<bool> {
        Ok(self.state()?.enabled)
    }

    pub fn is_selected(&self) -> WaitResult<bool> {
        Ok(self.state()?.selected)
    }

    /// Get the rendered text of this element.
    pub fn text(&self) -> WaitResult<String> {
        self.session.element_text(&self.handle)
    }

    /// Click this element.
    pub fn click(&self) -> WaitResult<()> {
        self.session.click_element(&self.handle)
    }

    /// Clear the contents of this element.
    pub fn clear(&self) -> WaitResult<()> {
        self.session.clear_element(&self.handle)
    }

    /// Type the given keys into this element.
    pub fn send_keys(&self, keys: &str) -> WaitResult<()> {
        self.session.send_keys(&self.handle, keys)
    }

    /// Scroll this element into view.
    pub fn scroll_into_view(&self) -> WaitResult<()> {
        self.session.execute_script(
            "arguments[0].scrollIntoView(true);",
            vec![self.handle.to_script_arg()],
        )?;
        Ok(())
    }
}
