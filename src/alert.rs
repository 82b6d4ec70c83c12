use crate::error::WaitResult;
use crate::session::{AlertHandle, BrowserSession};

/// A pending native dialog bound to the session it was observed on.
///
/// Returned by [`SyncWaiter::wait_for_alert`] once a dialog is open.
///
/// [`SyncWaiter::wait_for_alert`]: crate::waiter::SyncWaiter::wait_for_alert
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    session: &'a dyn BrowserSession,
    handle: AlertHandle,
}

impl<'a> Alert<'a> {
    pub fn new(session: &'a dyn BrowserSession, handle: AlertHandle) -> Self {
        Self { session, handle }
    }

    /// The message text the dialog was showing when it was observed.
    pub fn text(&self) -> &str {
        self.handle.text()
    }

    /// Accept the dialog (click OK).
    pub fn accept(self) -> WaitResult<()> {
        self.session.accept_alert()
    }

    /// Dismiss the dialog (click Cancel).
    pub fn dismiss(self) -> WaitResult<()> {
        self.session.dismiss_alert()
    }
}
