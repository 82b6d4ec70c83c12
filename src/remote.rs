use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::command::Command;
use crate::error::{WaitError, WaitResult};
use crate::http::connection_sync::{WireClientCreateParams, WireClientSync};
use crate::http::reqwest_sync::ReqwestClientSync;
use crate::locator::Locator;
use crate::session::{AlertHandle, BrowserSession, ElementHandle, ElementState, SessionId};

/// A [`BrowserSession`] backed by the WebDriver wire protocol.
///
/// For the full set of operations, see the [`BrowserSession`] trait.
pub type RemoteSession = GenericRemoteSession<ReqwestClientSync>;

/// [`RemoteSession`] generalized over the HTTP client used for the wire.
///
/// The session *attaches* to an already-running WebDriver session; creating
/// and quitting sessions is the calling harness's job, which also keeps a
/// dropped waiter from tearing down a browser the harness still owns.
///
/// Each session owns its connection outright - matching the one-session-
/// per-worker model - so no locking is involved anywhere on the wire path.
///
/// # Example:
/// ```no_run
/// use syncwait::prelude::*;
/// use syncwait::RemoteSession;
///
/// fn main() -> WaitResult<()> {
///     let session = RemoteSession::attach("http://localhost:4444", "0ac0e048")?;
///     println!("current url: {}", session.current_url()?);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct GenericRemoteSession<T: WireClientSync> {
    session_id: SessionId,
    conn: T,
}

impl<T: WireClientSync> GenericRemoteSession<T> {
    /// Attach to an existing session on the given WebDriver server.
    pub fn attach<S>(server_url: &str, session_id: S) -> WaitResult<Self>
    where
        S: Into<SessionId>,
    {
        let conn = T::create(WireClientCreateParams {
            server_url: server_url.to_string(),
            timeout: None,
        })?;
        Ok(Self {
            session_id: session_id.into(),
            conn,
        })
    }

    /// Wrap an already-constructed wire client.
    pub fn with_client<S>(conn: T, session_id: S) -> Self
    where
        S: Into<SessionId>,
    {
        Self {
            session_id: session_id.into(),
            conn,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Set the request timeout for the underlying HTTP client.
    pub fn set_request_timeout(&mut self, timeout: Duration) {
        self.conn.set_request_timeout(timeout);
    }

    /// Convenience wrapper for executing a wire command.
    fn cmd(&self, command: Command) -> WaitResult<Value> {
        self.conn.execute(&self.session_id, command)
    }
}

/// Unwrap the `value` field of a wire response into the expected type.
fn unwrap_value<V: DeserializeOwned>(response: &Value) -> WaitResult<V> {
    Ok(serde_json::from_value(response["value"].clone())?)
}

impl<T: WireClientSync> BrowserSession for GenericRemoteSession<T> {
    fn find_elements(&self, locator: &Locator) -> WaitResult<Vec<ElementHandle>> {
        let response = self.cmd(Command::FindElements(locator.clone()))?;
        unwrap_value(&response)
    }

    fn element_state(&self, element: &ElementHandle) -> WaitResult<ElementState> {
        let displayed = self.cmd(Command::IsElementDisplayed(element.clone()))?;
        let enabled = self.cmd(Command::IsElementEnabled(element.clone()))?;
        let selected = self.cmd(Command::IsElementSelected(element.clone()))?;
        Ok(ElementState {
            displayed: unwrap_value(&displayed)?,
            enabled: unwrap_value(&enabled)?,
            selected: unwrap_value(&selected)?,
        })
    }

    fn element_text(&self, element: &ElementHandle) -> WaitResult<String> {
        let response = self.cmd(Command::GetElementText(element.clone()))?;
        unwrap_value(&response)
    }

    fn current_url(&self) -> WaitResult<String> {
        let response = self.cmd(Command::GetCurrentUrl)?;
        unwrap_value(&response)
    }

    fn execute_script(&self, script: &str, args: Vec<Value>) -> WaitResult<Value> {
        let response = self.cmd(Command::ExecuteScript(script.to_string(), args))?;
        Ok(response["value"].clone())
    }

    fn pending_alert(&self) -> WaitResult<Option<AlertHandle>> {
        match self.cmd(Command::GetAlertText) {
            Ok(response) => Ok(Some(AlertHandle::new(unwrap_value::<String>(&response)?))),
            Err(WaitError::NoSuchAlert(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn click_element(&self, element: &ElementHandle) -> WaitResult<()> {
        self.cmd(Command::ElementClick(element.clone())).map(|_| ())
    }

    fn clear_element(&self, element: &ElementHandle) -> WaitResult<()> {
        self.cmd(Command::ElementClear(element.clone())).map(|_| ())
    }

    fn send_keys(&self, element: &ElementHandle, keys: &str) -> WaitResult<()> {
        self.cmd(Command::ElementSendKeys(element.clone(), keys.to_string()))
            .map(|_| ())
    }

    fn accept_alert(&self) -> WaitResult<()> {
        self.cmd(Command::AcceptAlert).map(|_| ())
    }

    fn dismiss_alert(&self) -> WaitResult<()> {
        self.cmd(Command::DismissAlert).map(|_| ())
    }

    fn screenshot_as_base64(&self) -> WaitResult<String> {
        let response = self.cmd(Command::TakeScreenshot)?;
        unwrap_value(&response)
    }
}
