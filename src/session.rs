use std::fmt;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::WaitResult;
use crate::locator::Locator;

/// The W3C WebDriver element identifier key.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> From<S> for SessionId
where
    S: Into<String>,
{
    fn from(value: S) -> Self {
        SessionId(value.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to an element in the current document.
///
/// Handles deserialize directly from the wire representation, which uses
/// the W3C element key (or the legacy `ELEMENT` key on older servers).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ElementHandle {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf", alias = "ELEMENT")]
    id: String,
}

impl ElementHandle {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Render this handle as a script argument, e.g. for
    /// `arguments[0].scrollIntoView(true);`.
    pub fn to_script_arg(&self) -> Value {
        json!({ W3C_ELEMENT_KEY: self.id })
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Snapshot of the interaction-relevant state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementState {
    pub displayed: bool,
    pub enabled: bool,
    pub selected: bool,
}

/// Reference to a pending native dialog, carrying its message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertHandle {
    text: String,
}

impl AlertHandle {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The browser-driving collaborator as seen by the wait layer.
///
/// Implementations own exactly one live browser session. Query methods are
/// read-only and idempotent; polling them repeatedly is safe. A session must
/// not be used concurrently from multiple threads - the `Send + Sync` bounds
/// exist so a session can be moved into the worker thread that owns it.
///
/// Contract details the wait layer relies on:
///
/// - `find_elements` returns an empty vector when nothing matches; it only
///   returns an error for transport or selector-evaluation failures.
/// - `pending_alert` returns `Ok(None)` when no dialog is open; the absence
///   of an alert is not an error.
/// - Element-scoped methods may fail with [`NoSuchElement`] or
///   [`StaleElement`] when the document has moved on since the handle was
///   obtained; the polling layer treats those as "not satisfied yet".
///
/// [`NoSuchElement`]: crate::error::WaitError::NoSuchElement
/// [`StaleElement`]: crate::error::WaitError::StaleElement
pub trait BrowserSession: fmt::Debug + Send + Sync {
    /// Return all elements currently matching the locator.
    fn find_elements(&self, locator: &Locator) -> WaitResult<Vec<ElementHandle>>;

    /// Return the displayed/enabled/selected state of an element.
    fn element_state(&self, element: &ElementHandle) -> WaitResult<ElementState>;

    /// Return the rendered text of an element.
    fn element_text(&self, element: &ElementHandle) -> WaitResult<String>;

    /// Return the current navigation URL.
    fn current_url(&self) -> WaitResult<String>;

    /// Execute a script in the page and return its result.
    fn execute_script(&self, script: &str, args: Vec<Value>) -> WaitResult<Value>;

    /// Return the pending native dialog, if one is open.
    fn pending_alert(&self) -> WaitResult<Option<AlertHandle>>;

    /// Click an element.
    fn click_element(&self, element: &ElementHandle) -> WaitResult<()>;

    /// Clear the contents of an editable element.
    fn clear_element(&self, element: &ElementHandle) -> WaitResult<()>;

    /// Type the given keys into an element.
    fn send_keys(&self, element: &ElementHandle, keys: &str) -> WaitResult<()>;

    /// Accept the pending native dialog.
    fn accept_alert(&self) -> WaitResult<()>;

    /// Dismiss the pending native dialog.
    fn dismiss_alert(&self) -> WaitResult<()>;

    /// Capture a screenshot of the current page as base64-encoded PNG data.
    fn screenshot_as_base64(&self) -> WaitResult<String>;
}
