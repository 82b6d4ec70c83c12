use serde_json::{json, Value};

use crate::locator::Locator;
use crate::session::{ElementHandle, SessionId};

/// HTTP method of a wire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

/// A formatted wire request, ready for an HTTP client to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestData {
    pub method: RequestMethod,
    pub url: String,
    pub body: Option<Value>,
}

impl RequestData {
    pub fn new<S: Into<String>>(method: RequestMethod, url: S) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn add_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The WebDriver commands this crate issues against an existing session.
///
/// Session creation and teardown are deliberately absent: attaching to a
/// running session is the caller's entry point, and ending it belongs to
/// whatever created it.
#[derive(Debug, Clone)]
pub enum Command {
    FindElements(Locator),
    IsElementDisplayed(ElementHandle),
    IsElementEnabled(ElementHandle),
    IsElementSelected(ElementHandle),
    GetElementText(ElementHandle),
    GetCurrentUrl,
    ExecuteScript(String, Vec<Value>),
    GetAlertText,
    AcceptAlert,
    DismissAlert,
    ElementClick(ElementHandle),
    ElementClear(ElementHandle),
    ElementSendKeys(ElementHandle, String),
    TakeScreenshot,
}

impl Command {
    /// Format this command against the W3C endpoint layout for `session_id`.
    pub fn format_request(&self, session_id: &SessionId) -> RequestData {
        match self {
            Command::FindElements(locator) => {
                let (using, value) = locator.w3c_selector();
                RequestData::new(
                    RequestMethod::Post,
                    format!("/session/{}/elements", session_id),
                )
                .add_body(json!({ "using": using, "value": value }))
            }
            Command::IsElementDisplayed(element) => RequestData::new(
                RequestMethod::Get,
                format!("/session/{}/element/{}/displayed", session_id, element.id()),
            ),
            Command::IsElementEnabled(element) => RequestData::new(
                RequestMethod::Get,
                format!("/session/{}/element/{}/enabled", session_id, element.id()),
            ),
            Command::IsElementSelected(element) => RequestData::new(
                RequestMethod::Get,
                format!("/session/{}/element/{}/selected", session_id, element.id()),
            ),
            Command::GetElementText(element) => RequestData::new(
                RequestMethod::Get,
                format!("/session/{}/element/{}/text", session_id, element.id()),
            ),
            Command::GetCurrentUrl => {
                RequestData::new(RequestMethod::Get, format!("/session/{}/url", session_id))
            }
            Command::ExecuteScript(script, args) => RequestData::new(
                RequestMethod::Post,
                format!("/session/{}/execute/sync", session_id),
            )
            .add_body(json!({ "script": script, "args": args })),
            Command::GetAlertText => RequestData::new(
                RequestMethod::Get,
                format!("/session/{}/alert/text", session_id),
            ),
            Command::AcceptAlert => RequestData::new(
                RequestMethod::Post,
                format!("/session/{}/alert/accept", session_id),
            )
            .add_body(json!({})),
            Command::DismissAlert => RequestData::new(
                RequestMethod::Post,
                format!("/session/{}/alert/dismiss", session_id),
            )
            .add_body(json!({})),
            Command::ElementClick(element) => RequestData::new(
                RequestMethod::Post,
                format!("/session/{}/element/{}/click", session_id, element.id()),
            )
            .add_body(json!({})),
            Command::ElementClear(element) => RequestData::new(
                RequestMethod::Post,
                format!("/session/{}/element/{}/clear", session_id, element.id()),
            )
            .add_body(json!({})),
            Command::ElementSendKeys(element, keys) => RequestData::new(
                RequestMethod::Post,
                format!("/session/{}/element/{}/value", session_id, element.id()),
            )
            .add_body(json!({
                "text": keys,
                "value": keys.chars().collect::<Vec<char>>(),
            })),
            Command::TakeScreenshot => RequestData::new(
                RequestMethod::Get,
                format!("/session/{}/screenshot", session_id),
            ),
        }
    }
}
