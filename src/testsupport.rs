//! Scriptable in-memory stand-in for a live browser session, used by the
//! unit tests to exercise poll loops without a WebDriver server.

use std::sync::Mutex;

use serde_json::Value;

use crate::error::{WaitError, WaitResult};
use crate::locator::Locator;
use crate::session::{AlertHandle, BrowserSession, ElementHandle, ElementState};

/// One scripted element. `present_after` is the find-call count from which
/// the element starts matching (0 = from the start); `stale_for` makes the
/// first N element-scoped queries fail with a stale-element signal.
#[derive(Debug, Clone)]
pub struct FakeElement {
    id: String,
    text: String,
    displayed: bool,
    enabled: bool,
    selected: bool,
    present_after: u32,
    stale_for: u32,
}

impl FakeElement {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            displayed: true,
            enabled: true,
            selected: false,
            present_after: 0,
            stale_for: 0,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    pub fn present_after(mut self, find_calls: u32) -> Self {
        self.present_after = find_calls;
        self
    }

    pub fn stale_for(mut self, queries: u32) -> Self {
        self.stale_for = queries;
        self
    }
}

#[derive(Debug)]
struct Inner {
    elements: Vec<(Locator, FakeElement)>,
    url: String,
    ready_state: String,
    ready_complete_after: Option<u32>,
    alert: Option<String>,
    alert_after: u32,
    invalid_locator: Option<Locator>,
    screenshot: String,

    find_calls: u32,
    ready_calls: u32,
    alert_calls: u32,
    scripts: Vec<String>,
    clicks: Vec<String>,
    cleared: Vec<String>,
    typed: Vec<(String, String)>,
    accepted_alerts: u32,
    dismissed_alerts: u32,
}

/// Scriptable [`BrowserSession`] double.
#[derive(Debug)]
pub struct FakeSession {
    inner: Mutex<Inner>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                elements: Vec::new(),
                url: "https://shop.example/".to_string(),
                ready_state: "complete".to_string(),
                ready_complete_after: None,
                alert: None,
                alert_after: 0,
                invalid_locator: None,
                screenshot: base64::encode(b"fake-png-bytes"),
                find_calls: 0,
                ready_calls: 0,
                alert_calls: 0,
                scripts: Vec::new(),
                clicks: Vec::new(),
                cleared: Vec::new(),
                typed: Vec::new(),
                accepted_alerts: 0,
                dismissed_alerts: 0,
            }),
        }
    }

    pub fn with_element(self, locator: Locator, element: FakeElement) -> Self {
        self.inner.lock().unwrap().elements.push((locator, element));
        self
    }

    pub fn with_url<S: Into<String>>(self, url: S) -> Self {
        self.inner.lock().unwrap().url = url.into();
        self
    }

    pub fn with_ready_state<S: Into<String>>(self, state: S) -> Self {
        self.inner.lock().unwrap().ready_state = state.into();
        self
    }

    /// Report `readyState == "complete"` only from the Nth ready-state query.
    pub fn with_ready_complete_after(self, queries: u32) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.ready_state = "loading".to_string();
            inner.ready_complete_after = Some(queries);
        }
        self
    }

    pub fn with_alert<S: Into<String>>(self, text: S) -> Self {
        self.inner.lock().unwrap().alert = Some(text.into());
        self
    }

    /// Make the alert appear only from the Nth alert query.
    pub fn with_alert_after<S: Into<String>>(self, queries: u32, text: S) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.alert = Some(text.into());
            inner.alert_after = queries;
        }
        self
    }

    /// Make `find_elements` fail fatally for the given locator.
    pub fn with_invalid_locator(self, locator: Locator) -> Self {
        self.inner.lock().unwrap().invalid_locator = Some(locator);
        self
    }

    pub fn with_screenshot<S: Into<String>>(self, base64_png: S) -> Self {
        self.inner.lock().unwrap().screenshot = base64_png.into();
        self
    }

    pub fn find_calls(&self) -> u32 {
        self.inner.lock().unwrap().find_calls
    }

    pub fn scripts(&self) -> Vec<String> {
        self.inner.lock().unwrap().scripts.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.inner.lock().unwrap().clicks.clone()
    }

    pub fn cleared(&self) -> Vec<String> {
        self.inner.lock().unwrap().cleared.clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().typed.clone()
    }

    pub fn accepted_alerts(&self) -> u32 {
        self.inner.lock().unwrap().accepted_alerts
    }

    pub fn dismissed_alerts(&self) -> u32 {
        self.inner.lock().unwrap().dismissed_alerts
    }
}

impl Inner {
    fn element_mut(&mut self, id: &str) -> WaitResult<&mut FakeElement> {
        let element = self
            .elements
            .iter_mut()
            .map(|(_, e)| e)
            .find(|e| e.id == id)
            .ok_or_else(|| WaitError::NoSuchElement(id.to_string()))?;
        if element.stale_for > 0 {
            element.stale_for -= 1;
            return Err(WaitError::StaleElement(id.to_string()));
        }
        Ok(element)
    }
}

impl BrowserSession for FakeSession {
    fn find_elements(&self, locator: &Locator) -> WaitResult<Vec<ElementHandle>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.invalid_locator.as_ref() == Some(locator) {
            return Err(WaitError::InvalidSelector(format!("{}", locator)));
        }
        inner.find_calls += 1;
        let calls = inner.find_calls;
        Ok(inner
            .elements
            .iter()
            .filter(|(l, e)| l == locator && calls >= e.present_after)
            .map(|(_, e)| ElementHandle::new(e.id.clone()))
            .collect())
    }

    fn element_state(&self, element: &ElementHandle) -> WaitResult<ElementState> {
        let mut inner = self.inner.lock().unwrap();
        let element = inner.element_mut(element.id())?;
        Ok(ElementState {
            displayed: element.displayed,
            enabled: element.enabled,
            selected: element.selected,
        })
    }

    fn element_text(&self, element: &ElementHandle) -> WaitResult<String> {
        let mut inner = self.inner.lock().unwrap();
        let element = inner.element_mut(element.id())?;
        Ok(element.text.clone())
    }

    fn current_url(&self) -> WaitResult<String> {
        Ok(self.inner.lock().unwrap().url.clone())
    }

    fn execute_script(&self, script: &str, _args: Vec<Value>) -> WaitResult<Value> {
        let mut inner = self.inner.lock().unwrap();
        inner.scripts.push(script.to_string());
        if script.contains("readyState") {
            inner.ready_calls += 1;
            let complete = match inner.ready_complete_after {
                Some(after) => inner.ready_calls >= after,
                None => inner.ready_state == "complete",
            };
            let state = if complete {
                "complete".to_string()
            } else {
                inner.ready_state.clone()
            };
            return Ok(Value::String(state));
        }
        Ok(Value::Null)
    }

    fn pending_alert(&self) -> WaitResult<Option<AlertHandle>> {
        let mut inner = self.inner.lock().unwrap();
        inner.alert_calls += 1;
        let calls = inner.alert_calls;
        match &inner.alert {
            Some(text) if calls >= inner.alert_after => Ok(Some(AlertHandle::new(text.clone()))),
            _ => Ok(None),
        }
    }

    fn click_element(&self, element: &ElementHandle) -> WaitResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.element_mut(element.id())?;
        let id = element.id().to_string();
        inner.clicks.push(id);
        Ok(())
    }

    fn clear_element(&self, element: &ElementHandle) -> WaitResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.element_mut(element.id())?;
        let id = element.id().to_string();
        inner.cleared.push(id);
        Ok(())
    }

    fn send_keys(&self, element: &ElementHandle, keys: &str) -> WaitResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.element_mut(element.id())?;
        let entry = (element.id().to_string(), keys.to_string());
        inner.typed.push(entry);
        Ok(())
    }

    fn accept_alert(&self) -> WaitResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.alert.take().is_none() {
            return Err(WaitError::NoSuchAlert("no alert open".to_string()));
        }
        inner.accepted_alerts += 1;
        Ok(())
    }

    fn dismiss_alert(&self) -> WaitResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.alert.take().is_none() {
            return Err(WaitError::NoSuchAlert("no alert open".to_string()));
        }
        inner.dismissed_alerts += 1;
        Ok(())
    }

    fn screenshot_as_base64(&self) -> WaitResult<String> {
        Ok(self.inner.lock().unwrap().screenshot.clone())
    }
}
