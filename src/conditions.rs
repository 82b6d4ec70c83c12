use std::fmt;

use serde_json::Value;
use stringmatch::{Needle, StringMatch};

use crate::error::WaitResult;
use crate::locator::Locator;
use crate::session::{AlertHandle, BrowserSession, ElementHandle};

/// Outcome of evaluating a condition once against the live document.
///
/// A poll is deliberately three-way: not satisfied yet, satisfied with a
/// value, or a fatal error (the `Err` arm of the surrounding `Result`).
/// The retry-versus-abort decision is an explicit branch in the poll loop,
/// never a matter of inspecting exception types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    NotYet,
    Satisfied(WaitValue),
}

/// The value a satisfied condition yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitValue {
    Element(ElementHandle),
    Alert(AlertHandle),
    Done,
}

/// Caller-supplied predicate over the whole session, for conditions this
/// crate does not model.
pub type SessionPredicate = Box<dyn Fn(&dyn BrowserSession) -> WaitResult<bool> + Send + Sync>;

/// A predicate over current document/browser state, evaluated fresh on
/// every poll. Conditions are stateless; nothing is persisted between polls.
pub enum WaitCondition {
    /// An element matching the locator is present and displayed.
    ElementVisible(Locator),
    /// An element matching the locator is displayed and enabled.
    ElementClickable(Locator),
    /// An element matching the locator exists in the document, displayed or not.
    ElementPresent(Locator),
    /// No element matching the locator is displayed. Satisfied both when the
    /// element has been removed from the document and when it remains present
    /// but hidden - the two outcomes are equivalent.
    ElementAbsent(Locator),
    /// The rendered text of a matching element contains the given text.
    TextPresent { locator: Locator, text: String },
    /// The current navigation URL contains the given fragment.
    UrlContains(String),
    /// A native dialog is open.
    AlertPresent,
    /// `document.readyState` reports `complete`.
    PageLoadComplete,
    /// A caller-supplied predicate holds.
    Custom {
        description: String,
        predicate: SessionPredicate,
    },
}

/// Absorb transient "not found yet" signals from the session.
///
/// `Ok(None)` means the queried element vanished between polls; the caller
/// keeps polling. Any non-transient error propagates unchanged, so a
/// malformed locator or a dead session aborts the wait immediately.
pub fn absorb_transient<T>(result: WaitResult<T>) -> WaitResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_transient() => Ok(None),
        Err(e) => Err(e),
    }
}

impl WaitCondition {
    /// Build a custom condition from a predicate and a human-readable
    /// description for timeout diagnostics.
    pub fn custom<S, F>(description: S, predicate: F) -> Self
    where
        S: Into<String>,
        F: Fn(&dyn BrowserSession) -> WaitResult<bool> + Send + Sync + 'static,
    {
        WaitCondition::Custom {
            description: description.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate this condition once against the current document state.
    ///
    /// Read-only: no poll mutates the target element or the document.
    pub fn evaluate(&self, session: &dyn BrowserSession) -> WaitResult<Poll> {
        match self {
            WaitCondition::ElementVisible(locator) => {
                for handle in session.find_elements(locator)? {
                    if let Some(state) = absorb_transient(session.element_state(&handle))? {
                        if state.displayed {
                            return Ok(Poll::Satisfied(WaitValue::Element(handle)));
                        }
                    }
                }
                Ok(Poll::NotYet)
            }
            WaitCondition::ElementClickable(locator) => {
                for handle in session.find_elements(locator)? {
                    if let Some(state) = absorb_transient(session.element_state(&handle))? {
                        if state.displayed && state.enabled {
                            return Ok(Poll::Satisfied(WaitValue::Element(handle)));
                        }
                    }
                }
                Ok(Poll::NotYet)
            }
            WaitCondition::ElementPresent(locator) => {
                match session.find_elements(locator)?.into_iter().next() {
                    Some(handle) => Ok(Poll::Satisfied(WaitValue::Element(handle))),
                    None => Ok(Poll::NotYet),
                }
            }
            WaitCondition::ElementAbsent(locator) => {
                for handle in session.find_elements(locator)? {
                    // A handle that went stale mid-check counts as gone.
                    if let Some(state) = absorb_transient(session.element_state(&handle))? {
                        if state.displayed {
                            return Ok(Poll::NotYet);
                        }
                    }
                }
                Ok(Poll::Satisfied(WaitValue::Done))
            }
            WaitCondition::TextPresent { locator, text } => {
                let needle = StringMatch::from(text.as_str()).partial();
                for handle in session.find_elements(locator)? {
                    if let Some(rendered) = absorb_transient(session.element_text(&handle))? {
                        if needle.is_match(&rendered) {
                            return Ok(Poll::Satisfied(WaitValue::Done));
                        }
                    }
                }
                Ok(Poll::NotYet)
            }
            WaitCondition::UrlContains(fragment) => {
                if session.current_url()?.contains(fragment.as_str()) {
                    Ok(Poll::Satisfied(WaitValue::Done))
                } else {
                    Ok(Poll::NotYet)
                }
            }
            WaitCondition::AlertPresent => match session.pending_alert()? {
                Some(alert) => Ok(Poll::Satisfied(WaitValue::Alert(alert))),
                None => Ok(Poll::NotYet),
            },
            WaitCondition::PageLoadComplete => {
                let ready = session.execute_script("return document.readyState;", Vec::new())?;
                if ready.as_str() == Some("complete") {
                    Ok(Poll::Satisfied(WaitValue::Done))
                } else {
                    Ok(Poll::NotYet)
                }
            }
            WaitCondition::Custom { predicate, .. } => {
                if predicate(session)? {
                    Ok(Poll::Satisfied(WaitValue::Done))
                } else {
                    Ok(Poll::NotYet)
                }
            }
        }
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitCondition::ElementVisible(l) => write!(f, "element {} visible", l),
            WaitCondition::ElementClickable(l) => write!(f, "element {} clickable", l),
            WaitCondition::ElementPresent(l) => write!(f, "element {} present", l),
            WaitCondition::ElementAbsent(l) => write!(f, "element {} absent", l),
            WaitCondition::TextPresent { locator, text } => {
                write!(f, "text {:?} present in element {}", text, locator)
            }
            WaitCondition::UrlContains(fragment) => write!(f, "url contains {:?}", fragment),
            WaitCondition::AlertPresent => write!(f, "alert present"),
            WaitCondition::PageLoadComplete => write!(f, "page load complete"),
            WaitCondition::Custom { description, .. } => write!(f, "{}", description),
        }
    }
}

impl fmt::Debug for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WaitCondition({})", self)
    }
}
