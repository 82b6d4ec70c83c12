use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::locator::Locator;

/// Convenience type alias for all fallible operations in this crate.
pub type WaitResult<T> = Result<T, WaitError>;

/// Error taxonomy for waits and the underlying session operations.
///
/// The timeout family is condition-specific: each variant names the
/// condition that was never observed and carries the locator or fragment
/// involved, the elapsed wall-clock time and the configured timeout, so
/// callers can log or attach diagnostics without re-deriving context.
///
/// `NoSuchElement`, `StaleElement` and `NoSuchAlert` are transient signals:
/// during polling they mean "not satisfied yet" and are retried. Everything
/// else is fatal and propagates immediately.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("element {locator} was not visible after {elapsed:?} (timeout {timeout:?})")]
    ElementNotVisible {
        locator: Locator,
        elapsed: Duration,
        timeout: Duration,
    },
    #[error("element {locator} was not clickable after {elapsed:?} (timeout {timeout:?})")]
    ElementNotClickable {
        locator: Locator,
        elapsed: Duration,
        timeout: Duration,
    },
    #[error("element {locator} was not present after {elapsed:?} (timeout {timeout:?})")]
    ElementNotPresent {
        locator: Locator,
        elapsed: Duration,
        timeout: Duration,
    },
    #[error("element {locator} was still visible after {elapsed:?} (timeout {timeout:?})")]
    ElementStillVisible {
        locator: Locator,
        elapsed: Duration,
        timeout: Duration,
    },
    #[error("text {text:?} was not found in element {locator} after {elapsed:?} (timeout {timeout:?})")]
    TextNotFound {
        locator: Locator,
        text: String,
        elapsed: Duration,
        timeout: Duration,
    },
    #[error("current URL did not contain {fragment:?} after {elapsed:?} (timeout {timeout:?})")]
    UrlMismatch {
        fragment: String,
        elapsed: Duration,
        timeout: Duration,
    },
    #[error("no alert was present after {elapsed:?} (timeout {timeout:?})")]
    AlertNotPresent { elapsed: Duration, timeout: Duration },
    #[error("page did not finish loading after {elapsed:?} (timeout {timeout:?})")]
    PageLoadTimeout { elapsed: Duration, timeout: Duration },
    #[error("condition '{condition}' was not satisfied after {elapsed:?} (timeout {timeout:?})")]
    ConditionTimeout {
        condition: String,
        elapsed: Duration,
        timeout: Duration,
    },
    #[error("element {locator} was not found after {attempts} attempts")]
    ElementNotFound { locator: Locator, attempts: u32 },

    #[error("no such element: {0}")]
    NoSuchElement(String),
    #[error("stale element reference: {0}")]
    StaleElement(String),
    #[error("no such alert: {0}")]
    NoSuchAlert(String),
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
    #[error("webdriver returned status {status}: {error}: {message}")]
    Wire {
        status: u16,
        error: String,
        message: String,
    },
    #[error("error sending request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base64 screenshot data: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("screenshot i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error payload of a W3C WebDriver error response.
#[derive(Debug, Deserialize)]
struct WireErrorValue {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    value: WireErrorValue,
}

impl WaitError {
    /// Whether this error means "not satisfied yet" rather than a genuine
    /// failure. Transient errors are swallowed and retried inside poll
    /// loops; all other errors abort the wait immediately.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            WaitError::NoSuchElement(_) | WaitError::StaleElement(_) | WaitError::NoSuchAlert(_)
        )
    }

    /// Parse a W3C WebDriver error response body into a typed error.
    ///
    /// Well-known error codes map to their own variants so that the polling
    /// layer can classify them; anything unrecognized is preserved verbatim
    /// in a `Wire` error.
    pub fn parse_wire(status: u16, body: String) -> Self {
        match serde_json::from_str::<WireErrorBody>(&body) {
            Ok(parsed) => {
                let WireErrorValue { error, message } = parsed.value;
                match error.as_str() {
                    "no such element" => WaitError::NoSuchElement(message),
                    "stale element reference" => WaitError::StaleElement(message),
                    "no such alert" => WaitError::NoSuchAlert(message),
                    "invalid selector" => WaitError::InvalidSelector(message),
                    _ => WaitError::Wire {
                        status,
                        error,
                        message,
                    },
                }
            }
            Err(_) => WaitError::Wire {
                status,
                error: "unknown error".to_string(),
                message: body,
            },
        }
    }
}
