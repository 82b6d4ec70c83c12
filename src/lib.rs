//! Syncwait provides explicit-wait / synchronization helpers for
//! WebDriver-based website UI testing, with a synchronous (i.e. not async)
//! interface.
//!
//! A remote document renders asynchronously, so a test that acts on an
//! element the instant a page is requested will race the browser. This
//! crate closes that gap: it polls the live session for a condition until
//! the condition holds or a deadline elapses, and every failure carries
//! the condition, locator and timings for diagnostics.
//!
//! ## Features
//!
//! - Deadline-based waits: element visible / clickable / present / absent,
//!   text in element, URL fragment, alert present, document ready
//! - Count-based retry for flaky lookups (a distinct failure policy from
//!   the deadline-based waits)
//! - Per-call "fluent" overrides of timeout and polling frequency
//! - Transient "not found yet" signals are retried; anything else fails fast
//! - Page-object interaction helpers that synchronize before acting
//! - Failure screenshots decoded and written to disk
//! - Works against any [`BrowserSession`] implementation; a WebDriver wire
//!   implementation that attaches to an existing session is included
//!
//! ## Example
//!
//! The following example assumes a WebDriver server at localhost:4444 with
//! an already-created session, and a demo storefront being driven by it.
//!
//! ```no_run
//! use syncwait::prelude::*;
//! use syncwait::RemoteSession;
//!
//! fn main() -> WaitResult<()> {
//!     let session = RemoteSession::attach("http://localhost:4444", "0ac0e048")?;
//!     let page = PageActions::new(&session, WaitConfig::default());
//!
//!     // Add an item to the cart; the click waits for clickability.
//!     page.click_element(&Locator::Css("button[data-sku='usb-c-cable']".into()))?;
//!
//!     // The cart updates asynchronously.
//!     let waiter = page.waiter();
//!     waiter.wait_for_text_in_element(&Locator::Css(".cart-badge".into()), "1", None)?;
//!
//!     // Head to checkout and wait for the navigation to land.
//!     page.click_element(&Locator::Id("checkout".into()))?;
//!     waiter.wait_for_url_contains("checkout", None)?;
//!     waiter.wait_for_page_load(None)?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::needless_doctest_main)]

pub use alert::Alert;
pub use command::{Command, RequestData, RequestMethod};
pub use conditions::{absorb_transient, Poll, SessionPredicate, WaitCondition, WaitValue};
pub use config::WaitConfig;
pub use element::Element;
pub use error::{WaitError, WaitResult};
pub use locator::Locator;
pub use page::PageActions;
pub use poller::{PollTicker, WaitPolicy};
pub use remote::{GenericRemoteSession, RemoteSession};
pub use screenshot::ScreenshotCapture;
pub use session::{
    AlertHandle, BrowserSession, ElementHandle, ElementState, SessionId, W3C_ELEMENT_KEY,
};
pub use waiter::{SyncWaiter, WaitOutcome};

pub mod prelude {
    pub use crate::config::WaitConfig;
    pub use crate::error::{WaitError, WaitResult};
    pub use crate::locator::Locator;
    pub use crate::page::PageActions;
    pub use crate::screenshot::ScreenshotCapture;
    pub use crate::session::BrowserSession;
    pub use crate::waiter::{SyncWaiter, WaitOutcome};
}

mod alert;
mod command;
mod conditions;
mod config;
mod element;
mod error;
pub mod http {
    pub mod connection_sync;
    pub mod nullclient_sync;
    pub mod reqwest_sync;
}
mod locator;
mod page;
mod poller;
mod remote;
mod screenshot;
mod session;
#[cfg(test)]
pub(crate) mod testsupport;
mod waiter;
