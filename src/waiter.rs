use std::time::Duration;

use log::{debug, error};

use crate::alert::Alert;
use crate::conditions::{absorb_transient, Poll, WaitCondition, WaitValue};
use crate::config::WaitConfig;
use crate::element::Element;
use crate::error::{WaitError, WaitResult};
use crate::locator::Locator;
use crate::poller::{PollTicker, WaitPolicy};
use crate::session::BrowserSession;

/// Terminal state of a poll loop.
///
/// `Satisfied` is only produced after the condition evaluated true on an
/// actual poll; `TimedOut` only after the deadline strictly elapsed with
/// the condition never observed true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    Satisfied(WaitValue),
    TimedOut { elapsed: Duration },
}

/// Blocks the calling thread until a condition holds against the live
/// document, or signals a condition-specific timeout failure.
///
/// The waiter is stateless across calls; each `wait_for_*` method runs an
/// independent poll loop. Defaults for timeout and poll interval come from
/// the [`WaitConfig`] supplied at construction and can be overridden per
/// call.
///
/// # Example:
/// ```no_run
/// use syncwait::prelude::*;
/// use syncwait::RemoteSession;
///
/// fn main() -> WaitResult<()> {
///     let session = RemoteSession::attach("http://localhost:4444", "0ac0e048")?;
///     let waiter = SyncWaiter::new(&session, WaitConfig::default());
///
///     // Wait until the cart badge shows up, then read it.
///     let badge = waiter.wait_for_element_visible(&Locator::Css(".cart-badge".into()), None)?;
///     println!("cart: {}", badge.text()?);
///
///     // Spinners must clear before the next step.
///     waiter.wait_for_element_to_disappear(&Locator::Css(".spinner".into()), None)?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SyncWaiter<'a> {
    session: &'a dyn BrowserSession,
    config: WaitConfig,
}

impl<'a> SyncWaiter<'a> {
    pub fn new(session: &'a dyn BrowserSession, config: WaitConfig) -> Self {
        Self { session, config }
    }

    pub fn config(&self) -> &WaitConfig {
        &self.config
    }

    /// Run a poll loop for `condition` under an explicit [`WaitPolicy`].
    ///
    /// This is the primitive the `wait_for_*` sugar builds on. Transient
    /// "not found yet" signals during evaluation keep the loop polling;
    /// any other evaluation error aborts immediately.
    pub fn wait_with_policy(
        &self,
        condition: &WaitCondition,
        policy: WaitPolicy,
    ) -> WaitResult<WaitOutcome> {
        let mut ticker = PollTicker::new(policy);
        loop {
            if let Poll::Satisfied(value) = condition.evaluate(self.session)? {
                debug!("condition '{}' satisfied after {:?}", condition, ticker.elapsed());
                return Ok(WaitOutcome::Satisfied(value));
            }
            if !ticker.tick() {
                return Ok(WaitOutcome::TimedOut {
                    elapsed: ticker.elapsed(),
                });
            }
        }
    }

    /// Wait for an arbitrary condition, returning the outcome rather than a
    /// typed error. `timeout` and `poll_interval` default to the configured
    /// values when omitted ("fluent" per-call overrides).
    pub fn wait(
        &self,
        condition: &WaitCondition,
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
    ) -> WaitResult<WaitOutcome> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        let interval = poll_interval.unwrap_or(self.config.poll_interval);
        self.wait_with_policy(condition, WaitPolicy::TimeoutWithInterval(timeout, interval))
    }

    /// Wait for an arbitrary condition and fail with a generic
    /// [`ConditionTimeout`] if it is never observed. Most callers want one
    /// of the condition-specific `wait_for_*` methods instead; this is the
    /// entry point for [`WaitCondition::custom`] predicates.
    ///
    /// [`ConditionTimeout`]: crate::error::WaitError::ConditionTimeout
    pub fn wait_until(
        &self,
        condition: &WaitCondition,
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
    ) -> WaitResult<WaitValue> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        match self.wait(condition, Some(timeout), poll_interval)? {
            WaitOutcome::Satisfied(value) => Ok(value),
            WaitOutcome::TimedOut { elapsed } => {
                error!("condition '{}' not satisfied within {:?}", condition, timeout);
                Err(WaitError::ConditionTimeout {
                    condition: condition.to_string(),
                    elapsed,
                    timeout,
                })
            }
        }
    }

    /// Wait for an element to be visible.
    pub fn wait_for_element_visible(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> WaitResult<Element<'a>> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        let condition = WaitCondition::ElementVisible(locator.clone());
        let outcome = self.deadline_wait(&condition, timeout, self.config.poll_interval)?;
        self.require_element(outcome, |elapsed| {
            error!("element {} not visible within {:?}", locator, timeout);
            WaitError::ElementNotVisible {
                locator: locator.clone(),
                elapsed,
                timeout,
            }
        })
    }

    /// Wait for an element to be clickable (displayed and enabled).
    pub fn wait_for_element_clickable(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> WaitResult<Element<'a>> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        let condition = WaitCondition::ElementClickable(locator.clone());
        let outcome = self.deadline_wait(&condition, timeout, self.config.poll_interval)?;
        self.require_element(outcome, |elapsed| {
            error!("element {} not clickable within {:?}", locator, timeout);
            WaitError::ElementNotClickable {
                locator: locator.clone(),
                elapsed,
                timeout,
            }
        })
    }

    /// Wait for an element to be present in the document, displayed or not.
    pub fn wait_for_element_present(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> WaitResult<Element<'a>> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        self.present_wait(locator, timeout, self.config.poll_interval)
    }

    /// Presence wait with a caller-chosen polling frequency.
    pub fn fluent_wait(
        &self,
        locator: &Locator,
        timeout: Duration,
        poll_interval: Duration,
    ) -> WaitResult<Element<'a>> {
        self.present_wait(locator, timeout, poll_interval)
    }

    /// Wait for an element to disappear. Satisfied both when the element is
    /// removed from the document and when it remains present but hidden.
    pub fn wait_for_element_to_disappear(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> WaitResult<bool> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        let condition = WaitCondition::ElementAbsent(locator.clone());
        match self.deadline_wait(&condition, timeout, self.config.poll_interval)? {
            WaitOutcome::Satisfied(_) => Ok(true),
            WaitOutcome::TimedOut { elapsed } => {
                error!("element {} did not disappear within {:?}", locator, timeout);
                Err(WaitError::ElementStillVisible {
                    locator: locator.clone(),
                    elapsed,
                    timeout,
                })
            }
        }
    }

    /// Wait for the rendered text of a matching element to contain `text`.
    pub fn wait_for_text_in_element(
        &self,
        locator: &Locator,
        text: &str,
        timeout: Option<Duration>,
    ) -> WaitResult<bool> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        let condition = WaitCondition::TextPresent {
            locator: locator.clone(),
            text: text.to_string(),
        };
        match self.deadline_wait(&condition, timeout, self.config.poll_interval)? {
            WaitOutcome::Satisfied(_) => Ok(true),
            WaitOutcome::TimedOut { elapsed } => {
                error!(
                    "text {:?} not found in element {} within {:?}",
                    text, locator, timeout
                );
                Err(WaitError::TextNotFound {
                    locator: locator.clone(),
                    text: text.to_string(),
                    elapsed,
                    timeout,
                })
            }
        }
    }

    /// Wait for the current URL to contain `fragment`.
    pub fn wait_for_url_contains(
        &self,
        fragment: &str,
        timeout: Option<Duration>,
    ) -> WaitResult<bool> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        let condition = WaitCondition::UrlContains(fragment.to_string());
        match self.deadline_wait(&condition, timeout, self.config.poll_interval)? {
            WaitOutcome::Satisfied(_) => Ok(true),
            WaitOutcome::TimedOut { elapsed } => {
                error!("URL did not contain {:?} within {:?}", fragment, timeout);
                Err(WaitError::UrlMismatch {
                    fragment: fragment.to_string(),
                    elapsed,
                    timeout,
                })
            }
        }
    }

    /// Wait for a native dialog to open.
    pub fn wait_for_alert(&self, timeout: Option<Duration>) -> WaitResult<Alert<'a>> {
        let timeout = timeout.unwrap_or(self.config.wait_timeout);
        match self.deadline_wait(&WaitCondition::AlertPresent, timeout, self.config.poll_interval)? {
            WaitOutcome::Satisfied(WaitValue::Alert(handle)) => {
                Ok(Alert::new(self.session, handle))
            }
            WaitOutcome::Satisfied(_) => unreachable!("alert condition yielded a non-alert value"),
            WaitOutcome::TimedOut { elapsed } => {
                error!("no alert present within {:?}", timeout);
                Err(WaitError::AlertNotPresent { elapsed, timeout })
            }
        }
    }

    /// Wait for the document-ready signal. Defaults to the configured
    /// page-load timeout rather than the element-wait timeout.
    pub fn wait_for_page_load(&self, timeout: Option<Duration>) -> WaitResult<bool> {
        let timeout = timeout.unwrap_or(self.config.page_load_timeout);
        match self.deadline_wait(
            &WaitCondition::PageLoadComplete,
            timeout,
            self.config.poll_interval,
        )? {
            WaitOutcome::Satisfied(_) => Ok(true),
            WaitOutcome::TimedOut { elapsed } => {
                error!("page did not finish loading within {:?}", timeout);
                Err(WaitError::PageLoadTimeout { elapsed, timeout })
            }
        }
    }

    /// Count-based retry: attempt a direct, non-throwing lookup up to
    /// `max_attempts` times, sleeping `delay` between attempts, and return
    /// the first displayed match.
    ///
    /// This is a distinct failure policy from the deadline-based waits: the
    /// bound is a number of attempts, not wall-clock time, and the total
    /// sleep never exceeds `(max_attempts - 1) x delay`.
    pub fn retry_with_backoff(
        &self,
        locator: &Locator,
        max_attempts: u32,
        delay: Duration,
    ) -> WaitResult<Element<'a>> {
        if max_attempts > 0 {
            let mut ticker =
                PollTicker::new(WaitPolicy::NumTriesWithInterval(max_attempts, delay));
            loop {
                if let Some(handles) = absorb_transient(self.session.find_elements(locator))? {
                    for handle in handles {
                        if let Some(state) = absorb_transient(self.session.element_state(&handle))?
                        {
                            if state.displayed {
                                debug!(
                                    "element {} found on attempt {}",
                                    locator,
                                    ticker.tries() + 1
                                );
                                return Ok(Element::new(self.session, handle));
                            }
                        }
                    }
                }
                if !ticker.tick() {
                    break;
                }
                debug!(
                    "attempt {} failed for {}, retrying in {:?}",
                    ticker.tries(),
                    locator,
                    delay
                );
            }
        }
        error!("element {} not found after {} attempts", locator, max_attempts);
        Err(WaitError::ElementNotFound {
            locator: locator.clone(),
            attempts: max_attempts,
        })
    }

    fn deadline_wait(
        &self,
        condition: &WaitCondition,
        timeout: Duration,
        interval: Duration,
    ) -> WaitResult<WaitOutcome> {
        self.wait_with_policy(condition, WaitPolicy::TimeoutWithInterval(timeout, interval))
    }

    fn present_wait(
        &self,
        locator: &Locator,
        timeout: Duration,
        interval: Duration,
    ) -> WaitResult<Element<'a>> {
        let condition = WaitCondition::ElementPresent(locator.clone());
        let outcome = self.deadline_wait(&condition, timeout, interval)?;
        self.require_element(outcome, |elapsed| {
            error!("element {} not present within {:?}", locator, timeout);
            WaitError::ElementNotPresent {
                locator: locator.clone(),
                elapsed,
                timeout,
            }
        })
    }

    fn require_element(
        &self,
        outcome: WaitOutcome,
        on_timeout: impl FnOnce(Duration) -> WaitError,
    ) -> WaitResult<Element<'a>> {
        match outcome {
            WaitOutcome::Satisfied(WaitValue::Element(handle)) => {
                Ok(Element::new(self.session, handle))
            }
            WaitOutcome::Satisfied(_) => unreachable!("element condition yielded a non-element value"),
            WaitOutcome::TimedOut { elapsed } => Err(on_timeout(elapsed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::testsupport::{FakeElement, FakeSession};

    fn css(selector: &str) -> Locator {
        Locator::Css(selector.into())
    }

    fn quick_config() -> WaitConfig {
        WaitConfig::default()
            .with_wait_timeout(Duration::from_millis(200))
            .with_poll_interval(Duration::from_millis(10))
            .with_page_load_timeout(Duration::from_millis(200))
    }

    #[test]
    fn satisfied_soon_after_the_element_appears() {
        // The element starts matching on the third find call; with a 10ms
        // interval that is well inside the 1s deadline.
        let session = FakeSession::new()
            .with_element(css("#logo"), FakeElement::new("logo-1").present_after(3));
        let waiter = SyncWaiter::new(&session, quick_config());

        let started = Instant::now();
        let element = waiter
            .wait_for_element_visible(&css("#logo"), Some(Duration::from_secs(1)))
            .unwrap();
        assert_eq!(element.handle().id(), "logo-1");
        assert!(session.find_calls() >= 3);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn url_mismatch_fires_no_earlier_than_the_deadline() {
        let session = FakeSession::new().with_url("https://shop.example/cart");
        let waiter = SyncWaiter::new(&session, quick_config());

        let timeout = Duration::from_millis(100);
        let started = Instant::now();
        let err = waiter
            .wait_for_url_contains("checkout", Some(timeout))
            .unwrap_err();
        assert!(started.elapsed() >= timeout);
        match err {
            WaitError::UrlMismatch {
                fragment, elapsed, ..
            } => {
                assert_eq!(fragment, "checkout");
                assert!(elapsed >= timeout);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn clickable_timeout_names_the_condition() {
        let session = FakeSession::new()
            .with_element(css("#pay"), FakeElement::new("pay-btn").disabled());
        let waiter = SyncWaiter::new(&session, quick_config());
        assert!(matches!(
            waiter.wait_for_element_clickable(&css("#pay"), Some(Duration::from_millis(50))),
            Err(WaitError::ElementNotClickable { .. })
        ));
    }

    #[test]
    fn disappear_accepts_removed_and_hidden() {
        let removed = FakeSession::new();
        let waiter = SyncWaiter::new(&removed, quick_config());
        assert!(waiter
            .wait_for_element_to_disappear(&css("#spinner"), None)
            .unwrap());

        let hidden =
            FakeSession::new().with_element(css("#spinner"), FakeElement::new("sp").hidden());
        let waiter = SyncWaiter::new(&hidden, quick_config());
        assert!(waiter
            .wait_for_element_to_disappear(&css("#spinner"), None)
            .unwrap());
    }

    #[test]
    fn still_visible_elements_time_out() {
        let session = FakeSession::new().with_element(css("#spinner"), FakeElement::new("sp"));
        let waiter = SyncWaiter::new(&session, quick_config());
        assert!(matches!(
            waiter.wait_for_element_to_disappear(&css("#spinner"), Some(Duration::from_millis(50))),
            Err(WaitError::ElementStillVisible { .. })
        ));
    }

    #[test]
    fn transient_staleness_does_not_abort_the_loop() {
        let session = FakeSession::new()
            .with_element(css("#banner"), FakeElement::new("banner").stale_for(2));
        let waiter = SyncWaiter::new(&session, quick_config());
        let element = waiter.wait_for_element_visible(&css("#banner"), None).unwrap();
        assert_eq!(element.handle().id(), "banner");
    }

    #[test]
    fn fatal_errors_abort_without_burning_the_timeout() {
        let bad = css("div[unclosed");
        let session = FakeSession::new().with_invalid_locator(bad.clone());
        let waiter = SyncWaiter::new(&session, quick_config());

        let started = Instant::now();
        let result = waiter.wait_for_element_visible(&bad, Some(Duration::from_secs(30)));
        assert!(matches!(result, Err(WaitError::InvalidSelector(_))));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn text_timeout_carries_the_needle() {
        let session = FakeSession::new().with_element(
            css(".order-status"),
            FakeElement::new("status").with_text("Order #1042: processing"),
        );
        let waiter = SyncWaiter::new(&session, quick_config());
        match waiter
            .wait_for_text_in_element(&css(".order-status"), "shipped", Some(Duration::from_millis(50)))
            .unwrap_err()
        {
            WaitError::TextNotFound { text, .. } => assert_eq!(text, "shipped"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn alert_wait_returns_the_dialog() {
        let session = FakeSession::new().with_alert_after(3, "Coupon applied");
        let waiter = SyncWaiter::new(&session, quick_config());
        let alert = waiter.wait_for_alert(None).unwrap();
        assert_eq!(alert.text(), "Coupon applied");
        alert.accept().unwrap();
        assert_eq!(session.accepted_alerts(), 1);
    }

    #[test]
    fn page_load_waits_for_ready_state() {
        let session = FakeSession::new().with_ready_complete_after(3);
        let waiter = SyncWaiter::new(&session, quick_config());
        assert!(waiter.wait_for_page_load(None).unwrap());

        let stuck = FakeSession::new().with_ready_state("loading");
        let waiter = SyncWaiter::new(&stuck, quick_config());
        assert!(matches!(
            waiter.wait_for_page_load(Some(Duration::from_millis(50))),
            Err(WaitError::PageLoadTimeout { .. })
        ));
    }

    #[test]
    fn retry_makes_exactly_max_attempts_lookups() {
        let session = FakeSession::new();
        let waiter = SyncWaiter::new(&session, quick_config());

        let started = Instant::now();
        let err = waiter
            .retry_with_backoff(&css("#flaky"), 5, Duration::from_millis(10))
            .unwrap_err();
        // 5 lookups, 4 sleeps.
        assert_eq!(session.find_calls(), 5);
        assert!(started.elapsed() >= Duration::from_millis(40));
        match err {
            WaitError::ElementNotFound { attempts, .. } => assert_eq!(attempts, 5),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn retry_stops_as_soon_as_the_element_shows_up() {
        let session = FakeSession::new()
            .with_element(css("#flaky"), FakeElement::new("flaky-1").present_after(2));
        let waiter = SyncWaiter::new(&session, quick_config());
        let element = waiter
            .retry_with_backoff(&css("#flaky"), 5, Duration::from_millis(10))
            .unwrap();
        assert_eq!(element.handle().id(), "flaky-1");
        assert_eq!(session.find_calls(), 2);
    }

    #[test]
    fn retry_with_zero_attempts_never_touches_the_session() {
        let session = FakeSession::new();
        let waiter = SyncWaiter::new(&session, quick_config());
        let err = waiter
            .retry_with_backoff(&css("#flaky"), 0, Duration::from_millis(10))
            .unwrap_err();
        assert_eq!(session.find_calls(), 0);
        assert!(matches!(err, WaitError::ElementNotFound { attempts: 0, .. }));
    }

    #[test]
    fn generic_wait_reports_the_outcome_without_an_error() {
        let session = FakeSession::new().with_url("https://shop.example/cart");
        let waiter = SyncWaiter::new(&session, quick_config());

        let satisfied = waiter
            .wait(&WaitCondition::UrlContains("cart".into()), None, None)
            .unwrap();
        assert!(matches!(satisfied, WaitOutcome::Satisfied(_)));

        let timed_out = waiter
            .wait(
                &WaitCondition::UrlContains("checkout".into()),
                Some(Duration::from_millis(30)),
                Some(Duration::from_millis(5)),
            )
            .unwrap();
        assert!(matches!(timed_out, WaitOutcome::TimedOut { .. }));
    }

    #[test]
    fn custom_conditions_time_out_with_their_description() {
        let session = FakeSession::new();
        let waiter = SyncWaiter::new(&session, quick_config());
        let condition = WaitCondition::custom("cart has items", |s: &dyn crate::BrowserSession| {
            Ok(s.current_url()?.contains("items="))
        });
        match waiter
            .wait_until(&condition, Some(Duration::from_millis(30)), Some(Duration::from_millis(5)))
            .unwrap_err()
        {
            WaitError::ConditionTimeout { condition, .. } => {
                assert_eq!(condition, "cart has items")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn fluent_wait_overrides_the_polling_frequency() {
        let session = FakeSession::new()
            .with_element(css("#lazy"), FakeElement::new("lazy-1").hidden().present_after(2));
        let waiter = SyncWaiter::new(&session, quick_config());
        // Presence is enough for the fluent wait; visibility is not required.
        let element = waiter
            .fluent_wait(&css("#lazy"), Duration::from_millis(500), Duration::from_millis(5))
            .unwrap();
        assert_eq!(element.handle().id(), "lazy-1");
    }
}
