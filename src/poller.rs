use std::thread;
use std::time::{Duration, Instant};

/// Polling policy for a single wait loop.
///
/// Deadline-based and count-based policies are deliberately both supported:
/// a rendering document stabilizes at unpredictable wall-clock rates, which
/// favours a deadline, while flaky lookups are more naturally bounded by a
/// fixed number of attempts. Page objects use each in different places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Evaluate the condition exactly once and give up immediately.
    NoWait,
    /// Evaluate until the timeout elapses, sleeping the interval between polls.
    TimeoutWithInterval(Duration, Duration),
    /// Evaluate a fixed number of times, sleeping the interval between polls.
    NumTriesWithInterval(u32, Duration),
    /// Evaluate until the timeout elapses, but always complete the minimum
    /// number of tries even if the deadline has already passed.
    TimeoutWithIntervalAndMinTries(Duration, Duration, u32),
}

/// Drives one poll loop according to a [`WaitPolicy`].
///
/// The caller evaluates its condition first and then calls [`tick`], looping
/// while `tick` returns `true`:
///
/// ```rust
/// use std::time::Duration;
/// use syncwait::{PollTicker, WaitPolicy};
///
/// let mut ticker = PollTicker::new(WaitPolicy::NumTriesWithInterval(
///     3,
///     Duration::from_millis(1),
/// ));
/// let mut evaluations = 0;
/// loop {
///     evaluations += 1; // evaluate the condition here
///     if !ticker.tick() {
///         break;
///     }
/// }
/// assert_eq!(evaluations, 3);
/// ```
///
/// `tick` sleeps so that poll N starts no earlier than N x interval after
/// the loop began, and reports exhaustion only once the deadline has
/// strictly elapsed (and any minimum-tries floor is met). A `TimedOut`
/// outcome therefore never fires before the configured timeout.
///
/// [`tick`]: PollTicker::tick
#[derive(Debug)]
pub struct PollTicker {
    timeout: Option<Duration>,
    interval: Option<Duration>,
    min_tries: u32,
    started: Instant,
    tries: u32,
}

impl PollTicker {
    pub fn new(policy: WaitPolicy) -> Self {
        let (timeout, interval, min_tries) = match policy {
            WaitPolicy::NoWait => (None, None, 0),
            WaitPolicy::TimeoutWithInterval(timeout, interval) => {
                (Some(timeout), Some(interval), 0)
            }
            WaitPolicy::NumTriesWithInterval(tries, interval) => (None, Some(interval), tries),
            WaitPolicy::TimeoutWithIntervalAndMinTries(timeout, interval, tries) => {
                (Some(timeout), Some(interval), tries)
            }
        };
        Self {
            timeout,
            interval,
            min_tries,
            started: Instant::now(),
            tries: 0,
        }
    }

    /// Wall-clock time since the loop started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Number of evaluations completed so far.
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Record one completed evaluation. Returns `false` once the policy is
    /// exhausted; otherwise sleeps until the next poll is due and returns
    /// `true`.
    pub fn tick(&mut self) -> bool {
        self.tries += 1;

        let deadline_passed = match self.timeout {
            None => true,
            Some(timeout) => self.started.elapsed() >= timeout,
        };
        if deadline_passed && self.tries >= self.min_tries {
            return false;
        }

        if let Some(interval) = self.interval {
            // Poll N is due no earlier than N x interval after the loop started.
            let due = interval * self.tries;
            let elapsed = self.started.elapsed();
            if elapsed < due {
                thread::sleep(due - elapsed);
            }
        }

        true
    }
}
