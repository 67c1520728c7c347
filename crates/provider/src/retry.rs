use std::{fmt, future::Future, sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::error::FetchError;

/// The default number of attempts per fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// The default delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

type Backoff = Arc<dyn Fn(u32) -> Duration + Send + Sync>;

/// How many times to try a fetch, and how long to wait between tries.
///
/// `backoff` maps the number of the attempt that just failed (starting at 1) to the delay before
/// the next one.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("first_delay", &(self.backoff)(1))
            .finish()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// A policy with a caller-supplied backoff function. `max_attempts` below 1 is treated as 1.
    pub fn new<F>(max_attempts: u32, backoff: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Arc::new(backoff),
        }
    }

    /// Wait `delay` between each of `max_attempts` tries.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(max_attempts, move |_| delay)
    }

    /// Double the delay after each failure, starting at `base` and never exceeding `cap`.
    pub fn exponential(max_attempts: u32, base: Duration, cap: Duration) -> Self {
        Self::new(max_attempts, move |attempt| {
            let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
            base.saturating_mul(factor).min(cap)
        })
    }

    /// A single attempt. Errors are returned as they come.
    pub fn none() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// The attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The delay after attempt number `attempt` fails.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        (self.backoff)(attempt)
    }

    /// Run `op` until it succeeds, fails with an error that is not retryable, or the attempt
    /// budget runs out. `op` receives the attempt number, starting at 1.
    ///
    /// Exhausting the budget returns `FetchError::Exhausted` wrapping the last error. A policy
    /// allowing one attempt still wraps a retryable error this way.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 1;
        loop {
            debug!(attempt, "fetch attempt");
            let e = match op(attempt).await {
                Ok(t) => return Ok(t),
                Err(e) => e,
            };

            if !e.is_retryable() {
                return Err(e);
            }
            if attempt >= self.max_attempts {
                return Err(FetchError::Exhausted {
                    attempts: attempt,
                    source: Box::new(e),
                });
            }

            let delay = self.delay_after(attempt);
            warn!(
                attempt,
                max_attempts = self.max_attempts,
                ?delay,
                error = %e,
                "attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    fn unavailable() -> FetchError {
        FetchError::Status {
            url: "http://localhost/tx/00/hex".to_owned(),
            status: 503,
        }
    }

    #[test]
    fn it_computes_backoff_delays() {
        let fixed = RetryPolicy::fixed(3, Duration::from_secs(5));
        assert_eq!(fixed.delay_after(1), Duration::from_secs(5));
        assert_eq!(fixed.delay_after(7), Duration::from_secs(5));

        let exp = RetryPolicy::exponential(10, Duration::from_millis(100), Duration::from_secs(1));
        let cases = [(1, 100), (2, 200), (3, 400), (4, 800), (5, 1000), (40, 1000)];
        for (attempt, millis) in cases.iter() {
            assert_eq!(exp.delay_after(*attempt), Duration::from_millis(*millis));
        }

        let default = RetryPolicy::default();
        assert_eq!(default.max_attempts(), 10);
        assert_eq!(default.delay_after(1), Duration::from_secs(5));
        assert_eq!(RetryPolicy::fixed(0, Duration::ZERO).max_attempts(), 1);
    }

    #[tokio::test]
    async fn it_retries_transient_errors_until_success() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::fixed(5, Duration::ZERO);
        let res = policy
            .run(|attempt| {
                calls.set(calls.get() + 1);
                async move {
                    if attempt < 3 {
                        Err(unavailable())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;
        assert_eq!(res.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn it_gives_up_after_the_budget() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::fixed(4, Duration::ZERO);
        let res: Result<(), _> = policy
            .run(|_| {
                calls.set(calls.get() + 1);
                async { Err(unavailable()) }
            })
            .await;
        match res {
            Err(FetchError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 4);
                assert!(matches!(*source, FetchError::Status { status: 503, .. }));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn it_does_not_retry_permanent_errors() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::fixed(10, Duration::ZERO);
        let res: Result<(), _> = policy
            .run(|_| {
                calls.set(calls.get() + 1);
                async { Err(FetchError::MalformedResponse("<html>".to_owned())) }
            })
            .await;
        assert!(matches!(res, Err(FetchError::MalformedResponse(_))));
        assert_eq!(calls.get(), 1);
    }
}
