//! Timed polling loop driving conditions
//!
//! A [`Waiter`] owns the evaluate/pause cycle: evaluate the condition,
//! pause through its [`Sleeper`], repeat until the condition holds, the
//! deadline passes, or the sleeper's cancellation token fires.

use std::time::Duration;
use tokio::time::Instant;

use crate::condition::Condition;
use crate::error::{Error, Result};
use crate::search::ElementSearch;
use crate::sleeper::Sleeper;
use crate::tree::UiTree;

/// Polls a [`Condition`] until it is satisfied or a deadline passes
#[derive(Debug, Clone)]
pub struct Waiter {
    timeout: Duration,
    sleeper: Sleeper,
}

impl Default for Waiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl Waiter {
    /// Default wait deadline
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a waiter that gives up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            sleeper: Sleeper::new(),
        }
    }

    /// Replace the sleeper used between evaluation passes
    ///
    /// This is also how cancellation reaches a wait: attach a token to the
    /// sleeper, then cancel the token to stop the wait from another task.
    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Poll `condition` until it reports satisfied
    ///
    /// The condition is evaluated immediately and then once per pause, so
    /// it runs at least once even with a zero timeout. Condition faults
    /// propagate as-is; an elapsed deadline is [`Error::Timeout`];
    /// cancellation through the sleeper's token is [`Error::Cancelled`].
    pub async fn wait_for<C>(&self, condition: &mut C) -> Result<()>
    where
        C: Condition + ?Sized,
    {
        let deadline = Instant::now() + self.timeout;
        let mut passes = 0u32;

        loop {
            passes += 1;
            if condition.is_satisfied().await? {
                tracing::trace!("Condition satisfied after {} passes", passes);
                return Ok(());
            }
            if Instant::now() >= deadline {
                tracing::debug!("Wait timed out after {} passes", passes);
                return Err(Error::Timeout(format!(
                    "condition not satisfied within {:?} ({} passes)",
                    self.timeout, passes
                )));
            }
            self.sleeper.pause().await;
            if self.sleeper.is_cancelled() {
                tracing::debug!("Wait cancelled after {} passes", passes);
                return Err(Error::Cancelled);
            }
        }
    }

    /// Poll an [`ElementSearch`] until it matches, returning the element
    ///
    /// The element is moved out of the search's match slot.
    pub async fn wait_for_match<T>(&self, search: &mut ElementSearch<T>) -> Result<T::Element>
    where
        T: UiTree,
    {
        let deadline = Instant::now() + self.timeout;

        loop {
            if search.is_satisfied().await? {
                if let Some(element) = search.take_matched() {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(format!(
                    "no matching element within {:?}",
                    self.timeout
                )));
            }
            self.sleeper.pause().await;
            if self.sleeper.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::from_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_eventually_satisfied_condition() {
        let waiter = Waiter::new(Duration::from_secs(5));
        let mut calls = 0;
        let mut third_time = from_fn(move || {
            calls += 1;
            let done = calls >= 3;
            async move { Ok(done) }
        });

        waiter.wait_for(&mut third_time).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_times_out() {
        let waiter = Waiter::new(Duration::from_secs(2));
        let mut never = from_fn(|| async { Ok(false) });

        let err = waiter.wait_for(&mut never).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_still_evaluates_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let waiter = Waiter::new(Duration::ZERO);
        let mut never = from_fn(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            async { Ok(false) }
        });

        let err = waiter.wait_for(&mut never).await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_condition_fault_propagates() {
        let waiter = Waiter::new(Duration::from_secs(5));
        let mut broken = from_fn(|| async { Err(Error::tree("tree torn down")) });

        let err = waiter.wait_for(&mut broken).await.unwrap_err();
        assert!(matches!(err, Error::Tree { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_wait() {
        let cancel = CancellationToken::new();
        let waiter = Waiter::new(Duration::from_secs(60))
            .with_sleeper(Sleeper::new().with_cancellation(cancel.clone()));
        let mut never = from_fn(|| async { Ok(false) });

        tokio::spawn({
            let cancel = cancel.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(700)).await;
                cancel.cancel();
            }
        });

        let err = waiter.wait_for(&mut never).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
