//! Timed pauses between evaluation passes
//!
//! [`Sleeper`] is the crate's single suspension point: every delay a
//! [`Waiter`](crate::Waiter) inserts between passes goes through it, so
//! pacing, jitter, and cancellation are all configured in one place.

use rand::Rng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Timed delay with two named pause lengths
///
/// `pause` is the standard gap between evaluation passes, `mini_pause` a
/// shorter gap for tighter loops. Attaching a [`CancellationToken`] makes
/// any in-flight sleep return early when the token fires; the early return
/// is a normal completion, not an error.
#[derive(Debug, Clone)]
pub struct Sleeper {
    pause: Duration,
    mini_pause: Duration,
    jitter: Duration,
    cancel: Option<CancellationToken>,
}

impl Default for Sleeper {
    fn default() -> Self {
        Self::new()
    }
}

impl Sleeper {
    /// Default length of [`pause`](Self::pause)
    pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);

    /// Default length of [`mini_pause`](Self::mini_pause)
    pub const DEFAULT_MINI_PAUSE: Duration = Duration::from_millis(300);

    /// Create a sleeper with the default pause lengths
    pub fn new() -> Self {
        Self {
            pause: Self::DEFAULT_PAUSE,
            mini_pause: Self::DEFAULT_MINI_PAUSE,
            jitter: Duration::ZERO,
            cancel: None,
        }
    }

    /// Override both pause lengths
    pub fn with_pauses(mut self, pause: Duration, mini_pause: Duration) -> Self {
        self.pause = pause;
        self.mini_pause = mini_pause;
        self
    }

    /// Add up to `jitter` of random extra delay to every sleep
    ///
    /// Staggers polling so repeated passes do not phase-lock with the UI's
    /// own refresh cycle. Jitter only ever lengthens a sleep.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Attach a cancellation token that ends in-flight sleeps early
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Whether the attached token has fired
    ///
    /// Always `false` when no token is attached.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Sleep for the standard pause length
    pub async fn pause(&self) {
        self.sleep(self.pause).await
    }

    /// Sleep for the short pause length
    pub async fn mini_pause(&self) {
        self.sleep(self.mini_pause).await
    }

    /// Sleep for `duration`
    ///
    /// Returns after the full (possibly jittered) duration, or as soon as
    /// the attached cancellation token fires, whichever comes first.
    pub async fn sleep(&self, duration: Duration) {
        let duration = self.jittered(duration);
        match &self.cancel {
            Some(cancel) => {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::trace!("Sleep cut short by cancellation");
                    }
                    _ = tokio::time::sleep(duration) => {}
                }
            }
            None => tokio::time::sleep(duration).await,
        }
    }

    fn jittered(&self, duration: Duration) -> Duration {
        if self.jitter.is_zero() {
            return duration;
        }
        let max_extra = self.jitter.as_millis() as u64;
        let extra = rand::thread_rng().gen_range(0..=max_extra);
        duration + Duration::from_millis(extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_pause_lasts_default_duration() {
        let sleeper = Sleeper::new();
        let start = Instant::now();
        sleeper.pause().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Sleeper::DEFAULT_PAUSE);
        assert!(elapsed < Sleeper::DEFAULT_PAUSE + Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mini_pause_is_shorter_than_pause() {
        let sleeper = Sleeper::new();
        let start = Instant::now();
        sleeper.mini_pause().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Sleeper::DEFAULT_MINI_PAUSE);
        assert!(elapsed < Sleeper::DEFAULT_PAUSE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_takes_arbitrary_durations() {
        let sleeper = Sleeper::new();
        let start = Instant::now();
        sleeper.sleep(Duration::from_millis(120)).await;
        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_jitter_only_lengthens_sleeps() {
        let sleeper = Sleeper::new().with_jitter(Duration::from_millis(100));
        let start = Instant::now();
        sleeper.sleep(Duration::from_millis(200)).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed <= Duration::from_millis(310));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_ends_sleep_early() {
        let cancel = CancellationToken::new();
        let sleeper = Sleeper::new().with_cancellation(cancel.clone());

        let sleep = tokio::spawn({
            let sleeper = sleeper.clone();
            async move {
                let start = Instant::now();
                sleeper.sleep(Duration::from_secs(60)).await;
                start.elapsed()
            }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        let elapsed = sleep.await.unwrap();
        assert!(elapsed < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_cancelled_sleep_completes_without_error() {
        let cancel = CancellationToken::new();
        let sleeper = Sleeper::new().with_cancellation(cancel.clone());

        let mut sleep = tokio_test::task::spawn(sleeper.sleep(Duration::from_secs(60)));
        assert!(sleep.poll().is_pending());

        cancel.cancel();
        assert!(sleep.is_woken());
        assert!(sleep.poll().is_ready());
    }

    #[test]
    fn test_is_cancelled_reflects_token_state() {
        let sleeper = Sleeper::new();
        assert!(!sleeper.is_cancelled());

        let cancel = CancellationToken::new();
        let sleeper = sleeper.with_cancellation(cancel.clone());
        assert!(!sleeper.is_cancelled());

        cancel.cancel();
        assert!(sleeper.is_cancelled());
    }
}
