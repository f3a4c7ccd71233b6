//! Pollable boolean conditions
//!
//! A [`Condition`] is a single evaluation pass with no scheduling of its
//! own: it inspects the world once and reports whether the thing it is
//! watching for holds right now. A [`Waiter`](crate::Waiter) drives the
//! evaluate/pause cycle.

use async_trait::async_trait;
use std::future::Future;

use crate::error::Result;

/// A pollable boolean check
///
/// `Ok(false)` means "not satisfied yet" and is the expected outcome while
/// polling. Genuine faults (a torn-down tree, a stale element handle)
/// surface as errors instead of being folded into `false`, so callers can
/// tell "keep waiting" apart from "stop, something broke".
///
/// Evaluation takes `&mut self` because conditions may accumulate state
/// across passes, like the match slot on
/// [`ElementSearch`](crate::ElementSearch).
#[async_trait]
pub trait Condition: Send {
    /// Run one evaluation pass
    async fn is_satisfied(&mut self) -> Result<bool>;
}

/// Condition built from an async closure, created by [`from_fn`]
pub struct FromFn<F> {
    f: F,
}

/// Wrap an async closure as a [`Condition`]
///
/// The closure is called once per evaluation pass.
///
/// ```rust
/// use stakeout::{from_fn, Condition};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> stakeout::Result<()> {
/// let mut remaining = 3u32;
/// let mut drained = from_fn(move || {
///     remaining -= 1;
///     async move { Ok(remaining == 0) }
/// });
///
/// assert!(!drained.is_satisfied().await?);
/// assert!(!drained.is_satisfied().await?);
/// assert!(drained.is_satisfied().await?);
/// # Ok(())
/// # }
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<bool>> + Send + 'static,
{
    FromFn { f }
}

#[async_trait]
impl<F, Fut> Condition for FromFn<F>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<bool>> + Send + 'static,
{
    async fn is_satisfied(&mut self) -> Result<bool> {
        (self.f)().await
    }
}
