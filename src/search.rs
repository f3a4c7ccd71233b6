//! Element search engine
//!
//! [`ElementSearch`] is the workhorse [`Condition`]: "does an element
//! matching the configured criteria exist in the tree right now". One
//! evaluation is one pass over a snapshot. A successful pass captures the
//! selected element; a failed pass can trigger a single scroll so the next
//! pass sees content beyond the current view.

use async_trait::async_trait;

use crate::condition::Condition;
use crate::error::{Error, Result};
use crate::tree::{KindOf, UiElement, UiTree};
use crate::SearchOptions;

type Predicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Searches the element tree for an element matching configured criteria
///
/// A candidate must pass every gate to qualify: the kind filter (if set),
/// the visibility gate, the enabled gate, and the caller's predicate. The
/// rank then selects which qualifying element wins: `0` is the first in
/// tree order, `-1` the last, `-2` the one before it, and so on.
///
/// The search is reusable: evaluating it again runs a fresh pass over a
/// fresh snapshot, which is what makes it suitable for polling through a
/// [`Waiter`](crate::Waiter).
pub struct ElementSearch<T: UiTree> {
    tree: T,
    options: SearchOptions<KindOf<T>>,
    predicate: Option<Predicate<T::Element>>,
    matched: Option<T::Element>,
}

impl<T: UiTree> ElementSearch<T> {
    /// Create a search over `tree` with default options
    ///
    /// The search has no predicate yet. Evaluating it before calling
    /// [`matching`](Self::matching) fails with [`Error::MissingPredicate`].
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            options: SearchOptions::default(),
            predicate: None,
            matched: None,
        }
    }

    /// Set the match predicate
    ///
    /// The predicate sees elements that already passed the kind,
    /// visibility, and enabled gates.
    pub fn matching<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T::Element) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Restrict candidates to a single element kind
    pub fn kind(mut self, kind: KindOf<T>) -> Self {
        self.options.kind = Some(kind);
        self
    }

    /// Select which qualifying match wins
    ///
    /// `0` is the first match in tree order. Negative ranks address from
    /// the end: `-1` is the last match, `-2` the one before it, without
    /// knowing the total match count in advance.
    pub fn rank(mut self, rank: isize) -> Self {
        self.options.rank = rank;
        self
    }

    /// Count invisible elements as candidates (skipped by default)
    pub fn include_invisible(mut self, include: bool) -> Self {
        self.options.include_invisible = include;
        self
    }

    /// Count disabled elements as candidates (skipped by default)
    pub fn include_disabled(mut self, include: bool) -> Self {
        self.options.include_disabled = include;
        self
    }

    /// Scroll once after a failed pass (on by default)
    pub fn scroll_on_miss(mut self, scroll: bool) -> Self {
        self.options.scroll_on_miss = scroll;
        self
    }

    /// Replace the whole option set at once
    ///
    /// Overwrites everything previously set through the individual
    /// setters except the predicate.
    pub fn with_options(mut self, options: SearchOptions<KindOf<T>>) -> Self {
        self.options = options;
        self
    }

    /// The tree this search runs against
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// The element captured by the most recent successful pass
    ///
    /// Failed passes leave this untouched, so after a success it keeps
    /// answering until the next success overwrites it or a caller takes it.
    pub fn matched(&self) -> Option<&T::Element> {
        self.matched.as_ref()
    }

    /// Take the captured element out of the search
    pub fn take_matched(&mut self) -> Option<T::Element> {
        self.matched.take()
    }

    /// Consume the search, yielding the captured element
    pub fn into_matched(self) -> Option<T::Element> {
        self.matched
    }
}

/// Scan start, step, and target local rank for a signed rank
///
/// Non-negative ranks scan forward from the front; negative ranks scan
/// backward from the back, with `-1 - rank` as the local rank so `-1`
/// means "first match encountered walking backward".
fn scan_plan(rank: isize, len: usize) -> (isize, isize, usize) {
    if rank >= 0 {
        (0, 1, rank as usize)
    } else {
        (len as isize - 1, -1, (-1 - rank) as usize)
    }
}

#[async_trait]
impl<T: UiTree> Condition for ElementSearch<T> {
    async fn is_satisfied(&mut self) -> Result<bool> {
        let predicate = self.predicate.as_ref().ok_or(Error::MissingPredicate)?;

        let mut elements = self.tree.elements(self.options.kind.clone()).await?;
        let (start, step, target) = scan_plan(self.options.rank, elements.len());

        let mut qualifying = 0usize;
        let mut i = start;
        while i >= 0 && (i as usize) < elements.len() {
            let idx = i as usize;
            i += step;

            let element = &elements[idx];
            if let Some(kind) = &self.options.kind {
                if element.kind() != *kind {
                    continue;
                }
            }
            if !self.options.include_invisible && !element.is_visible().await? {
                continue;
            }
            if !self.options.include_disabled && !element.is_enabled().await? {
                continue;
            }
            if !predicate(element) {
                continue;
            }

            if qualifying == target {
                tracing::debug!("Matched element at rank {}", self.options.rank);
                self.matched = Some(elements.swap_remove(idx));
                return Ok(true);
            }
            qualifying += 1;
        }

        tracing::debug!(
            "No match at rank {} ({} of {} candidates qualified)",
            self.options.rank,
            qualifying,
            elements.len()
        );
        if self.options.scroll_on_miss {
            tracing::trace!("Scrolling to reveal more content");
            self.tree.scroll_next().await?;
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::scan_plan;

    #[test]
    fn test_scan_plan_forward() {
        assert_eq!(scan_plan(0, 5), (0, 1, 0));
        assert_eq!(scan_plan(3, 5), (0, 1, 3));
        assert_eq!(scan_plan(0, 0), (0, 1, 0));
    }

    #[test]
    fn test_scan_plan_backward() {
        assert_eq!(scan_plan(-1, 5), (4, -1, 0));
        assert_eq!(scan_plan(-3, 5), (4, -1, 2));
    }

    #[test]
    fn test_scan_plan_backward_over_empty_starts_out_of_range() {
        assert_eq!(scan_plan(-1, 0), (-1, -1, 0));
    }
}
