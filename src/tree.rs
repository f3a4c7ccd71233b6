//! Collaborator traits for the on-screen element tree
//!
//! The search engine never talks to a UI toolkit directly. It consumes the
//! two narrow seams in this module: [`UiTree`] for "what is on screen right
//! now" plus "reveal more", and [`UiElement`] for per-element state. An
//! adapter for a real toolkit (accessibility tree, DOM, widget hierarchy)
//! implements these and nothing else.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// A node in the on-screen element tree
///
/// Implementations are usually cheap handles into the toolkit rather than
/// owned widget data, so the state queries are async and fallible: the
/// backing element can disappear between the snapshot and the query.
#[async_trait]
pub trait UiElement: Send + Sync {
    /// Runtime kind discriminator for this toolkit's elements
    ///
    /// An enum for toolkits with a closed set of widget classes, a string
    /// wrapper for open-ended ones (accessibility roles, tag names).
    type Kind: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// The element's runtime kind
    fn kind(&self) -> Self::Kind;

    /// Whether the element is currently shown on screen
    ///
    /// Point-in-time answer; a later query may differ. Toolkit faults
    /// propagate as [`Error::Element`](crate::Error::Element).
    async fn is_visible(&self) -> Result<bool>;

    /// Whether the element currently accepts interaction
    async fn is_enabled(&self) -> Result<bool>;
}

/// Live view of the currently present elements
///
/// `elements` returns a fresh snapshot on every call. Ordering within one
/// snapshot is stable (tree order), but consecutive snapshots may differ
/// arbitrarily as the UI changes underneath.
#[async_trait]
pub trait UiTree: Send + Sync {
    /// The element type this tree yields
    type Element: UiElement;

    /// Snapshot of the currently present elements
    ///
    /// `kind` is a restriction hint: implementations may pre-filter to the
    /// requested kind or ignore the hint entirely. The search re-checks
    /// every candidate's kind either way, so honoring the hint is purely
    /// an optimization.
    async fn elements(
        &self,
        kind: Option<<Self::Element as UiElement>::Kind>,
    ) -> Result<Vec<Self::Element>>;

    /// Reveal content beyond the current view, e.g. by scrolling one page
    ///
    /// Already being at the end is not an error; doing nothing is a valid
    /// outcome. The default implementation is exactly that no-op, for
    /// trees that never scroll.
    async fn scroll_next(&self) -> Result<()> {
        Ok(())
    }
}

/// The element kind type of a [`UiTree`]
pub type KindOf<T> = <<T as UiTree>::Element as UiElement>::Kind;

// Delegating impls so searches can borrow or share a tree instead of
// owning it.

#[async_trait]
impl<T> UiTree for &T
where
    T: UiTree + ?Sized,
{
    type Element = T::Element;

    async fn elements(
        &self,
        kind: Option<<Self::Element as UiElement>::Kind>,
    ) -> Result<Vec<Self::Element>> {
        (**self).elements(kind).await
    }

    async fn scroll_next(&self) -> Result<()> {
        (**self).scroll_next().await
    }
}

#[async_trait]
impl<T> UiTree for Arc<T>
where
    T: UiTree + ?Sized,
{
    type Element = T::Element;

    async fn elements(
        &self,
        kind: Option<<Self::Element as UiElement>::Kind>,
    ) -> Result<Vec<Self::Element>> {
        (**self).elements(kind).await
    }

    async fn scroll_next(&self) -> Result<()> {
        (**self).scroll_next().await
    }
}
