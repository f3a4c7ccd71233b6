//! # Stakeout
//!
//! Polling element search and wait conditions for UI test automation.
//!
//! Stakeout keeps watch over a live, changing tree of on-screen elements
//! until an element matching your criteria shows up. It is the condition
//! core of a test harness: toolkit adapters implement the two narrow
//! [`UiTree`]/[`UiElement`] seams, and stakeout supplies the search,
//! pacing, and timeout machinery on top.
//!
//! ## Features
//!
//! - **Composable gates** - kind, visibility, enabled state, and an
//!   arbitrary predicate, each individually relaxable
//! - **Rank addressing** - `0` for the first match, `-1` for the last,
//!   without knowing the match count in advance
//! - **Scroll-to-reveal** - a failed pass triggers one scroll so the next
//!   pass sees content beyond the current view
//! - **Cancellable waits** - a [`CancellationToken`] ends sleeps and waits
//!   early, cleanly, from another task
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use stakeout::{ElementSearch, Waiter};
//! # use stakeout::{async_trait, Result, UiElement, UiTree};
//! #
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! # enum Kind { Button, Label }
//! #
//! # #[derive(Debug, Clone)]
//! # struct Widget { kind: Kind, label: &'static str, visible: bool, enabled: bool }
//! #
//! # #[async_trait]
//! # impl UiElement for Widget {
//! #     type Kind = Kind;
//! #     fn kind(&self) -> Kind { self.kind }
//! #     async fn is_visible(&self) -> Result<bool> { Ok(self.visible) }
//! #     async fn is_enabled(&self) -> Result<bool> { Ok(self.enabled) }
//! # }
//! #
//! # struct Screen(Vec<Widget>);
//! #
//! # #[async_trait]
//! # impl UiTree for Screen {
//! #     type Element = Widget;
//! #     async fn elements(&self, _kind: Option<Kind>) -> Result<Vec<Widget>> {
//! #         Ok(self.0.clone())
//! #     }
//! # }
//! #
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> stakeout::Result<()> {
//! # let screen = Screen(vec![
//! #     Widget { kind: Kind::Label, label: "Ready", visible: true, enabled: true },
//! #     Widget { kind: Kind::Button, label: "OK", visible: true, enabled: true },
//! # ]);
//! // Wait for a visible, enabled OK button to show up.
//! let mut search = ElementSearch::new(screen)
//!     .kind(Kind::Button)
//!     .matching(|w| w.label == "OK");
//!
//! let waiter = Waiter::new(Duration::from_secs(5));
//! let button = waiter.wait_for_match(&mut search).await?;
//! assert_eq!(button.label, "OK");
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Search behavior lives in [`SearchOptions`]; set fields through the
//! builder methods on [`ElementSearch`] or hand over a whole option set
//! with [`ElementSearch::with_options`]:
//!
//! ```rust
//! use stakeout::SearchOptions;
//!
//! let options: SearchOptions<&'static str> = SearchOptions {
//!     rank: -1,
//!     include_invisible: true,
//!     ..Default::default()
//! };
//!
//! assert!(options.scroll_on_miss);
//! ```

pub mod condition;
pub mod error;
pub mod search;
pub mod sleeper;
pub mod tree;
pub mod waiter;

// Re-exports
pub use condition::{from_fn, Condition, FromFn};
pub use error::{Error, Result};
pub use search::ElementSearch;
pub use sleeper::Sleeper;
pub use tree::{KindOf, UiElement, UiTree};
pub use waiter::Waiter;

// External types callers need at the seams
pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;

/// Configuration for an element search
///
/// `K` is the tree's element kind type. Defaults select the common case:
/// first visible, enabled match, scrolling on a miss.
#[derive(Debug, Clone)]
pub struct SearchOptions<K> {
    /// Restrict candidates to one element kind (None = all kinds)
    pub kind: Option<K>,
    /// Which qualifying match wins; negative ranks address from the end
    pub rank: isize,
    /// Count invisible elements as candidates
    pub include_invisible: bool,
    /// Count disabled elements as candidates
    pub include_disabled: bool,
    /// Trigger one scroll after a failed pass
    pub scroll_on_miss: bool,
}

impl<K> Default for SearchOptions<K> {
    fn default() -> Self {
        Self {
            kind: None,
            rank: 0,
            include_invisible: false,
            include_disabled: false,
            scroll_on_miss: true,
        }
    }
}

impl<K> SearchOptions<K> {
    /// Options that count hidden and disabled elements too
    pub fn any_state() -> Self {
        Self {
            include_invisible: true,
            include_disabled: true,
            ..Default::default()
        }
    }

    /// Options for trees that should not be scrolled
    pub fn no_scroll() -> Self {
        Self {
            scroll_on_miss: false,
            ..Default::default()
        }
    }
}
