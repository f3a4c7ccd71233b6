//! Basic usage example for stakeout
//!
//! Run with: cargo run --example basic

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use stakeout::{async_trait, ElementSearch, Result, Sleeper, UiElement, UiTree, Waiter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Button,
    Field,
    Label,
}

#[derive(Debug, Clone)]
struct Widget {
    kind: Kind,
    text: &'static str,
    enabled: bool,
}

#[async_trait]
impl UiElement for Widget {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        self.kind
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(true)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.enabled)
    }
}

/// Simulated signup dialog whose Submit button enables after a few polls,
/// the way a real form unlocks once background validation finishes
struct Dialog {
    polls: AtomicUsize,
}

#[async_trait]
impl UiTree for Dialog {
    type Element = Widget;

    async fn elements(&self, _kind: Option<Kind>) -> Result<Vec<Widget>> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst);
        let validated = poll >= 3;
        Ok(vec![
            Widget {
                kind: Kind::Label,
                text: "Create account",
                enabled: true,
            },
            Widget {
                kind: Kind::Field,
                text: "email",
                enabled: true,
            },
            Widget {
                kind: Kind::Button,
                text: "Submit",
                enabled: validated,
            },
            Widget {
                kind: Kind::Button,
                text: "Cancel",
                enabled: true,
            },
        ])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dialog = Dialog {
        polls: AtomicUsize::new(0),
    };

    // Short pauses to keep the demo snappy
    let waiter = Waiter::new(Duration::from_secs(5)).with_sleeper(Sleeper::new().with_pauses(
        Duration::from_millis(100),
        Duration::from_millis(50),
    ));

    // Disabled elements are skipped by default, so this stays unsatisfied
    // until the dialog enables the button
    println!("Waiting for the Submit button to become clickable...");
    let mut submit = ElementSearch::new(&dialog)
        .kind(Kind::Button)
        .matching(|w| w.text == "Submit");

    let button = waiter.wait_for_match(&mut submit).await?;
    println!("Found it: {:?}", button);

    // Negative ranks address from the end: the last button on the dialog
    let mut last_button = ElementSearch::new(&dialog)
        .kind(Kind::Button)
        .rank(-1)
        .matching(|_| true);

    let last = waiter.wait_for_match(&mut last_button).await?;
    println!("Last button on the dialog: {}", last.text);

    println!("Done!");
    Ok(())
}
