//! Scroll-to-reveal example: find a post buried several screens down a feed
//!
//! Every failed pass triggers one scroll, so the search walks the feed
//! page by page until the post shows up. The second half cancels a wait
//! for a post that never appears.
//!
//! Run with: cargo run --example endless_feed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use stakeout::{
    async_trait, CancellationToken, ElementSearch, Result, Sleeper, UiElement, UiTree, Waiter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Post,
    Ad,
}

#[derive(Debug, Clone)]
struct Card {
    kind: Kind,
    text: &'static str,
}

#[async_trait]
impl UiElement for Card {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        self.kind
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(true)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Feed that reveals one more page per scroll
struct Feed {
    pages: Vec<Vec<Card>>,
    page: AtomicUsize,
    scrolls: AtomicUsize,
}

impl Feed {
    fn post(text: &'static str) -> Card {
        Card {
            kind: Kind::Post,
            text,
        }
    }

    fn ad(text: &'static str) -> Card {
        Card {
            kind: Kind::Ad,
            text,
        }
    }
}

#[async_trait]
impl UiTree for Feed {
    type Element = Card;

    async fn elements(&self, _kind: Option<Kind>) -> Result<Vec<Card>> {
        let page = self.page.load(Ordering::SeqCst);
        Ok(self.pages.get(page).cloned().unwrap_or_default())
    }

    async fn scroll_next(&self) -> Result<()> {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
        let last = self.pages.len().saturating_sub(1);
        let _ = self
            .page
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |p| {
                (p < last).then_some(p + 1)
            });
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let feed = Feed {
        pages: vec![
            vec![Feed::post("morning standup notes"), Feed::ad("buy stuff")],
            vec![Feed::post("lunch thread"), Feed::post("cat picture")],
            vec![Feed::ad("more stuff"), Feed::post("launch day recap")],
        ],
        page: AtomicUsize::new(0),
        scrolls: AtomicUsize::new(0),
    };

    let waiter = Waiter::new(Duration::from_secs(5)).with_sleeper(Sleeper::new().with_pauses(
        Duration::from_millis(100),
        Duration::from_millis(50),
    ));

    // Walk the feed until the launch recap shows up. Ads never qualify
    // thanks to the kind gate.
    println!("Scrolling the feed for the launch recap...");
    let mut recap = ElementSearch::new(&feed)
        .kind(Kind::Post)
        .matching(|c| c.text.contains("launch day"));

    let post = waiter.wait_for_match(&mut recap).await?;
    println!(
        "Found \"{}\" after {} scrolls",
        post.text,
        feed.scrolls.load(Ordering::SeqCst)
    );

    // A post that never appears: cancel the wait from another task
    // instead of riding it out to the timeout
    println!("Waiting for a post that never appears (cancelling in 600ms)...");
    let cancel = CancellationToken::new();
    let waiter = Waiter::new(Duration::from_secs(30)).with_sleeper(
        Sleeper::new()
            .with_pauses(Duration::from_millis(100), Duration::from_millis(50))
            .with_cancellation(cancel.clone()),
    );

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(600)).await;
            cancel.cancel();
        }
    });

    let mut unicorn = ElementSearch::new(&feed)
        .kind(Kind::Post)
        .matching(|c| c.text.contains("unicorn"));

    match waiter.wait_for_match(&mut unicorn).await {
        Err(e) if e.is_cancelled() => println!("Wait cancelled, as requested"),
        Err(e) => println!("Unexpected error: {}", e),
        Ok(post) => println!("Unexpectedly found: {}", post.text),
    }

    println!("Done!");
    Ok(())
}
