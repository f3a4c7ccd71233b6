//! Error types for stakeout

use thiserror::Error;

/// Result type for stakeout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for stakeout
#[derive(Debug, Error)]
pub enum Error {
    /// Search evaluated before a predicate was configured
    #[error("Element search has no predicate: call matching() before evaluating")]
    MissingPredicate,

    /// Element tree provider error
    #[error("Tree error: {context}")]
    Tree {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Element state query (visibility/enabled) error
    #[error("Element error: {0}")]
    Element(String),

    /// Scroll trigger error
    #[error("Scroll error: {0}")]
    Scroll(String),

    /// Timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Wait interrupted through its cancellation token
    #[error("Wait cancelled")]
    Cancelled,
}

impl Error {
    /// Create a tree error with context
    pub fn tree(context: impl Into<String>) -> Self {
        Self::Tree {
            context: context.into(),
            source: None,
        }
    }

    /// Create a tree error wrapping an underlying toolkit error
    pub fn tree_with(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Tree {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an element state error
    pub fn element(context: impl Into<String>) -> Self {
        Self::Element(context.into())
    }

    /// Create a scroll error
    pub fn scroll(context: impl Into<String>) -> Self {
        Self::Scroll(context.into())
    }

    /// Check if this is a wait timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    /// Check if this is a cancelled wait
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
