use super::models::QuoteItem;
use crate::error::DashResult;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed pool the mock provider draws from: (text, author, category)
pub const QUOTE_POOL: [(&str, &str, &str); 10] = [
    (
        "The way to get started is to quit talking and begin doing.",
        "Walt Disney",
        "motivation",
    ),
    (
        "Life is what happens when you're busy making other plans.",
        "John Lennon",
        "life",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
        "dreams",
    ),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
        "success",
    ),
    (
        "Your time is limited, don't waste it living someone else's life.",
        "Steve Jobs",
        "inspiration",
    ),
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
        "work",
    ),
    (
        "Innovation distinguishes between a leader and a follower.",
        "Steve Jobs",
        "innovation",
    ),
    (
        "Believe you can and you're halfway there.",
        "Theodore Roosevelt",
        "belief",
    ),
    (
        "The only impossible journey is the one you never begin.",
        "Tony Robbins",
        "journey",
    ),
    (
        "What lies behind us and what lies before us are tiny matters compared to what lies within us.",
        "Ralph Waldo Emerson",
        "inner strength",
    ),
];

/// Source of inspirational quotes
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// The quote of the day
    async fn daily_quote(&self) -> DashResult<QuoteItem>;

    /// Another quote, for an explicit refresh
    async fn random_quote(&self) -> DashResult<QuoteItem> {
        self.daily_quote().await
    }
}

/// Picks uniformly from [`QUOTE_POOL`] after an artificial delay
#[derive(Debug, Clone)]
pub struct MockQuoteProvider {
    latency: Duration,
}

impl MockQuoteProvider {
    pub const DEFAULT_LATENCY_MS: u64 = 800;

    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockQuoteProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(Self::DEFAULT_LATENCY_MS))
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn daily_quote(&self) -> DashResult<QuoteItem> {
        sleep(self.latency).await;

        let index = rand::rng().random_range(0..QUOTE_POOL.len());
        let (text, author, category) = QUOTE_POOL[index];
        Ok(QuoteItem::new(text, author, category))
    }
}
