pub mod models;
pub mod provider;

pub use models::QuoteItem;
pub use provider::{MockQuoteProvider, QuoteProvider};

use crate::config::Config;
use crate::error::DashResult;
use crate::utils::sequence::{RequestSequence, RequestToken};
use crate::utils::time::truncate_message;
use crate::view::ViewState;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Quote widget: loads the daily quote and refreshes on request
pub struct QuoteWidget {
    provider: Arc<dyn QuoteProvider>,
    state: RwLock<ViewState<QuoteItem>>,
    last_fetched: RwLock<Option<QuoteItem>>,
    sequence: RequestSequence,
}

impl QuoteWidget {
    /// Create a new quote widget
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(ViewState::Loading),
            last_fetched: RwLock::new(None),
            sequence: RequestSequence::new(),
        }
    }

    /// Current display state
    pub async fn state(&self) -> ViewState<QuoteItem> {
        self.state.read().await.clone()
    }

    /// Last successfully fetched quote
    pub async fn last_fetched(&self) -> Option<QuoteItem> {
        self.last_fetched.read().await.clone()
    }

    /// Load the quote of the day
    pub async fn load_daily(&self) -> DashResult<()> {
        let token = self.begin().await;
        let result = self.provider.daily_quote().await;
        self.apply(token, result).await
    }

    /// Replace the quote with another random one
    pub async fn refresh(&self) -> DashResult<()> {
        let token = self.begin().await;
        let result = self.provider.random_quote().await;
        self.apply(token, result).await
    }

    async fn begin(&self) -> RequestToken {
        let token = self.sequence.issue();
        *self.state.write().await = ViewState::Loading;
        token
    }

    async fn apply(&self, token: RequestToken, result: DashResult<QuoteItem>) -> DashResult<()> {
        let mut state = self.state.write().await;
        if !self.sequence.is_current(token) {
            debug!("Discarding stale quote response");
            return Ok(());
        }

        match result {
            Ok(quote) => {
                info!("Quote of the moment by {}", quote.author);
                *self.last_fetched.write().await = Some(quote.clone());
                *state = ViewState::Populated(quote);
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch quote: {}", e);
                *state = ViewState::Error(truncate_message(&e.to_string(), 100));
                Err(e)
            }
        }
    }
}

#[async_trait]
impl super::Component for QuoteWidget {
    fn name(&self) -> &'static str {
        "quotes"
    }

    async fn init(&self, _config: Arc<RwLock<Config>>) -> DashResult<()> {
        self.load_daily().await
    }

    async fn shutdown(&self) -> DashResult<()> {
        self.sequence.invalidate();
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
