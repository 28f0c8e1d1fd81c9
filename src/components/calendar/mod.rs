mod actor;
pub mod categorize;
mod handle;
pub mod models;
pub mod provider;
mod scheduler;

pub use categorize::{categorize, normalize_events};
pub use handle::CalendarHandle;
pub use models::{AuthState, CalendarEvent, CalendarSnapshot, EventCategory, RawCalendarEvent};
pub use provider::{CalendarProvider, EventCount, MockCalendarProvider};

use crate::config::Config;
use crate::error::DashResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Calendar widget: owns one session actor for its lifetime
pub struct CalendarWidget {
    provider: Arc<dyn CalendarProvider>,
    handle: RwLock<Option<CalendarHandle>>,
}

impl CalendarWidget {
    /// Create a new calendar widget
    pub fn new(provider: Arc<dyn CalendarProvider>) -> Self {
        Self {
            provider,
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<CalendarHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }

    /// Current session state; the initial state before init
    pub async fn snapshot(&self) -> CalendarSnapshot {
        match self.get_handle().await {
            Some(handle) => handle.snapshot(),
            None => CalendarSnapshot::default(),
        }
    }
}

#[async_trait]
impl super::Component for CalendarWidget {
    fn name(&self) -> &'static str {
        "calendar"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> DashResult<()> {
        let (refresh_interval, auto_connect) = {
            let config_read = config.read().await;
            (
                config_read.refresh_interval(),
                config_read.calendar_auto_connect,
            )
        };

        // Create a new handle if one doesn't exist
        let handle = {
            let mut handle_lock = self.handle.write().await;
            handle_lock
                .get_or_insert_with(|| {
                    CalendarHandle::new(Arc::clone(&self.provider), refresh_interval)
                })
                .clone()
        };

        if auto_connect {
            info!("Connecting calendar on startup");
            handle.sign_in().await?;
        }

        Ok(())
    }

    async fn shutdown(&self) -> DashResult<()> {
        // Shutdown the handle if it exists
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
