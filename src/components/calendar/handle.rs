use super::actor::{CalendarActor, CalendarActorHandle};
use super::models::CalendarSnapshot;
use super::provider::CalendarProvider;
use crate::error::DashResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle for interacting with the calendar actor
#[derive(Clone)]
pub struct CalendarHandle {
    actor_handle: CalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CalendarHandle {
    /// Create a new CalendarHandle and spawn the actor
    pub fn new(provider: Arc<dyn CalendarProvider>, refresh_interval: Duration) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = CalendarActor::new(provider, refresh_interval);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Connect the calendar
    pub async fn sign_in(&self) -> DashResult<()> {
        self.actor_handle.sign_in().await
    }

    /// Disconnect the calendar and drop its events
    pub async fn sign_out(&self) -> DashResult<()> {
        self.actor_handle.sign_out().await
    }

    /// Refetch today's events
    pub async fn fetch_events(&self) -> DashResult<()> {
        self.actor_handle.fetch_events().await
    }

    /// Current session state
    pub fn snapshot(&self) -> CalendarSnapshot {
        self.actor_handle.snapshot()
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<CalendarSnapshot> {
        self.actor_handle.subscribe()
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DashResult<()> {
        self.actor_handle.shutdown().await
    }
}
