use super::categorize::normalize_events;
use super::models::{AuthState, CalendarSnapshot, RawCalendarEvent};
use super::provider::CalendarProvider;
use super::scheduler::start_auto_refresh;
use crate::error::{component_error, transition_error, DashResult};
use crate::utils::sequence::{RequestSequence, RequestToken};
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// The calendar session actor: owns the auth state and the event collection
pub struct CalendarActor {
    provider: Arc<dyn CalendarProvider>,
    refresh_interval: Duration,
    command_tx: mpsc::WeakSender<CalendarCommand>,
    command_rx: mpsc::Receiver<CalendarCommand>,
    state_tx: watch::Sender<CalendarSnapshot>,
    sign_ins: RequestSequence,
    fetches: RequestSequence,
    sign_in_task: Option<JoinHandle<()>>,
    fetch_task: Option<JoinHandle<()>>,
    auto_refresh: Option<CancellationToken>,
}

/// Commands that can be sent to the calendar actor
pub enum CalendarCommand {
    SignIn(mpsc::Sender<DashResult<()>>),
    SignOut(mpsc::Sender<DashResult<()>>),
    FetchEvents(mpsc::Sender<DashResult<()>>),
    AutoRefresh,
    SignInCompleted {
        token: RequestToken,
        result: DashResult<()>,
    },
    EventsFetched {
        token: RequestToken,
        result: DashResult<Vec<RawCalendarEvent>>,
    },
    Shutdown,
}

/// Handle for communicating with the calendar actor
#[derive(Clone)]
pub struct CalendarActorHandle {
    command_tx: mpsc::Sender<CalendarCommand>,
    state_rx: watch::Receiver<CalendarSnapshot>,
}

impl CalendarActorHandle {
    /// Request sign-in. Accepted only from the initial or error state.
    pub async fn sign_in(&self) -> DashResult<()> {
        self.request(CalendarCommand::SignIn).await
    }

    /// Request sign-out. Accepted only while authenticated.
    pub async fn sign_out(&self) -> DashResult<()> {
        self.request(CalendarCommand::SignOut).await
    }

    /// Request an event fetch. Accepted only while authenticated.
    pub async fn fetch_events(&self) -> DashResult<()> {
        self.request(CalendarCommand::FetchEvents).await
    }

    /// Current session state
    pub fn snapshot(&self) -> CalendarSnapshot {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<CalendarSnapshot> {
        self.state_rx.clone()
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DashResult<()> {
        let _ = self.command_tx.send(CalendarCommand::Shutdown).await;
        Ok(())
    }

    async fn request(
        &self,
        command: fn(mpsc::Sender<DashResult<()>>) -> CalendarCommand,
    ) -> DashResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(command(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }
}

impl CalendarActor {
    /// Create a new actor and return its handle
    pub fn new(
        provider: Arc<dyn CalendarProvider>,
        refresh_interval: Duration,
    ) -> (Self, CalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (state_tx, state_rx) = watch::channel(CalendarSnapshot::default());

        let actor = Self {
            provider,
            refresh_interval,
            command_tx: command_tx.downgrade(),
            command_rx,
            state_tx,
            sign_ins: RequestSequence::new(),
            fetches: RequestSequence::new(),
            sign_in_task: None,
            fetch_task: None,
            auto_refresh: None,
        };

        let handle = CalendarActorHandle {
            command_tx,
            state_rx,
        };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Calendar actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                CalendarCommand::SignIn(response_tx) => {
                    let result = self.begin_sign_in();
                    let _ = response_tx.send(result).await;
                }
                CalendarCommand::SignOut(response_tx) => {
                    let result = self.sign_out();
                    let _ = response_tx.send(result).await;
                }
                CalendarCommand::FetchEvents(response_tx) => {
                    let result = self.request_fetch();
                    let _ = response_tx.send(result).await;
                }
                CalendarCommand::AutoRefresh => {
                    if self.auth() == AuthState::Authenticated {
                        debug!("Auto-refreshing calendar events");
                        self.start_fetch();
                    }
                }
                CalendarCommand::SignInCompleted { token, result } => {
                    self.complete_sign_in(token, result);
                }
                CalendarCommand::EventsFetched { token, result } => {
                    self.complete_fetch(token, result);
                }
                CalendarCommand::Shutdown => {
                    info!("Calendar actor shutting down");
                    break;
                }
            }
        }

        self.teardown();
        info!("Calendar actor shut down");
    }

    fn auth(&self) -> AuthState {
        self.state_tx.borrow().auth
    }

    fn begin_sign_in(&mut self) -> DashResult<()> {
        let auth = self.auth();
        if !matches!(auth, AuthState::Initial | AuthState::Error) {
            return Err(transition_error(&format!("cannot sign in while {}", auth)));
        }

        let token = self.sign_ins.issue();
        self.state_tx.send_modify(|state| {
            state.auth = AuthState::Loading;
            state.error = None;
        });
        info!("Signing in to calendar");

        let provider = Arc::clone(&self.provider);
        let command_tx = self.command_tx.clone();
        self.sign_in_task = Some(tokio::spawn(async move {
            let result = provider.sign_in().await;
            if let Some(tx) = command_tx.upgrade() {
                let _ = tx
                    .send(CalendarCommand::SignInCompleted { token, result })
                    .await;
            }
        }));

        Ok(())
    }

    fn complete_sign_in(&mut self, token: RequestToken, result: DashResult<()>) {
        if !self.sign_ins.is_current(token) || self.auth() != AuthState::Loading {
            debug!("Discarding stale sign-in result");
            return;
        }
        self.sign_in_task = None;

        match result {
            Ok(()) => {
                info!("Calendar authenticated");
                self.state_tx.send_modify(|state| {
                    state.auth = AuthState::Authenticated;
                    state.error = None;
                    state.fetching = true;
                });
                self.start_fetch();
                self.auto_refresh = Some(start_auto_refresh(
                    self.command_tx.clone(),
                    self.refresh_interval,
                ));
            }
            Err(e) => {
                error!("Calendar sign-in failed: {}", e);
                self.state_tx.send_modify(|state| {
                    state.auth = AuthState::Error;
                    state.error = Some(e.to_string());
                });
            }
        }
    }

    fn sign_out(&mut self) -> DashResult<()> {
        let auth = self.auth();
        if auth != AuthState::Authenticated {
            return Err(transition_error(&format!("cannot sign out while {}", auth)));
        }

        self.teardown();
        self.state_tx.send_replace(CalendarSnapshot::default());
        info!("Signed out of calendar");

        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            if let Err(e) = provider.sign_out().await {
                warn!("Calendar provider sign-out failed: {}", e);
            }
        });

        Ok(())
    }

    fn request_fetch(&mut self) -> DashResult<()> {
        let auth = self.auth();
        if auth != AuthState::Authenticated {
            return Err(transition_error(&format!(
                "cannot fetch events while {}",
                auth
            )));
        }

        self.start_fetch();
        Ok(())
    }

    /// Start a fetch, superseding any fetch still in flight
    fn start_fetch(&mut self) {
        let token = self.fetches.issue();
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        self.state_tx.send_modify(|state| state.fetching = true);

        let day = Local::now().date_naive();
        let provider = Arc::clone(&self.provider);
        let command_tx = self.command_tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let result = provider.list_events_for_day(day).await;
            if let Some(tx) = command_tx.upgrade() {
                let _ = tx.send(CalendarCommand::EventsFetched { token, result }).await;
            }
        }));
    }

    fn complete_fetch(&mut self, token: RequestToken, result: DashResult<Vec<RawCalendarEvent>>) {
        if !self.fetches.is_current(token) || self.auth() != AuthState::Authenticated {
            debug!("Discarding stale calendar fetch result");
            return;
        }
        self.fetch_task = None;

        match result {
            Ok(raw) => {
                let events = normalize_events(raw);
                info!("Fetched {} calendar events", events.len());
                self.state_tx.send_modify(|state| {
                    state.events = events;
                    state.fetching = false;
                    state.fetch_error = None;
                    state.last_refreshed = Some(Local::now());
                });
            }
            Err(e) => {
                // Keep the previous events on screen
                warn!("Calendar fetch failed, keeping stale events: {}", e);
                self.state_tx.send_modify(|state| {
                    state.fetching = false;
                    state.fetch_error = Some(e.to_string());
                });
            }
        }
    }

    /// Cancel the timer and every in-flight provider call
    fn teardown(&mut self) {
        self.sign_ins.invalidate();
        self.fetches.invalidate();

        if let Some(token) = self.auto_refresh.take() {
            token.cancel();
        }
        if let Some(task) = self.sign_in_task.take() {
            task.abort();
        }
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
    }
}
