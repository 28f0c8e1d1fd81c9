use super::format::summary_subject;
use super::transport::{EmailCredentials, EmailTransport, OutgoingEmail};
use crate::config::EmailConfig;
use crate::error::{validation_error, DashResult, Error};
use crate::utils::time::truncate_message;
use chrono::Local;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// How long the sent confirmation stays up
pub const SENT_DISPLAY_WINDOW: Duration = Duration::from_secs(3);

/// Longest error message shown to the user
pub const ERROR_MESSAGE_LIMIT: usize = 100;

/// State of the email composer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    Sending,
    Sent { recipient: String },
    Failed(String),
}

/// Validates, sends and tracks the summary email
pub struct EmailDispatcher {
    transport: Arc<dyn EmailTransport>,
    config: EmailConfig,
    state_tx: Arc<watch::Sender<DispatchState>>,
    generation: Arc<AtomicU64>,
    sent_window: Duration,
}

impl EmailDispatcher {
    pub fn new(transport: Arc<dyn EmailTransport>, config: EmailConfig) -> Self {
        let (state_tx, _) = watch::channel(DispatchState::Idle);
        Self {
            transport,
            config,
            state_tx: Arc::new(state_tx),
            generation: Arc::new(AtomicU64::new(0)),
            sent_window: SENT_DISPLAY_WINDOW,
        }
    }

    /// Current composer state
    pub fn state(&self) -> DispatchState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<DispatchState> {
        self.state_tx.subscribe()
    }

    /// Send the summary text to `email`.
    ///
    /// A blank address or missing credentials fail before the transport is
    /// touched. Failures are never retried here.
    pub async fn send(&self, email: &str, text: &str) -> DashResult<()> {
        let recipient = email.trim();
        if recipient.is_empty() {
            warn!("Summary email requested without an address");
            return Err(validation_error("Please enter your email address"));
        }

        let claimed = self.state_tx.send_if_modified(|state| {
            if matches!(state, DispatchState::Sending) {
                false
            } else {
                *state = DispatchState::Sending;
                true
            }
        });
        if !claimed {
            return Err(validation_error("A summary is already being sent"));
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let credentials = match EmailCredentials::from_config(&self.config) {
            Ok(credentials) => credentials,
            Err(e) => {
                error!("Email service not configured: {}", e);
                self.fail(&e);
                return Err(e);
            }
        };

        let message = OutgoingEmail {
            to_email: recipient.to_string(),
            subject: summary_subject(&Local::now().date_naive()),
            body: text.to_string(),
        };

        info!("Sending daily summary to {}", recipient);
        match self.transport.send(&credentials, &message).await {
            Ok(()) => {
                info!("Daily summary sent to {}", recipient);
                self.state_tx.send_replace(DispatchState::Sent {
                    recipient: recipient.to_string(),
                });
                self.schedule_reset(generation);
                Ok(())
            }
            Err(e) => {
                error!("Error sending email: {}", e);
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn fail(&self, e: &Error) {
        self.state_tx.send_replace(DispatchState::Failed(truncate_message(
            &e.to_string(),
            ERROR_MESSAGE_LIMIT,
        )));
    }

    /// Return to idle once the confirmation window passes, unless another
    /// send has started since.
    fn schedule_reset(&self, generation: u64) {
        let state_tx = Arc::clone(&self.state_tx);
        let current = Arc::clone(&self.generation);
        let window = self.sent_window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if current.load(Ordering::SeqCst) == generation {
                state_tx.send_if_modified(|state| {
                    if matches!(state, DispatchState::Sent { .. }) {
                        *state = DispatchState::Idle;
                        true
                    } else {
                        false
                    }
                });
            }
        });
    }
}
