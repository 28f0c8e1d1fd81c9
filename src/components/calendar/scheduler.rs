use super::actor::CalendarCommand;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Shortest auto-refresh period
pub const MIN_REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// Start the auto-refresh task for an authenticated session.
///
/// Every `period` the task posts an `AutoRefresh` command to the actor. It
/// stops when the returned token is cancelled or the actor is gone. Periods
/// below [`MIN_REFRESH_PERIOD`] are raised to it.
pub fn start_auto_refresh(
    command_tx: mpsc::WeakSender<CalendarCommand>,
    period: Duration,
) -> CancellationToken {
    let period = if period < MIN_REFRESH_PERIOD {
        warn!("Calendar refresh period {:?} too short, using {:?}", period, MIN_REFRESH_PERIOD);
        MIN_REFRESH_PERIOD
    } else {
        period
    };

    let token = CancellationToken::new();
    let cancelled = token.clone();

    info!("Starting calendar auto-refresh every {}s", period.as_secs());

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    debug!("Calendar auto-refresh cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let Some(tx) = command_tx.upgrade() else {
                        break;
                    };
                    if tx.send(CalendarCommand::AutoRefresh).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    token
}
