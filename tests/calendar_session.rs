use daily_prep::components::calendar::{
    AuthState, CalendarHandle, CalendarSnapshot, EventCategory, MockCalendarProvider,
};
use daily_prep::error::Error;
use daily_prep::view::calendar::{render_calendar, FREE_DAY};
use daily_prep::view::Palette;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

const REFRESH: Duration = Duration::from_secs(60);

fn provider() -> Arc<MockCalendarProvider> {
    Arc::new(
        MockCalendarProvider::new(Duration::from_secs(1), Duration::from_secs(1)).with_event_count(4),
    )
}

/// Wait for the session to reach a state matching `pred`
async fn wait_until<F>(handle: &CalendarHandle, pred: F) -> CalendarSnapshot
where
    F: Fn(&CalendarSnapshot) -> bool,
{
    let mut rx = handle.subscribe();
    let snapshot = timeout(Duration::from_secs(30), rx.wait_for(|s| pred(s)))
        .await
        .expect("timed out waiting for calendar state")
        .expect("calendar actor stopped")
        .clone();
    snapshot
}

fn loaded(snapshot: &CalendarSnapshot) -> bool {
    snapshot.is_authenticated() && !snapshot.fetching && snapshot.last_refreshed.is_some()
}

#[tokio::test(start_paused = true)]
async fn test_sign_in_loads_todays_events() {
    let provider = provider();
    let handle = CalendarHandle::new(provider.clone(), REFRESH);

    handle.sign_in().await.unwrap();
    assert_eq!(handle.snapshot().auth, AuthState::Loading);

    let snapshot = wait_until(&handle, loaded).await;
    let titles: Vec<&str> = snapshot.events.iter().map(|e| e.summary.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Team Standup", "Project Review", "Lunch with Sarah", "Client Presentation"]
    );
    let categories: Vec<EventCategory> = snapshot.events.iter().map(|e| e.category).collect();
    assert_eq!(
        categories,
        vec![
            EventCategory::Meeting,
            EventCategory::Work,
            EventCategory::Personal,
            EventCategory::Meeting
        ]
    );
    assert!(snapshot.error.is_none());
    assert_eq!(provider.fetch_calls(), 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failed_sign_in_keeps_message_and_allows_retry() {
    let provider = provider();
    provider.set_fail_sign_in(true);
    let handle = CalendarHandle::new(provider.clone(), REFRESH);

    handle.sign_in().await.unwrap();
    let failed = wait_until(&handle, |s| s.auth == AuthState::Error).await;
    assert_eq!(
        failed.error.as_deref(),
        Some("Provider error: Failed to sign in with Google")
    );
    assert!(failed.events.is_empty());
    assert_eq!(provider.fetch_calls(), 0);

    provider.set_fail_sign_in(false);
    handle.sign_in().await.unwrap();
    let retrying = handle.snapshot();
    assert_eq!(retrying.auth, AuthState::Loading);
    assert!(retrying.error.is_none());

    wait_until(&handle, loaded).await;
    assert_eq!(provider.sign_in_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_sign_out_clears_events_with_fetch_in_flight() {
    let provider = provider();
    let handle = CalendarHandle::new(provider.clone(), REFRESH);

    handle.sign_in().await.unwrap();
    wait_until(&handle, loaded).await;

    // Second fetch is still in flight when the session ends
    handle.fetch_events().await.unwrap();
    assert!(handle.snapshot().fetching);
    handle.sign_out().await.unwrap();
    assert_eq!(handle.snapshot(), CalendarSnapshot::default());

    sleep(Duration::from_secs(5)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.auth, AuthState::Initial);
    assert!(snapshot.events.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_keeps_previous_events() {
    let provider = provider();
    let handle = CalendarHandle::new(provider.clone(), REFRESH);

    handle.sign_in().await.unwrap();
    let before = wait_until(&handle, loaded).await;

    provider.set_fail_fetch(true);
    handle.fetch_events().await.unwrap();
    let after = wait_until(&handle, |s| s.fetch_error.is_some()).await;

    assert!(after.is_authenticated());
    assert!(!after.fetching);
    assert_eq!(after.events, before.events);
    assert_eq!(after.last_refreshed, before.last_refreshed);

    let lines = render_calendar(&after, &Palette::plain(), 0);
    assert!(lines.iter().any(|l| l.contains("Showing earlier events")));
}

#[tokio::test(start_paused = true)]
async fn test_auto_refresh_runs_until_sign_out() {
    let provider = provider();
    let handle = CalendarHandle::new(provider.clone(), REFRESH);

    handle.sign_in().await.unwrap();
    wait_until(&handle, loaded).await;
    assert_eq!(provider.fetch_calls(), 1);

    sleep(Duration::from_secs(55)).await;
    assert_eq!(provider.fetch_calls(), 1);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(provider.fetch_calls(), 2);

    handle.sign_out().await.unwrap();
    sleep(Duration::from_secs(300)).await;
    assert_eq!(provider.fetch_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_transitions_are_rejected() {
    let provider = provider();
    let handle = CalendarHandle::new(provider.clone(), REFRESH);

    assert!(matches!(
        handle.sign_out().await,
        Err(Error::InvalidTransition(_))
    ));
    assert!(matches!(
        handle.fetch_events().await,
        Err(Error::InvalidTransition(_))
    ));

    handle.sign_in().await.unwrap();
    assert!(matches!(
        handle.sign_in().await,
        Err(Error::InvalidTransition(_))
    ));

    wait_until(&handle, loaded).await;
    assert!(matches!(
        handle.sign_in().await,
        Err(Error::InvalidTransition(_))
    ));
    assert_eq!(provider.sign_in_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_no_events_renders_free_day() {
    let provider = Arc::new(
        MockCalendarProvider::new(Duration::ZERO, Duration::ZERO).with_event_count(0),
    );
    let handle = CalendarHandle::new(provider, REFRESH);

    handle.sign_in().await.unwrap();
    let snapshot = wait_until(&handle, loaded).await;
    assert!(snapshot.events.is_empty());

    let lines = render_calendar(&snapshot, &Palette::plain(), 0);
    assert!(lines.iter().any(|l| l == FREE_DAY));
}

#[tokio::test(start_paused = true)]
async fn test_zero_refresh_interval_keeps_refreshing() {
    let provider = Arc::new(
        MockCalendarProvider::new(Duration::ZERO, Duration::ZERO).with_event_count(2),
    );
    let handle = CalendarHandle::new(provider.clone(), Duration::ZERO);

    handle.sign_in().await.unwrap();
    wait_until(&handle, loaded).await;
    assert_eq!(provider.fetch_calls(), 1);

    sleep(Duration::from_millis(2500)).await;
    assert!(provider.fetch_calls() >= 2);
    assert!(handle.snapshot().is_authenticated());

    handle.shutdown().await.unwrap();
}
