use crate::commands::CommandResult;
use crate::components::{CalendarHandle, CalendarWidget};
use crate::dashboard::Dashboard;
use crate::error::{component_error, DashResult};

/// Resolve the running calendar session
async fn calendar_handle(dashboard: &Dashboard) -> DashResult<CalendarHandle> {
    let Some(calendar) = dashboard.components().get::<CalendarWidget>() else {
        tracing::debug!("Calendar component not found in ComponentManager");
        return Err(component_error("The calendar widget is disabled"));
    };

    calendar
        .get_handle()
        .await
        .ok_or_else(|| component_error("The calendar is not running yet"))
}

/// Connect, or retry after a failed sign-in
pub async fn connect(dashboard: &Dashboard) -> CommandResult {
    calendar_handle(dashboard).await?.sign_in().await?;
    Ok(vec!["Connecting to Google Calendar...".to_string()])
}

/// End the session and clear the events
pub async fn disconnect(dashboard: &Dashboard) -> CommandResult {
    calendar_handle(dashboard).await?.sign_out().await?;
    Ok(vec!["Signed out of Google Calendar".to_string()])
}

/// Fetch today's events again
pub async fn refresh(dashboard: &Dashboard) -> CommandResult {
    calendar_handle(dashboard).await?.fetch_events().await?;
    Ok(vec!["Refreshing today's events...".to_string()])
}
