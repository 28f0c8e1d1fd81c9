use crate::commands::CommandResult;
use crate::components::{QuoteWidget, WeatherWidget};
use crate::dashboard::Dashboard;
use crate::error::component_error;
use crate::view;

/// Swap in another random quote
pub async fn quote(dashboard: &Dashboard) -> CommandResult {
    let quotes = dashboard
        .components()
        .get::<QuoteWidget>()
        .ok_or_else(|| component_error("The quotes widget is disabled"))?;

    quotes.refresh().await?;
    Ok(view::quote::render_quote(&quotes.state().await, &dashboard.palette(), 1.0))
}

/// Manual city entry for the weather card
pub async fn city(dashboard: &Dashboard, city: &str) -> CommandResult {
    let weather = dashboard
        .components()
        .get::<WeatherWidget>()
        .ok_or_else(|| component_error("The weather widget is disabled"))?;

    weather.submit_city(city).await?;
    Ok(view::weather::render_weather(
        &weather.state().await,
        &dashboard.palette(),
        0,
    ))
}

/// Email today's summary to `recipient`
pub async fn send(dashboard: &Dashboard, recipient: &str) -> CommandResult {
    dashboard.send_summary(recipient).await?;
    Ok(view::email::render_email(
        &dashboard.dispatcher().state(),
        &dashboard.palette(),
        0.0,
    ))
}
