use crate::commands::CommandResult;
use crate::dashboard::Dashboard;
use crate::settings::Theme;
use tracing::info;

/// Change the name in the greeting
pub fn name(dashboard: &Dashboard, name: &str) -> CommandResult {
    let settings = dashboard.settings().set_display_name(name)?;
    let name = settings.display_name.unwrap_or_default();
    Ok(vec![format!("Hello, {}!", name)])
}

/// Switch between the light and dark theme
pub fn theme(dashboard: &Dashboard) -> CommandResult {
    let theme = dashboard.settings().toggle_theme()?;
    let label = match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    Ok(vec![dashboard.palette().accent(&format!("Switched to the {} theme", label))])
}

/// Persist a widget's enabled flag. Registration happens at startup, so the
/// change shows from the next start.
pub async fn set_enabled(dashboard: &Dashboard, widget: &str, enabled: bool) -> CommandResult {
    let config = dashboard.components().get_config();
    config.write().await.set_component_enabled(widget, enabled)?;

    let action = if enabled { "enabled" } else { "disabled" };
    info!("Widget {} {}", widget, action);
    Ok(vec![format!("The {} widget is {} from the next start", widget, action)])
}
