use crate::components::{CalendarWidget, ComponentManager, QuoteWidget, WeatherWidget};
use crate::email::{format_summary, EmailDispatcher, EventLine, QuoteLine, SummaryDraft, WeatherLine};
use crate::error::DashResult;
use crate::settings::SettingsStore;
use crate::view::{self, Palette};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::info;

/// Seconds per animation tick
const TICK_SECONDS: f64 = 0.1;

/// The page: every registered widget, the settings and the email composer
pub struct Dashboard {
    components: Arc<ComponentManager>,
    settings: Arc<SettingsStore>,
    dispatcher: Arc<EmailDispatcher>,
}

impl Dashboard {
    pub fn new(
        components: Arc<ComponentManager>,
        settings: Arc<SettingsStore>,
        dispatcher: Arc<EmailDispatcher>,
    ) -> Self {
        Self {
            components,
            settings,
            dispatcher,
        }
    }

    pub fn components(&self) -> &Arc<ComponentManager> {
        &self.components
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn dispatcher(&self) -> &Arc<EmailDispatcher> {
        &self.dispatcher
    }

    /// Palette for the saved theme
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.theme())
    }

    /// Collect the digest from the widgets. Weather and quote fall back to the
    /// seed values until they have been fetched once; events come from the
    /// connected calendar only.
    pub async fn summary_draft(&self, date: NaiveDate) -> SummaryDraft {
        let mut draft = SummaryDraft::seed(date);

        if let Some(weather) = self.components.get::<WeatherWidget>() {
            if let Some(snapshot) = weather.last_fetched().await {
                draft.weather = WeatherLine::from(&snapshot);
            }
        }

        if let Some(quotes) = self.components.get::<QuoteWidget>() {
            if let Some(quote) = quotes.last_fetched().await {
                draft.quote = QuoteLine::from(&quote);
            }
        }

        if let Some(calendar) = self.components.get::<CalendarWidget>() {
            let snapshot = calendar.snapshot().await;
            if snapshot.is_authenticated() {
                draft.events = snapshot.events.iter().map(EventLine::from).collect();
            }
        }

        draft
    }

    /// Plain-text digest for `date`
    pub async fn summary_text(&self, date: NaiveDate) -> String {
        format_summary(&self.summary_draft(date).await)
    }

    /// Email today's digest to `recipient`
    pub async fn send_summary(&self, recipient: &str) -> DashResult<()> {
        let text = self.summary_text(Local::now().date_naive()).await;
        info!("Dispatching daily summary");
        self.dispatcher.send(recipient, &text).await
    }

    /// Render the whole page at `now`; `tick` drives the spinners
    pub async fn render(&self, now: &NaiveDateTime, tick: u64) -> Vec<String> {
        let palette = self.palette();
        let mut sections = vec![view::greeting::render_greeting(
            &self.settings.display_name(),
            now,
            &palette,
        )];

        if let Some(weather) = self.components.get::<WeatherWidget>() {
            sections.push(view::weather::render_weather(
                &weather.state().await,
                &palette,
                tick,
            ));
        }

        if let Some(calendar) = self.components.get::<CalendarWidget>() {
            sections.push(view::calendar::render_calendar(
                &calendar.snapshot().await,
                &palette,
                tick,
            ));
        }

        if let Some(quotes) = self.components.get::<QuoteWidget>() {
            sections.push(view::quote::render_quote(
                &quotes.state().await,
                &palette,
                tick as f64 * TICK_SECONDS,
            ));
        }

        sections.push(view::email::render_email(
            &self.dispatcher.state(),
            &palette,
            tick as f64 * TICK_SECONDS,
        ));

        let mut lines = Vec::new();
        for section in sections {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(section);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::quotes::MockQuoteProvider;
    use crate::components::weather::{FixedGeolocator, MockWeatherProvider};
    use crate::components::Component;
    use crate::config::{Config, EmailConfig};
    use crate::email::EmailJsTransport;
    use std::time::Duration;
    use tokio::sync::RwLock;

    fn dashboard(dir: &tempfile::TempDir, manager: ComponentManager) -> Dashboard {
        let settings = SettingsStore::load(dir.path().join("settings.toml")).unwrap();
        let dispatcher = EmailDispatcher::new(
            Arc::new(EmailJsTransport::new().unwrap()),
            EmailConfig::default(),
        );
        Dashboard::new(Arc::new(manager), Arc::new(settings), Arc::new(dispatcher))
    }

    fn config() -> Arc<RwLock<Config>> {
        Arc::new(RwLock::new(Config::default()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[tokio::test]
    async fn test_unfetched_widgets_use_seed_draft() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = dashboard(&dir, ComponentManager::new(config()));

        assert_eq!(dashboard.summary_draft(today()).await, SummaryDraft::seed(today()));
    }

    #[tokio::test]
    async fn test_draft_uses_fetched_weather() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = ComponentManager::new(config());
        manager.register(WeatherWidget::new(
            Arc::new(MockWeatherProvider::new(Duration::ZERO)),
            Arc::new(FixedGeolocator::default()),
        ));
        manager.register(QuoteWidget::new(Arc::new(MockQuoteProvider::new(Duration::ZERO))));
        let dashboard = dashboard(&dir, manager);

        let weather = dashboard.components().get::<WeatherWidget>().unwrap();
        weather.submit_city("Lisbon").await.unwrap();

        let draft = dashboard.summary_draft(today()).await;
        assert_eq!(draft.weather.location, "Lisbon");
        assert_eq!(draft.quote, SummaryDraft::seed(today()).quote);
        assert!(draft.events.is_empty());
    }

    #[tokio::test]
    async fn test_render_skips_disabled_widgets() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = ComponentManager::new(config());
        manager.register(QuoteWidget::new(Arc::new(MockQuoteProvider::new(Duration::ZERO))));
        let dashboard = dashboard(&dir, manager);

        let quotes = dashboard.components().get::<QuoteWidget>().unwrap();
        quotes.init(config()).await.unwrap();

        dashboard.settings().set_display_name("Ada").unwrap();
        let now = today().and_hms_opt(8, 0, 0).unwrap();
        let lines = dashboard.render(&now, 0).await;
        let page = lines.join("\n");

        assert!(page.contains("Good Morning, Ada!"));
        assert!(page.contains("Daily Inspiration"));
        assert!(!page.contains("Weather"));
        assert!(!page.contains("Today's Schedule"));
        assert!(page.contains("Email Summary"));
    }
}
