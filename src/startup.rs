use crate::commands::{self, DashCommand};
use crate::components::calendar::{AuthState, CalendarSnapshot, MockCalendarProvider};
use crate::components::quotes::MockQuoteProvider;
use crate::components::weather::{FixedGeolocator, MockWeatherProvider};
use crate::components::{CalendarWidget, ComponentManager, QuoteWidget, WeatherWidget};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::email::{EmailDispatcher, EmailJsTransport};
use crate::error::Error;
use crate::settings::{SettingsStore, Theme};
use crate::shutdown;
use crate::view::animation::TextReveal;
use crate::view::{self, greeting::greeting_line};
use chrono::Local;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{oneshot, watch, RwLock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Frames in the header reveal
const REVEAL_STEPS: usize = 24;
const REVEAL_FRAME: Duration = Duration::from_millis(25);

/// Longest wait for the calendar before the startup summary is sent
const CALENDAR_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Load persisted settings and apply the startup overrides from config
pub fn load_settings(config: &Config) -> miette::Result<SettingsStore> {
    let settings = SettingsStore::load(&config.settings_path)?;

    if settings.current().display_name.is_none() {
        if let Some(name) = &config.display_name {
            settings.set_display_name(name)?;
        }
    }

    if let Some(raw) = &config.theme {
        match raw.parse::<Theme>() {
            Ok(theme) if theme != settings.theme() => {
                info!("Switching to {:?} theme", theme);
                settings.set_theme(theme)?;
            }
            Ok(_) => {}
            Err(e) => warn!("Ignoring THEME: {}", e),
        }
    }

    Ok(settings)
}

/// Register every enabled widget with its mock provider
pub fn build_components(config_arc: Arc<RwLock<Config>>, config: &Config) -> ComponentManager {
    let mut component_manager = ComponentManager::new(config_arc);

    if config.is_component_enabled("weather") {
        component_manager.register(WeatherWidget::new(
            Arc::new(MockWeatherProvider::new(
                config.mock_latency(MockWeatherProvider::DEFAULT_LATENCY_MS),
            )),
            Arc::new(FixedGeolocator::from_config(config)),
        ));
    }

    if config.is_component_enabled("calendar") {
        component_manager.register(CalendarWidget::new(Arc::new(MockCalendarProvider::new(
            config.mock_latency(MockCalendarProvider::DEFAULT_SIGN_IN_LATENCY_MS),
            config.mock_latency(MockCalendarProvider::DEFAULT_FETCH_LATENCY_MS),
        ))));
    }

    if config.is_component_enabled("quotes") {
        component_manager.register(QuoteWidget::new(Arc::new(MockQuoteProvider::new(
            config.mock_latency(MockQuoteProvider::DEFAULT_LATENCY_MS),
        ))));
    }

    component_manager
}

/// Build the dashboard, print it, then follow the calendar and run typed
/// commands until shutdown
pub async fn run(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let config_snapshot = config.read().await.clone();

    let settings = Arc::new(load_settings(&config_snapshot)?);
    let component_manager = Arc::new(build_components(Arc::clone(&config), &config_snapshot));

    let transport = Arc::new(EmailJsTransport::new()?);
    let dispatcher = Arc::new(EmailDispatcher::new(
        transport,
        config_snapshot.email.clone(),
    ));

    let dashboard = Dashboard::new(
        Arc::clone(&component_manager),
        Arc::clone(&settings),
        dispatcher,
    );

    // Create shutdown channel
    let (shutdown_send, mut shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    reveal_header(&settings.display_name()).await;

    // Initialize components
    if let Err(e) = component_manager.init_all().await {
        error!("Failed to initialize components: {:?}", e);
    }

    print_lines(&dashboard.render(&Local::now().naive_local(), 0).await);

    let mut calendar_rx = match component_manager.get::<CalendarWidget>() {
        Some(calendar) => calendar.get_handle().await.map(|handle| handle.subscribe()),
        None => None,
    };

    if let Some(recipient) = &config_snapshot.summary_email {
        if let Some(rx) = calendar_rx.as_mut() {
            wait_for_calendar(rx).await;
        }
        let summary = dashboard.summary_text(Local::now().date_naive()).await;
        println!();
        print_lines(&view::email::render_preview(&summary, &dashboard.palette()));

        if let Err(e) = dashboard.send_summary(recipient).await {
            error!("Daily summary not sent: {}", e);
        }
        print_lines(&view::email::render_email(
            &dashboard.dispatcher().state(),
            &dashboard.palette(),
            0.0,
        ));
    }

    info!("Dashboard ready, type help for commands or press Ctrl+C to exit");

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut tick = 0u64;
    loop {
        tokio::select! {
            _ = &mut shutdown_recv => {
                info!("Received shutdown signal, closing dashboard");
                break;
            }
            snapshot = calendar_changed(&mut calendar_rx) => {
                tick += 1;
                println!();
                print_lines(&view::calendar::render_calendar(&snapshot, &dashboard.palette(), tick));
            }
            line = input.next_line(), if input_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("Input closed, watching the calendar only");
                        input_open = false;
                        continue;
                    }
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        input_open = false;
                        continue;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                tick += 1;
                if run_command(&dashboard, &line, tick).await == Flow::Quit {
                    if let Err(e) = component_manager.shutdown_all().await {
                        error!("Error shutting down components: {:?}", e);
                    }
                    break;
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Parse and run one line of input, printing the outcome
async fn run_command(dashboard: &Dashboard, line: &str, tick: u64) -> Flow {
    let palette = dashboard.palette();
    let command = match line.parse::<DashCommand>() {
        Ok(command) => command,
        Err(e) => {
            println!("{}", palette.error(&e.to_string()));
            return Flow::Continue;
        }
    };

    let flow = if command == DashCommand::Quit {
        Flow::Quit
    } else {
        Flow::Continue
    };
    let redraw = matches!(command, DashCommand::Name(_) | DashCommand::Theme);

    println!();
    match commands::execute(dashboard, command).await {
        Ok(lines) => {
            print_lines(&lines);
            if redraw {
                println!();
                print_lines(&dashboard.render(&Local::now().naive_local(), tick).await);
            }
        }
        Err(e) => {
            warn!("Command failed: {}", e);
            println!("{}", dashboard.palette().error(&e.to_string()));
        }
    }

    flow
}

/// Type the greeting out before the first full render
async fn reveal_header(name: &str) {
    let line = greeting_line(name, &Local::now().naive_local());
    let reveal = TextReveal::new(&line);
    let mut stdout = std::io::stdout();

    for frame in reveal.frames(REVEAL_STEPS) {
        let _ = write!(stdout, "\r\x1b[2K{}", frame);
        let _ = stdout.flush();
        tokio::time::sleep(REVEAL_FRAME).await;
    }
    let _ = writeln!(stdout, "\r\x1b[2K");
}

/// Wait until sign-in and the first fetch have settled, within a bound
async fn wait_for_calendar(rx: &mut watch::Receiver<CalendarSnapshot>) {
    let settled = tokio::time::timeout(
        CALENDAR_SETTLE_TIMEOUT,
        rx.wait_for(|snapshot| snapshot.auth != AuthState::Loading && !snapshot.fetching),
    )
    .await
    .is_ok();

    if !settled {
        warn!("Calendar still loading, sending summary without it");
    }
}

/// Next calendar snapshot. Never resolves without a live calendar.
async fn calendar_changed(rx: &mut Option<watch::Receiver<CalendarSnapshot>>) -> CalendarSnapshot {
    let changed = match rx.as_mut() {
        Some(receiver) => receiver.changed().await.is_ok(),
        None => false,
    };

    match rx.as_mut() {
        Some(receiver) if changed => receiver.borrow_and_update().clone(),
        _ => {
            *rx = None;
            std::future::pending().await
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
