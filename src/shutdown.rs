use crate::components::ComponentManager;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Set up signal handlers for graceful shutdown
pub async fn handle_signals(
    shutdown_send: oneshot::Sender<()>,
    component_manager: Arc<ComponentManager>,
) {
    // Wait for a termination signal
    wait_for_signal().await;

    // Shut down all components
    if let Err(e) = component_manager.shutdown_all().await {
        error!("Error shutting down components: {:?}", e);
    } else {
        info!("All components shut down successfully");
    }

    // Send shutdown signal to main task
    let _ = shutdown_send.send(());
}

/// Platform-specific signal handling implementation
#[cfg(unix)]
async fn wait_for_signal() {
    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to install signal handlers, falling back to Ctrl+C: {}", e);
                wait_for_ctrl_c().await;
                return;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, initiating graceful shutdown");
        }
    }
}

/// Platform-specific signal handling implementation
#[cfg(windows)]
async fn wait_for_signal() {
    let (mut ctrlc, mut ctrlbreak) = match (ctrl_c(), ctrl_break()) {
        (Ok(ctrlc), Ok(ctrlbreak)) => (ctrlc, ctrlbreak),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to install signal handlers, falling back to Ctrl+C: {}", e);
            wait_for_ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, initiating graceful shutdown");
        }
    }
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(e) => {
            error!("Unable to listen for shutdown signals: {}", e);
            std::future::pending::<()>().await
        }
    }
}
