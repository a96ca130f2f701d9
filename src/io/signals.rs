//! Shutdown signal handling.
//!
//! The countdown runs until Ctrl+C, SIGTERM, or SIGHUP. Signals are delivered
//! through tokio so the event loop can `select!` on them next to its ticks.

use tokio::signal;

/// Which signal asked the application to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
    Hangup,
}

impl ShutdownSignal {
    pub fn name(&self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Hangup => "SIGHUP",
        }
    }
}

/// Resolve once a shutdown signal arrives.
///
/// If a handler cannot be installed the failure is logged and that signal is
/// ignored; Ctrl+C still works.
pub async fn wait_for_shutdown() -> ShutdownSignal {
    let received = wait_for_signal().await;
    log_debug!("Received {}, shutting down", received.name());
    received
}

#[cfg(unix)]
async fn wait_for_signal() -> ShutdownSignal {
    use signal::unix::{SignalKind, signal as unix_signal};

    let mut terminate = match unix_signal(SignalKind::terminate()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            log_warning!("Failed to install SIGTERM handler: {e}");
            None
        }
    };
    let mut hangup = match unix_signal(SignalKind::hangup()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            log_warning!("Failed to install SIGHUP handler: {e}");
            None
        }
    };

    tokio::select! {
        _ = interrupt() => ShutdownSignal::Interrupt,
        Some(_) = recv_or_park(&mut terminate) => ShutdownSignal::Terminate,
        Some(_) = recv_or_park(&mut hangup) => ShutdownSignal::Hangup,
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> ShutdownSignal {
    interrupt().await;
    ShutdownSignal::Interrupt
}

async fn interrupt() {
    if let Err(e) = signal::ctrl_c().await {
        log_warning!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn recv_or_park(stream: &mut Option<signal::unix::Signal>) -> Option<()> {
    match stream {
        Some(stream) => stream.recv().await,
        None => std::future::pending().await,
    }
}
