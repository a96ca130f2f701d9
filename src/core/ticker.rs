//! Periodic tick source driving the countdown.
//!
//! At most one ticker task is live at a time: starting again aborts the
//! previous task before spawning the new one, so ticks never double up.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Owns the single running tick task.
pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start ticking, replacing any ticker already running.
    ///
    /// The first tick fires immediately. Ticks missed while the receiver is
    /// busy are skipped rather than delivered in a burst.
    pub fn start(&mut self) -> mpsc::Receiver<()> {
        self.stop();

        let (tx, rx) = mpsc::channel(1);
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        }));
        rx
    }

    /// Cancel the running ticker, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log_debug!("Ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
