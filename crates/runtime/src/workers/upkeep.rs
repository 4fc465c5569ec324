//! Periodic tickers for boss spawns and world maintenance.
//!
//! The tickers carry no state; they translate the passage of time into
//! commands so the world worker performs the actual sweeps. The first check
//! of each ticker runs one full period after startup. Both exit once the
//! command channel closes.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::Command;

/// Drives boss spawn checks.
pub(crate) async fn spawn_ticker(command_tx: mpsc::Sender<Command>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if command_tx.send(Command::SpawnCheck).await.is_err() {
            return;
        }
    }
}

/// Drives party cleanup, the daily-reset sweep, and snapshot saves.
pub(crate) async fn maintenance_ticker(command_tx: mpsc::Sender<Command>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if command_tx.send(Command::Maintenance).await.is_err() {
            return;
        }
    }
}
