//! Per-battle round loop.
//!
//! One task per active battle. The loop only paces rounds and enforces the
//! wall-clock deadline; all state lives in the world worker, which resolves
//! each round when the `BattleRound` command arrives. Rounds for one boss are
//! therefore strictly sequential and serialized with every other mutation.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep};
use tracing::debug;

use super::{Command, RoundOutcome};

pub(crate) async fn battle_loop(
    boss_key: String,
    command_tx: mpsc::Sender<Command>,
    round_delay: Duration,
    deadline: Duration,
) {
    let deadline_at = Instant::now() + deadline;

    loop {
        sleep(round_delay).await;

        if Instant::now() >= deadline_at {
            debug!(boss = %boss_key, "battle deadline reached");
            let _ = command_tx.send(Command::BattleTimeout { boss_key }).await;
            return;
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        if command_tx
            .send(Command::BattleRound {
                boss_key: boss_key.clone(),
                reply: reply_tx,
            })
            .await
            .is_err()
        {
            // Worker gone, nothing left to drive.
            return;
        }

        match reply_rx.await {
            Ok(RoundOutcome::Continue) => {}
            Ok(RoundOutcome::Finished) | Err(_) => return,
        }
    }
}
