//! Periodic tick source bound to a single round.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Interval between round ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tick emitted for the round identified by `round_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTick {
    /// Round that spawned the timer.
    pub round_id: u64,
}

/// Handle to a running tick task. Dropping it stops the ticks.
#[derive(Debug)]
pub struct RoundTimer {
    round_id: u64,
    handle: JoinHandle<()>,
}

impl RoundTimer {
    /// Spawn a task sending a [`RoundTick`] every `period`, starting one
    /// period from now, until cancelled or the receiver goes away.
    pub fn start<T>(round_id: u64, period: Duration, sender: mpsc::Sender<T>) -> Self
    where
        T: From<RoundTick> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(T::from(RoundTick { round_id })).await.is_err() {
                    break;
                }
            }
        });
        debug!(round_id, "Round timer started");
        Self { round_id, handle }
    }

    /// Round this timer ticks for.
    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    /// Stop the ticks.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(round_id = self.round_id, "Round timer cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_carry_round_id() {
        let (tx, mut rx) = mpsc::channel::<RoundTick>(8);
        let timer = RoundTimer::start(3, TICK_PERIOD, tx);
        assert_eq!(timer.round_id(), 3);

        let started = Instant::now();
        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(RoundTick { round_id: 3 }));
        }
        assert_eq!(started.elapsed(), Duration::from_secs(3));

        timer.cancel();
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_a_timer_leaves_one_tick_source() {
        let (tx, mut rx) = mpsc::channel::<RoundTick>(8);
        let first = RoundTimer::start(1, TICK_PERIOD, tx.clone());
        assert_eq!(rx.recv().await, Some(RoundTick { round_id: 1 }));

        let second = RoundTimer::start(2, TICK_PERIOD, tx);
        first.cancel();
        for _ in 0..4 {
            assert_eq!(rx.recv().await, Some(RoundTick { round_id: 2 }));
        }
        second.cancel();
        assert_eq!(rx.recv().await, None);
    }
}
