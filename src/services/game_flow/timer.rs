//! Cancellable per-phase countdown timer.
//!
//! One timer drives one phase window. It fires a [`TimerSignal::Tick`] once
//! per interval with the remaining count and a single
//! [`TimerSignal::Expired`] when the window closes, then stops. Signals are
//! delivered over a bounded(1) channel: ticks use `try_send`, so a tick
//! arriving while the runtime is still processing the previous signal is
//! dropped rather than queued. Expiry is never dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Tick { remaining: u32 },
    Expired,
}

pub struct PhaseTimer;

impl PhaseTimer {
    /// Start a countdown of `ticks` intervals. Cancelling the token stops
    /// the timer without firing expiry.
    pub fn start(
        ticks: u32,
        interval: Duration,
        cancel: CancellationToken,
    ) -> mpsc::Receiver<TimerSignal> {
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            let mut clock = tokio::time::interval(interval);
            clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately; consume it so
            // the countdown starts one full interval from now.
            clock.tick().await;

            let mut remaining = ticks;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = clock.tick() => {}
                }

                remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    // Expiry must reach the runtime even if it is mid-tick;
                    // block until there is channel capacity.
                    let _ = tx.send(TimerSignal::Expired).await;
                    return;
                }
                if tx.try_send(TimerSignal::Tick { remaining }).is_err() {
                    // Receiver busy or gone; drop the tick, never queue it.
                    if tx.is_closed() {
                        return;
                    }
                }
            }
        });

        rx
    }
}
