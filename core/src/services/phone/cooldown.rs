//! Resend cooldown timer
//!
//! Counts down once per second alongside the awaiting-verification state and
//! publishes the remaining seconds through a watch channel. The countdown
//! task is aborted on cancel, reset, and drop so no orphaned timer outlives
//! the phone flow.

use std::sync::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Countdown gating the "resend code" action
pub struct ResendCooldown {
    remaining_tx: watch::Sender<u32>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ResendCooldown {
    pub fn new() -> Self {
        let (remaining_tx, _) = watch::channel(0);
        Self {
            remaining_tx,
            task: Mutex::new(None),
        }
    }

    /// Start (or restart) the countdown from `secs`
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, secs: u32) {
        self.cancel();
        self.remaining_tx.send_replace(secs);
        if secs == 0 {
            return;
        }

        let remaining_tx = self.remaining_tx.clone();
        let handle = tokio::spawn(async move {
            let mut remaining = secs;
            while remaining > 0 {
                sleep(Duration::from_secs(1)).await;
                remaining -= 1;
                remaining_tx.send_replace(remaining);
            }
        });
        *self.task.lock().unwrap() = Some(handle);
    }

    /// Abort the countdown task, leaving the last published value in place
    pub fn cancel(&self) {
        if let Some(handle) = self.task.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Abort the countdown and publish zero
    pub fn reset(&self) {
        self.cancel();
        self.remaining_tx.send_replace(0);
    }

    /// Subscribe to the remaining-seconds channel
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining_tx.subscribe()
    }

    /// Seconds left before resend is allowed
    pub fn remaining(&self) -> u32 {
        *self.remaining_tx.borrow()
    }

    /// Whether the user may request another code
    pub fn can_resend(&self) -> bool {
        self.remaining() == 0
    }
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ResendCooldown {
    fn drop(&mut self) {
        self.cancel();
    }
}
