//! Delayed shutdown timer
//!
//! The simulation server ends a run with a single-byte control message;
//! the logger keeps draining the multicast group for a few more seconds
//! before exiting so late events are not lost. The timer is a one-shot
//! scheduled task with a cancel handle, so tests can assert arming and
//! cancellation without sleeping through the real delay.
//!
//! Dropping the handle cancels the timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a pending one-shot shutdown action
pub struct ShutdownTimer {
    cancel: Sender<()>,
    fired: Arc<AtomicBool>,
    worker: JoinHandle<()>,
}

impl ShutdownTimer {
    /// Schedule `action` to run once after `delay` unless cancelled first
    pub fn arm<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel, signal) = mpsc::channel();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let worker = thread::spawn(move || match signal.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                flag.store(true, Ordering::SeqCst);
                action();
            }
            // Explicit cancel, or the handle was dropped.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        });
        Self {
            cancel,
            fired,
            worker,
        }
    }

    /// True if the delay elapsed and the action ran
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Cancel the pending action. Returns true if the timer was stopped
    /// before firing; false if the action already ran.
    pub fn cancel(self) -> bool {
        let _ = self.cancel.send(());
        let _ = self.worker.join();
        !self.fired.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let (tx, rx) = mpsc::channel();
        let timer = ShutdownTimer::arm(Duration::from_millis(5), move || {
            tx.send(()).unwrap();
        });
        // Blocks only until the action fires, not for a fixed sleep.
        rx.recv_timeout(Duration::from_secs(2))
            .expect("timer did not fire");
        assert!(timer.fired());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let timer = ShutdownTimer::arm(Duration::from_secs(60), || {
            panic!("cancelled timer must not fire");
        });
        assert!(!timer.fired());
        assert!(timer.cancel());
    }

    #[test]
    fn test_cancel_after_fire_reports_false() {
        let (tx, rx) = mpsc::channel();
        let timer = ShutdownTimer::arm(Duration::from_millis(1), move || {
            tx.send(()).unwrap();
        });
        rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(!timer.cancel());
    }

    #[test]
    fn test_rearm_replaces_pending_timer() {
        // Re-receiving the control message cancels the pending timer and
        // arms a fresh one.
        let mut pending = Some(ShutdownTimer::arm(Duration::from_secs(60), || {
            panic!("replaced timer must not fire");
        }));

        let (tx, rx) = mpsc::channel();
        if let Some(timer) = pending.take() {
            assert!(timer.cancel());
        }
        pending = Some(ShutdownTimer::arm(Duration::from_millis(5), move || {
            tx.send(()).unwrap();
        }));

        rx.recv_timeout(Duration::from_secs(2))
            .expect("replacement timer did not fire");
        drop(pending);
    }
}
