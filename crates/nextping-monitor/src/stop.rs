use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;

/// Cloneable flag that ends a running monitor, waking it from its pause.
#[derive(Clone, Default)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock() = true;
        cvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        *self.inner.0.lock()
    }

    /// Sleeps for up to `timeout`, returning early once stopped. Returns
    /// whether the signal has fired.
    pub fn wait(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock();
        if !*stopped {
            cvar.wait_while_for(&mut stopped, |stopped| !*stopped, timeout);
        }
        *stopped
    }
}
