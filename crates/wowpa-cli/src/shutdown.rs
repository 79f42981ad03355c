use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Stop flag shared by the polling loop, the Ctrl+C handler and the
/// keyboard monitor. [`ShutdownSignal::wait`] is the loop's tick sleep and
/// returns early once the flag is set.
#[derive(Default)]
pub struct ShutdownSignal {
    shutdown: AtomicBool,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` unless shutdown is triggered first.
    ///
    /// Returns `true` when woken by shutdown.
    pub fn wait(&self, duration: Duration) -> bool {
        if self.is_shutdown() {
            return true;
        }

        // A poisoned lock means a panicking thread; stop as well.
        let Ok(guard) = self.mutex.lock() else {
            return true;
        };
        match self
            .condvar
            .wait_timeout_while(guard, duration, |_| !self.is_shutdown())
        {
            Ok((_, timeout)) => !timeout.timed_out(),
            Err(_) => true,
        }
    }
}
