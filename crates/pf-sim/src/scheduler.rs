//! Wall-clock tick scheduler.
//!
//! One dedicated thread invokes a callback at a fixed interval.  Because
//! there is only one thread, at most one tick is ever in flight: a tick that
//! overruns its slot delays the next one, and missed slots are skipped
//! rather than replayed in a burst.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, warn};

use crate::{SimError, SimResult};

/// Handle to a running clock thread.  Dropping it stops the thread.
pub struct Scheduler {
    stop:       Arc<AtomicBool>,
    dispatched: Arc<AtomicU64>,
    handle:     Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawn the clock thread.  The first tick fires one `interval` from now.
    ///
    /// A callback returning `Err` is logged at `warn`; a panicking callback
    /// is caught and logged at `error`.  Neither stops the clock.
    pub fn start<F, E>(interval: Duration, mut tick: F) -> SimResult<Self>
    where
        F: FnMut() -> Result<(), E> + Send + 'static,
        E: Display,
    {
        if interval.is_zero() {
            return Err(SimError::Scheduler("tick interval must be positive".into()));
        }
        let first = Instant::now()
            .checked_add(interval)
            .ok_or_else(|| SimError::Scheduler(format!("tick interval {interval:?} is out of range")))?;

        let stop = Arc::new(AtomicBool::new(false));
        let dispatched = Arc::new(AtomicU64::new(0));

        let thread_stop = Arc::clone(&stop);
        let thread_dispatched = Arc::clone(&dispatched);
        let handle = thread::Builder::new()
            .name("pf-clock".into())
            .spawn(move || {
                let mut next = first;
                loop {
                    // Sleep until the slot, waking early on stop.
                    loop {
                        if thread_stop.load(Ordering::Acquire) {
                            return;
                        }
                        let now = Instant::now();
                        if now >= next {
                            break;
                        }
                        thread::park_timeout(next - now);
                    }

                    let n = thread_dispatched.fetch_add(1, Ordering::AcqRel);
                    match panic::catch_unwind(AssertUnwindSafe(|| tick())) {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => warn!("tick {n} failed: {e}"),
                        Err(payload) => error!("tick {n} panicked: {}", panic_message(&*payload)),
                    }

                    match next_slot(next, interval, Instant::now()) {
                        Some(slot) => next = slot,
                        None => {
                            error!("clock overflowed after tick {n}; stopping");
                            return;
                        }
                    }
                }
            })?;

        debug!("clock thread started ({} ms)", interval.as_millis());
        Ok(Self { stop, dispatched, handle: Some(handle) })
    }

    /// Stop ticking.
    ///
    /// From any other thread this waits for the in-flight tick to finish; no
    /// tick starts after it returns.  From inside a tick it only raises the
    /// stop flag: the current tick runs to completion and is the last one.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            return;
        }
        handle.thread().unpark();
        if handle.join().is_err() {
            error!("clock thread terminated abnormally");
        }
        debug!("clock thread stopped");
    }

    /// `false` once [`stop`](Self::stop) has been called.
    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::Acquire)
    }

    /// Ticks dispatched so far, including failed ones.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Acquire)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// First slot after `now` on the `interval` grid that started at `prev`.
/// Missed slots are skipped.  `None` if the clock would overflow.
fn next_slot(prev: Instant, interval: Duration, now: Instant) -> Option<Instant> {
    let mut next = prev.checked_add(interval)?;
    while next <= now {
        next = next.checked_add(interval)?;
    }
    Some(next)
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
