/*!
 * Shared Driver State
 * The one coarse lock shared by the driver thread and every handle
 */

use super::state::DriverState;
use crate::core::types::SimTime;
use crate::simulation::AdmissionQueue;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::ThreadId;

/// State guarded by the driver lock
///
/// Critical sections are short: no pacing delay and no sink callback ever
/// runs while this is held.
pub(super) struct Inner {
    pub state: DriverState,
    pub admission: AdmissionQueue,
    /// The driver thread is waiting on the condvar because of a pause
    pub parked: bool,
    pub driver_thread: Option<ThreadId>,
}

pub(super) struct Shared {
    pub inner: Mutex<Inner>,
    /// Signalled on every state change, park and stop request
    pub wake: Condvar,
    stop: AtomicBool,
    now: AtomicU64,
}

impl Shared {
    pub fn new(admission: AdmissionQueue) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: DriverState::Idle,
                admission,
                parked: false,
                driver_thread: None,
            }),
            wake: Condvar::new(),
            stop: AtomicBool::new(false),
            now: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Raise the stop flag and wake the driver wherever it is suspended
    ///
    /// The flag is set before the lock is taken so a driver about to wait
    /// either sees it or is already waiting and receives the notification.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        let _inner = self.inner.lock();
        self.wake.notify_all();
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now.load(Ordering::Acquire)
    }

    #[inline]
    pub fn publish_time(&self, now: SimTime) {
        self.now.store(now, Ordering::Release);
    }

    /// Force the absorbing state and release every waiter
    pub fn terminate(&self) {
        let mut inner = self.inner.lock();
        inner.state = DriverState::Terminated;
        inner.parked = false;
        inner.driver_thread = None;
        self.wake.notify_all();
    }
}
