//! Runtime-only change notification attached to nodes and leaves.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// A one-shot signal fired when the node or leaf that owns it is replaced
/// by a copy-on-write update.
///
/// Clones share the same signal. A watch never resets once signaled, and it
/// is never part of the serialized form: decoded nodes start with a fresh,
/// unsignaled watch.
#[derive(Clone, Default)]
pub struct Watch {
    inner: Arc<WatchInner>,
}

#[derive(Default)]
struct WatchInner {
    signaled: Mutex<bool>,
    cond: Condvar,
}

impl Watch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal, waking every waiter. Idempotent.
    pub fn signal(&self) {
        let mut signaled = self
            .inner
            .signaled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !*signaled {
            *signaled = true;
            self.inner.cond.notify_all();
        }
    }

    pub fn is_signaled(&self) -> bool {
        *self
            .inner
            .signaled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until the signal fires or `timeout` elapses.
    ///
    /// Returns `true` if the signal fired.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self
            .inner
            .signaled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .inner
            .cond
            .wait_timeout_while(guard, timeout, |signaled| !*signaled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }

    /// Whether two handles observe the same signal.
    pub fn same(&self, other: &Watch) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Watch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watch")
            .field("signaled", &self.is_signaled())
            .finish()
    }
}
