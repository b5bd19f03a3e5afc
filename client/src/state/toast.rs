//! Ephemeral notification queue.
//!
//! DESIGN
//! ======
//! Ids are monotonic per store and never reused, so a deferred auto-dismiss
//! can only ever remove the toast it was scheduled for. If that toast was
//! dismissed by hand first, the deferred call is a no-op.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::DEFAULT_TOAST_TIMEOUT_MS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    /// Zero means the toast stays until dismissed.
    pub timeout: Duration,
}

#[derive(Debug)]
struct ToastState {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Default for ToastState {
    fn default() -> Self {
        Self { toasts: Vec::new(), next_id: 1 }
    }
}

#[derive(Clone, Debug)]
pub struct ToastStore {
    inner: Arc<Mutex<ToastState>>,
    default_timeout: Duration,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TOAST_TIMEOUT_MS))
    }
}

impl ToastStore {
    #[must_use]
    pub fn new(default_timeout: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(ToastState::default())), default_timeout }
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `message` with the store's default timeout.
    pub fn show(&self, message: impl Into<String>) -> u64 {
        self.show_for(message, self.default_timeout)
    }

    /// Show `message`, auto-dismissing after `timeout` unless it is zero.
    pub fn show_for(&self, message: impl Into<String>, timeout: Duration) -> u64 {
        let id = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.toasts.push(Toast { id, message: message.into(), timeout });
            id
        };
        if !timeout.is_zero() {
            self.schedule_dismiss(id, timeout);
        }
        id
    }

    /// Remove toast `id`. Returns whether it was still showing.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut state = self.lock();
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        state.toasts.len() != before
    }

    /// Toasts currently showing, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    #[cfg(feature = "hydrate")]
    fn schedule_dismiss(&self, id: u64, timeout: Duration) {
        let store = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::sleep(timeout).await;
            store.dismiss(id);
        });
    }

    #[cfg(all(feature = "native", not(feature = "hydrate")))]
    fn schedule_dismiss(&self, id: u64, timeout: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(id, "no async runtime; toast will not auto-dismiss");
            return;
        };
        let store = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            store.dismiss(id);
        });
    }

    #[cfg(not(any(feature = "native", feature = "hydrate")))]
    fn schedule_dismiss(&self, id: u64, _timeout: Duration) {
        tracing::warn!(id, "no timer backend; toast will not auto-dismiss");
    }
}
