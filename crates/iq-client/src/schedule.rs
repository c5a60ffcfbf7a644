//! Cancellable interval tasks on the browser event loop

use gloo_timers::future::TimeoutFuture;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wasm_bindgen_futures::spawn_local;

// ============================================================================
// TASK HANDLE (Send + Sync)
// ============================================================================

/// Handle for stopping a scheduled task
#[derive(Debug, Clone)]
pub struct TaskHandle {
    stopped: Arc<AtomicBool>,
}

impl TaskHandle {
    pub(crate) fn new() -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop the task before its next tick
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        !self.is_stopped()
    }
}

/// Run `on_tick` every `interval_ms` until it breaks or the handle is stopped
pub fn spawn_interval<F>(interval_ms: u32, mut on_tick: F) -> TaskHandle
where
    F: FnMut() -> ControlFlow<()> + 'static,
{
    let handle = TaskHandle::new();
    let task = handle.clone();

    spawn_local(async move {
        loop {
            TimeoutFuture::new(interval_ms).await;
            if task.is_stopped() {
                tracing::trace!("interval task stopped");
                break;
            }
            if on_tick().is_break() {
                task.stop();
                break;
            }
        }
    });

    handle
}

// ============================================================================
// TASK SLOT
// ============================================================================

/// At most one live task; installing a new one stops the previous
#[derive(Debug, Clone, Default)]
pub struct TaskSlot {
    current: Arc<Mutex<Option<TaskHandle>>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, handle: TaskHandle) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(handle) {
                previous.stop();
            }
        }
    }

    pub fn clear(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.stop();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.current
            .lock()
            .map(|current| current.as_ref().is_some_and(TaskHandle::is_running))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_handle() {
        let handle = TaskHandle::new();
        assert!(!handle.is_stopped());
        assert!(handle.is_running());

        handle.stop();
        assert!(handle.is_stopped());
        assert!(!handle.is_running());
    }

    #[test]
    fn test_slot_stops_previous() {
        let slot = TaskSlot::new();
        let first = TaskHandle::new();
        let second = TaskHandle::new();

        slot.replace(first.clone());
        assert!(slot.is_running());

        slot.replace(second.clone());
        assert!(first.is_stopped());
        assert!(second.is_running());

        slot.clear();
        assert!(second.is_stopped());
        assert!(!slot.is_running());
    }
}
