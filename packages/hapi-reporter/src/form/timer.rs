//! Cancellable delayed task for hiding the success notification.

use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// At most one pending dismissal; scheduling a new one cancels the old one.
/// Dropping the timer cancels whatever is pending.
#[derive(Default)]
pub(crate) struct DismissTimer {
    pending: Mutex<Option<CancellationToken>>,
}

impl DismissTimer {
    /// Run `on_fire` after `after` unless cancelled first. Needs a tokio runtime.
    pub(crate) fn schedule<F>(&self, after: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        tokio::spawn(async move {
            let done = token.clone();
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Notification dismissal cancelled");
                }
                _ = tokio::time::sleep(after) => {
                    on_fire();
                    done.cancel();
                }
            }
        });
    }

    pub(crate) fn cancel(&self) {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(token) = pending {
            token.cancel();
        }
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counter_task(fired: &Arc<AtomicU32>) -> impl FnOnce() + Send + 'static {
        let fired = Arc::clone(fired);
        move || {
            fired.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let fired = Arc::new(AtomicU32::new(0));
        let timer = DismissTimer::default();
        timer.schedule(Duration::from_secs(11), counter_task(&fired));

        tokio::time::sleep(Duration::from_millis(10_999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_task() {
        let fired = Arc::new(AtomicU32::new(0));
        let timer = DismissTimer::default();
        timer.schedule(Duration::from_secs(11), counter_task(&fired));
        tokio::time::sleep(Duration::from_secs(5)).await;
        timer.schedule(Duration::from_secs(11), counter_task(&fired));

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_task() {
        let fired = Arc::new(AtomicU32::new(0));
        let timer = DismissTimer::default();
        timer.schedule(Duration::from_secs(11), counter_task(&fired));
        assert!(timer.is_pending());
        drop(timer);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
