use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

use crate::error::WaitError;

#[derive(Debug, Default)]
struct Inner {
    count: AtomicUsize,
    notify: Notify,
}

/// Waits for a number of tasks to finish. Clones share the same counter.
///
/// Call [`add`](Self::add) before starting work and [`done`](Self::done)
/// when each unit completes; [`wait`](Self::wait) resolves once the counter
/// is back at zero.
#[derive(Debug, Clone, Default)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, n: usize) {
        self.inner.count.fetch_add(n, Ordering::AcqRel);
    }

    /// Mark one unit of work as finished.
    pub fn done(&self) {
        let result = self
            .inner
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        match result {
            Ok(1) => self.inner.notify.notify_waiters(),
            Ok(_) => {}
            Err(_) => log::warn!("WaitGroup::done called on a zero counter"),
        }
    }

    /// Number of unfinished units.
    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }

    /// Resolve once the counter reaches zero.
    pub async fn wait(&self) {
        loop {
            // Registered before the check, so a concurrent `done` cannot be missed.
            let notified = self.inner.notify.notified();
            if self.count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Wait for `wg`, giving up with [`WaitError::Cancelled`] when `cancel`
/// resolves first.
pub async fn wait_until<F>(wg: &WaitGroup, cancel: F) -> Result<(), WaitError>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancel => Err(WaitError::Cancelled),
        _ = wg.wait() => Ok(()),
    }
}

/// Wait for `wg` for at most `timeout`.
pub async fn wait_timeout(wg: &WaitGroup, timeout: Duration) -> Result<(), WaitError> {
    tokio::time::timeout(timeout, wg.wait())
        .await
        .map_err(|_| WaitError::DeadlineExceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_wait_zero() {
        let wg = WaitGroup::new();
        wg.wait().await;
        assert_eq!(wg.count(), 0);
    }

    #[tokio::test]
    async fn test_wait_for_tasks() {
        let wg = WaitGroup::new();
        let finished = Arc::new(AtomicUsize::new(0));

        for i in 0..5 {
            wg.add(1);
            let wg = wg.clone();
            let finished = Arc::clone(&finished);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5 * i)).await;
                finished.fetch_add(1, Ordering::SeqCst);
                wg.done();
            });
        }

        wait_timeout(&wg, Duration::from_secs(5)).await.unwrap();
        assert_eq!(finished.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_done_on_zero() {
        let wg = WaitGroup::new();
        wg.done();
        assert_eq!(wg.count(), 0);
        wg.add(2);
        wg.done();
        assert_eq!(wg.count(), 1);
    }

    #[tokio::test]
    async fn test_wait_timeout() {
        let wg = WaitGroup::new();
        wg.add(1);
        let result = wait_timeout(&wg, Duration::from_millis(10)).await;
        assert_eq!(result, Err(WaitError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_wait_until_cancelled() {
        let wg = WaitGroup::new();
        wg.add(1);

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(());
        });

        let result = wait_until(&wg, async {
            let _ = rx.await;
        })
        .await;
        assert_eq!(result, Err(WaitError::Cancelled));
    }

    #[tokio::test]
    async fn test_wait_until_completed() {
        let wg = WaitGroup::new();
        wg.add(1);

        let worker = wg.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            worker.done();
        });

        let result = wait_until(&wg, std::future::pending()).await;
        assert_eq!(result, Ok(()));
    }
}
