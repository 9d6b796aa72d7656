//! One-at-a-time execution of mutations.

use std::future::Future;
use tokio::sync::Mutex;

/// Runs actions strictly one after another, in the order they were scheduled.
///
/// The lock is FIFO-fair, so arrival order is execution order. An action that
/// fails (returns an error) releases the lock like any other; its outcome goes
/// back to its own caller only. There is no bound on the number of waiters.
#[derive(Debug, Default)]
pub struct WriteSerializer {
    lock: Mutex<()>,
}

impl WriteSerializer {
    /// Creates a new serializer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action` once every previously scheduled action has completed,
    /// and returns its output.
    pub async fn with_write_lock<F, Fut, T>(&self, action: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _guard = self.lock.lock().await;
        action().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_actions_do_not_overlap() {
        let serializer = Arc::new(WriteSerializer::new());
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for i in 0..8u64 {
            let serializer = serializer.clone();
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                serializer
                    .with_write_lock(|| async {
                        log.lock().push(("start", i));
                        tokio::time::sleep(Duration::from_millis(8 - i)).await;
                        log.lock().push(("end", i));
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let log = log.lock();
        assert_eq!(log.len(), 16);
        for pair in log.chunks(2) {
            assert_eq!(pair[0].0, "start");
            assert_eq!(pair[1].0, "end");
            assert_eq!(pair[0].1, pair[1].1);
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_block_followers() {
        let serializer = WriteSerializer::new();

        let failed: Result<(), &str> = serializer.with_write_lock(|| async { Err("boom") }).await;
        assert_eq!(failed, Err("boom"));

        let ok: Result<u32, &str> = serializer.with_write_lock(|| async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));
    }

    #[tokio::test]
    async fn test_arrival_order_is_execution_order() {
        let serializer = Arc::new(WriteSerializer::new());
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        // Hold the lock so every task below queues up behind it.
        let gate = serializer.lock.lock().await;
        let mut handles = Vec::new();
        for i in 0..5 {
            let serializer = serializer.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                serializer
                    .with_write_lock(|| async { order.lock().push(i) })
                    .await
            }));
            // Let the task reach the lock before spawning the next one.
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        drop(gate);
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }
}
