use std::future::Future;
use std::sync::Mutex;
use tokio::task::JoinHandle;

/// Detached work that outlives the response, such as cache writes.
///
/// Tasks run on their own; `drain` exists for callers that must wait for them
/// (tests, and runtimes that freeze once a response is returned).
#[derive(Debug, Default)]
pub struct BackgroundTasks {
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        match self.pending.lock() {
            Ok(mut pending) => {
                pending.retain(|h| !h.is_finished());
                pending.push(handle);
            }
            Err(_) => tracing::warn!("Background task registry poisoned, task left untracked"),
        }
    }

    /// Awaits every task spawned so far. Returns how many were awaited.
    pub async fn drain(&self) -> usize {
        let handles = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return 0,
        };

        let count = handles.len();
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("Background task failed: {}", e);
            }
        }
        count
    }
}
