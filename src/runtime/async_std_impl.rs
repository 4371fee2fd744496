use std::future::Future;
use std::time::Duration;

use super::TimedOut;

/// A background task owned by a bridge session.
pub struct TaskHandle(async_std::task::JoinHandle<()>);

impl TaskHandle {
    /// async-std can only cancel from async code, so the task is detached.
    /// A watcher of a closed session stops at its next notification.
    pub fn abort(self) {
        drop(self.0);
    }
}

pub fn spawn<F>(future: F) -> TaskHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    TaskHandle(async_std::task::spawn(future))
}

pub async fn sleep(duration: Duration) {
    async_std::task::sleep(duration).await
}

pub async fn timeout<F: Future>(duration: Duration, future: F) -> Result<F::Output, TimedOut> {
    async_std::future::timeout(duration, future)
        .await
        .map_err(|_| TimedOut)
}
