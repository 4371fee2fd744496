use std::future::Future;
use std::time::Duration;

use super::TimedOut;

/// A background task owned by a bridge session.
pub struct TaskHandle(tokio::task::JoinHandle<()>);

impl TaskHandle {
    pub fn abort(self) {
        self.0.abort();
    }
}

pub fn spawn<F>(future: F) -> TaskHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    TaskHandle(tokio::spawn(future))
}

pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await
}

pub async fn timeout<F: Future>(duration: Duration, future: F) -> Result<F::Output, TimedOut> {
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| TimedOut)
}
