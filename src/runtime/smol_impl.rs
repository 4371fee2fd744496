use std::future::Future;
use std::time::Duration;

use futures::future::{Either, select};

use super::TimedOut;

/// A background task owned by a bridge session.
pub struct TaskHandle(smol::Task<()>);

impl TaskHandle {
    /// smol cancels a task when its handle is dropped.
    pub fn abort(self) {
        drop(self.0);
    }
}

pub fn spawn<F>(future: F) -> TaskHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    TaskHandle(smol::spawn(future))
}

pub async fn sleep(duration: Duration) {
    smol::Timer::after(duration).await;
}

pub async fn timeout<F: Future>(duration: Duration, future: F) -> Result<F::Output, TimedOut> {
    let timer = smol::Timer::after(duration);
    futures::pin_mut!(future);
    futures::pin_mut!(timer);

    match select(future, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(TimedOut),
    }
}
