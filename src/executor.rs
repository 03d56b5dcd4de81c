//! Background transport worker and the async handles it fulfils.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;

use tokio::runtime;
use tokio::sync::oneshot;

use crate::cancel::CancelFlag;
use crate::error::{Error, Result};

/// Handle to one in-flight operation.
///
/// Fulfilled exactly once, with the operation's value or its failure. Await
/// it from async code, or use [`Pending::wait`] from a synchronous caller.
/// If the owning client shuts down first, the handle resolves to
/// [`Error::Cancelled`] rather than hanging.
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> Pending<T> {
    /// Block the current thread until the operation settles.
    ///
    /// Must not be called from within an async runtime.
    pub fn wait(self) -> Result<T> {
        self.rx.blocking_recv().unwrap_or(Err(Error::Cancelled))
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|settled| settled.unwrap_or(Err(Error::Cancelled)))
    }
}

/// Owns the dedicated I/O worker that drives every request to completion.
///
/// The worker thread parks in `block_on` on a shutdown channel, which keeps
/// the current-thread runtime alive and driving operations spawned onto its
/// handle from any caller thread. Dropping the executor signals the channel
/// and joins the thread; operations still in flight are dropped with the
/// runtime, and their handles resolve to `Cancelled`.
pub(crate) struct Executor {
    handle: runtime::Handle,
    cancel: Arc<CancelFlag>,
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Executor {
    pub(crate) fn new(cancel: Arc<CancelFlag>) -> Result<Self> {
        let rt = runtime::Builder::new_current_thread().enable_all().build()?;
        let handle = rt.handle().clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let worker = thread::Builder::new()
            .name("youtube-client-io".to_owned())
            .spawn(move || {
                // Parks here, driving spawned operations, until shutdown.
                let _ = rt.block_on(shutdown_rx);
                tracing::trace!("transport worker shutting down");
            })?;

        Ok(Self {
            handle,
            cancel,
            shutdown: Some(shutdown_tx),
            worker: Some(worker),
        })
    }

    /// Spawn one operation onto the worker, racing it against cancellation.
    ///
    /// The biased select checks the cancel flag first, so operations issued
    /// after cancellation settle immediately without touching the network.
    pub(crate) fn submit<T, F>(&self, work: F) -> Pending<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let cancel = Arc::clone(&self.cancel);
        let (tx, rx) = oneshot::channel();

        // Results travel through the oneshot; the join handle is not needed.
        let _ = self.handle.spawn(async move {
            let settled = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(Error::Cancelled),
                settled = work => settled,
            };
            let _ = tx.send(settled);
        });

        Pending { rx }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
