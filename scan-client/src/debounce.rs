//! Trailing-edge debounce
//!
//! Keyboard-emulating scanners fire one input event per character. Only the
//! last value of a burst should reach the resolver: every new value replaces
//! the pending one and pushes the deadline out by a full window.
//!
//! [`Burst`] is the policy on its own (no clock, no runtime) and
//! [`Debouncer`] drives it on a tokio task.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// "Accept latest" debounce policy
#[derive(Debug, Clone)]
pub struct Burst<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Burst<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace the pending value; the deadline restarts from `now`
    pub fn offer(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Take the pending value once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Drop the pending value
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Debounced handler running on its own task
///
/// Dropping the debouncer cancels it; a value still waiting for its window
/// is discarded.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task; `handler` runs once per settled burst
    pub fn spawn<F, Fut>(window: Duration, mut handler: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut burst = Burst::new(window);
            loop {
                let deadline = burst.deadline();
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        burst.clear();
                        debug!("Debouncer cancelled");
                        break;
                    }
                    value = rx.recv() => match value {
                        Some(value) => burst.offer(value, Instant::now()),
                        None => break,
                    },
                    _ = sleep_until_deadline(deadline) => {
                        if let Some(value) = burst.poll(Instant::now()) {
                            handler(value).await;
                        }
                    }
                }
            }
        });

        Self {
            tx,
            cancel,
            handle: Some(handle),
        }
    }

    /// Offer a new value; ignored after cancellation
    pub fn push(&self, value: T) {
        if !self.cancel.is_cancelled() {
            let _ = self.tx.send(value);
        }
    }

    /// Stop the task and discard anything pending
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel and wait for the task to finish
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
