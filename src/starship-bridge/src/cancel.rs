//! Caller-driven cancellation and timeouts for network waits.

use std::{future::Future, time::Duration};

use tokio::sync::watch;

use crate::errors::{BridgeError, Result};

/// Fires a [`CancelToken`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Observes cancellation; cheap to clone.
#[derive(Clone, Debug)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled. Never resolves if the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Per-call limits applied to every suspending step (switch wait, reads).
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelToken>,
}

impl CallOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancel: None,
        }
    }

    pub fn cancellable(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fail fast if the caller already cancelled.
    pub fn ensure_active(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(BridgeError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Run `fut`, abandoning it on cancellation or timeout.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.ensure_active()?;

        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let work = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(res) => res,
                    Err(_) => Err(BridgeError::TimedOut),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(BridgeError::Cancelled),
            res = work => res,
        }
    }
}
