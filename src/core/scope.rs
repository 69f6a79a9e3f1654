//! Cancellation tied to a screen's lifetime
//!
//! A [`ScreenScope`] is opened when a screen (here: a command) starts and
//! closed when it goes away. Work run through the scope stops as soon as
//! it is closed, so a response arriving late never updates state that is
//! already gone.

use crate::domain::{Result, TrackError};
use std::future::Future;
use tokio::sync::watch;

/// Cancellation signal for the work of one screen
///
/// Dropping the scope closes it.
#[derive(Debug)]
pub struct ScreenScope {
    closed: watch::Sender<bool>,
}

impl ScreenScope {
    pub fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self { closed }
    }

    /// Close the scope; pending and future `run` calls resolve to
    /// `TrackError::Cancelled`
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Handle that observes this scope from other tasks
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            closed: self.closed.subscribe(),
        }
    }

    /// Run `work` unless the scope closes first
    pub async fn run<F, T>(&self, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.handle().run(work).await
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.closed.send_replace(true);
    }
}

/// Observer side of a [`ScreenScope`]
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    closed: watch::Receiver<bool>,
}

impl ScopeHandle {
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolves once the scope is closed or dropped
    pub async fn closed(&mut self) {
        // An error means the scope was dropped, which also closes it.
        let _ = self.closed.wait_for(|closed| *closed).await;
    }

    /// Run `work` unless the scope closes first
    pub async fn run<F, T>(mut self, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_closed() {
            return Err(TrackError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.closed() => {
                tracing::debug!("Screen closed, discarding pending work");
                Err(TrackError::Cancelled)
            }
            result = work => result,
        }
    }
}
