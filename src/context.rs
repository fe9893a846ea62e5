// ⏱️ Request Context - cancellation signal plus optional deadline
//
// Created by whoever triggers a lookup (an HTTP request, a CLI command) and
// cloned into every fetch task, so one `cancel()` or one expired deadline
// reaches all of them.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CancelReason {
    Canceled,
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Canceled => f.write_str("context canceled"),
            CancelReason::DeadlineExceeded => f.write_str("context deadline exceeded"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    trigger: Arc<watch::Sender<bool>>,
    canceled: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that ends only on an explicit `cancel()`
    pub fn background() -> Self {
        let (trigger, canceled) = watch::channel(false);
        RequestContext {
            trigger: Arc::new(trigger),
            canceled,
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel this context and every clone of it
    pub fn cancel(&self) {
        self.trigger.send_replace(true);
    }

    /// Why the context has ended, or `None` while it is still live
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        if *self.canceled.borrow() {
            return Some(CancelReason::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.cancel_reason().is_some()
    }

    /// Resolves once the context is canceled or its deadline passes
    pub async fn done(&self) -> CancelReason {
        let mut canceled = self.canceled.clone();
        let wait_canceled = async move {
            loop {
                let flagged = *canceled.borrow_and_update();
                if flagged {
                    return;
                }
                if canceled.changed().await.is_err() {
                    // sender gone: cancellation can no longer happen
                    std::future::pending::<()>().await;
                }
            }
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = wait_canceled => CancelReason::Canceled,
                _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => {
                wait_canceled.await;
                CancelReason::Canceled
            }
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_live() {
        let ctx = RequestContext::background();
        assert!(!ctx.is_done());
        assert_eq!(ctx.cancel_reason(), None);
    }

    #[test]
    fn test_cancel_reaches_clones() {
        let ctx = RequestContext::background();
        let clone = ctx.clone();

        ctx.cancel();

        assert_eq!(clone.cancel_reason(), Some(CancelReason::Canceled));
    }

    #[tokio::test]
    async fn test_done_on_cancel() {
        let ctx = RequestContext::background();
        let waiter = ctx.clone();
        let handle = tokio::spawn(async move { waiter.done().await });

        tokio::time::sleep(Duration::from_millis(5)).await;
        ctx.cancel();

        assert_eq!(handle.await.unwrap(), CancelReason::Canceled);
    }

    #[tokio::test]
    async fn test_done_on_deadline() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));
        let started = std::time::Instant::now();

        assert_eq!(ctx.done().await, CancelReason::DeadlineExceeded);
        assert!(started.elapsed() >= Duration::from_millis(15));
        assert_eq!(ctx.cancel_reason(), Some(CancelReason::DeadlineExceeded));
    }

    #[test]
    fn test_with_deadline_keeps_earliest() {
        let now = Instant::now();
        let ctx = RequestContext::background()
            .with_deadline(now + Duration::from_secs(10))
            .with_deadline(now + Duration::from_secs(5))
            .with_deadline(now + Duration::from_secs(20));

        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(5)));
    }
}
