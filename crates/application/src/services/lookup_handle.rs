use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;
use tracing::warn;

/// Pending result of a reverse lookup.
///
/// Resolves exactly once, to the hostname or to `None`. Dropping the handle
/// does not cancel the lookup: the task keeps running and still fills the
/// cache.
#[derive(Debug)]
pub struct LookupHandle {
    task: Option<JoinHandle<Option<Arc<str>>>>,
}

impl LookupHandle {
    pub(crate) fn spawned(task: JoinHandle<Option<Arc<str>>>) -> Self {
        Self { task: Some(task) }
    }

    /// A handle for a lookup that was never started.
    pub(crate) fn rejected() -> Self {
        Self { task: None }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Future for LookupHandle {
    type Output = Option<Arc<str>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(task) = self.task.as_mut() else {
            return Poll::Ready(None);
        };

        let polled = Pin::new(task).poll(cx);
        match polled {
            Poll::Pending => Poll::Pending,
            Poll::Ready(result) => {
                self.task = None;
                Poll::Ready(result.unwrap_or_else(|e| {
                    warn!(error = %e, "Lookup task did not complete");
                    None
                }))
            }
        }
    }
}
