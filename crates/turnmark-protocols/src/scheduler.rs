//! Timer primitive used by the relocation engine.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;

/// Deferral and detached-task primitive.
///
/// The engine never blocks: every wait is a `sleep` on this trait, and visual
/// effects that must outlive a relocation are handed to `spawn`.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);

    /// Run `task` detached from the caller.
    fn spawn(&self, task: BoxFuture<'static, ()>);
}
