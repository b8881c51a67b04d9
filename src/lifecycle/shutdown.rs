//! Shutdown coordination.

use tokio::sync::broadcast::{self, error::RecvError};

/// Coordinator for graceful shutdown and request abandonment.
///
/// Long-running tasks subscribe to the broadcast channel; in-flight requests
/// race against [`Shutdown::signalled`].
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Resolves once [`Shutdown::trigger`] is called after this point.
    ///
    /// The subscription is taken eagerly, so a trigger that happens before the
    /// future is first polled is not missed. Dropping every `Shutdown` without
    /// triggering leaves the future pending.
    pub fn signalled(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        wait_for_trigger(self.subscribe())
    }
}

/// Wait until a trigger arrives on `rx`.
///
/// A closed channel is not a trigger: it only means nobody can trigger anymore.
pub async fn wait_for_trigger(mut rx: broadcast::Receiver<()>) {
    match rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signalled_resolves_after_trigger() {
        let shutdown = Shutdown::new();
        let signalled = shutdown.signalled();
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), signalled)
            .await
            .expect("signal should resolve");
    }

    #[tokio::test]
    async fn test_signalled_pending_after_coordinator_dropped() {
        let shutdown = Shutdown::new();
        let signalled = shutdown.signalled();
        drop(shutdown);
        let result = tokio::time::timeout(Duration::from_millis(200), signalled).await;
        assert!(result.is_err(), "dropping the coordinator must not count as a trigger");
    }

    #[tokio::test]
    async fn test_wait_for_trigger_ignores_closed_channel() {
        let (tx, rx) = broadcast::channel::<()>(1);
        drop(tx);
        let result = tokio::time::timeout(Duration::from_millis(50), wait_for_trigger(rx)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_signalled_pending_without_trigger() {
        let shutdown = Shutdown::new();
        let result = tokio::time::timeout(Duration::from_millis(20), shutdown.signalled()).await;
        assert!(result.is_err());
    }
}
