//! # Presentation Handlers
//!
//! The bus never renders anything. A presentation layer subscribes, renders
//! each event however it likes, and settles the delivered future. This
//! module gives that layer a small driver loop.

use crate::events::MessageEvent;
use crate::subscriber::Subscription;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A subscriber that renders message events and settles their futures.
#[async_trait]
pub trait PresentationHandler: Send + Sync + 'static {
    /// Handle one event.
    ///
    /// Events are handed over one at a time. A handler that waits on user
    /// input should spawn its own task instead of blocking the loop.
    ///
    /// While `present` runs, new events queue in the subscription. Once more
    /// than the bus `channel_capacity` are waiting, the oldest are skipped
    /// and their futures are never presented. They stay pending unless they
    /// carry a timeout.
    async fn present(&self, event: MessageEvent);
}

/// Drive `handler` with every event of `subscription` until the bus closes.
///
/// A handler slower than the publish rate loses messages once the backlog
/// exceeds the bus `channel_capacity`. Each skip is logged at `warn` and
/// counted in `herald_messages_lagged_total`.
pub fn spawn_presenter<H>(mut subscription: Subscription, handler: Arc<H>) -> JoinHandle<()>
where
    H: PresentationHandler + ?Sized,
{
    tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            debug!(
                id = %event.message_promise.id(),
                event = %event.name,
                "Presenting message"
            );
            handler.present(event).await;
        }
        debug!("Event bus closed, presenter stopped");
    })
}
