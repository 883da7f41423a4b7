use async_trait::async_trait;

use crate::messages::{Message, Reply};

/// Sends a request to the queue engine and waits for its reply.
///
/// Implemented by the message-bus adapter. The protocol layer never talks to
/// a transport directly; [`QueueClient`](crate::client::QueueClient) builds
/// messages and hands them to a `Dispatcher`.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Deliver one request. Transport failures are errors; engine-side
    /// failures come back as an error [`Reply`].
    async fn dispatch(&self, message: Message) -> anyhow::Result<Reply>;
}
