//! Typed client facade over a [`Dispatcher`].

use crate::messages::{builders, Message, Payload, Reply};
use crate::traits::Dispatcher;

/// One async method per queue operation.
///
/// Each method builds the request with the matching function from
/// [`builders`] and sends it through the dispatcher unchanged.
pub struct QueueClient<D> {
    dispatcher: D,
}

// Every method only forwards dispatcher errors, documented on `send`.
#[allow(clippy::missing_errors_doc)]
impl<D: Dispatcher> QueueClient<D> {
    #[must_use]
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Send a prebuilt message.
    ///
    /// # Errors
    ///
    /// Propagates transport errors from the dispatcher.
    pub async fn send(&self, message: Message) -> anyhow::Result<Reply> {
        tracing::debug!(operation = %message.operation, "dispatching queue operation");
        self.dispatcher.dispatch(message).await
    }

    // ---- enqueue ----

    pub async fn enqueue(&self, queue_name: &str, message: &str) -> anyhow::Result<Reply> {
        self.send(builders::enqueue(queue_name, message)).await
    }

    pub async fn locked_enqueue(
        &self,
        queue_name: &str,
        message: &str,
        requested_by: &str,
    ) -> anyhow::Result<Reply> {
        self.send(builders::locked_enqueue(queue_name, message, requested_by))
            .await
    }

    // ---- engine control ----

    pub async fn get_configuration(&self) -> anyhow::Result<Reply> {
        self.send(builders::get_configuration()).await
    }

    pub async fn set_configuration(&self, configuration: Payload) -> anyhow::Result<Reply> {
        self.send(builders::set_configuration(configuration)).await
    }

    pub async fn check(&self) -> anyhow::Result<Reply> {
        self.send(builders::check()).await
    }

    pub async fn reset(&self) -> anyhow::Result<Reply> {
        self.send(builders::reset()).await
    }

    pub async fn stop(&self) -> anyhow::Result<Reply> {
        self.send(builders::stop()).await
    }

    // ---- queue items ----

    pub async fn get_queue_items(&self, queue_name: &str, limit: &str) -> anyhow::Result<Reply> {
        self.send(builders::get_queue_items(queue_name, limit)).await
    }

    pub async fn add_queue_item(&self, queue_name: &str, buffer: &str) -> anyhow::Result<Reply> {
        self.send(builders::add_queue_item(queue_name, buffer)).await
    }

    pub async fn get_queue_item(&self, queue_name: &str, index: i64) -> anyhow::Result<Reply> {
        self.send(builders::get_queue_item(queue_name, index)).await
    }

    pub async fn replace_queue_item(
        &self,
        queue_name: &str,
        index: i64,
        buffer: &str,
    ) -> anyhow::Result<Reply> {
        self.send(builders::replace_queue_item(queue_name, index, buffer))
            .await
    }

    pub async fn delete_queue_item(&self, queue_name: &str, index: i64) -> anyhow::Result<Reply> {
        self.send(builders::delete_queue_item(queue_name, index)).await
    }

    pub async fn delete_all_queue_items(
        &self,
        queue_name: &str,
        unlock: bool,
    ) -> anyhow::Result<Reply> {
        self.send(builders::delete_all_queue_items_with_unlock(queue_name, unlock))
            .await
    }

    pub async fn get_queue_items_count(&self, queue_name: &str) -> anyhow::Result<Reply> {
        self.send(builders::get_queue_items_count(queue_name)).await
    }

    // ---- queues ----

    pub async fn bulk_delete_queues(&self, queue_names: &[&str]) -> anyhow::Result<Reply> {
        self.send(builders::bulk_delete_queues(queue_names.iter().copied()))
            .await
    }

    pub async fn get_queues(&self, filter: Option<&str>) -> anyhow::Result<Reply> {
        self.send(builders::get_queues(filter)).await
    }

    pub async fn get_queues_count(&self, filter: Option<&str>) -> anyhow::Result<Reply> {
        self.send(builders::get_queues_count(filter)).await
    }

    // ---- locks ----

    pub async fn get_all_locks(&self, filter: Option<&str>) -> anyhow::Result<Reply> {
        self.send(builders::get_all_locks(filter)).await
    }

    pub async fn put_lock(&self, queue_name: &str, requested_by: &str) -> anyhow::Result<Reply> {
        self.send(builders::put_lock(queue_name, requested_by)).await
    }

    pub async fn bulk_put_locks(
        &self,
        lock_names: &[&str],
        requested_by: &str,
    ) -> anyhow::Result<Reply> {
        self.send(builders::bulk_put_locks(lock_names.iter().copied(), requested_by))
            .await
    }

    pub async fn get_lock(&self, queue_name: &str) -> anyhow::Result<Reply> {
        self.send(builders::get_lock(queue_name)).await
    }

    pub async fn delete_lock(&self, queue_name: &str) -> anyhow::Result<Reply> {
        self.send(builders::delete_lock(queue_name)).await
    }

    pub async fn delete_all_locks(&self) -> anyhow::Result<Reply> {
        self.send(builders::delete_all_locks()).await
    }

    pub async fn bulk_delete_locks(&self, lock_names: &[&str]) -> anyhow::Result<Reply> {
        self.send(builders::bulk_delete_locks(lock_names.iter().copied()))
            .await
    }
}
