//! One constructor per operation.
//!
//! Each function produces exactly the payload fields listed for its operation
//! in [`Operation::payload_shape`](crate::operation::Operation::payload_shape).
//! Filters distinguish "no filter" (`None`, key omitted) from an empty-string
//! filter (`Some("")`, key present).

use serde_json::Value;

use super::{Message, Payload};
use crate::keys;
use crate::operation::Operation;

fn payload<const N: usize>(fields: [(&str, Value); N]) -> Payload {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn string_list<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(items.into_iter().map(|s| Value::String(s.into())).collect())
}

fn filtered(operation: Operation, filter: Option<&str>) -> Message {
    let payload = filter.map(|pattern| payload([(keys::FILTER, Value::from(pattern))]));
    Message::build(operation, payload)
}

fn queue_only(operation: Operation, queue_name: impl Into<String>) -> Message {
    Message::build(
        operation,
        Some(payload([(keys::QUEUENAME, Value::String(queue_name.into()))])),
    )
}

// ---------------------------------------------------------------------------
// Enqueue
// ---------------------------------------------------------------------------

/// `enqueue`: the body goes at the top level, not inside the payload.
#[must_use]
pub fn enqueue(queue_name: impl Into<String>, message: impl Into<String>) -> Message {
    queue_only(Operation::Enqueue, queue_name).with_body(message.into())
}

#[must_use]
pub fn locked_enqueue(
    queue_name: impl Into<String>,
    message: impl Into<String>,
    requested_by: impl Into<String>,
) -> Message {
    Message::build(
        Operation::LockedEnqueue,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::REQUESTED_BY, Value::String(requested_by.into())),
        ])),
    )
    .with_body(message.into())
}

// ---------------------------------------------------------------------------
// Engine control
// ---------------------------------------------------------------------------

#[must_use]
pub fn get_configuration() -> Message {
    Message::build(Operation::GetConfiguration, None)
}

/// `setConfiguration`: the configuration object is the payload itself.
#[must_use]
pub fn set_configuration(configuration: Payload) -> Message {
    Message::build(Operation::SetConfiguration, Some(configuration))
}

#[must_use]
pub fn check() -> Message {
    Message::build(Operation::Check, None)
}

#[must_use]
pub fn reset() -> Message {
    Message::build(Operation::Reset, None)
}

#[must_use]
pub fn stop() -> Message {
    Message::build(Operation::Stop, None)
}

// ---------------------------------------------------------------------------
// Queue items
// ---------------------------------------------------------------------------

/// `getQueueItems`: `limit` is passed through as text, the engine parses it.
#[must_use]
pub fn get_queue_items(queue_name: impl Into<String>, limit: impl Into<String>) -> Message {
    Message::build(
        Operation::GetQueueItems,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::LIMIT, Value::String(limit.into())),
        ])),
    )
}

#[must_use]
pub fn add_queue_item(queue_name: impl Into<String>, buffer: impl Into<String>) -> Message {
    Message::build(
        Operation::AddQueueItem,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::BUFFER, Value::String(buffer.into())),
        ])),
    )
}

#[must_use]
pub fn get_queue_item(queue_name: impl Into<String>, index: i64) -> Message {
    Message::build(
        Operation::GetQueueItem,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::INDEX, Value::from(index)),
        ])),
    )
}

#[must_use]
pub fn replace_queue_item(
    queue_name: impl Into<String>,
    index: i64,
    buffer: impl Into<String>,
) -> Message {
    Message::build(
        Operation::ReplaceQueueItem,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::INDEX, Value::from(index)),
            (keys::BUFFER, Value::String(buffer.into())),
        ])),
    )
}

#[must_use]
pub fn delete_queue_item(queue_name: impl Into<String>, index: i64) -> Message {
    Message::build(
        Operation::DeleteQueueItem,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::INDEX, Value::from(index)),
        ])),
    )
}

/// `deleteAllQueueItems` leaving the queue's lock in place (`unlock: false`).
#[must_use]
pub fn delete_all_queue_items(queue_name: impl Into<String>) -> Message {
    delete_all_queue_items_with_unlock(queue_name, false)
}

#[must_use]
pub fn delete_all_queue_items_with_unlock(queue_name: impl Into<String>, unlock: bool) -> Message {
    Message::build(
        Operation::DeleteAllQueueItems,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::UNLOCK, Value::Bool(unlock)),
        ])),
    )
}

#[must_use]
pub fn get_queue_items_count(queue_name: impl Into<String>) -> Message {
    queue_only(Operation::GetQueueItemsCount, queue_name)
}

// ---------------------------------------------------------------------------
// Queues
// ---------------------------------------------------------------------------

#[must_use]
pub fn bulk_delete_queues<I, S>(queue_names: I) -> Message
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Message::build(
        Operation::BulkDeleteQueues,
        Some(payload([(keys::QUEUES, string_list(queue_names))])),
    )
}

#[must_use]
pub fn get_queues(filter: Option<&str>) -> Message {
    filtered(Operation::GetQueues, filter)
}

#[must_use]
pub fn get_queues_count(filter: Option<&str>) -> Message {
    filtered(Operation::GetQueuesCount, filter)
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

#[must_use]
pub fn get_all_locks(filter: Option<&str>) -> Message {
    filtered(Operation::GetAllLocks, filter)
}

#[must_use]
pub fn put_lock(queue_name: impl Into<String>, requested_by: impl Into<String>) -> Message {
    Message::build(
        Operation::PutLock,
        Some(payload([
            (keys::QUEUENAME, Value::String(queue_name.into())),
            (keys::REQUESTED_BY, Value::String(requested_by.into())),
        ])),
    )
}

/// `bulkPutLocks`: one `requestedBy` shared by every lock in the batch.
#[must_use]
pub fn bulk_put_locks<I, S>(lock_names: I, requested_by: impl Into<String>) -> Message
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Message::build(
        Operation::BulkPutLocks,
        Some(payload([
            (keys::LOCKS, string_list(lock_names)),
            (keys::REQUESTED_BY, Value::String(requested_by.into())),
        ])),
    )
}

#[must_use]
pub fn get_lock(queue_name: impl Into<String>) -> Message {
    queue_only(Operation::GetLock, queue_name)
}

#[must_use]
pub fn delete_lock(queue_name: impl Into<String>) -> Message {
    queue_only(Operation::DeleteLock, queue_name)
}

#[must_use]
pub fn delete_all_locks() -> Message {
    Message::build(Operation::DeleteAllLocks, None)
}

#[must_use]
pub fn bulk_delete_locks<I, S>(lock_names: I) -> Message
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Message::build(
        Operation::BulkDeleteLocks,
        Some(payload([(keys::LOCKS, string_list(lock_names))])),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::RequestDecoder;

    #[test]
    fn get_configuration_has_no_payload() {
        let value = get_configuration().to_value();
        assert_eq!(value, json!({ "operation": "getConfiguration" }));
        assert!(value.get("payload").is_none());
    }

    #[test]
    fn set_configuration_passes_config_through() {
        let mut config = Payload::new();
        config.insert("processorDelayMax".into(), json!(5));
        assert_eq!(
            set_configuration(config).to_value(),
            json!({ "operation": "setConfiguration", "payload": { "processorDelayMax": 5 } })
        );
    }

    #[test]
    fn enqueue_puts_body_at_top_level() {
        assert_eq!(
            enqueue("orders", "hello").to_value(),
            json!({ "operation": "enqueue", "payload": { "queuename": "orders" }, "message": "hello" })
        );
    }

    #[test]
    fn locked_enqueue_adds_requestor() {
        assert_eq!(
            locked_enqueue("orders", "hello", "svc1").to_value(),
            json!({
                "operation": "lockedEnqueue",
                "payload": { "queuename": "orders", "requestedBy": "svc1" },
                "message": "hello"
            })
        );
    }

    #[test]
    fn get_queue_items_keeps_limit_as_text() {
        assert_eq!(
            get_queue_items("orders", "10").to_value(),
            json!({ "operation": "getQueueItems", "payload": { "queuename": "orders", "limit": "10" } })
        );
    }

    #[test]
    fn item_operations() {
        assert_eq!(
            add_queue_item("q", "buf").to_value()["payload"],
            json!({ "queuename": "q", "buffer": "buf" })
        );
        assert_eq!(
            get_queue_item("q", 2).to_value()["payload"],
            json!({ "queuename": "q", "index": 2 })
        );
        assert_eq!(
            delete_queue_item("q", 0).to_value()["payload"],
            json!({ "queuename": "q", "index": 0 })
        );
        assert_eq!(
            replace_queue_item("q", 1, "new").to_value()["payload"],
            json!({ "queuename": "q", "index": 1, "buffer": "new" })
        );
    }

    #[test]
    fn delete_all_queue_items_defaults_unlock_to_false() {
        assert_eq!(
            delete_all_queue_items("orders").to_value()["payload"],
            json!({ "queuename": "orders", "unlock": false })
        );
        assert_eq!(
            delete_all_queue_items_with_unlock("orders", true).to_value()["payload"],
            json!({ "queuename": "orders", "unlock": true })
        );
    }

    #[test]
    fn filter_none_omits_key_but_empty_string_keeps_it() {
        assert_eq!(get_queues(None).to_value(), json!({ "operation": "getQueues" }));
        assert_eq!(
            get_queues(Some("")).to_value(),
            json!({ "operation": "getQueues", "payload": { "filter": "" } })
        );
        assert_eq!(
            get_queues_count(Some("ord.*")).to_value()["payload"],
            json!({ "filter": "ord.*" })
        );
        assert_eq!(get_all_locks(None).to_value(), json!({ "operation": "getAllLocks" }));
        assert_eq!(
            get_all_locks(Some("a")).to_value()["payload"],
            json!({ "filter": "a" })
        );
    }

    #[test]
    fn queue_name_only_operations() {
        for (msg, op) in [
            (get_queue_items_count("q"), "getQueueItemsCount"),
            (get_lock("q"), "getLock"),
            (delete_lock("q"), "deleteLock"),
        ] {
            assert_eq!(
                msg.to_value(),
                json!({ "operation": op, "payload": { "queuename": "q" } })
            );
        }
    }

    #[test]
    fn bulk_operations_carry_collections() {
        assert_eq!(
            bulk_delete_queues(["a", "b"]).to_value()["payload"],
            json!({ "queues": ["a", "b"] })
        );
        assert_eq!(
            bulk_delete_locks(vec!["x".to_string()]).to_value()["payload"],
            json!({ "locks": ["x"] })
        );
        assert_eq!(delete_all_locks().to_value(), json!({ "operation": "deleteAllLocks" }));
    }

    #[test]
    fn bulk_put_locks_shares_one_requestor() {
        assert_eq!(
            bulk_put_locks(["a", "b"], "svc1").to_value(),
            json!({
                "operation": "bulkPutLocks",
                "payload": { "locks": ["a", "b"], "requestedBy": "svc1" }
            })
        );
    }

    #[test]
    fn put_lock_has_queue_and_requestor() {
        assert_eq!(
            put_lock("q", "me").to_value()["payload"],
            json!({ "queuename": "q", "requestedBy": "me" })
        );
    }

    /// Every builder output must pass the strict decoder unchanged.
    #[test]
    fn builder_output_conforms_to_payload_shapes() {
        let decoder = RequestDecoder::default();
        let messages = vec![
            enqueue("q", "m"),
            locked_enqueue("q", "m", "me"),
            get_configuration(),
            set_configuration(Payload::new()),
            check(),
            reset(),
            stop(),
            get_queue_items("q", "5"),
            add_queue_item("q", "b"),
            delete_queue_item("q", 1),
            get_queue_item("q", 1),
            replace_queue_item("q", 1, "b"),
            delete_all_queue_items("q"),
            bulk_delete_queues(["a"]),
            get_all_locks(Some("f")),
            put_lock("q", "me"),
            bulk_put_locks(["a"], "me"),
            get_lock("q"),
            delete_lock("q"),
            delete_all_locks(),
            bulk_delete_locks(["a"]),
            get_queues(None),
            get_queues_count(Some("")),
            get_queue_items_count("q"),
        ];

        let mut covered: Vec<Operation> = messages.iter().map(|m| m.operation).collect();
        covered.sort();
        covered.dedup();
        assert_eq!(covered.len(), Operation::ALL.len());

        for msg in messages {
            let decoded = decoder
                .decode(msg.to_value())
                .unwrap_or_else(|e| panic!("{}: {e}", msg.operation));
            assert_eq!(decoded.message, msg);
        }
    }
}
