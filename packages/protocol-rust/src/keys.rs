//! Reserved field keys and sentinel strings of the Redisques wire format.
//!
//! Every component that reads or writes Redisques messages must agree on these
//! strings byte-for-byte. Request keys (`operation`, `payload`, payload fields)
//! and reply keys (`status`, `value`, `errorType`, ...) share one namespace, so
//! a payload field must never reuse a reply key with a different meaning.

// ---------------------------------------------------------------------------
// Envelope keys
// ---------------------------------------------------------------------------

/// Canonical operation name of a request.
pub const OPERATION: &str = "operation";
/// Operation-specific argument object of a request.
pub const PAYLOAD: &str = "payload";
/// Top-level message body (`enqueue`/`lockedEnqueue`), or a reply's error text.
pub const MESSAGE: &str = "message";

// ---------------------------------------------------------------------------
// Payload keys
// ---------------------------------------------------------------------------

pub const QUEUENAME: &str = "queuename";
pub const INDEX: &str = "index";
pub const LIMIT: &str = "limit";
pub const BUFFER: &str = "buffer";
pub const REQUESTED_BY: &str = "requestedBy";
pub const FILTER: &str = "filter";
pub const UNLOCK: &str = "unlock";
pub const QUEUES: &str = "queues";
pub const LOCKS: &str = "locks";

// ---------------------------------------------------------------------------
// Reply and engine keys
// ---------------------------------------------------------------------------

pub const STATUS: &str = "status";
pub const VALUE: &str = "value";
pub const INFO: &str = "info";
pub const ERROR_TYPE: &str = "errorType";
pub const COUNT: &str = "count";
pub const TIMESTAMP: &str = "timestamp";
pub const BULK_DELETE: &str = "bulkDelete";
pub const PROCESSOR_DELAY_MAX: &str = "processorDelayMax";

// ---------------------------------------------------------------------------
// Sentinel values
// ---------------------------------------------------------------------------

/// `status` value of a successful reply.
pub const OK: &str = "ok";
/// `status` value of a failed reply.
pub const ERROR: &str = "error";
/// `errorType` value for requests the engine could not interpret.
pub const BAD_INPUT: &str = "bad input";
/// `status` value for a lock lookup that found nothing.
pub const NO_SUCH_LOCK: &str = "No such lock";

/// Every payload key a request may carry. Used by the decoder to tell an
/// unexpected-but-known field apart from garbage.
pub const PAYLOAD_KEYS: [&str; 9] = [
    QUEUENAME,
    INDEX,
    LIMIT,
    BUFFER,
    REQUESTED_BY,
    FILTER,
    UNLOCK,
    QUEUES,
    LOCKS,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn vocabulary_strings_are_distinct() {
        let all = [
            OPERATION,
            PAYLOAD,
            MESSAGE,
            QUEUENAME,
            INDEX,
            LIMIT,
            BUFFER,
            REQUESTED_BY,
            FILTER,
            UNLOCK,
            QUEUES,
            LOCKS,
            STATUS,
            VALUE,
            INFO,
            ERROR_TYPE,
            COUNT,
            TIMESTAMP,
            BULK_DELETE,
            PROCESSOR_DELAY_MAX,
        ];
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn sentinels_match_wire_strings() {
        assert_eq!(OK, "ok");
        assert_eq!(ERROR, "error");
        assert_eq!(BAD_INPUT, "bad input");
        assert_eq!(NO_SUCH_LOCK, "No such lock");
    }
}
