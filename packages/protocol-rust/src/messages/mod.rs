//! Request and reply envelopes of the Redisques protocol.
//!
//! A request is a JSON object with a canonical `operation` name, an optional
//! `payload` object whose fields are fixed per operation, and, for the two
//! enqueue operations only, a top-level `message` body. Key order on the wire
//! is always `operation`, `payload`, `message`.
//!
//! The builders in [`builders`] are thin encoders: they do no runtime
//! validation beyond what their argument types enforce.

pub mod builders;
pub mod reply;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::keys;
use crate::operation::Operation;

pub use reply::{Reply, ReplyStatus};

/// Operation-specific arguments of a request, in insertion order.
pub type Payload = serde_json::Map<String, Value>;

/// One request envelope.
///
/// Deriving `Deserialize` resolves legacy operation names but does not check
/// the payload against the operation; use
/// [`RequestDecoder`](crate::decode::RequestDecoder) for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payload: Option<Payload>,
    /// Queue message body; only set for `enqueue` and `lockedEnqueue`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl Message {
    /// Generic builder: `operation` set to the canonical name, `payload`
    /// attached only when given.
    #[must_use]
    pub fn build(operation: Operation, payload: Option<Payload>) -> Self {
        Self {
            operation,
            payload,
            message: None,
        }
    }

    #[must_use]
    pub(crate) fn with_body(mut self, body: String) -> Self {
        self.message = Some(body);
        self
    }

    /// The JSON object handed to the transport.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.clone().into_object())
    }

    fn into_object(self) -> serde_json::Map<String, Value> {
        let mut object = serde_json::Map::new();
        object.insert(
            keys::OPERATION.to_string(),
            Value::String(self.operation.canonical_name().to_string()),
        );
        if let Some(payload) = self.payload {
            object.insert(keys::PAYLOAD.to_string(), Value::Object(payload));
        }
        if let Some(body) = self.message {
            object.insert(keys::MESSAGE.to_string(), Value::String(body));
        }
        object
    }
}

impl From<Message> for Value {
    fn from(message: Message) -> Self {
        Value::Object(message.into_object())
    }
}
