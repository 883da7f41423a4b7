//! Reply envelope produced by the engine in answer to a request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of a reply's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplyStatus {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "error")]
    Error,
    /// `getLock` found no lock for the queue.
    #[serde(rename = "No such lock")]
    NoSuchLock,
}

/// Reply to a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub status: ReplyStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<Value>,
    /// Human-readable error text.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    /// Error category, e.g. [`BAD_INPUT`](crate::keys::BAD_INPUT).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_type: Option<String>,
}

impl Reply {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: ReplyStatus::Ok,
            value: None,
            message: None,
            error_type: None,
        }
    }

    #[must_use]
    pub fn ok_with_value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::ok()
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Error,
            value: None,
            message: Some(message.into()),
            error_type: None,
        }
    }

    /// Error reply for a request the engine could not interpret.
    #[must_use]
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self {
            error_type: Some(crate::keys::BAD_INPUT.to_string()),
            ..Self::error(message)
        }
    }

    #[must_use]
    pub fn no_such_lock() -> Self {
        Self {
            status: ReplyStatus::NoSuchLock,
            ..Self::ok()
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ReplyStatus::Ok
    }

    #[must_use]
    pub fn is_bad_input(&self) -> bool {
        self.error_type.as_deref() == Some(crate::keys::BAD_INPUT)
    }
}
