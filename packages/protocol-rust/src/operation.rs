//! The closed catalog of Redisques queue operations.
//!
//! Each [`Operation`] has one canonical name and at most one legacy alias kept
//! for callers that still speak the pre-rename protocol. Name resolution is a
//! pure lookup over this static table; the only side channel is the
//! [`LegacyAliasUsed`] diagnostic, which is returned to the caller instead of
//! being logged behind its back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::keys;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// One queue-management action a client may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Enqueue,
    LockedEnqueue,
    GetConfiguration,
    SetConfiguration,
    Check,
    Reset,
    Stop,
    GetQueueItems,
    AddQueueItem,
    DeleteQueueItem,
    GetQueueItem,
    ReplaceQueueItem,
    DeleteAllQueueItems,
    BulkDeleteQueues,
    GetAllLocks,
    PutLock,
    BulkPutLocks,
    GetLock,
    DeleteLock,
    DeleteAllLocks,
    BulkDeleteLocks,
    GetQueues,
    GetQueuesCount,
    GetQueueItemsCount,
}

impl Operation {
    /// Every operation, in catalog order. Resolution scans in this order.
    pub const ALL: [Operation; 24] = [
        Operation::Enqueue,
        Operation::LockedEnqueue,
        Operation::GetConfiguration,
        Operation::SetConfiguration,
        Operation::Check,
        Operation::Reset,
        Operation::Stop,
        Operation::GetQueueItems,
        Operation::AddQueueItem,
        Operation::DeleteQueueItem,
        Operation::GetQueueItem,
        Operation::ReplaceQueueItem,
        Operation::DeleteAllQueueItems,
        Operation::BulkDeleteQueues,
        Operation::GetAllLocks,
        Operation::PutLock,
        Operation::BulkPutLocks,
        Operation::GetLock,
        Operation::DeleteLock,
        Operation::DeleteAllLocks,
        Operation::BulkDeleteLocks,
        Operation::GetQueues,
        Operation::GetQueuesCount,
        Operation::GetQueueItemsCount,
    ];

    /// The name written into the `operation` field of outgoing messages.
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Operation::Enqueue => "enqueue",
            Operation::LockedEnqueue => "lockedEnqueue",
            Operation::GetConfiguration => "getConfiguration",
            Operation::SetConfiguration => "setConfiguration",
            Operation::Check => "check",
            Operation::Reset => "reset",
            Operation::Stop => "stop",
            Operation::GetQueueItems => "getQueueItems",
            Operation::AddQueueItem => "addQueueItem",
            Operation::DeleteQueueItem => "deleteQueueItem",
            Operation::GetQueueItem => "getQueueItem",
            Operation::ReplaceQueueItem => "replaceQueueItem",
            Operation::DeleteAllQueueItems => "deleteAllQueueItems",
            Operation::BulkDeleteQueues => "bulkDeleteQueues",
            Operation::GetAllLocks => "getAllLocks",
            Operation::PutLock => "putLock",
            Operation::BulkPutLocks => "bulkPutLocks",
            Operation::GetLock => "getLock",
            Operation::DeleteLock => "deleteLock",
            Operation::DeleteAllLocks => "deleteAllLocks",
            Operation::BulkDeleteLocks => "bulkDeleteLocks",
            Operation::GetQueues => "getQueues",
            Operation::GetQueuesCount => "getQueuesCount",
            Operation::GetQueueItemsCount => "getQueueItemsCount",
        }
    }

    /// The deprecated pre-rename name, if this operation ever had one.
    #[must_use]
    pub const fn legacy_alias(self) -> Option<&'static str> {
        match self {
            Operation::GetQueueItems => Some("getListRange"),
            Operation::AddQueueItem => Some("addItem"),
            Operation::DeleteQueueItem => Some("deleteItem"),
            Operation::GetQueueItem => Some("getItem"),
            Operation::ReplaceQueueItem => Some("replaceItem"),
            _ => None,
        }
    }

    #[must_use]
    pub const fn has_legacy_alias(self) -> bool {
        self.legacy_alias().is_some()
    }

    /// Whether requests for this operation carry a top-level `message` body.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        matches!(self, Operation::Enqueue | Operation::LockedEnqueue)
    }

    /// The payload fields this operation accepts.
    #[must_use]
    pub const fn payload_shape(self) -> PayloadShape {
        match self {
            Operation::GetConfiguration
            | Operation::SetConfiguration
            | Operation::Check
            | Operation::Reset
            | Operation::Stop => PayloadShape::Opaque,
            Operation::DeleteAllLocks => PayloadShape::Empty,
            Operation::Enqueue
            | Operation::GetQueueItemsCount
            | Operation::GetLock
            | Operation::DeleteLock => PayloadShape::Fields(QUEUE_ONLY),
            Operation::LockedEnqueue | Operation::PutLock => PayloadShape::Fields(QUEUE_AND_REQUESTOR),
            Operation::GetQueueItems => PayloadShape::Fields(QUEUE_AND_LIMIT),
            Operation::AddQueueItem => PayloadShape::Fields(QUEUE_AND_BUFFER),
            Operation::GetQueueItem | Operation::DeleteQueueItem => {
                PayloadShape::Fields(QUEUE_AND_INDEX)
            }
            Operation::ReplaceQueueItem => PayloadShape::Fields(QUEUE_INDEX_AND_BUFFER),
            Operation::DeleteAllQueueItems => PayloadShape::Fields(QUEUE_AND_UNLOCK),
            Operation::BulkDeleteQueues => PayloadShape::Fields(QUEUE_LIST),
            Operation::BulkDeleteLocks => PayloadShape::Fields(LOCK_LIST),
            Operation::BulkPutLocks => PayloadShape::Fields(LOCK_LIST_AND_REQUESTOR),
            Operation::GetQueues | Operation::GetQueuesCount | Operation::GetAllLocks => {
                PayloadShape::Fields(FILTER_ONLY)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Diagnostic raised when a request names an operation by its legacy alias.
///
/// Resolution still succeeds; the caller decides how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyAliasUsed {
    /// The deprecated spelling, as listed in the catalog.
    pub legacy: &'static str,
    /// The name callers should switch to.
    pub canonical: &'static str,
}

impl LegacyAliasUsed {
    /// Emit this diagnostic as a `tracing` warning.
    pub fn emit(&self) {
        tracing::warn!(
            legacy = self.legacy,
            canonical = self.canonical,
            "{}",
            self
        );
    }
}

impl fmt::Display for LegacyAliasUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Legacy queue operation used. This may be removed in future releases. \
             Use '{}' instead of '{}'",
            self.canonical, self.legacy
        )
    }
}

/// Outcome of a successful [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operation: Operation,
    /// Set when the name matched a legacy alias rather than a canonical name.
    pub deprecation: Option<LegacyAliasUsed>,
}

impl Resolved {
    /// Emit the deprecation diagnostic, if any, and return the operation.
    #[must_use]
    pub fn log_deprecation(self) -> Operation {
        if let Some(diagnostic) = &self.deprecation {
            diagnostic.emit();
        }
        self.operation
    }
}

/// Resolve an operation name, canonical or legacy, ignoring ASCII case.
///
/// Canonical names are tried first. Returns `None` when nothing matches; an
/// unknown name never produces a diagnostic.
#[must_use]
pub fn resolve(name: &str) -> Option<Resolved> {
    if let Some(operation) = Operation::ALL
        .into_iter()
        .find(|op| op.canonical_name().eq_ignore_ascii_case(name))
    {
        return Some(Resolved {
            operation,
            deprecation: None,
        });
    }

    Operation::ALL.into_iter().find_map(|operation| {
        let legacy = operation.legacy_alias()?;
        legacy.eq_ignore_ascii_case(name).then_some(Resolved {
            operation,
            deprecation: Some(LegacyAliasUsed {
                legacy,
                canonical: operation.canonical_name(),
            }),
        })
    })
}

/// Error returned by [`Operation::from_str`] for a name not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown queue operation: {name}")]
pub struct UnknownOperation {
    pub name: String,
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    /// Resolves like [`resolve`] and logs legacy-alias use as a warning.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
            .map(Resolved::log_deprecation)
            .ok_or_else(|| UnknownOperation { name: s.to_string() })
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical_name())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Payload shapes
// ---------------------------------------------------------------------------

/// Value type of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    StringList,
}

/// One entry of an operation's payload field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: true,
        }
    }

    const fn optional(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: false,
        }
    }
}

/// What an operation puts under the `payload` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// No payload at all.
    Empty,
    /// A payload restricted to these fields.
    Fields(&'static [FieldSpec]),
    /// Contents are defined by the engine; passed through unchecked.
    Opaque,
}

impl PayloadShape {
    /// Field list for [`PayloadShape::Fields`], empty otherwise.
    #[must_use]
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            PayloadShape::Fields(fields) => fields,
            PayloadShape::Empty | PayloadShape::Opaque => &[],
        }
    }

    /// Whether a request without a payload object is still well-formed.
    #[must_use]
    pub fn payload_optional(self) -> bool {
        match self {
            PayloadShape::Fields(fields) => fields.iter().all(|f| !f.required),
            PayloadShape::Empty | PayloadShape::Opaque => true,
        }
    }

    #[must_use]
    pub fn field(self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }
}

const QUEUE: FieldSpec = FieldSpec::required(keys::QUEUENAME, FieldKind::String);

const QUEUE_ONLY: &[FieldSpec] = &[QUEUE];
const QUEUE_AND_REQUESTOR: &[FieldSpec] =
    &[QUEUE, FieldSpec::required(keys::REQUESTED_BY, FieldKind::String)];
const QUEUE_AND_LIMIT: &[FieldSpec] = &[QUEUE, FieldSpec::required(keys::LIMIT, FieldKind::String)];
const QUEUE_AND_BUFFER: &[FieldSpec] =
    &[QUEUE, FieldSpec::required(keys::BUFFER, FieldKind::String)];
const QUEUE_AND_INDEX: &[FieldSpec] =
    &[QUEUE, FieldSpec::required(keys::INDEX, FieldKind::Integer)];
const QUEUE_INDEX_AND_BUFFER: &[FieldSpec] = &[
    QUEUE,
    FieldSpec::required(keys::INDEX, FieldKind::Integer),
    FieldSpec::required(keys::BUFFER, FieldKind::String),
];
// The builder always writes `unlock`; decoding treats it as optional (absent = false).
const QUEUE_AND_UNLOCK: &[FieldSpec] =
    &[QUEUE, FieldSpec::optional(keys::UNLOCK, FieldKind::Boolean)];
const QUEUE_LIST: &[FieldSpec] = &[FieldSpec::required(keys::QUEUES, FieldKind::StringList)];
const LOCK_LIST: &[FieldSpec] = &[FieldSpec::required(keys::LOCKS, FieldKind::StringList)];
const LOCK_LIST_AND_REQUESTOR: &[FieldSpec] = &[
    FieldSpec::required(keys::LOCKS, FieldKind::StringList),
    FieldSpec::required(keys::REQUESTED_BY, FieldKind::String),
];
const FILTER_ONLY: &[FieldSpec] = &[FieldSpec::optional(keys::FILTER, FieldKind::String)];
