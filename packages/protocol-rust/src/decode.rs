//! Decoding incoming request envelopes on the engine side.
//!
//! The decoder resolves the `operation` field (canonical or legacy spelling),
//! checks the payload against the operation's [`PayloadShape`] and returns a
//! canonical [`Message`]: the same value the matching builder would produce.
//! Every failure is a "bad input" condition for the requesting client.

use serde_json::Value;

use crate::keys;
use crate::messages::{Message, Payload, Reply};
use crate::operation::{resolve, FieldKind, FieldSpec, LegacyAliasUsed, Operation, PayloadShape};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How the decoder treats requests that name an operation by its legacy alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyAliasPolicy {
    /// Accept without logging. The diagnostic is still returned.
    Accept,
    /// Accept and emit the diagnostic as a `tracing` warning.
    #[default]
    Warn,
    /// Reject as bad input.
    Reject,
}

/// Decoder settings.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub legacy_aliases: LegacyAliasPolicy,
    /// Reject fields outside an operation's payload shape instead of dropping them.
    pub reject_unknown_fields: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            legacy_aliases: LegacyAliasPolicy::Warn,
            reject_unknown_fields: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an incoming request could not be decoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("request must be a JSON object")]
    NotAnObject,
    #[error("request has no operation")]
    MissingOperation,
    #[error("operation must be a string")]
    OperationNotString,
    #[error("unknown queue operation: {name}")]
    UnknownOperation { name: String },
    #[error("legacy operation '{legacy}' is not accepted, use '{canonical}'")]
    LegacyAliasRejected {
        legacy: &'static str,
        canonical: &'static str,
    },
    #[error("unexpected top-level field '{key}'")]
    UnexpectedEnvelopeField { key: String },
    #[error("payload of {operation} must be an object")]
    PayloadNotAnObject { operation: Operation },
    #[error("{operation} requires a payload")]
    MissingPayload { operation: Operation },
    #[error("{operation} takes no payload")]
    UnexpectedPayload { operation: Operation },
    #[error("{operation} requires field '{key}'")]
    MissingField {
        operation: Operation,
        key: &'static str,
    },
    #[error("field '{key}' of {operation} must be {expected}")]
    InvalidField {
        operation: Operation,
        key: &'static str,
        expected: &'static str,
    },
    #[error("{operation} does not accept field '{key}'")]
    UnexpectedField { operation: Operation, key: String },
    #[error("{operation} requires a top-level message body")]
    MissingBody { operation: Operation },
    #[error("message body of {operation} must be a string")]
    InvalidBody { operation: Operation },
}

impl DecodeError {
    /// The reply the engine sends back for this failure.
    #[must_use]
    pub fn to_reply(&self) -> Reply {
        Reply::bad_input(self.to_string())
    }
}

// ---------------------------------------------------------------------------
// RequestDecoder
// ---------------------------------------------------------------------------

/// A decoded request plus the legacy-alias diagnostic, if one fired.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRequest {
    pub message: Message,
    pub deprecation: Option<LegacyAliasUsed>,
}

/// Turns raw request objects into validated [`Message`]s.
#[derive(Debug, Clone, Default)]
pub struct RequestDecoder {
    config: DecoderConfig,
}

impl RequestDecoder {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one request envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the envelope is not an object, the
    /// operation cannot be resolved or is rejected by the legacy-alias
    /// policy, or the payload or body does not fit the operation.
    pub fn decode(&self, request: Value) -> Result<DecodedRequest, DecodeError> {
        let Value::Object(mut envelope) = request else {
            return Err(DecodeError::NotAnObject);
        };

        let name = match envelope.remove(keys::OPERATION) {
            Some(Value::String(name)) => name,
            Some(_) => return Err(DecodeError::OperationNotString),
            None => return Err(DecodeError::MissingOperation),
        };
        let resolved = resolve(&name).ok_or(DecodeError::UnknownOperation { name })?;
        let operation = resolved.operation;

        if let Some(diagnostic) = &resolved.deprecation {
            match self.config.legacy_aliases {
                LegacyAliasPolicy::Accept => {}
                LegacyAliasPolicy::Warn => diagnostic.emit(),
                LegacyAliasPolicy::Reject => {
                    return Err(DecodeError::LegacyAliasRejected {
                        legacy: diagnostic.legacy,
                        canonical: diagnostic.canonical,
                    })
                }
            }
        }

        let payload = match envelope.remove(keys::PAYLOAD) {
            None | Some(Value::Null) => None,
            Some(Value::Object(payload)) => Some(payload),
            Some(_) => return Err(DecodeError::PayloadNotAnObject { operation }),
        };
        let body = match envelope.remove(keys::MESSAGE) {
            Some(body) if operation.carries_body() => match body {
                Value::String(body) => Some(body),
                _ => return Err(DecodeError::InvalidBody { operation }),
            },
            Some(_) => {
                self.unknown_envelope_field(keys::MESSAGE)?;
                None
            }
            None if operation.carries_body() => {
                return Err(DecodeError::MissingBody { operation })
            }
            None => None,
        };
        for key in envelope.keys() {
            self.unknown_envelope_field(key)?;
        }

        let payload = self.check_payload(operation, payload)?;
        Ok(DecodedRequest {
            message: Message {
                operation,
                payload,
                message: body,
            },
            deprecation: resolved.deprecation,
        })
    }

    fn unknown_envelope_field(&self, key: &str) -> Result<(), DecodeError> {
        if self.config.reject_unknown_fields {
            return Err(DecodeError::UnexpectedEnvelopeField {
                key: key.to_string(),
            });
        }
        tracing::debug!(key, "dropping unexpected top-level request field");
        Ok(())
    }

    fn check_payload(
        &self,
        operation: Operation,
        payload: Option<Payload>,
    ) -> Result<Option<Payload>, DecodeError> {
        let shape = operation.payload_shape();
        match (shape, payload) {
            (PayloadShape::Opaque, payload) => Ok(payload),
            (PayloadShape::Empty, None) => Ok(None),
            (PayloadShape::Empty, Some(payload)) => {
                if !payload.is_empty() && self.config.reject_unknown_fields {
                    return Err(DecodeError::UnexpectedPayload { operation });
                }
                Ok(None)
            }
            (PayloadShape::Fields(_), None) if shape.payload_optional() => Ok(None),
            (PayloadShape::Fields(_), None) => Err(DecodeError::MissingPayload { operation }),
            (PayloadShape::Fields(fields), Some(mut payload)) => {
                let mut canonical = Payload::new();
                for spec in fields {
                    if let Some(value) = take_field(operation, spec, &mut payload)? {
                        canonical.insert(spec.key.to_string(), value);
                    }
                }
                if let Some(key) = payload.keys().next() {
                    if self.config.reject_unknown_fields {
                        return Err(DecodeError::UnexpectedField {
                            operation,
                            key: key.clone(),
                        });
                    }
                    tracing::debug!(%operation, key = %key, "dropping unexpected payload field");
                }
                if canonical.is_empty() && shape.payload_optional() {
                    return Ok(None);
                }
                Ok(Some(canonical))
            }
        }
    }
}

/// Removes one field from `payload` and checks its type. `unlock` defaults
/// to `false` when absent; other optional fields stay absent.
fn take_field(
    operation: Operation,
    spec: &FieldSpec,
    payload: &mut Payload,
) -> Result<Option<Value>, DecodeError> {
    let value = match payload.remove(spec.key) {
        None | Some(Value::Null) if spec.key == keys::UNLOCK => return Ok(Some(Value::Bool(false))),
        None | Some(Value::Null) if spec.required => {
            return Err(DecodeError::MissingField {
                operation,
                key: spec.key,
            })
        }
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let (valid, expected) = match spec.kind {
        FieldKind::String => (value.is_string(), "a string"),
        FieldKind::Integer => (value.is_i64(), "an integer"),
        FieldKind::Boolean => (value.is_boolean(), "a boolean"),
        FieldKind::StringList => (
            value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            "an array of strings",
        ),
    };
    if !valid {
        return Err(DecodeError::InvalidField {
            operation,
            key: spec.key,
            expected,
        });
    }
    Ok(Some(value))
}
