//! Byte encodings for handing messages to a transport.
//!
//! JSON is the native Redisques format. `MsgPack` is offered for binary
//! transports and always uses named maps (`rmp_serde::to_vec_named()`) so
//! the encoded structure is the same key/value tree as the JSON form.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Errors from encoding or decoding wire bytes.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
}

/// Byte format used on the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    #[default]
    Json,
    MsgPack,
}

impl WireFormat {
    /// Encode any serializable protocol value (`Message`, `Reply`, raw JSON).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if serialization fails.
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(match self {
            WireFormat::Json => serde_json::to_vec(value)?,
            WireFormat::MsgPack => rmp_serde::to_vec_named(value)?,
        })
    }

    /// Decode bytes into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the bytes are malformed or do not match `T`.
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(match self {
            WireFormat::Json => serde_json::from_slice(bytes)?,
            WireFormat::MsgPack => rmp_serde::from_slice(bytes)?,
        })
    }

    /// Decode bytes into an untyped tree, ready for
    /// [`RequestDecoder::decode`](crate::decode::RequestDecoder::decode).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the bytes are malformed.
    pub fn decode_value(self, bytes: &[u8]) -> Result<Value, CodecError> {
        self.decode(bytes)
    }
}
