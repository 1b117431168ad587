//! Tagged binary wire format for tile sync envelopes.
//!
//! An envelope is one push of state for one block entity:
//! - a 4-byte big-endian dimension id
//! - a 12-byte position (x, y, z as big-endian i32)
//! - a 2-byte big-endian value count
//! - per value: a 1-byte kind tag plus that kind's payload
//!
//! Tags come from the [`CodecRegistry`]: an entry's position is its tag, so
//! registration order is the wire contract and new kinds are append-only.
//! Encoding and decoding are pure transforms; transport and framing live
//! outside this crate.

pub mod codec;
pub mod error;
pub mod registry;

pub use codec::{
    decode_envelope, encode_envelope, SyncEnvelope, HEADER_SIZE, MAX_VALUES,
};
pub use error::{
    DecodeError, DecodeResult, EncodeError, EncodeResult, RegistryError, RegistryResult,
};
pub use registry::{CodecRegistry, DecodeFn, EncodeFn, ValueCodec};
