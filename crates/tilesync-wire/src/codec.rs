use bytes::{Buf, BufMut, Bytes, BytesMut};

use tilesync_world::{BlockPos, DimensionId, Location, Value};

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::registry::CodecRegistry;

/// Envelope header: dimension (4) + position (3×4) + count (2) = 18 bytes.
pub const HEADER_SIZE: usize = 18;

/// Maximum number of values per envelope (count field is u16).
pub const MAX_VALUES: usize = u16::MAX as usize;

/// One synchronization push: a location and the ordered values for it.
///
/// Built either by snapshotting a live entity (outgoing) or by decoding
/// received bytes (incoming). Order is part of the contract: the receiver
/// interprets slot N the way the sender filled it.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncEnvelope {
    location: Location,
    values: Vec<Value>,
}

impl SyncEnvelope {
    /// Create an envelope from a location and an ordered value sequence.
    ///
    /// Sequences longer than [`MAX_VALUES`] are representable but will be
    /// rejected by [`encode_envelope`].
    pub fn new(location: Location, values: Vec<Value>) -> Self {
        Self { location, values }
    }

    /// The target location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The ordered value sequence.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of values carried.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the envelope carries no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the envelope into its location and values.
    pub fn into_parts(self) -> (Location, Vec<Value>) {
        (self.location, self.values)
    }

    /// Exact wire size of this envelope in bytes.
    pub fn encoded_len(&self) -> usize {
        let payload: usize = self.values.iter().map(|v| 1 + value_wire_len(v)).sum();
        HEADER_SIZE + payload
    }
}

fn value_wire_len(value: &Value) -> usize {
    match value {
        Value::Int(_) | Value::Float(_) => 4,
        Value::Str(s) => 4 + s.len(),
        Value::Bool(_) | Value::Byte(_) => 1,
        Value::Long(_) => 8,
        Value::Pos(_) => 12,
    }
}

/// Encode an envelope into the wire format, appending to `dst`.
///
/// Wire format (all integers big-endian):
/// ```text
/// ┌─────────────┬──────────────────┬──────────┬─────────────────────────┐
/// │ Dimension   │ Position x,y,z   │ Count    │ Entries                 │
/// │ (4B)        │ (3×4B)           │ (2B)     │ Count × (tag 1B + data) │
/// └─────────────┴──────────────────┴──────────┴─────────────────────────┘
/// ```
///
/// Encoding is atomic: on any error `dst` is restored to its length before
/// the call, so a failed envelope never leaves partial bytes behind.
pub fn encode_envelope(
    envelope: &SyncEnvelope,
    registry: &CodecRegistry,
    dst: &mut BytesMut,
) -> EncodeResult<()> {
    let start = dst.len();
    if let Err(err) = encode_body(envelope, registry, dst) {
        dst.truncate(start);
        return Err(err);
    }
    Ok(())
}

fn encode_body(
    envelope: &SyncEnvelope,
    registry: &CodecRegistry,
    dst: &mut BytesMut,
) -> EncodeResult<()> {
    let count = envelope.values.len();
    if count > MAX_VALUES {
        return Err(EncodeError::TooManyValues { count });
    }

    dst.reserve(envelope.encoded_len());
    dst.put_i32(envelope.location.dimension.0);
    dst.put_i32(envelope.location.pos.x);
    dst.put_i32(envelope.location.pos.y);
    dst.put_i32(envelope.location.pos.z);
    dst.put_u16(count as u16);

    for value in &envelope.values {
        let (tag, codec) = registry.codec_for_value(value)?;
        dst.put_u8(tag);
        (codec.encode)(value, dst)?;
    }
    Ok(())
}

/// Decode one envelope from the front of `src`.
///
/// Consumes exactly the envelope's bytes; anything after it stays in `src`
/// for the caller (framing is the transport's concern). Every length check
/// happens before the corresponding read, so a hostile length prefix cannot
/// trigger an oversized allocation.
pub fn decode_envelope(src: &mut Bytes, registry: &CodecRegistry) -> DecodeResult<SyncEnvelope> {
    ensure(src, HEADER_SIZE)?;
    let dimension = DimensionId(src.get_i32());
    let x = src.get_i32();
    let y = src.get_i32();
    let z = src.get_i32();
    let count = src.get_u16() as usize;

    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        ensure(src, 1)?;
        let tag = src.get_u8();
        let codec = registry.codec_for_tag(tag)?;
        values.push((codec.decode)(src)?);
    }

    let location = Location::new(dimension, BlockPos::new(x, y, z));
    Ok(SyncEnvelope::new(location, values))
}

fn ensure(src: &Bytes, needed: usize) -> DecodeResult<()> {
    let available = src.remaining();
    if available < needed {
        return Err(DecodeError::Truncated { needed, available });
    }
    Ok(())
}

// Per-kind codec functions. The registry pairs each with its kind; the
// mismatch arms are unreachable through registry dispatch but keep the
// functions total.

pub(crate) fn encode_int(value: &Value, dst: &mut BytesMut) -> EncodeResult<()> {
    match value {
        Value::Int(v) => {
            dst.put_i32(*v);
            Ok(())
        }
        other => Err(EncodeError::UnsupportedKind { kind: other.kind() }),
    }
}

pub(crate) fn decode_int(src: &mut Bytes) -> DecodeResult<Value> {
    ensure(src, 4)?;
    Ok(Value::Int(src.get_i32()))
}

pub(crate) fn encode_str(value: &Value, dst: &mut BytesMut) -> EncodeResult<()> {
    match value {
        Value::Str(s) => {
            if s.len() > u32::MAX as usize {
                return Err(EncodeError::OversizedString { len: s.len() });
            }
            dst.put_u32(s.len() as u32);
            dst.put_slice(s.as_bytes());
            Ok(())
        }
        other => Err(EncodeError::UnsupportedKind { kind: other.kind() }),
    }
}

pub(crate) fn decode_str(src: &mut Bytes) -> DecodeResult<Value> {
    ensure(src, 4)?;
    let len = src.get_u32() as usize;
    ensure(src, len)?;
    let bytes = src.split_to(len);
    Ok(Value::Str(String::from_utf8(Vec::from(bytes))?))
}

pub(crate) fn encode_float(value: &Value, dst: &mut BytesMut) -> EncodeResult<()> {
    match value {
        Value::Float(v) => {
            dst.put_f32(*v);
            Ok(())
        }
        other => Err(EncodeError::UnsupportedKind { kind: other.kind() }),
    }
}

pub(crate) fn decode_float(src: &mut Bytes) -> DecodeResult<Value> {
    ensure(src, 4)?;
    Ok(Value::Float(src.get_f32()))
}

pub(crate) fn encode_bool(value: &Value, dst: &mut BytesMut) -> EncodeResult<()> {
    match value {
        Value::Bool(v) => {
            dst.put_u8(u8::from(*v));
            Ok(())
        }
        other => Err(EncodeError::UnsupportedKind { kind: other.kind() }),
    }
}

pub(crate) fn decode_bool(src: &mut Bytes) -> DecodeResult<Value> {
    ensure(src, 1)?;
    // Any nonzero byte reads as true.
    Ok(Value::Bool(src.get_u8() != 0))
}

pub(crate) fn encode_byte(value: &Value, dst: &mut BytesMut) -> EncodeResult<()> {
    match value {
        Value::Byte(v) => {
            dst.put_u8(*v);
            Ok(())
        }
        other => Err(EncodeError::UnsupportedKind { kind: other.kind() }),
    }
}

pub(crate) fn decode_byte(src: &mut Bytes) -> DecodeResult<Value> {
    ensure(src, 1)?;
    Ok(Value::Byte(src.get_u8()))
}

pub(crate) fn encode_long(value: &Value, dst: &mut BytesMut) -> EncodeResult<()> {
    match value {
        Value::Long(v) => {
            dst.put_i64(*v);
            Ok(())
        }
        other => Err(EncodeError::UnsupportedKind { kind: other.kind() }),
    }
}

pub(crate) fn decode_long(src: &mut Bytes) -> DecodeResult<Value> {
    ensure(src, 8)?;
    Ok(Value::Long(src.get_i64()))
}

pub(crate) fn encode_pos(value: &Value, dst: &mut BytesMut) -> EncodeResult<()> {
    match value {
        Value::Pos(p) => {
            dst.put_i32(p.x);
            dst.put_i32(p.y);
            dst.put_i32(p.z);
            Ok(())
        }
        other => Err(EncodeError::UnsupportedKind { kind: other.kind() }),
    }
}

pub(crate) fn decode_pos(src: &mut Bytes) -> DecodeResult<Value> {
    ensure(src, 12)?;
    let x = src.get_i32();
    let y = src.get_i32();
    let z = src.get_i32();
    Ok(Value::Pos(BlockPos::new(x, y, z)))
}
