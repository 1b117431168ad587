use std::sync::OnceLock;

use bytes::{Bytes, BytesMut};

use tilesync_world::{Value, ValueKind};

use crate::codec;
use crate::error::{
    DecodeError, DecodeResult, EncodeError, EncodeResult, RegistryError, RegistryResult,
};

/// Encode half of a codec entry. Appends one value's payload to `dst`.
pub type EncodeFn = fn(value: &Value, dst: &mut BytesMut) -> EncodeResult<()>;

/// Decode half of a codec entry. Consumes exactly the bytes its paired
/// [`EncodeFn`] produced.
pub type DecodeFn = fn(src: &mut Bytes) -> DecodeResult<Value>;

/// One registry entry: a value kind with its paired codec functions.
///
/// The entry's tag is not stored here; it is the entry's index in the
/// registry that owns it.
pub struct ValueCodec {
    kind: ValueKind,
    pub(crate) encode: EncodeFn,
    pub(crate) decode: DecodeFn,
}

impl ValueCodec {
    /// The kind this entry encodes and decodes.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

impl std::fmt::Debug for ValueCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueCodec")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Ordered, append-only table of value codecs.
///
/// An entry's position is its wire tag, so registration order is part of
/// the wire format: new kinds go at the end, existing entries never move
/// or disappear, and each kind appears at most once. The shared
/// [`standard`](CodecRegistry::standard) registry is built once and never
/// mutated, which makes unsynchronized concurrent reads safe.
#[derive(Debug)]
pub struct CodecRegistry {
    entries: Vec<ValueCodec>,
}

impl CodecRegistry {
    /// The process-wide standard registry.
    ///
    /// Tag assignment, fixed for wire compatibility:
    ///
    /// | tag | kind |
    /// |-----|-------|
    /// | 0 | int |
    /// | 1 | str |
    /// | 2 | float |
    /// | 3 | bool |
    /// | 4 | byte |
    /// | 5 | long |
    /// | 6 | pos |
    pub fn standard() -> &'static CodecRegistry {
        static STANDARD: OnceLock<CodecRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let kinds = [
                ValueKind::Int,
                ValueKind::Str,
                ValueKind::Float,
                ValueKind::Bool,
                ValueKind::Byte,
                ValueKind::Long,
                ValueKind::Pos,
            ];
            CodecRegistry {
                entries: kinds.into_iter().map(entry_for).collect(),
            }
        })
    }

    /// Build a registry from kinds in tag order.
    ///
    /// Intended for tests and for talking to peers built against an older
    /// registry (a prefix of the standard kind list). Fails with
    /// [`RegistryError::DuplicateKind`] when a kind appears twice.
    pub fn from_kinds(kinds: impl IntoIterator<Item = ValueKind>) -> RegistryResult<Self> {
        let mut registry = Self {
            entries: Vec::new(),
        };
        for kind in kinds {
            registry.append(kind)?;
        }
        Ok(registry)
    }

    /// Append one kind at the tail, assigning it the next tag.
    ///
    /// Existing tags never change; this is the only permitted form of
    /// registry evolution. Each kind may be registered once, which also
    /// keeps every tag inside the u8 wire field.
    pub fn append(&mut self, kind: ValueKind) -> RegistryResult<()> {
        if let Some(tag) = self.entries.iter().position(|entry| entry.kind == kind) {
            return Err(RegistryError::DuplicateKind {
                kind,
                tag: tag as u8,
            });
        }
        self.entries.push(entry_for(kind));
        Ok(())
    }

    /// Look up the codec for a wire tag. O(1).
    pub fn codec_for_tag(&self, tag: u8) -> DecodeResult<&ValueCodec> {
        self.entries
            .get(tag as usize)
            .ok_or(DecodeError::UnknownTag {
                tag,
                registry_size: self.entries.len(),
            })
    }

    /// Find the tag and codec for a value, scanning in registration order.
    ///
    /// Kinds are disjoint, so the first match is the only match.
    pub fn codec_for_value(&self, value: &Value) -> EncodeResult<(u8, &ValueCodec)> {
        let kind = value.kind();
        self.entries
            .iter()
            .position(|entry| entry.kind == kind)
            // One entry per kind, so every position fits the u8 tag.
            .map(|tag| (tag as u8, &self.entries[tag]))
            .ok_or(EncodeError::UnsupportedKind { kind })
    }

    /// Registered kinds in tag order.
    pub fn kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.entries.iter().map(|entry| entry.kind)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_for(kind: ValueKind) -> ValueCodec {
    let (encode, decode): (EncodeFn, DecodeFn) = match kind {
        ValueKind::Int => (codec::encode_int, codec::decode_int),
        ValueKind::Str => (codec::encode_str, codec::decode_str),
        ValueKind::Float => (codec::encode_float, codec::decode_float),
        ValueKind::Bool => (codec::encode_bool, codec::decode_bool),
        ValueKind::Byte => (codec::encode_byte, codec::decode_byte),
        ValueKind::Long => (codec::encode_long, codec::decode_long),
        ValueKind::Pos => (codec::encode_pos, codec::decode_pos),
    };
    ValueCodec {
        kind,
        encode,
        decode,
    }
}
