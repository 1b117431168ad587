use tilesync_world::ValueKind;

/// Errors that can occur while encoding an envelope.
///
/// Encoding is atomic: on any error the destination buffer is left exactly
/// as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A value's kind has no entry in the codec registry.
    #[error("no codec registered for value kind `{kind}`")]
    UnsupportedKind { kind: ValueKind },

    /// The value sequence exceeds the u16 count field.
    #[error("too many values ({count}, max {max})", max = crate::codec::MAX_VALUES)]
    TooManyValues { count: usize },

    /// A string payload exceeds the u32 length prefix.
    #[error("string payload too long ({len} bytes)")]
    OversizedString { len: usize },
}

/// Errors that can occur while building a codec registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The kind already has an entry; each kind may be registered once.
    #[error("value kind `{kind}` is already registered under tag {tag}")]
    DuplicateKind { kind: ValueKind, tag: u8 },
}

/// Errors that can occur while decoding an envelope.
///
/// Any decode error aborts the current envelope only; the caller decides
/// what to do with the remaining input.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input carries a tag with no entry in the codec registry.
    ///
    /// Almost always version skew: the sender registered more kinds than
    /// this side knows about.
    #[error("unknown value tag {tag} (registry has {registry_size} entries)")]
    UnknownTag { tag: u8, registry_size: usize },

    /// The input ended before the layout was satisfied.
    ///
    /// `needed` is the size of the read that failed, `available` how many
    /// bytes were left at that point.
    #[error("truncated input (needed {needed} bytes, {available} available)")]
    Truncated { needed: usize, available: usize },

    /// A string payload is not valid UTF-8.
    #[error("string payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
