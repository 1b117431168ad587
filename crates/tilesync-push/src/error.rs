/// Errors that can occur in push operations.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// Envelope encoding failed.
    #[error("encode error: {0}")]
    Encode(#[from] tilesync_wire::EncodeError),

    /// Envelope decoding failed.
    #[error("decode error: {0}")]
    Decode(#[from] tilesync_wire::DecodeError),

    /// The dispatch queue's owning context is gone.
    #[error("dispatch queue closed")]
    QueueClosed,
}

pub type Result<T> = std::result::Result<T, PushError>;
