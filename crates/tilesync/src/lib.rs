//! Typed block-entity state synchronization for voxel worlds.
//!
//! tilesync pushes a heterogeneous, ordered bundle of values from an
//! authoritative block entity to its remote replica: snapshot, encode,
//! send over any transport, decode, dispatch. One-way, fire-and-forget,
//! at-most-once.
//!
//! # Crate Structure
//!
//! - [`world`] — Positions, the value union, capability traits, world lookup
//! - [`wire`] — Codec registry and envelope encode/decode
//! - [`push`] — Capture, dispatch, and the dispatch queue (behind `push`
//!   feature; `async` adds a tokio mailbox)

/// Re-export world types.
pub mod world {
    pub use tilesync_world::*;
}

/// Re-export wire types.
pub mod wire {
    pub use tilesync_wire::*;
}

/// Re-export push types (requires `push` feature).
#[cfg(feature = "push")]
pub mod push {
    pub use tilesync_push::*;
}
