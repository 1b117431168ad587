//! World, block-entity, and value model for tile data synchronization.
//!
//! This is the lowest layer of tilesync. It defines:
//! - positions and locations ([`BlockPos`], [`DimensionId`], [`Location`]),
//! - the closed set of synchronizable payloads ([`Value`], [`ValueKind`]),
//! - the capability traits host entities implement ([`SyncSource`],
//!   [`SyncSink`], [`BlockEntity`]),
//! - the [`World`] lookup trait plus an in-memory reference implementation.
//!
//! Everything else builds on these types; this crate has no wire knowledge.

pub mod entity;
pub mod memory;
pub mod pos;
pub mod value;
pub mod world;

pub use entity::{BlockEntity, SyncSink, SyncSource};
pub use memory::MemoryWorld;
pub use pos::{BlockPos, DimensionId, Location};
pub use value::{Value, ValueKind};
pub use world::World;
