use bytes::Bytes;
use tracing::{debug, trace};

use tilesync_wire::{decode_envelope, CodecRegistry, SyncEnvelope};
use tilesync_world::World;

use crate::error::Result;

/// Why a dispatch ended as a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The envelope's dimension differs from the local world's.
    DimensionMismatch,
    /// No entity exists at the envelope's position.
    NoEntity,
    /// The entity exists but does not accept synchronized values.
    NoSink,
}

/// Outcome of dispatching one envelope.
///
/// Drops are defined no-ops, not errors. The protocol is one-way and
/// fire-and-forget: nothing is reported back to the sender, the outcome is
/// only for the local caller's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Values were delivered to the target entity exactly once.
    Delivered,
    /// The envelope was discarded without touching any entity.
    Dropped(DropReason),
}

impl DispatchOutcome {
    /// Whether the values reached an entity.
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered)
    }
}

/// Decode one received update into an envelope.
///
/// `bytes` is one transport packet; bytes past the envelope are ignored.
/// Decoding can run on any thread and never blocks.
pub fn decode_update(bytes: impl Into<Bytes>, registry: &CodecRegistry) -> Result<SyncEnvelope> {
    let mut bytes = bytes.into();
    Ok(decode_envelope(&mut bytes, registry)?)
}

/// Deliver a decoded envelope to the entity at its location.
///
/// Must run on the execution context that owns `world`; use the dispatch
/// queue to submit from a decode thread. Consumes the envelope either way:
/// delivery is at-most-once and drops are never retried.
pub fn dispatch(world: &mut dyn World, envelope: SyncEnvelope) -> DispatchOutcome {
    let (location, values) = envelope.into_parts();

    if world.dimension() != location.dimension {
        debug!(%location, local = %world.dimension(), "dropping update for other dimension");
        return DispatchOutcome::Dropped(DropReason::DimensionMismatch);
    }

    let Some(entity) = world.block_entity_mut(location.pos) else {
        debug!(%location, "dropping update, no entity at position");
        return DispatchOutcome::Dropped(DropReason::NoEntity);
    };

    let Some(sink) = entity.as_sync_sink() else {
        debug!(%location, "dropping update, entity has no sink capability");
        return DispatchOutcome::Dropped(DropReason::NoSink);
    };

    let count = values.len();
    sink.apply_sync_values(values);
    trace!(%location, count, "delivered sync values");
    DispatchOutcome::Delivered
}
