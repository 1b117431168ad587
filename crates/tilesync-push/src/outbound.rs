use bytes::{Bytes, BytesMut};
use tracing::trace;

use tilesync_wire::{encode_envelope, CodecRegistry, SyncEnvelope};
use tilesync_world::{BlockPos, Location, World};

use crate::error::Result;

/// Snapshot the entity at `pos` into an outgoing envelope.
///
/// The envelope captures the values at call time; mutating the entity
/// afterwards does not affect it. Entities that are absent or do not expose
/// the source capability yield an empty envelope, which is still valid to
/// send (the receiver applies an empty sequence or drops it).
pub fn capture(world: &dyn World, pos: BlockPos) -> SyncEnvelope {
    let values = world
        .block_entity(pos)
        .and_then(|entity| entity.as_sync_source())
        .map(|source| source.produce_sync_values())
        .unwrap_or_default();

    let location = Location::new(world.dimension(), pos);
    trace!(%location, count = values.len(), "captured sync snapshot");
    SyncEnvelope::new(location, values)
}

/// Capture the entity at `pos` and encode it in one step.
///
/// Returns transport-ready bytes for exactly one envelope.
pub fn encode_update(
    world: &dyn World,
    pos: BlockPos,
    registry: &CodecRegistry,
) -> Result<Bytes> {
    let envelope = capture(world, pos);
    let mut buf = BytesMut::with_capacity(envelope.encoded_len());
    encode_envelope(&envelope, registry, &mut buf)?;
    Ok(buf.freeze())
}
