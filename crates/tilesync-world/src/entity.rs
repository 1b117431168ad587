use crate::value::Value;

/// Capability of producing a sync snapshot.
///
/// Implemented by block entities whose state can be pushed to remote
/// replicas. The returned sequence is positional: the receiving side must
/// interpret slot N the same way the producer filled it.
pub trait SyncSource {
    /// Snapshot the current state as an ordered value sequence.
    fn produce_sync_values(&self) -> Vec<Value>;
}

/// Capability of consuming a sync snapshot.
///
/// Implemented by block entities that accept pushed state. `values` arrives
/// in the exact order the producing side emitted it.
pub trait SyncSink {
    /// Apply an ordered value sequence received from the authoritative side.
    fn apply_sync_values(&mut self, values: Vec<Value>);
}

/// A block entity: addressable world state attached to a position.
///
/// The sync layer never assumes concrete entity types. Entities opt into
/// synchronization by overriding the capability accessors; the defaults
/// advertise no capability, and such entities are skipped by capture and
/// dispatch.
pub trait BlockEntity {
    /// This entity as a sync producer, if it is one.
    fn as_sync_source(&self) -> Option<&dyn SyncSource> {
        None
    }

    /// This entity as a sync consumer, if it is one.
    fn as_sync_sink(&mut self) -> Option<&mut dyn SyncSink> {
        None
    }
}
