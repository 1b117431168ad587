use crate::entity::BlockEntity;
use crate::pos::{BlockPos, DimensionId};

/// Lookup interface the sync layer needs from a host world.
///
/// A world is one dimension's worth of addressable block entities. The sync
/// layer only ever resolves entities by position and checks the dimension;
/// everything else about the host engine stays behind this trait.
pub trait World {
    /// The dimension this world represents.
    fn dimension(&self) -> DimensionId;

    /// The block entity at `pos`, if any.
    fn block_entity(&self, pos: BlockPos) -> Option<&dyn BlockEntity>;

    /// Mutable access to the block entity at `pos`, if any.
    fn block_entity_mut(&mut self, pos: BlockPos) -> Option<&mut dyn BlockEntity>;
}
