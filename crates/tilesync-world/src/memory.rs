use std::collections::HashMap;

use tracing::debug;

use crate::entity::BlockEntity;
use crate::pos::{BlockPos, DimensionId};
use crate::world::World;

/// In-memory [`World`] backed by a position-keyed map.
///
/// Reference implementation used by demos and tests; a host engine supplies
/// its own `World` over its real storage.
pub struct MemoryWorld {
    dimension: DimensionId,
    entities: HashMap<BlockPos, Box<dyn BlockEntity>>,
}

impl MemoryWorld {
    /// Create an empty world for the given dimension.
    pub fn new(dimension: DimensionId) -> Self {
        Self {
            dimension,
            entities: HashMap::new(),
        }
    }

    /// Place an entity at `pos`, replacing any previous occupant.
    pub fn insert<E: BlockEntity + 'static>(&mut self, pos: BlockPos, entity: E) {
        debug!(%pos, dimension = %self.dimension, "placing block entity");
        self.entities.insert(pos, Box::new(entity));
    }

    /// Remove and return the entity at `pos`, if any.
    pub fn remove(&mut self, pos: BlockPos) -> Option<Box<dyn BlockEntity>> {
        let removed = self.entities.remove(&pos);
        if removed.is_some() {
            debug!(%pos, dimension = %self.dimension, "removing block entity");
        }
        removed
    }

    /// Number of placed entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl World for MemoryWorld {
    fn dimension(&self) -> DimensionId {
        self.dimension
    }

    fn block_entity(&self, pos: BlockPos) -> Option<&dyn BlockEntity> {
        self.entities.get(&pos).map(|e| e.as_ref())
    }

    fn block_entity_mut(&mut self, pos: BlockPos) -> Option<&mut dyn BlockEntity> {
        // Reborrow through the box; the boxed object's 'static bound cannot
        // shorten behind `&mut`, so a plain `as_mut()` does not unify here.
        self.entities
            .get_mut(&pos)
            .map(|e| &mut **e as &mut dyn BlockEntity)
    }
}

impl std::fmt::Debug for MemoryWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryWorld")
            .field("dimension", &self.dimension)
            .field("entities", &self.entities.len())
            .finish()
    }
}
