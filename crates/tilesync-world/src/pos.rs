use std::fmt;

/// An integer block coordinate in a world.
///
/// Components are signed 32-bit, matching the wire encoding of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The origin position `(0, 0, 0)`.
    pub const ORIGIN: BlockPos = BlockPos::new(0, 0, 0);
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

/// Identifier of a logical world (dimension).
///
/// Two worlds with the same id are considered the same addressing space;
/// updates are only applied when sender and receiver dimensions agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimensionId(pub i32);

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dim{}", self.0)
    }
}

impl From<i32> for DimensionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// A fully qualified block location: dimension plus position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// The dimension the position lives in.
    pub dimension: DimensionId,
    /// The block position within that dimension.
    pub pos: BlockPos,
}

impl Location {
    /// Create a location from a dimension and a position.
    pub const fn new(dimension: DimensionId, pos: BlockPos) -> Self {
        Self { dimension, pos }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.pos, self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blockpos_display() {
        assert_eq!(BlockPos::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }

    #[test]
    fn test_location_display() {
        let loc = Location::new(DimensionId(-1), BlockPos::new(8, 64, -120));
        assert_eq!(loc.to_string(), "(8, 64, -120)@dim-1");
    }

    #[test]
    fn test_blockpos_from_tuple() {
        let pos: BlockPos = (4, 5, 6).into();
        assert_eq!(pos, BlockPos::new(4, 5, 6));
    }

    #[test]
    fn test_blockpos_hash_eq() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(BlockPos::new(1, 2, 3), "machine");
        assert_eq!(map.get(&BlockPos::new(1, 2, 3)), Some(&"machine"));
        assert_eq!(map.get(&BlockPos::new(3, 2, 1)), None);
    }
}
