use serde::{Deserialize, Serialize};
use std::fmt;

pub const CHUNK_SIZE: i32 = 16;

/// Block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn chunk(self) -> ChunkPos {
        ChunkPos {
            x: self.x.div_euclid(CHUNK_SIZE),
            z: self.z.div_euclid(CHUNK_SIZE),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn offset(self, dx: i64, dz: i64) -> Option<Self> {
        let x = i32::try_from(i64::from(self.x) + dx).ok()?;
        let z = i32::try_from(i64::from(self.z) + dz).ok()?;
        Some(Self { x, z })
    }

    /// Chunks of the square `[x-r, x+r) × [z-r, z+r)`, z-major. Radius 0 is
    /// the origin chunk alone. Coordinates outside `i32` are left out.
    pub fn square_around(self, radius: u32) -> impl Iterator<Item = ChunkPos> {
        let (low, high) = if radius == 0 {
            (0i64, 1i64)
        } else {
            (-i64::from(radius), i64::from(radius))
        };
        (low..high).flat_map(move |dz| (low..high).filter_map(move |dx| self.offset(dx, dz)))
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}
