// Core spatial and material types.
//
// `CellCoord` is the identity of everything in the structural network:
// nodes are keyed and looked up by coordinate, never by opaque handle, so
// a network is reconstructible and comparable across runs. `Material`
// names the solid kinds a cell can hold; `FaceSide`/`FaceKind`/`FaceSet`
// describe the structural role of each side of a furnished interior cell.
//
// **Critical constraint: determinism.** `CellCoord` derives `Ord`
// field-by-field (x, then y, then z) so `BTreeMap<CellCoord, _>`
// iteration order is a pure function of the keys. Do not key anything in
// this crate by a hashed container.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the voxel grid, in whole-cell units.
///
/// Right-handed axes: X east, Y up, Z south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The coordinate one cell away along `side`.
    pub fn neighbor(self, side: FaceSide) -> Self {
        let (dx, dy, dz) = side.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Geometric center of the cell, which is where its node starts.
    pub fn center(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// The material occupying a single cell.
///
/// `Ground` is the designated anchor kind: its nodes are pinned and
/// absorb unlimited force. `Interior` marks a furnished interior cell
/// whose structural behavior comes from its face assignments rather than
/// a bulk material. `Leaf` is catalogued with zero stiffness and strength
/// and therefore never enters the network.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Material {
    #[default]
    Air,
    Ground,
    Trunk,
    Branch,
    Platform,
    Bridge,
    Interior,
    Leaf,
}

impl Material {
    /// Anchor materials produce pinned nodes.
    pub fn is_anchor(self) -> bool {
        self == Material::Ground
    }
}

// ---------------------------------------------------------------------------
// Faces
// ---------------------------------------------------------------------------

/// One of the six sides of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaceSide {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl FaceSide {
    /// All six sides in a fixed order. Iteration over faces always uses
    /// this array.
    pub const ALL: [FaceSide; 6] = [
        FaceSide::PosX,
        FaceSide::NegX,
        FaceSide::PosY,
        FaceSide::NegY,
        FaceSide::PosZ,
        FaceSide::NegZ,
    ];

    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            FaceSide::PosX => (1, 0, 0),
            FaceSide::NegX => (-1, 0, 0),
            FaceSide::PosY => (0, 1, 0),
            FaceSide::NegY => (0, -1, 0),
            FaceSide::PosZ => (0, 0, 1),
            FaceSide::NegZ => (0, 0, -1),
        }
    }

    pub fn opposite(self) -> FaceSide {
        match self {
            FaceSide::PosX => FaceSide::NegX,
            FaceSide::NegX => FaceSide::PosX,
            FaceSide::PosY => FaceSide::NegY,
            FaceSide::NegY => FaceSide::PosY,
            FaceSide::PosZ => FaceSide::NegZ,
            FaceSide::NegZ => FaceSide::PosZ,
        }
    }
}

/// The structural role assigned to one side of an interior cell.
///
/// `Open` contributes nothing: no spring, no weight.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FaceKind {
    #[default]
    Open,
    Wall,
    Window,
    Door,
    Floor,
    Ceiling,
}

/// The six face assignments of one interior cell. Defaults to all `Open`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceSet {
    faces: [FaceKind; 6],
}

impl FaceSet {
    pub fn get(&self, side: FaceSide) -> FaceKind {
        self.faces[Self::slot(side)]
    }

    pub fn set(&mut self, side: FaceSide, kind: FaceKind) {
        self.faces[Self::slot(side)] = kind;
    }

    fn slot(side: FaceSide) -> usize {
        match side {
            FaceSide::PosX => 0,
            FaceSide::NegX => 1,
            FaceSide::PosY => 2,
            FaceSide::NegY => 3,
            FaceSide::PosZ => 4,
            FaceSide::NegZ => 5,
        }
    }
}
