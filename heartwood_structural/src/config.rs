// Material catalog and solver tunables.
//
// `MaterialCatalog` is the full configuration block this library
// consumes: relative (unitless) material and face properties plus the
// solver's iteration budget, damping, gravity, and the warn/block stress
// thresholds. The host application loads it from JSON once at startup and
// passes it by reference into every call; the library never touches disk
// or environment, and never mutates the catalog.
//
// A material or face kind with zero stiffness and strength contributes
// nothing structurally; the network builder skips it entirely rather than
// emitting degenerate springs.
//
// **Critical constraint: determinism.** Catalog values feed straight into
// solver arithmetic; the maps are `BTreeMap` so serialization and
// iteration order are stable.

use crate::types::{FaceKind, Material};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bulk properties of a solid material. All values are relative scalars,
/// not physically calibrated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialProps {
    /// Mass per cell.
    pub density: f32,
    /// Spring stiffness contribution (paired by harmonic mean).
    pub stiffness: f32,
    /// Failure threshold contribution (paired by minimum).
    pub strength: f32,
}

/// Properties of one face kind on an interior cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceProps {
    /// Mass added to the interior cell carrying this face.
    pub weight: f32,
    pub stiffness: f32,
    pub strength: f32,
}

/// The complete configuration surface of the structural subsystem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialCatalog {
    /// Scalar multiplier on per-node weight (mass × gravity).
    pub gravity: f32,

    /// Fixed relaxation pass count. The solver runs exactly this many
    /// passes, with no convergence early-exit, so identical inputs always
    /// take the identical arithmetic path.
    pub max_iterations: u32,

    /// Constant step scale applied to each node's net force per pass.
    /// Must stay below `1 / max node stiffness sum` or the update
    /// oscillates.
    pub damping_factor: f32,

    /// Stress ratio at or below which a proposal is fully approved.
    pub warn_stress_ratio: f32,

    /// Stress ratio above which a proposal is rejected outright.
    pub block_stress_ratio: f32,

    /// Total generation attempts permitted before candidate generation
    /// is declared incompatible with this catalog.
    pub tree_generation_max_retries: u32,

    /// Bare mass of a furnished interior cell before face weights.
    pub interior_base_weight: f32,

    /// Per-material bulk properties. Absent materials are structurally
    /// inert.
    pub materials: BTreeMap<Material, MaterialProps>,

    /// Per-face-kind properties. Absent kinds behave like `Open`.
    pub faces: BTreeMap<FaceKind, FaceProps>,
}

impl MaterialCatalog {
    pub fn material(&self, material: Material) -> Option<&MaterialProps> {
        self.materials.get(&material)
    }

    pub fn face(&self, kind: FaceKind) -> Option<&FaceProps> {
        self.faces.get(&kind)
    }

    /// A copy of this catalog with a reduced iteration budget for
    /// interactive stress previews (e.g. a live overlay while a player
    /// drags a proposal). Preview results are lower fidelity and must
    /// never back the authoritative accept/reject decision; run that
    /// through the full catalog.
    pub fn preview(&self) -> MaterialCatalog {
        let mut copy = self.clone();
        copy.max_iterations = (self.max_iterations / 6).max(20);
        copy
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        let mut materials = BTreeMap::new();
        materials.insert(
            Material::Ground,
            MaterialProps {
                density: 2.0,
                stiffness: 8.0,
                strength: 100.0,
            },
        );
        materials.insert(
            Material::Trunk,
            MaterialProps {
                density: 1.2,
                stiffness: 8.0,
                strength: 60.0,
            },
        );
        materials.insert(
            Material::Branch,
            MaterialProps {
                density: 0.8,
                stiffness: 6.0,
                strength: 14.0,
            },
        );
        materials.insert(
            Material::Platform,
            MaterialProps {
                density: 0.5,
                stiffness: 5.0,
                strength: 6.0,
            },
        );
        materials.insert(
            Material::Bridge,
            MaterialProps {
                density: 0.45,
                stiffness: 5.0,
                strength: 7.0,
            },
        );
        // Light foliage carries no load and never enters the network.
        materials.insert(
            Material::Leaf,
            MaterialProps {
                density: 0.0,
                stiffness: 0.0,
                strength: 0.0,
            },
        );

        let mut faces = BTreeMap::new();
        // Wall, Window, and Door share one weight: an opening weakens a
        // face without lightening the building.
        faces.insert(
            FaceKind::Wall,
            FaceProps {
                weight: 1.0,
                stiffness: 6.0,
                strength: 9.0,
            },
        );
        faces.insert(
            FaceKind::Window,
            FaceProps {
                weight: 1.0,
                stiffness: 3.0,
                strength: 4.0,
            },
        );
        faces.insert(
            FaceKind::Door,
            FaceProps {
                weight: 1.0,
                stiffness: 3.0,
                strength: 4.0,
            },
        );
        faces.insert(
            FaceKind::Floor,
            FaceProps {
                weight: 1.2,
                stiffness: 7.0,
                strength: 10.0,
            },
        );
        faces.insert(
            FaceKind::Ceiling,
            FaceProps {
                weight: 1.0,
                stiffness: 5.0,
                strength: 8.0,
            },
        );
        faces.insert(
            FaceKind::Open,
            FaceProps {
                weight: 0.0,
                stiffness: 0.0,
                strength: 0.0,
            },
        );

        Self {
            gravity: 1.0,
            max_iterations: 160,
            damping_factor: 0.02,
            warn_stress_ratio: 0.5,
            block_stress_ratio: 1.0,
            tree_generation_max_retries: 8,
            interior_base_weight: 0.4,
            materials,
            faces,
        }
    }
}
