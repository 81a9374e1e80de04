// Network builder: voxel cells in, mass-spring graph out.
//
// One node per structural cell (solid material or furnished interior),
// one spring per face-adjacent structural pair. Edge- and corner-adjacent
// cells never connect, since those contacts carry negligible area between
// cubes. Spring properties derive from the endpoint materials (harmonic
// mean of stiffness, minimum of strength) or, where a furnished interior
// cell is involved, from the face assigned to the shared side.
//
// Networks are built fresh for every validation call and live exactly as
// long as that call; nothing here is persisted.
//
// **Critical constraint: determinism.** Nodes are created in flat-grid
// order (x inner, z mid, y outer); springs are discovered by probing only
// the three positive-axis neighbors of each node in coordinate order, so
// the spring list and its endpoint ordering are identical on every run.

use crate::config::MaterialCatalog;
use crate::types::{CellCoord, FaceKind, FaceSet, FaceSide, Material};
use crate::world::WorldGrid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Face assignments for furnished interior cells, keyed by cell.
pub type FaceAssignments = BTreeMap<CellCoord, FaceSet>;

/// A mass point in the network.
#[derive(Clone, Debug)]
pub struct Node {
    /// Current position; starts at the cell center and is displaced by
    /// the solver.
    pub position: [f32; 3],
    /// Mass from material density, or interior base weight plus face
    /// weights.
    pub mass: f32,
    /// Gravity force magnitude (mass × gravity), fixed at build time.
    pub weight: f32,
    /// Pinned nodes (anchor material) never move and absorb any force.
    pub pinned: bool,
}

/// A spring connecting two nodes. Undirected; `node_a` always holds the
/// lower node index, which is the canonical endpoint order.
#[derive(Clone, Debug)]
pub struct Spring {
    pub node_a: usize,
    pub node_b: usize,
    pub stiffness: f32,
    /// Force at which this connection fails.
    pub strength: f32,
    /// Unstressed length; always one cell spacing.
    pub rest_length: f32,
}

/// The mass-spring graph for one validation call.
#[derive(Clone, Debug, Default)]
pub struct StressNetwork {
    pub(crate) nodes: Vec<Node>,
    pub(crate) springs: Vec<Spring>,
    pub(crate) index: BTreeMap<CellCoord, usize>,
}

impl StressNetwork {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Node index for a cell, if the cell produced a node.
    pub fn node_at(&self, coord: CellCoord) -> Option<usize> {
        self.index.get(&coord).copied()
    }

    /// Cells in the network, in coordinate order, with their node index.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, usize)> + '_ {
        self.index.iter().map(|(&c, &i)| (c, i))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Failures detected while assembling a network.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum NetworkError {
    /// Free nodes exist but no pinned node does: the region is globally
    /// disconnected from any support and solving it is meaningless.
    #[error("network has no anchor: no cell rests on the designated ground material")]
    NoAnchor,
}

/// Build the network for every structural cell in the grid.
pub fn build_network(
    world: &WorldGrid,
    faces: &FaceAssignments,
    catalog: &MaterialCatalog,
) -> Result<StressNetwork, NetworkError> {
    let mut network = StressNetwork::default();

    // Pass 1: nodes, in flat-grid order.
    for y in 0..world.size_y as i32 {
        for z in 0..world.size_z as i32 {
            for x in 0..world.size_x as i32 {
                let coord = CellCoord::new(x, y, z);
                add_node(&mut network, coord, world.get(coord), faces, catalog);
            }
        }
    }

    add_springs(&mut network, |coord| world.get(coord), faces, catalog)?;
    Ok(network)
}

/// Build the network from an explicit cell set instead of a whole grid.
///
/// Used when only one connected component matters (construction
/// validation), where walking the full world would dwarf the solve
/// itself.
pub fn build_network_from_set(
    cells: &BTreeMap<CellCoord, Material>,
    faces: &FaceAssignments,
    catalog: &MaterialCatalog,
) -> Result<StressNetwork, NetworkError> {
    let mut network = StressNetwork::default();

    for (&coord, &material) in cells {
        add_node(&mut network, coord, material, faces, catalog);
    }

    add_springs(
        &mut network,
        |coord| cells.get(&coord).copied().unwrap_or(Material::Air),
        faces,
        catalog,
    )?;
    Ok(network)
}

fn add_node(
    network: &mut StressNetwork,
    coord: CellCoord,
    material: Material,
    faces: &FaceAssignments,
    catalog: &MaterialCatalog,
) {
    let (mass, pinned) = match material {
        Material::Air => return,
        Material::Interior => {
            let mut mass = catalog.interior_base_weight;
            if let Some(face_set) = faces.get(&coord) {
                for side in FaceSide::ALL {
                    if let Some(props) = catalog.face(face_set.get(side)) {
                        mass += props.weight;
                    }
                }
            }
            (mass, false)
        }
        solid => {
            let Some(props) = catalog.material(solid) else {
                return;
            };
            // Structurally inert kinds (zero stiffness and strength, e.g.
            // foliage) never become nodes: they could only ever produce
            // degenerate springs.
            if props.stiffness <= 0.0 && props.strength <= 0.0 {
                return;
            }
            (props.density, solid.is_anchor())
        }
    };

    let idx = network.nodes.len();
    network.index.insert(coord, idx);
    network.nodes.push(Node {
        position: coord.center(),
        mass,
        weight: mass * catalog.gravity,
        pinned,
    });
}

fn add_springs(
    network: &mut StressNetwork,
    material_at: impl Fn(CellCoord) -> Material,
    faces: &FaceAssignments,
    catalog: &MaterialCatalog,
) -> Result<(), NetworkError> {
    // Probe only the positive-axis neighbors of each cell, in coordinate
    // order: each adjacent pair is visited exactly once, from its lower
    // endpoint.
    const POSITIVE_SIDES: [FaceSide; 3] = [FaceSide::PosX, FaceSide::PosY, FaceSide::PosZ];

    let mut springs = Vec::new();
    for (&coord_a, &idx_a) in &network.index {
        let mat_a = material_at(coord_a);
        for side in POSITIVE_SIDES {
            let coord_b = coord_a.neighbor(side);
            let Some(&idx_b) = network.index.get(&coord_b) else {
                continue;
            };
            let mat_b = material_at(coord_b);

            let (stiffness, strength) =
                spring_properties(coord_a, mat_a, coord_b, mat_b, side, faces, catalog);
            if stiffness <= 0.0 && strength <= 0.0 {
                continue;
            }

            springs.push(Spring {
                node_a: idx_a.min(idx_b),
                node_b: idx_a.max(idx_b),
                stiffness,
                strength,
                rest_length: 1.0,
            });
        }
    }
    network.springs = springs;

    let any_pinned = network.nodes.iter().any(|n| n.pinned);
    let any_free = network.nodes.iter().any(|n| !n.pinned);
    if any_free && !any_pinned {
        return Err(NetworkError::NoAnchor);
    }
    Ok(())
}

/// Stiffness and strength for the spring between two face-adjacent
/// structural cells. Returns zeros when the pair has no structural
/// connection.
fn spring_properties(
    coord_a: CellCoord,
    mat_a: Material,
    coord_b: CellCoord,
    mat_b: Material,
    side_a_to_b: FaceSide,
    faces: &FaceAssignments,
    catalog: &MaterialCatalog,
) -> (f32, f32) {
    // Solid pair: pure material pairing.
    if mat_a != Material::Interior && mat_b != Material::Interior {
        let (Some(a), Some(b)) = (catalog.material(mat_a), catalog.material(mat_b)) else {
            return (0.0, 0.0);
        };
        return (harmonic(a.stiffness, b.stiffness), a.strength.min(b.strength));
    }

    // At least one furnished interior cell: the face on the shared side
    // governs.
    let face_a = (mat_a == Material::Interior)
        .then(|| faces.get(&coord_a).map(|fs| fs.get(side_a_to_b)))
        .flatten();
    let face_b = (mat_b == Material::Interior)
        .then(|| faces.get(&coord_b).map(|fs| fs.get(side_a_to_b.opposite())))
        .flatten();

    let kind = match (face_a, face_b) {
        // Both furnished: the stiffer assigned face wins.
        (Some(fa), Some(fb)) => match (catalog.face(fa), catalog.face(fb)) {
            (Some(pa), Some(pb)) => {
                if pa.stiffness >= pb.stiffness {
                    fa
                } else {
                    fb
                }
            }
            (Some(_), None) => fa,
            (None, Some(_)) => fb,
            (None, None) => return (0.0, 0.0),
        },
        (Some(f), None) => f,
        (None, Some(f)) => f,
        (None, None) => return (0.0, 0.0),
    };

    if kind == FaceKind::Open {
        return (0.0, 0.0);
    }
    let Some(face) = catalog.face(kind) else {
        return (0.0, 0.0);
    };

    // Face against solid: blend face properties with the material.
    let solid = if mat_a != Material::Interior {
        catalog.material(mat_a)
    } else if mat_b != Material::Interior {
        catalog.material(mat_b)
    } else {
        None
    };
    match solid {
        Some(m) => (
            harmonic(m.stiffness, face.stiffness),
            m.strength.min(face.strength),
        ),
        // Interior-to-interior, or solid with no catalog entry.
        None => (face.stiffness, face.strength),
    }
}

fn harmonic(a: f32, b: f32) -> f32 {
    if a + b > 0.0 {
        2.0 * a * b / (a + b)
    } else {
        0.0
    }
}
