// Dense 3D cell grid.
//
// Stored as a flat `Vec<Material>` indexed by
// `x + z * size_x + y * size_x * size_z` for O(1) access. Out-of-bounds
// reads return `Air`; out-of-bounds writes are no-ops, so callers can
// stamp geometry near the edges without bounds bookkeeping.
//
// The grid is the read-only world snapshot the validators consume. The
// solver never mutates a caller's grid; the construction validator
// clones it to overlay a hypothetical proposal.
//
// **Critical constraint: determinism.** The grid is plain data; every
// traversal over it in this crate uses a fixed y-outer, z-mid, x-inner
// order (the flat storage order).

use crate::types::{CellCoord, FaceSide, Material};

/// Dense 3D grid of cell materials.
#[derive(Clone, Debug, Default)]
pub struct WorldGrid {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z.
    cells: Vec<Material>,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
}

impl WorldGrid {
    /// Create a grid filled with `Air`.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            cells: vec![Material::Air; total],
            size_x,
            size_y,
            size_z,
        }
    }

    pub fn in_bounds(&self, coord: CellCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.size_x
            && (coord.y as u32) < self.size_y
            && (coord.z as u32) < self.size_z
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            let sx = self.size_x as usize;
            let sz = self.size_z as usize;
            Some(coord.x as usize + coord.z as usize * sx + coord.y as usize * sx * sz)
        } else {
            None
        }
    }

    /// Read a cell. Out-of-bounds coordinates read as `Air`.
    pub fn get(&self, coord: CellCoord) -> Material {
        self.index(coord)
            .map(|i| self.cells[i])
            .unwrap_or(Material::Air)
    }

    /// Write a cell. Out-of-bounds writes are silently dropped.
    pub fn set(&mut self, coord: CellCoord, material: Material) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = material;
        }
    }

    /// Whether any of the six face-adjacent neighbors holds `material`.
    pub fn has_neighbor_of(&self, coord: CellCoord, material: Material) -> bool {
        FaceSide::ALL
            .iter()
            .any(|&side| self.get(coord.neighbor(side)) == material)
    }

    /// Stamp a ground plane at y=0 covering `[0, extent)` on x and z.
    pub fn fill_floor(&mut self, extent: i32) {
        for x in 0..extent {
            for z in 0..extent {
                self.set(CellCoord::new(x, 0, z), Material::Ground);
            }
        }
    }

    /// Stamp a vertical column at (x, z) from y=1 through `top` inclusive.
    pub fn fill_column(&mut self, x: i32, z: i32, top: i32, material: Material) {
        for y in 1..=top {
            self.set(CellCoord::new(x, y, z), material);
        }
    }

    /// Stamp a horizontal run along x at fixed (y, z), inclusive bounds.
    pub fn fill_row(&mut self, y: i32, z: i32, x_start: i32, x_end: i32, material: Material) {
        for x in x_start..=x_end {
            self.set(CellCoord::new(x, y, z), material);
        }
    }
}
