// heartwood_structural — deterministic structural integrity for grown
// wood structures in a voxel world.
//
// The library answers one question two ways: can this lattice of solid
// cells hold its own weight plus whatever is furnished onto it?
//
// - Generation callers ask it of freshly grown geometry, before the
//   geometry is committed anywhere (`validate::validate_generated_structure`,
//   with the bounded retry loop in `validate::generate_validated`).
// - Construction callers ask it of a player proposal, and get a tiered
//   Ok / Warning / Blocked verdict with a per-cell stress map for
//   overlay rendering (`validate::validate_proposed_construction`).
//
// Module overview:
// - `types.rs`:   CellCoord, Material, FaceSide, FaceKind, FaceSet.
// - `world.rs`:   WorldGrid, a dense 3D cell grid, the read-only snapshot.
// - `config.rs`:  MaterialCatalog, the material/face tables and solver tunables,
//                 loaded from JSON by the host and passed by reference.
// - `network.rs`: cells in, mass-spring graph out (one node per structural
//                 cell, one spring per face-adjacent pair).
// - `solver.rs`:  fixed-iteration relaxation + load-path analysis,
//                 per-spring stress ratios.
// - `validate.rs`: the two validators, connectivity pre-check, tiering.
// - `prng`:       re-exported from `heartwood_prng`: xoshiro256++ with
//                 SplitMix64 seeding, for the generation retry sequence.
//
// The whole crate is a pure in-process query library: no I/O, no wire
// protocol, no background work. A call builds its own network, solves it,
// and throws it away; the only shared inputs are the read-only catalog
// and world snapshot, so independent validations may run from different
// threads with plain `&` sharing.
//
// **Critical constraint: determinism.** Identical inputs must produce
// bit-identical stress output on the same architecture. Fixed iteration
// counts instead of convergence checks, coordinate-ordered `BTreeMap`s
// instead of hashed iteration, and a seeded PRNG that retries by
// advancing, never reseeding.

pub mod config;
pub mod network;
pub use heartwood_prng as prng;
pub mod solver;
pub mod types;
pub mod validate;
pub mod world;
