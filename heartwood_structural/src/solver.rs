// Iterative relaxation solver.
//
// Runs a fixed number of Gauss-Seidel relaxation passes over the network:
// every free node accumulates gravity plus the axial force of each
// touching spring, then steps by `force * damping_factor`. Nodes are
// updated in place, so later nodes in the same pass see earlier updates.
// The pass count is exactly `max_iterations`; there is no convergence
// early-exit, because a floating-point "close enough" test could tip
// differently between runs and break replay.
//
// Stress is the larger of two per-spring estimates of the force a
// connection carries relative to its failure threshold:
//
// - **Deformation**: `stiffness * |length - rest| / strength` after the
//   final pass. Captures stretch and crush where the lattice actually
//   distorts.
// - **Load path**: a breadth-first distance field from the pinned nodes,
//   then a leaves-first sweep that pushes each node's accumulated weight
//   across its springs toward strictly-closer-to-anchor neighbors,
//   split proportionally to stiffness. Captures cantilever bottlenecks
//   that a partially relaxed lattice understates, and shares load
//   correctly across redundant paths.
//
// Arithmetic is +, −, ×, ÷ and sqrt only. Identical inputs produce
// bit-identical positions and stresses on one architecture;
// cross-architecture bit-identity is not promised.

use crate::config::MaterialCatalog;
use crate::network::StressNetwork;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Per-spring adjacency entry: (spring index, other endpoint).
type SpringsOf = SmallVec<[(usize, usize); 6]>;

/// Result of relaxing a network.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// Stress ratio per spring, in spring order. Above 1.0 means the
    /// connection fails under gravity alone.
    pub spring_stresses: Vec<f32>,
    /// Worst ratio across all springs.
    pub max_stress_ratio: f32,
    /// Whether any spring exceeded its failure threshold.
    pub any_failed: bool,
}

/// Relax the network and report per-spring stress.
pub fn relax(network: &mut StressNetwork, catalog: &MaterialCatalog) -> SolveReport {
    let num_nodes = network.nodes.len();
    let num_springs = network.springs.len();

    let mut touching: Vec<SpringsOf> = vec![SpringsOf::new(); num_nodes];
    for (si, spring) in network.springs.iter().enumerate() {
        touching[spring.node_a].push((si, spring.node_b));
        touching[spring.node_b].push((si, spring.node_a));
    }

    let damping = catalog.damping_factor;
    for _ in 0..catalog.max_iterations {
        for i in 0..num_nodes {
            if network.nodes[i].pinned {
                continue;
            }

            let mut force = [0.0f32, -network.nodes[i].weight, 0.0f32];
            for &(si, other) in &touching[i] {
                let spring = &network.springs[si];
                let here = network.nodes[i].position;
                let there = network.nodes[other].position;

                let dx = there[0] - here[0];
                let dy = there[1] - here[1];
                let dz = there[2] - here[2];
                let dist = (dx * dx + dy * dy + dz * dz).sqrt();
                if dist < 1e-10 {
                    continue;
                }

                let magnitude = spring.stiffness * (dist - spring.rest_length);
                force[0] += magnitude * dx / dist;
                force[1] += magnitude * dy / dist;
                force[2] += magnitude * dz / dist;
            }

            network.nodes[i].position[0] += force[0] * damping;
            network.nodes[i].position[1] += force[1] * damping;
            network.nodes[i].position[2] += force[2] * damping;
        }
    }

    // Deformation stress from the settled geometry.
    let mut stresses = vec![0.0f32; num_springs];
    for (si, spring) in network.springs.iter().enumerate() {
        if spring.strength <= 0.0 {
            continue;
        }
        let a = network.nodes[spring.node_a].position;
        let b = network.nodes[spring.node_b].position;
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        let dz = b[2] - a[2];
        let dist = (dx * dx + dy * dy + dz * dz).sqrt();
        let extension = (dist - spring.rest_length).abs();
        stresses[si] = spring.stiffness * extension / spring.strength;
    }

    // Load-path stress; keep the larger estimate per spring.
    let flow = load_path_stress(network, &touching);
    let mut max_stress_ratio = 0.0f32;
    for si in 0..num_springs {
        if flow[si] > stresses[si] {
            stresses[si] = flow[si];
        }
        if stresses[si] > max_stress_ratio {
            max_stress_ratio = stresses[si];
        }
    }

    SolveReport {
        spring_stresses: stresses,
        max_stress_ratio,
        any_failed: max_stress_ratio > 1.0,
    }
}

/// Per-spring stress from propagating node weight along shortest paths
/// to the anchors.
///
/// Nodes unreachable from any anchor carry no flow; their collapse shows
/// up through the deformation estimate instead.
fn load_path_stress(network: &StressNetwork, touching: &[SpringsOf]) -> Vec<f32> {
    let num_nodes = network.nodes.len();
    let mut flow_stress = vec![0.0f32; network.springs.len()];
    if num_nodes == 0 {
        return flow_stress;
    }

    // Hop distance to the nearest pinned node.
    let mut distance = vec![u32::MAX; num_nodes];
    let mut queue = VecDeque::new();
    for (i, node) in network.nodes.iter().enumerate() {
        if node.pinned {
            distance[i] = 0;
            queue.push_back(i);
        }
    }
    while let Some(current) = queue.pop_front() {
        for &(_, other) in &touching[current] {
            if distance[other] > distance[current] + 1 {
                distance[other] = distance[current] + 1;
                queue.push_back(other);
            }
        }
    }

    // Leaves first: farthest nodes hand their load toward the anchors
    // before anything nearer is settled. Ties break on node index so the
    // sweep order is a pure function of the network.
    let mut order: Vec<usize> = (0..num_nodes).collect();
    order.sort_by(|&a, &b| distance[b].cmp(&distance[a]).then(a.cmp(&b)));

    let mut carried: Vec<f32> = network.nodes.iter().map(|n| n.weight).collect();
    for &i in &order {
        if network.nodes[i].pinned || distance[i] == u32::MAX || carried[i] <= 0.0 {
            continue;
        }

        let mut upstream: SpringsOf = SpringsOf::new();
        let mut total_stiffness = 0.0f32;
        for &(si, other) in &touching[i] {
            if distance[other] < distance[i] {
                upstream.push((si, other));
                total_stiffness += network.springs[si].stiffness.max(1e-6);
            }
        }
        if total_stiffness <= 0.0 {
            continue;
        }

        for (si, other) in upstream {
            let spring = &network.springs[si];
            let share = carried[i] * spring.stiffness.max(1e-6) / total_stiffness;
            if spring.strength > 0.0 {
                flow_stress[si] = share / spring.strength;
            }
            carried[other] += share;
        }
    }

    flow_stress
}
