//! Topology reduction.
//!
//! Turns the raw terminal/component multigraph into the reduced graph the
//! equations are written against:
//!
//! 1. Dead ends are pruned: a component touching a terminal with no other
//!    connection cannot carry steady current. Pruning repeats because each
//!    removal can expose a new dead end.
//! 2. Terminals with three or more surviving connections become nodes.
//! 3. Walking out of every node through pass-through (degree 2) terminals
//!    contracts each series chain into one branch with one unknown current.
//! 4. A BFS spanning tree over the nodes leaves `branches - nodes + 1` chords;
//!    each chord plus its tree path is one independent loop.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::circuit::{BranchId, Circuit, ComponentId, TerminalId};
use crate::error::{CircuitError, Result};

/// A series chain of components between two nodes, carrying one current.
///
/// The positive current direction runs from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Branch {
    pub from: TerminalId,
    pub to: TerminalId,
    /// Components in walk order, each with the terminal the walk leaves it by
    pub components: Vec<(ComponentId, TerminalId)>,
    /// Total series resistance
    pub resistance: f64,
    /// Net source rise walking from `from` to `to`
    pub emf: f64,
}

impl Branch {
    /// True if the chain starts and ends at the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// An independent loop: branches in traversal order, each with `+1.0` when
/// traversed along its positive direction and `-1.0` against it.
#[derive(Debug, Clone, Default)]
pub struct Loop {
    pub steps: Vec<(BranchId, f64)>,
}

/// The reduced form of a circuit.
#[derive(Debug, Clone)]
pub struct Topology {
    live: HashSet<ComponentId>,
    pruned: Vec<ComponentId>,
    nodes: Vec<TerminalId>,
    branches: Vec<Branch>,
    loops: Vec<Loop>,
    reference: TerminalId,
}

impl Topology {
    /// Reduce a circuit.
    ///
    /// Fails with [`CircuitError::ShortOrIncompleteCircuit`] when nothing
    /// closed and driven survives pruning, or when what survives is split
    /// into disconnected pieces.
    pub fn analyze(circuit: &Circuit) -> Result<Self> {
        let (live, pruned) = prune_dead_ends(circuit);
        if !pruned.is_empty() {
            log::debug!("pruned dead ends: {pruned:?}");
        }

        // The first surviving battery anchors the potentials at its negative end.
        let Some(reference) = circuit
            .components()
            .filter(|(id, _)| live.contains(id))
            .find_map(|(_, c)| {
                let positive = c.positive_end()?;
                c.other_end(positive)
            })
        else {
            return Err(incomplete("no battery sits in a closed loop"));
        };

        let mut nodes = junctions(circuit, &live);
        if nodes.is_empty() {
            // A single plain loop: the reference terminal stands in as its node.
            nodes.push(reference);
        }
        log::debug!("nodes: {nodes:?}");

        let branches = label_branches(circuit, &live, &nodes)
            .ok_or_else(|| incomplete("inconsistent chain while labeling branches"))?;
        let labeled: usize = branches.iter().map(|b| b.components.len()).sum();
        if labeled != live.len() {
            return Err(incomplete("remaining components form disconnected pieces"));
        }
        for (i, b) in branches.iter().enumerate() {
            log::debug!(
                "branch I{i}: {} -> {} R={} emf={} via {:?}",
                b.from,
                b.to,
                b.resistance,
                b.emf,
                b.components
            );
        }

        let loops = independent_loops(&nodes, &branches)?;
        if loops.is_empty() {
            return Err(incomplete("no closed loop"));
        }
        debug_assert_eq!(loops.len() + nodes.len(), branches.len() + 1);
        for (i, l) in loops.iter().enumerate() {
            log::debug!("loop {i}: {:?}", l.steps);
        }

        Ok(Self {
            live,
            pruned,
            nodes,
            branches,
            loops,
            reference,
        })
    }

    /// True if the component survived dead-end pruning.
    pub fn is_live(&self, id: ComponentId) -> bool {
        self.live.contains(&id)
    }

    /// Components removed as dead ends, in pruning order.
    pub fn pruned(&self) -> &[ComponentId] {
        &self.pruned
    }

    /// Junction terminals; a plain loop reports its reference terminal.
    pub fn nodes(&self) -> &[TerminalId] {
        &self.nodes
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// Terminal held at zero potential: the negative end of the first
    /// battery that survives pruning.
    pub fn reference(&self) -> TerminalId {
        self.reference
    }
}

fn incomplete(reason: &str) -> CircuitError {
    log::debug!("incomplete circuit: {reason}");
    CircuitError::ShortOrIncompleteCircuit
}

/// Count live connections at every terminal.
fn degrees(circuit: &Circuit, live: &HashSet<ComponentId>) -> HashMap<TerminalId, usize> {
    let mut degree = HashMap::new();
    for (id, c) in circuit.components() {
        if !live.contains(&id) {
            continue;
        }
        if let Some([a, b]) = c.endpoints() {
            *degree.entry(a).or_insert(0) += 1;
            *degree.entry(b).or_insert(0) += 1;
        }
    }
    degree
}

/// Repeatedly drop components hanging off degree-1 terminals.
///
/// Returns the surviving components and the pruned ones in pruning order.
pub fn prune_dead_ends(circuit: &Circuit) -> (HashSet<ComponentId>, Vec<ComponentId>) {
    let mut live: HashSet<ComponentId> = circuit.component_ids().iter().copied().collect();
    let mut degree = degrees(circuit, &live);
    let mut pruned = Vec::new();

    let mut stack: Vec<TerminalId> = circuit
        .terminals()
        .iter()
        .map(|t| t.id())
        .filter(|t| degree.get(t) == Some(&1))
        .rev()
        .collect();

    while let Some(terminal) = stack.pop() {
        if degree.get(&terminal) != Some(&1) {
            continue;
        }
        let Some(dead) = circuit
            .terminal(terminal)
            .connections()
            .iter()
            .copied()
            .find(|id| live.contains(id))
        else {
            continue;
        };

        live.remove(&dead);
        pruned.push(dead);
        if let Some(ends) = circuit.component(dead).and_then(|c| c.endpoints()) {
            for end in ends {
                if let Some(d) = degree.get_mut(&end) {
                    *d -= 1;
                    if *d == 1 {
                        stack.push(end);
                    }
                }
            }
        }
    }

    (live, pruned)
}

/// Terminals with three or more live connections, in row-major order.
fn junctions(circuit: &Circuit, live: &HashSet<ComponentId>) -> Vec<TerminalId> {
    let degree = degrees(circuit, live);
    circuit
        .terminals()
        .iter()
        .map(|t| t.id())
        .filter(|t| degree.get(t).is_some_and(|&d| d >= 3))
        .collect()
}

/// Junctions of the circuit after dead-end pruning.
pub fn find_nodes(circuit: &Circuit) -> Vec<TerminalId> {
    let (live, _) = prune_dead_ends(circuit);
    junctions(circuit, &live)
}

/// Walk out of every node along each unlabeled connection until the next
/// node, collecting one branch per walk.
///
/// Returns `None` if a walk runs into a terminal it cannot pass through,
/// which pruning rules out for a consistent circuit.
fn label_branches(
    circuit: &Circuit,
    live: &HashSet<ComponentId>,
    nodes: &[TerminalId],
) -> Option<Vec<Branch>> {
    let node_set: HashSet<TerminalId> = nodes.iter().copied().collect();
    let mut labeled: HashSet<ComponentId> = HashSet::new();
    let mut branches = Vec::new();

    for &node in nodes {
        for &start in circuit.terminal(node).connections() {
            if !live.contains(&start) || labeled.contains(&start) {
                continue;
            }

            let mut branch = Branch {
                from: node,
                to: node,
                components: Vec::new(),
                resistance: 0.0,
                emf: 0.0,
            };
            let mut at = node;
            let mut current = start;

            loop {
                let component = circuit.component(current)?;
                let next = component.other_end(at)?;
                labeled.insert(current);
                branch.components.push((current, next));
                branch.resistance += component.resistance();
                branch.emf += component.emf_toward(next);
                at = next;

                if node_set.contains(&at) {
                    break;
                }
                // Pass-through terminal: continue on its other live connection
                current = circuit
                    .terminal(at)
                    .connections()
                    .iter()
                    .copied()
                    .find(|&id| id != current && live.contains(&id))?;
                if labeled.contains(&current) {
                    return None;
                }
            }

            branch.to = at;
            branches.push(branch);
        }
    }

    Some(branches)
}

/// Orientation of branch `b` when walked from node `u` to node `v`.
fn orientation(branch: &Branch, u: TerminalId, v: TerminalId) -> f64 {
    if branch.from == u && branch.to == v {
        1.0
    } else {
        -1.0
    }
}

/// Build a BFS spanning tree over the nodes and close one loop per chord.
fn independent_loops(nodes: &[TerminalId], branches: &[Branch]) -> Result<Vec<Loop>> {
    let index: HashMap<TerminalId, usize> =
        nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (b, branch) in branches.iter().enumerate() {
        if branch.is_self_loop() {
            continue;
        }
        adjacency[index[&branch.from]].push(b);
        adjacency[index[&branch.to]].push(b);
    }

    // parent[n] = (parent node, tree branch)
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; nodes.len()];
    let mut depth = vec![0usize; nodes.len()];
    let mut visited = vec![false; nodes.len()];
    let mut in_tree = vec![false; branches.len()];

    let mut queue = VecDeque::from([0usize]);
    visited[0] = true;
    while let Some(n) = queue.pop_front() {
        for &b in &adjacency[n] {
            let branch = &branches[b];
            let far = if index[&branch.from] == n {
                index[&branch.to]
            } else {
                index[&branch.from]
            };
            if !visited[far] {
                visited[far] = true;
                parent[far] = Some((n, b));
                depth[far] = depth[n] + 1;
                in_tree[b] = true;
                queue.push_back(far);
            }
        }
    }

    if visited.iter().any(|v| !v) {
        return Err(incomplete("nodes are not all connected"));
    }

    // Climb from `n` to its parent, recording the tree branch crossed.
    let step_up = |n: usize| -> Option<(usize, (BranchId, f64))> {
        let (p, b) = parent[n]?;
        let sign = orientation(&branches[b], nodes[n], nodes[p]);
        Some((p, (BranchId(b), sign)))
    };

    let mut loops = Vec::new();
    for (b, branch) in branches.iter().enumerate() {
        if in_tree[b] {
            continue;
        }

        // Chord from -> to, then the tree path to -> from.
        let mut x = index[&branch.to];
        let mut y = index[&branch.from];
        let mut up_from_to = Vec::new();
        let mut up_from_from = Vec::new();
        while depth[x] > depth[y] {
            let (p, step) = step_up(x).ok_or_else(|| incomplete("broken spanning tree"))?;
            up_from_to.push(step);
            x = p;
        }
        while depth[y] > depth[x] {
            let (p, step) = step_up(y).ok_or_else(|| incomplete("broken spanning tree"))?;
            up_from_from.push(step);
            y = p;
        }
        while x != y {
            let (px, sx) = step_up(x).ok_or_else(|| incomplete("broken spanning tree"))?;
            let (py, sy) = step_up(y).ok_or_else(|| incomplete("broken spanning tree"))?;
            up_from_to.push(sx);
            up_from_from.push(sy);
            x = px;
            y = py;
        }

        let mut steps = vec![(BranchId(b), 1.0)];
        steps.extend(up_from_to);
        // Walked downward, so every orientation flips
        steps.extend(up_from_from.into_iter().rev().map(|(br, s)| (br, -s)));
        loops.push(Loop { steps });
    }

    Ok(loops)
}
