//! Low-level undirected multigraph.
//!
//! This module provides the adjacency-list graph the connection graph is
//! built on. It supports exactly what composition needs: connected
//! components and breadth-first traversal from a single source with a
//! caller-chosen neighbor order.
//!
//! # Architecture
//!
//! - [`EdgeIndex`]: Index of an edge in insertion order
//! - [`Edge`]: Edge structure storing both endpoints and associated data
//! - [`GraphInternal`]: Graph with nodes kept in insertion order
//!
//! Parallel edges and self-loops are stored as given. Traversal never
//! revisits a node, so they are simply skipped by the BFS tree.

use std::collections::{HashMap, HashSet, VecDeque};

use joinery_core::identifier::Id;

// =============================================================================
// Low-level primitive types and internal data structures
// =============================================================================

/// Index of an edge in the graph, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(super) struct EdgeIndex(usize);

impl EdgeIndex {
    fn new(index: usize) -> Self {
        EdgeIndex(index)
    }
}

/// An undirected edge with an associated value.
#[derive(Debug)]
struct Edge<E>
where
    E: Copy + std::fmt::Debug,
{
    a: Id,
    b: Id,
    value: E,
}

impl<E> Edge<E>
where
    E: Copy + std::fmt::Debug,
{
    fn new(a: Id, b: Id, value: E) -> Self {
        Edge { a, b, value }
    }

    /// Returns the endpoint opposite to `id`.
    fn opposite(&self, id: Id) -> Id {
        if self.a == id { self.b } else { self.a }
    }
}

/// A step of a breadth-first traversal: the edge used to reach `child`
/// from `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct BfsStep {
    pub(super) parent: Id,
    pub(super) child: Id,
    pub(super) edge: EdgeIndex,
    pub(super) depth: usize,
}

// =============================================================================
// Core internal graph structure
// =============================================================================

/// Undirected multigraph keyed by [`Id`].
///
/// Type parameters:
/// - `N`: Node data type (must be Copy and Debug)
/// - `E`: Edge data type (must be Copy and Debug)
#[derive(Debug)]
pub(super) struct GraphInternal<N, E>
where
    N: Copy + std::fmt::Debug,
    E: Copy + std::fmt::Debug,
{
    nodes: HashMap<Id, N>,
    node_order: Vec<Id>,
    edges: Vec<Edge<E>>,
    incident_edges: HashMap<Id, Vec<EdgeIndex>>,
}

impl<N, E> GraphInternal<N, E>
where
    N: Copy + std::fmt::Debug,
    E: Copy + std::fmt::Debug,
{
    /// Creates a new empty graph.
    pub(super) fn new() -> Self {
        GraphInternal {
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: Vec::new(),
            incident_edges: HashMap::new(),
        }
    }

    /// Returns the node data for the given ID, if it exists.
    pub(super) fn node(&self, id: Id) -> Option<N> {
        self.nodes.get(&id).copied()
    }

    /// Returns node IDs in insertion order.
    pub(super) fn node_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.node_order.iter().copied()
    }

    /// Returns the total number of nodes in the graph.
    pub(super) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks if a node with the given ID exists in the graph.
    pub(super) fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the edge data for the given index.
    ///
    /// # Panics
    /// Panics if the edge index does not belong to this graph.
    pub(super) fn edge_unchecked(&self, idx: EdgeIndex) -> E {
        self.edges[idx.0].value
    }

    /// Returns the total number of edges in the graph.
    pub(super) fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `(edge, neighbor)` pairs for every edge touching `id`, in
    /// edge insertion order. A self-loop yields `id` as its own neighbor.
    pub(super) fn incident(&self, id: Id) -> impl Iterator<Item = (EdgeIndex, Id)> + '_ {
        self.incident_edges
            .get(&id)
            .into_iter()
            .flatten()
            .map(move |idx| (*idx, self.edges[idx.0].opposite(id)))
    }

    /// Adds a node to the graph with the given ID and data.
    ///
    /// If a node with the same ID already exists, its data is replaced and
    /// its insertion position is kept.
    pub(super) fn add_node(&mut self, id: Id, node: N) {
        if self.nodes.insert(id, node).is_none() {
            self.node_order.push(id);
        }
    }

    /// Adds an undirected edge between two nodes.
    ///
    /// # Panics
    /// Panics in debug mode if either endpoint does not exist in the graph.
    pub(super) fn add_edge(&mut self, a: Id, b: Id, edge: E) -> EdgeIndex {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.nodes.contains_key(&a),
                "Adding edge: Node {a} does not exist for {edge:?}",
            );
            assert!(
                self.nodes.contains_key(&b),
                "Adding edge: Node {b} does not exist for {edge:?}",
            );
        }

        self.edges.push(Edge::new(a, b, edge));

        let idx = EdgeIndex::new(self.edges.len() - 1);
        self.incident_edges.entry(a).or_default().push(idx);
        if a != b {
            self.incident_edges.entry(b).or_default().push(idx);
        }
        idx
    }

    /// Partitions the nodes into connected components.
    ///
    /// Components are returned in the insertion order of their first node;
    /// nodes inside a component keep insertion order too.
    pub(super) fn components(&self) -> Vec<Vec<Id>> {
        let mut component_of: HashMap<Id, usize> = HashMap::new();
        let mut components: Vec<Vec<Id>> = Vec::new();

        for start in self.node_ids() {
            if component_of.contains_key(&start) {
                continue;
            }
            let component = components.len();
            component_of.insert(start, component);
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for (_, neighbor) in self.incident(current) {
                    if !component_of.contains_key(&neighbor) {
                        component_of.insert(neighbor, component);
                        queue.push_back(neighbor);
                    }
                }
            }
            components.push(Vec::new());
        }

        for id in self.node_ids() {
            components[component_of[&id]].push(id);
        }
        components
    }

    /// Breadth-first traversal from `root`.
    ///
    /// `order_incident` receives the incident `(edge, neighbor)` pairs of the
    /// node being expanded and may reorder them in place. Returns one
    /// [`BfsStep`] per tree edge, in visitation order. Edges leading to an
    /// already discovered node are skipped.
    pub(super) fn bfs<F>(&self, root: Id, mut order_incident: F) -> Vec<BfsStep>
    where
        F: FnMut(&mut Vec<(EdgeIndex, Id)>),
    {
        let mut steps = Vec::new();
        let mut discovered: HashSet<Id> = HashSet::from([root]);
        let mut queue = VecDeque::from([(root, 0)]);

        while let Some((current, depth)) = queue.pop_front() {
            let mut incident: Vec<(EdgeIndex, Id)> = self.incident(current).collect();
            order_incident(&mut incident);
            for (edge, neighbor) in incident {
                if discovered.insert(neighbor) {
                    steps.push(BfsStep {
                        parent: current,
                        child: neighbor,
                        edge,
                        depth: depth + 1,
                    });
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }
        steps
    }
}
