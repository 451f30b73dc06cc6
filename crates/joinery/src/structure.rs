//! Connection graph and spanning forest of a design.
//!
//! A design's pieces are the nodes and its connections the edges of an
//! undirected multigraph ([`ConnectionGraph`]). The graph splits into
//! connected [`Component`]s; each component is walked breadth-first from a
//! root piece, producing a [`SpanningForest`] of parent to child edges that
//! drives pose propagation, diagram placement and canonical ordering.

mod forest;
mod graph_base;

pub use forest::{ComponentTree, SpanningForest, TreeEdge};

use std::collections::HashMap;

use log::{debug, trace};

use joinery_core::{identifier::Id, model::Design};

use crate::error::ComposeError;
use graph_base::GraphInternal;

/// A connected component: a set of pieces and the connections among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pieces: Vec<Id>,
    connections: Vec<usize>,
}

impl Component {
    /// Piece ids in design order
    pub fn pieces(&self) -> &[Id] {
        &self.pieces
    }

    /// Indices into [`Design::connections`] in design order
    pub fn connections(&self) -> &[usize] {
        &self.connections
    }

    /// Returns true for a single piece without connections
    pub fn is_singleton(&self) -> bool {
        self.pieces.len() == 1 && self.connections.is_empty()
    }
}

/// Undirected multigraph of a design: one node per piece, one edge per
/// connection.
#[derive(Debug)]
pub struct ConnectionGraph<'a> {
    design: &'a Design,
    /// Node data is the piece index, edge data the connection index.
    graph: GraphInternal<usize, usize>,
}

impl<'a> ConnectionGraph<'a> {
    /// Builds the graph of a design.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::StructuralPrecondition`] when two pieces share
    /// an id or a connection references a piece that is not in the design.
    pub fn new(design: &'a Design) -> Result<Self, ComposeError> {
        let mut graph = GraphInternal::new();
        for (index, piece) in design.pieces().iter().enumerate() {
            if graph.contains_node(piece.id()) {
                return Err(ComposeError::structural(format!(
                    "duplicate piece id `{}` in design `{design}`",
                    piece.id()
                )));
            }
            graph.add_node(piece.id(), index);
        }

        for (index, connection) in design.connections().iter().enumerate() {
            for side in [connection.connected(), connection.connecting()] {
                if !graph.contains_node(side.piece()) {
                    return Err(ComposeError::structural(format!(
                        "connection `{connection}` references unknown piece `{}`",
                        side.piece()
                    )));
                }
            }
            graph.add_edge(
                connection.connected().piece(),
                connection.connecting().piece(),
                index,
            );
        }

        debug!(
            pieces = graph.nodes_count(),
            connections = graph.edges_count();
            "Connection graph built"
        );
        Ok(Self { design, graph })
    }

    /// Returns the design this graph was built from
    pub fn design(&self) -> &'a Design {
        self.design
    }

    /// Splits the graph into connected components.
    ///
    /// Components come in the design order of their first piece. Pieces
    /// without connections form singleton components.
    pub fn components(&self) -> Vec<Component> {
        let node_components = self.graph.components();

        let mut component_of: HashMap<Id, usize> = HashMap::new();
        for (component, ids) in node_components.iter().enumerate() {
            for id in ids {
                component_of.insert(*id, component);
            }
        }

        let mut components: Vec<Component> = node_components
            .into_iter()
            .map(|pieces| Component {
                pieces,
                connections: Vec::new(),
            })
            .collect();
        for (index, connection) in self.design.connections().iter().enumerate() {
            let component = component_of[&connection.connected().piece()];
            components[component].connections.push(index);
        }

        trace!(components = components.len(); "Connected components computed");
        components
    }

    /// Returns the index of a piece in the design
    fn piece_index(&self, id: Id) -> Option<usize> {
        self.graph.node(id)
    }
}
