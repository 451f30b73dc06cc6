//! Breadth-first spanning forest over the connection graph.

use std::collections::HashSet;

use log::{debug, warn};

use joinery_core::{
    identifier::Id,
    model::{Connection, Design, Piece},
};

use super::{Component, ConnectionGraph, graph_base::BfsStep};
use crate::{config::RootSelection, error::ComposeError};

/// A tree edge: `child` was reached from `parent` through a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    parent: Id,
    child: Id,
    connection: usize,
    depth: usize,
}

impl TreeEdge {
    pub fn parent(&self) -> Id {
        self.parent
    }

    pub fn child(&self) -> Id {
        self.child
    }

    /// Index into [`Design::connections`]
    pub fn connection(&self) -> usize {
        self.connection
    }

    /// Depth of the child below the root (the root's children have depth 1)
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl TreeEdge {
    fn from_step(graph: &ConnectionGraph<'_>, step: BfsStep) -> Self {
        Self {
            parent: step.parent,
            child: step.child,
            connection: graph.graph.edge_unchecked(step.edge),
            depth: step.depth,
        }
    }
}

/// The BFS tree of one connected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentTree {
    root: Id,
    visited: Vec<Id>,
    edges: Vec<TreeEdge>,
    closing: Vec<usize>,
}

impl ComponentTree {
    pub fn root(&self) -> Id {
        self.root
    }

    /// Pieces in visitation order, root first
    pub fn visited(&self) -> &[Id] {
        &self.visited
    }

    /// Tree edges in visitation order
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Connections of the component that are not tree edges (they close a
    /// cycle or duplicate an edge), in design order
    pub fn closing(&self) -> &[usize] {
        &self.closing
    }

    /// Returns true when the component has no tree edges: a single piece,
    /// possibly carrying self-loop connections
    pub fn is_singleton(&self) -> bool {
        self.edges.is_empty()
    }
}

/// One BFS tree per connected component of a design.
///
/// # Examples
///
/// ```
/// # use joinery::{config::RootSelection, SpanningForest};
/// # use joinery_core::model::{Connection, Design, Piece, Side, TypeKey};
/// let block = TypeKey::new("block", "");
/// let design = Design::new("pair")
///     .with_piece(Piece::of_type("b", block))
///     .with_piece(Piece::of_type("a", block))
///     .with_connection(Connection::new(Side::new("a", ""), Side::new("b", "")));
///
/// let forest = SpanningForest::new(&design, RootSelection::LowestId).unwrap();
/// let mut roots = Vec::new();
/// let mut edges = Vec::new();
/// forest.visit(
///     |root| roots.push(root.id().to_string()),
///     |parent, child, _| edges.push(format!("{}->{}", parent.id(), child.id())),
/// );
///
/// assert_eq!(roots, ["a"]);
/// assert_eq!(edges, ["a->b"]);
/// ```
#[derive(Debug)]
pub struct SpanningForest<'a> {
    graph: ConnectionGraph<'a>,
    trees: Vec<ComponentTree>,
}

impl<'a> SpanningForest<'a> {
    /// Builds the spanning forest of a design.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::StructuralPrecondition`] for duplicate piece
    /// ids or connections to unknown pieces.
    pub fn new(design: &'a Design, selection: RootSelection) -> Result<Self, ComposeError> {
        let graph = ConnectionGraph::new(design)?;
        let mut trees: Vec<ComponentTree> = graph
            .components()
            .iter()
            .map(|component| Self::walk(&graph, component, selection))
            .collect();

        if selection == RootSelection::LowestId {
            trees.sort_by_key(ComponentTree::root);
        }

        debug!(
            components = trees.len(),
            tree_edges = trees.iter().map(|tree| tree.edges.len()).sum::<usize>();
            "Spanning forest built"
        );
        Ok(Self { graph, trees })
    }

    /// Returns the design the forest spans
    pub fn design(&self) -> &'a Design {
        self.graph.design()
    }

    /// Component trees in emission order
    pub fn trees(&self) -> &[ComponentTree] {
        &self.trees
    }

    /// Returns the piece with the given id, if it belongs to the spanned
    /// design. Every id handed out by the forest does.
    pub fn piece(&self, id: Id) -> Option<&'a Piece> {
        self.graph
            .piece_index(id)
            .map(|index| &self.design().pieces()[index])
    }

    /// Returns the connection of a tree edge
    pub fn connection(&self, edge: &TreeEdge) -> &'a Connection {
        &self.design().connections()[edge.connection]
    }

    /// Walks every component: `on_root` once per component root, then
    /// `on_edge(parent, child, connection)` for each tree edge in
    /// visitation order.
    pub fn visit<R, E>(&self, mut on_root: R, mut on_edge: E)
    where
        R: FnMut(&'a Piece),
        E: FnMut(&'a Piece, &'a Piece, &'a Connection),
    {
        for tree in &self.trees {
            if let Some(root) = self.piece(tree.root) {
                on_root(root);
            }
            for edge in &tree.edges {
                if let (Some(parent), Some(child)) = (self.piece(edge.parent), self.piece(edge.child))
                {
                    on_edge(parent, child, self.connection(edge));
                }
            }
        }
    }

    fn walk(
        graph: &ConnectionGraph<'a>,
        component: &Component,
        selection: RootSelection,
    ) -> ComponentTree {
        let design = graph.design();
        let is_placed = |id: &Id| {
            graph
                .piece_index(*id)
                .is_some_and(|index| design.pieces()[index].is_placed())
        };

        let placed: Vec<Id> = component.pieces().iter().copied().filter(is_placed).collect();
        let candidates = if placed.is_empty() {
            component.pieces()
        } else {
            placed.as_slice()
        };
        let root = match selection {
            RootSelection::LowestId => candidates.iter().min().copied(),
            RootSelection::InputOrder => candidates.first().copied(),
        }
        .unwrap_or_default();

        if placed.len() > 1 {
            warn!(
                root:% = root,
                explicit_planes = placed.len();
                "Several pieces in one component carry a plane, only the root's is kept"
            );
        }

        let steps = graph.graph.bfs(root, |incident| {
            if selection == RootSelection::LowestId {
                incident.sort_by_key(|(edge, neighbor)| (*neighbor, *edge));
            }
        });
        let edges: Vec<TreeEdge> = steps
            .into_iter()
            .map(|step| TreeEdge::from_step(graph, step))
            .collect();

        let mut visited = Vec::with_capacity(edges.len() + 1);
        visited.push(root);
        visited.extend(edges.iter().map(TreeEdge::child));

        let tree_connections: HashSet<usize> = edges.iter().map(TreeEdge::connection).collect();
        let closing: Vec<usize> = component
            .connections()
            .iter()
            .copied()
            .filter(|index| !tree_connections.contains(index))
            .collect();
        if !closing.is_empty() {
            warn!(
                root:% = root,
                unused = closing.len();
                "Connections closing a cycle are not used for propagation"
            );
        }

        debug!(
            root:% = root,
            pieces = visited.len(),
            tree_edges = edges.len();
            "Component walked"
        );

        ComponentTree {
            root,
            visited,
            edges,
            closing,
        }
    }
}
