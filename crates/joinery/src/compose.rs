//! The composition engine.
//!
//! Composition turns a design expressed as relative joints into absolute
//! poses. It runs in two phases:
//!
//! 1. **Planning**: the [`SpanningForest`] is built and every port named by
//!    a connection is resolved against the catalogue. Any failure
//!    aborts here, before a single pose exists.
//! 2. **Propagation**: each component's root keeps (or receives) its plane
//!    and center, and every tree edge derives the child's plane with
//!    [`child_plane`] and its diagram center with [`child_center`].
//!
//! The input design is never modified; results are written to a clone.

mod flatten;
mod placement;
mod pose;
mod ports;

pub use flatten::{DEPTH_QUALITY, PARENT_QUALITY, ROOT_QUALITY};
pub use placement::child_center;
pub use pose::{Joint, PortFrame, child_plane, child_transform};

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use joinery_core::{
    catalogue::Catalogue,
    geometry::{DiagramPoint, Plane},
    identifier::Id,
    model::{Design, DesignKey},
};

use crate::{config::ComposeConfig, error::ComposeError, structure::SpanningForest};

/// Resolved pose of one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    plane: Plane,
    center: DiagramPoint,
    root: Id,
    depth: usize,
    parent: Option<Id>,
}

/// Composition state for one run.
///
/// Nested designs are flattened at most once per run and cached by key.
#[derive(Debug)]
pub(crate) struct Engine<'c> {
    catalogue: &'c Catalogue,
    config: &'c ComposeConfig,
    nested: HashMap<DesignKey, Design>,
    nesting: Vec<DesignKey>,
}

impl<'c> Engine<'c> {
    pub(crate) fn new(catalogue: &'c Catalogue, config: &'c ComposeConfig) -> Self {
        Self {
            catalogue,
            config,
            nested: HashMap::new(),
            nesting: Vec::new(),
        }
    }

    /// Returns a copy of the design with every reachable piece placed.
    /// Connections are kept.
    pub(crate) fn compose(&mut self, design: &Design) -> Result<Design, ComposeError> {
        let placements = self.plan(design)?;
        Ok(apply(design, &placements))
    }

    /// Checks that every piece's type or nested design is in the catalogue.
    fn check_references(&self, design: &Design) -> Result<(), ComposeError> {
        for piece in design.pieces() {
            if let Some(key) = piece.type_key() {
                if self.catalogue.get_type(&key).is_none() {
                    return Err(ComposeError::missing(format!(
                        "type `{key}` of piece `{}`",
                        piece.id()
                    )));
                }
            }
            if let Some(key) = piece.design_key() {
                if self.catalogue.get_design(&key).is_none() {
                    return Err(ComposeError::missing(format!(
                        "design `{key}` of piece `{}`",
                        piece.id()
                    )));
                }
            }
        }
        Ok(())
    }

    fn plan(&mut self, design: &Design) -> Result<IndexMap<Id, Placement>, ComposeError> {
        self.check_references(design)?;
        let forest = SpanningForest::new(design, self.config.root_selection())?;

        let mut frames = Vec::with_capacity(forest.trees().len());
        for tree in forest.trees() {
            let mut tree_frames = Vec::with_capacity(tree.edges().len());
            for edge in tree.edges() {
                let connection = forest.connection(edge);
                let (parent_side, child_side) = if connection.connected().piece() == edge.parent() {
                    (connection.connected(), connection.connecting())
                } else {
                    (connection.connecting(), connection.connected())
                };
                let parent_frame = self.resolve_side(design, parent_side)?;
                let child_frame = self.resolve_side(design, child_side)?;
                tree_frames.push((parent_frame, child_frame));
            }
            // Closing connections drive no pose, but their ports must exist
            for &index in tree.closing() {
                let connection = &design.connections()[index];
                self.resolve_side(design, connection.connected())?;
                self.resolve_side(design, connection.connecting())?;
            }
            frames.push(tree_frames);
        }
        debug!(design:% = design; "All ports resolved");

        let mut placements: IndexMap<Id, Placement> = IndexMap::new();
        for (tree, tree_frames) in forest.trees().iter().zip(frames) {
            let Some(root) = forest.piece(tree.root()) else {
                return Err(ComposeError::structural(format!(
                    "root `{}` is not a piece of design `{design}`",
                    tree.root()
                )));
            };
            if tree.is_singleton() && !root.is_placed() && !self.config.place_unconnected() {
                debug!(piece:% = root.id(); "Leaving unconnected piece unplaced");
                continue;
            }
            placements.insert(
                root.id(),
                Placement {
                    plane: root.plane().copied().unwrap_or_default(),
                    center: root.center().unwrap_or_default(),
                    root: root.id(),
                    depth: 0,
                    parent: None,
                },
            );

            for (edge, (parent_frame, child_frame)) in tree.edges().iter().zip(tree_frames) {
                let Some(parent) = placements.get(&edge.parent()).copied() else {
                    return Err(ComposeError::structural(format!(
                        "piece `{}` was reached before its parent `{}`",
                        edge.child(),
                        edge.parent()
                    )));
                };
                let connection = forest.connection(edge);
                let plane = child_plane(
                    &parent.plane,
                    &parent_frame,
                    &child_frame,
                    &Joint::from(connection),
                );
                let center = child_center(parent.center, connection.offset());
                trace!(
                    parent:% = edge.parent(),
                    child:% = edge.child(),
                    origin:? = plane.origin();
                    "Piece placed"
                );
                placements.insert(
                    edge.child(),
                    Placement {
                        plane,
                        center,
                        root: parent.root,
                        depth: edge.depth(),
                        parent: Some(edge.parent()),
                    },
                );
            }
        }
        Ok(placements)
    }
}

/// Writes planes and centers onto a copy of the design.
fn apply(design: &Design, placements: &IndexMap<Id, Placement>) -> Design {
    let mut placed = design.clone();
    for piece in placed.pieces_mut() {
        if let Some(placement) = placements.get(&piece.id()) {
            piece.set_plane(placement.plane);
            piece.set_center(placement.center);
        }
    }
    placed
}
