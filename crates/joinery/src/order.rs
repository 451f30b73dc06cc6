//! Canonical ordering of a design's pieces and connections.
//!
//! Two designs describing the same connection graph in different list
//! orders converge to the same canonical form, which makes serialized
//! designs diffable.
//!
//! Pieces are emitted component by component in visitation order, root
//! first. Connections follow the same walk: tree edges in visitation order,
//! each oriented from parent to child, then the connections closing a
//! cycle, oriented from their earlier-visited piece and sorted by when
//! their later piece was visited. No connection is dropped.

use std::collections::HashMap;

use log::info;

use joinery_core::{
    identifier::Id,
    model::{Connection, Design},
};

use crate::{config::RootSelection, error::ComposeError, structure::SpanningForest};

/// Returns a copy of the design with pieces and connections in canonical
/// order.
///
/// # Errors
///
/// Returns [`ComposeError::StructuralPrecondition`] for duplicate piece ids
/// or connections to unknown pieces.
pub fn canonical_order(design: &Design, selection: RootSelection) -> Result<Design, ComposeError> {
    let forest = SpanningForest::new(design, selection)?;

    let visited: Vec<Id> = forest
        .trees()
        .iter()
        .flat_map(|tree| tree.visited().iter().copied())
        .collect();
    let position: HashMap<Id, usize> = visited
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index))
        .collect();

    let pieces = visited.iter().filter_map(|id| forest.piece(*id).cloned()).collect();

    let mut connections: Vec<Connection> = Vec::with_capacity(design.connections().len());
    for tree in forest.trees() {
        for edge in tree.edges() {
            let connection = forest.connection(edge);
            if connection.connected().piece() == edge.parent() {
                connections.push(connection.clone());
            } else {
                connections.push(connection.swapped());
            }
        }
    }

    let mut closing: Vec<(usize, usize, usize)> = forest
        .trees()
        .iter()
        .flat_map(|tree| tree.closing().iter().copied())
        .map(|index| {
            let connection = &design.connections()[index];
            let a = position[&connection.connected().piece()];
            let b = position[&connection.connecting().piece()];
            (a.max(b), a.min(b), index)
        })
        .collect();
    closing.sort_unstable();
    for (_, earlier, index) in closing {
        let connection = &design.connections()[index];
        if position[&connection.connected().piece()] == earlier {
            connections.push(connection.clone());
        } else {
            connections.push(connection.swapped());
        }
    }

    let mut ordered = design.clone();
    ordered.set_pieces(pieces);
    ordered.set_connections(connections);

    info!(
        design:% = design,
        pieces = ordered.pieces().len(),
        connections = ordered.connections().len();
        "Design ordered"
    );
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use joinery_core::model::{Piece, Side, TypeKey};

    use super::*;

    fn piece(id: &str) -> Piece {
        Piece::of_type(id, TypeKey::new("block", ""))
    }

    fn connect(a: &str, b: &str) -> Connection {
        Connection::new(Side::new(a, "out"), Side::new(b, "in"))
    }

    fn piece_ids(design: &Design) -> Vec<String> {
        design.pieces().iter().map(|piece| piece.id().to_text()).collect()
    }

    fn connection_names(design: &Design) -> Vec<String> {
        design
            .connections()
            .iter()
            .map(|connection| {
                format!(
                    "{}>{}",
                    connection.connected().piece(),
                    connection.connecting().piece()
                )
            })
            .collect()
    }

    /// A square a-b-c-d with a diagonal b-d, plus a separate pair
    fn graph() -> Design {
        Design::new("graph")
            .with_piece(piece("d"))
            .with_piece(piece("y"))
            .with_piece(piece("c"))
            .with_piece(piece("b"))
            .with_piece(piece("x"))
            .with_piece(piece("a"))
            .with_connection(connect("c", "b"))
            .with_connection(connect("d", "a"))
            .with_connection(connect("y", "x"))
            .with_connection(connect("b", "a"))
            .with_connection(connect("c", "d"))
            .with_connection(connect("d", "b"))
    }

    #[test]
    fn test_pieces_follow_visitation_order() {
        let ordered = canonical_order(&graph(), RootSelection::LowestId).unwrap();
        assert_eq!(piece_ids(&ordered), ["a", "b", "d", "c", "x", "y"]);
    }

    #[test]
    fn test_tree_edges_then_closing_edges() {
        let ordered = canonical_order(&graph(), RootSelection::LowestId).unwrap();
        assert_eq!(
            connection_names(&ordered),
            ["a>b", "a>d", "b>c", "x>y", "b>d", "d>c"]
        );
    }

    #[test]
    fn test_reorientation_swaps_only_sides() {
        let design = Design::new("pair")
            .with_piece(piece("a"))
            .with_piece(piece("b"))
            .with_connection(connect("b", "a").with_gap(2.0).with_turn(90.0));

        let ordered = canonical_order(&design, RootSelection::LowestId).unwrap();
        let connection = &ordered.connections()[0];
        assert_eq!(connection.connected(), &Side::new("a", "in"));
        assert_eq!(connection.connecting(), &Side::new("b", "out"));
        assert_eq!(connection.gap(), 2.0);
        assert_eq!(connection.turn(), 90.0);
    }

    #[test]
    fn test_permuted_designs_converge() {
        let permuted = Design::new("graph")
            .with_piece(piece("a"))
            .with_piece(piece("x"))
            .with_piece(piece("c"))
            .with_piece(piece("y"))
            .with_piece(piece("b"))
            .with_piece(piece("d"))
            .with_connection(connect("d", "b"))
            .with_connection(connect("c", "d"))
            .with_connection(connect("b", "a"))
            .with_connection(connect("y", "x"))
            .with_connection(connect("d", "a"))
            .with_connection(connect("c", "b"));

        let left = canonical_order(&graph(), RootSelection::LowestId).unwrap();
        let right = canonical_order(&permuted, RootSelection::LowestId).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_ordering_is_stable() {
        let once = canonical_order(&graph(), RootSelection::LowestId).unwrap();
        let twice = canonical_order(&once, RootSelection::LowestId).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_piece_is_structural() {
        let design = Design::new("broken")
            .with_piece(piece("a"))
            .with_connection(connect("a", "ghost"));
        let err = canonical_order(&design, RootSelection::LowestId).unwrap_err();
        assert!(matches!(err, ComposeError::StructuralPrecondition(_)));
    }
}
