//! Flattening: composition followed by discarding every connection.

use log::{debug, info};

use joinery_core::model::{Design, Quality};

use super::{Engine, apply};
use crate::error::ComposeError;

/// Quality naming the root piece of a flattened piece's component.
pub const ROOT_QUALITY: &str = "joinery.root";
/// Quality holding a flattened piece's depth in its spanning tree.
pub const DEPTH_QUALITY: &str = "joinery.depth";
/// Quality naming the parent of a flattened, non-root piece.
pub const PARENT_QUALITY: &str = "joinery.parent";

impl Engine<'_> {
    /// Returns a flat copy of the design: every reachable piece placed,
    /// annotated with its root, depth and parent, and no connections left.
    ///
    /// A design without connections is already flat and is returned as is.
    pub(crate) fn flatten(&mut self, design: &Design) -> Result<Design, ComposeError> {
        if design.connections().is_empty() {
            debug!(design:% = design; "Design is already flat");
            return Ok(design.clone());
        }

        info!(
            design:% = design,
            pieces = design.pieces().len(),
            connections = design.connections().len();
            "Flattening design"
        );

        let placements = self.plan(design)?;
        let mut flat = apply(design, &placements);
        for piece in flat.pieces_mut() {
            let Some(placement) = placements.get(&piece.id()) else {
                continue;
            };
            piece.set_quality(Quality::new(ROOT_QUALITY, placement.root.to_text()));
            piece.set_quality(Quality::new(DEPTH_QUALITY, placement.depth.to_string()));
            if let Some(parent) = placement.parent {
                piece.set_quality(Quality::new(PARENT_QUALITY, parent.to_text()));
            }
        }
        let dropped = flat.take_connections();

        info!(
            design:% = design,
            placed = placements.len(),
            connections = dropped.len();
            "Design flattened"
        );
        Ok(flat)
    }
}

#[cfg(test)]
mod tests {
    use joinery_core::{
        catalogue::Catalogue,
        geometry::{Point, Vector},
        identifier::Id,
        model::{Connection, Piece, Port, Side, Type, TypeKey},
    };

    use super::*;
    use crate::config::ComposeConfig;

    fn catalogue() -> Catalogue {
        Catalogue::new().with_type(
            Type::new("brick", "")
                .with_port(Port::new("up", Point::new(0.0, 0.0, 1.0), Vector::z_axis()))
                .with_port(Port::new(
                    "down",
                    Point::origin(),
                    Vector::z_axis().reverse(),
                )),
        )
    }

    fn stack() -> Design {
        let brick = TypeKey::new("brick", "");
        Design::new("stack")
            .with_piece(Piece::of_type("a", brick))
            .with_piece(Piece::of_type("b", brick).with_quality(Quality::new(PARENT_QUALITY, "stale")))
            .with_piece(Piece::of_type("c", brick))
            .with_piece(Piece::of_type("loose", brick))
            .with_connection(Connection::new(Side::new("a", "up"), Side::new("b", "down")))
            .with_connection(Connection::new(Side::new("b", "up"), Side::new("c", "down")))
    }

    #[test]
    fn test_flatten_discards_connections_and_places_pieces() {
        let catalogue = catalogue();
        let config = ComposeConfig::default();
        let flat = Engine::new(&catalogue, &config).flatten(&stack()).unwrap();

        assert!(flat.connections().is_empty());
        assert_eq!(flat.pieces().len(), 4);
        let c = flat.piece(Id::new("c")).unwrap();
        assert!(c.plane().unwrap().origin().approx_eq(Point::new(0.0, 0.0, 2.0), 1e-9));
        assert!(flat.piece(Id::new("loose")).unwrap().plane().is_none());
    }

    #[test]
    fn test_flatten_stamps_tree_qualities() {
        let catalogue = catalogue();
        let config = ComposeConfig::default();
        let flat = Engine::new(&catalogue, &config).flatten(&stack()).unwrap();

        let a = flat.piece(Id::new("a")).unwrap();
        assert_eq!(a.quality(ROOT_QUALITY), Some("a"));
        assert_eq!(a.quality(DEPTH_QUALITY), Some("0"));
        assert_eq!(a.quality(PARENT_QUALITY), None);

        let b = flat.piece(Id::new("b")).unwrap();
        assert_eq!(b.quality(PARENT_QUALITY), Some("a"));
        assert_eq!(b.qualities().len(), 3);

        let c = flat.piece(Id::new("c")).unwrap();
        assert_eq!(c.quality(ROOT_QUALITY), Some("a"));
        assert_eq!(c.quality(DEPTH_QUALITY), Some("2"));
        assert_eq!(c.quality(PARENT_QUALITY), Some("b"));

        assert!(flat.piece(Id::new("loose")).unwrap().qualities().is_empty());
    }

    #[test]
    fn test_flat_design_is_returned_unchanged() {
        let catalogue = catalogue();
        let config = ComposeConfig::default();
        let mut engine = Engine::new(&catalogue, &config);

        let flat = engine.flatten(&stack()).unwrap();
        let again = engine.flatten(&flat).unwrap();
        assert_eq!(again, flat);
    }

    #[test]
    fn test_failed_flatten_returns_error_only() {
        let catalogue = Catalogue::new();
        let config = ComposeConfig::default();
        let err = Engine::new(&catalogue, &config).flatten(&stack()).unwrap_err();
        assert!(matches!(err, ComposeError::MissingCatalogueEntry(_)));
    }
}
