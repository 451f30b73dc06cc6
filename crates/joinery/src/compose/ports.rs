//! Port resolution against the catalogue.
//!
//! A side on a type piece resolves directly through the catalogue. A side
//! on a nested design piece names a piece inside that design; the nested
//! design is flattened and the inner piece's port is carried into the
//! nested design's frame by the inner piece's plane.

use log::debug;

use joinery_core::{
    catalogue::Catalogue,
    identifier::Id,
    model::{Design, DesignKey, Side, TypeKey},
};

use super::{Engine, PortFrame};
use crate::error::ComposeError;

/// Resolves a port of a type into a frame.
///
/// The empty port id falls back to the type's default port.
pub(super) fn type_port(
    catalogue: &Catalogue,
    key: &TypeKey,
    port_id: Id,
) -> Result<PortFrame, ComposeError> {
    let ty = catalogue
        .get_type(key)
        .ok_or_else(|| ComposeError::missing(format!("type `{key}`")))?;
    let port = ty.port(port_id).ok_or_else(|| {
        ComposeError::missing(format!("port `{port_id}` of type `{key}`"))
    })?;
    match (port.point(), port.direction()) {
        (Some(point), Some(direction)) => Ok(PortFrame::new(point, direction)),
        _ => Err(ComposeError::structural(format!(
            "port `{}` of type `{key}` has no point or direction",
            port.id()
        ))),
    }
}

impl Engine<'_> {
    /// Resolves the port frame of a connection side, in the frame of the
    /// side's piece.
    pub(super) fn resolve_side(
        &mut self,
        design: &Design,
        side: &Side,
    ) -> Result<PortFrame, ComposeError> {
        let piece = design.piece(side.piece()).ok_or_else(|| {
            ComposeError::structural(format!("side `{side}` references an unknown piece"))
        })?;

        if let Some(key) = piece.type_key() {
            return type_port(self.catalogue, &key, side.port());
        }

        let Some(design_key) = piece.design_key() else {
            return Err(ComposeError::structural(format!(
                "piece `{}` references neither a type nor a design",
                piece.id()
            )));
        };
        let Some(inner_id) = side.design_piece() else {
            return Err(ComposeError::structural(format!(
                "side `{side}` is on design piece `{}` but names no piece inside it",
                piece.id()
            )));
        };

        let catalogue = self.catalogue;
        let nested = self.flattened(&design_key)?;
        let inner = nested.piece(inner_id).ok_or_else(|| {
            ComposeError::structural(format!(
                "design `{design_key}` has no piece `{inner_id}`"
            ))
        })?;
        let Some(plane) = inner.plane() else {
            return Err(ComposeError::structural(format!(
                "piece `{inner_id}` of design `{design_key}` is not placed"
            )));
        };
        let Some(inner_type) = inner.type_key() else {
            return Err(ComposeError::structural(format!(
                "piece `{inner_id}` of design `{design_key}` is itself a design"
            )));
        };

        let frame = type_port(catalogue, &inner_type, side.port())?;
        Ok(frame.transformed(&plane.to_world()))
    }

    /// Returns the flattened nested design, flattening it on first use.
    fn flattened(&mut self, key: &DesignKey) -> Result<&Design, ComposeError> {
        if !self.nested.contains_key(key) {
            if self.nesting.contains(key) {
                return Err(ComposeError::structural(format!(
                    "design `{key}` contains itself"
                )));
            }
            let catalogue = self.catalogue;
            let design = catalogue
                .get_design(key)
                .ok_or_else(|| ComposeError::missing(format!("design `{key}`")))?;

            debug!(design:% = key; "Flattening nested design");
            self.nesting.push(*key);
            let flattened = self.flatten(design);
            self.nesting.pop();
            self.nested.insert(*key, flattened?);
        }
        Ok(&self.nested[key])
    }
}

#[cfg(test)]
mod tests {
    use joinery_core::{
        geometry::{Plane, Point, Vector},
        model::{Connection, Piece, Port, Type},
    };

    use super::*;
    use crate::config::ComposeConfig;

    fn post() -> Type {
        Type::new("post", "")
            .with_port(Port::new("", Point::origin(), Vector::z_axis().reverse()))
            .with_port(Port::new("top", Point::new(0.0, 0.0, 3.0), Vector::z_axis()))
    }

    fn portal() -> Design {
        Design::new("portal")
            .with_piece(
                Piece::of_type("left", TypeKey::new("post", "")).with_plane(Plane::world_xy()),
            )
            .with_piece(Piece::of_type("right", TypeKey::new("post", "")))
            .with_connection(
                Connection::new(Side::new("left", "top"), Side::new("right", "top"))
                    .with_shift(1.0),
            )
    }

    fn catalogue() -> Catalogue {
        Catalogue::new().with_type(post()).with_design(portal())
    }

    fn host() -> Design {
        Design::new("host").with_piece(Piece::of_design(
            "frame",
            DesignKey::new("portal", "", ""),
        ))
    }

    #[test]
    fn test_type_port_default_and_missing() {
        let catalogue = catalogue();
        let key = TypeKey::new("post", "");

        let frame = type_port(&catalogue, &key, Id::default()).unwrap();
        assert_eq!(frame.direction(), Vector::z_axis().reverse());

        let err = type_port(&catalogue, &key, Id::new("side")).unwrap_err();
        assert!(matches!(err, ComposeError::MissingCatalogueEntry(_)));

        let err = type_port(&catalogue, &TypeKey::new("beam", ""), Id::default()).unwrap_err();
        assert!(matches!(err, ComposeError::MissingCatalogueEntry(msg) if msg.contains("beam#")));
    }

    #[test]
    fn test_port_without_geometry_is_structural() {
        let catalogue =
            Catalogue::new().with_type(Type::new("ghost", "").with_port(Port::without_geometry("")));
        let err = type_port(&catalogue, &TypeKey::new("ghost", ""), Id::default()).unwrap_err();
        assert!(matches!(err, ComposeError::StructuralPrecondition(_)));
    }

    #[test]
    fn test_nested_port_is_expressed_in_nested_frame() {
        let catalogue = catalogue();
        let config = ComposeConfig::default();
        let mut engine = Engine::new(&catalogue, &config);

        let side = Side::new("frame", "top").with_design_piece("right");
        let frame = engine.resolve_side(&host(), &side).unwrap();

        // The right post hangs upside down from the left post's top port,
        // shifted one unit along x.
        assert!(frame.direction().approx_eq(Vector::z_axis().reverse(), 1e-9));
        assert!(frame.point().approx_eq(Point::new(1.0, 0.0, 3.0), 1e-9));
    }

    #[test]
    fn test_nested_side_without_design_piece_is_structural() {
        let catalogue = catalogue();
        let config = ComposeConfig::default();
        let mut engine = Engine::new(&catalogue, &config);

        let err = engine
            .resolve_side(&host(), &Side::new("frame", "top"))
            .unwrap_err();
        assert!(matches!(err, ComposeError::StructuralPrecondition(_)));
    }

    #[test]
    fn test_missing_nested_design() {
        let catalogue = Catalogue::new().with_type(post());
        let config = ComposeConfig::default();
        let mut engine = Engine::new(&catalogue, &config);

        let side = Side::new("frame", "top").with_design_piece("right");
        let err = engine.resolve_side(&host(), &side).unwrap_err();
        assert!(matches!(err, ComposeError::MissingCatalogueEntry(msg) if msg.contains("portal")));
    }

    #[test]
    fn test_self_containing_design_is_rejected() {
        let looped = Design::new("loop")
            .with_piece(Piece::of_design("inner", DesignKey::new("loop", "", "")))
            .with_piece(Piece::of_type("post", TypeKey::new("post", "")))
            .with_connection(Connection::new(
                Side::new("inner", "").with_design_piece("post"),
                Side::new("post", "top"),
            ));
        let catalogue = Catalogue::new().with_type(post()).with_design(looped.clone());
        let config = ComposeConfig::default();
        let mut engine = Engine::new(&catalogue, &config);

        let side = Side::new("inner", "").with_design_piece("post");
        let err = engine.resolve_side(&looped, &side).unwrap_err();
        assert!(matches!(err, ComposeError::StructuralPrecondition(msg) if msg.contains("contains itself")));
    }
}
