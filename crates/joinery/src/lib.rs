//! Joinery - a composition engine for architectural kits of parts.
//!
//! A design lists pieces and the relative joints between them. Joinery
//! resolves those joints into an absolute pose for every piece, lays the
//! pieces out on a diagram, and brings designs into a canonical order so
//! that equivalent designs serialize identically.

pub mod compose;
pub mod config;
pub mod diagram;
pub mod order;

mod error;
mod structure;

pub use joinery_core::{catalogue, geometry, identifier, model, validate};

pub use error::{ComposeError, JoineryError};
pub use structure::{Component, ComponentTree, ConnectionGraph, SpanningForest, TreeEdge};

use log::{debug, info};

use catalogue::Catalogue;
use compose::Engine;
use config::AppConfig;
use diagram::DiagramLayout;
use model::Design;
use validate::Validate;

/// Entry point for composing, flattening and ordering designs.
///
/// # Examples
///
/// ```rust
/// use joinery::{
///     Composer,
///     catalogue::Catalogue,
///     geometry::{Point, Vector},
///     model::{Connection, Design, Piece, Port, Side, Type, TypeKey},
/// };
///
/// let block = Type::new("block", "")
///     .with_port(Port::new("top", Point::new(0.0, 1.0, 0.0), Vector::y_axis()))
///     .with_port(Port::new("bottom", Point::new(0.0, -1.0, 0.0), Vector::y_axis().reverse()));
/// let catalogue = Catalogue::new().with_type(block);
///
/// let key = TypeKey::new("block", "");
/// let design = Design::new("tower")
///     .with_piece(Piece::of_type("a", key))
///     .with_piece(Piece::of_type("b", key))
///     .with_connection(Connection::new(Side::new("a", "top"), Side::new("b", "bottom")));
///
/// let flat = Composer::default().flatten(&design, &catalogue).unwrap();
/// assert!(flat.connections().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Composer {
    config: AppConfig,
}

impl Composer {
    /// Create a new composer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including compose and diagram settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Checks the design's data invariants.
    ///
    /// # Errors
    ///
    /// Returns [`JoineryError::Validation`] listing every violation found.
    pub fn validate(&self, design: &Design) -> Result<(), JoineryError> {
        design.validate()?;
        debug!(design:% = design; "Design is valid");
        Ok(())
    }

    /// Resolves every reachable piece's plane and diagram center.
    ///
    /// The input design is left untouched; connections are kept in the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`JoineryError::Validation`] if validation is enabled and
    /// fails, or [`JoineryError::Compose`] if a catalogue entry is missing or
    /// the design breaks a structural precondition. No partial result is
    /// returned.
    pub fn compose(&self, design: &Design, catalogue: &Catalogue) -> Result<Design, JoineryError> {
        self.validate_if_enabled(design)?;
        info!(design:% = design; "Composing design");

        let composed = Engine::new(catalogue, self.config.compose()).compose(design)?;

        let placed = composed.pieces().iter().filter(|piece| piece.is_placed()).count();
        info!(design:% = design, placed; "Design composed");
        Ok(composed)
    }

    /// Composes the design and discards its connections.
    ///
    /// Placed pieces are annotated with the
    /// [`ROOT_QUALITY`](compose::ROOT_QUALITY),
    /// [`DEPTH_QUALITY`](compose::DEPTH_QUALITY) and
    /// [`PARENT_QUALITY`](compose::PARENT_QUALITY) qualities. A design
    /// without connections is returned unchanged.
    ///
    /// That early return happens before the catalogue is consulted: a flat
    /// design naming a type or nested design missing from `catalogue` still
    /// flattens successfully. Use [`compose`](Self::compose) to check the
    /// references of a flat design.
    ///
    /// # Errors
    ///
    /// Same as [`compose`](Self::compose).
    pub fn flatten(&self, design: &Design, catalogue: &Catalogue) -> Result<Design, JoineryError> {
        self.validate_if_enabled(design)?;
        let flat = Engine::new(catalogue, self.config.compose()).flatten(design)?;
        Ok(flat)
    }

    /// Returns the design with pieces and connections in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`JoineryError::Validation`] if validation is enabled and
    /// fails, or [`JoineryError::Compose`] for a structurally broken design.
    pub fn order(&self, design: &Design) -> Result<Design, JoineryError> {
        self.validate_if_enabled(design)?;
        info!(design:% = design; "Ordering design");
        let ordered = order::canonical_order(design, self.config.compose().root_selection())?;
        Ok(ordered)
    }

    /// Builds the spanning forest of a design, for callers that want to
    /// run their own per-piece effects over the traversal.
    ///
    /// # Errors
    ///
    /// Returns [`JoineryError::Compose`] for duplicate piece ids or
    /// connections to unknown pieces.
    pub fn forest<'a>(&self, design: &'a Design) -> Result<SpanningForest<'a>, JoineryError> {
        let forest = SpanningForest::new(design, self.config.compose().root_selection())?;
        Ok(forest)
    }

    /// Flattens the design and projects its diagram to screen space.
    ///
    /// # Errors
    ///
    /// Same as [`flatten`](Self::flatten). Additionally fails with
    /// [`ComposeError::StructuralPrecondition`] if a piece ends up without a
    /// diagram center, which happens to unconnected pieces unless
    /// `place_unconnected` is enabled.
    pub fn diagram(
        &self,
        design: &Design,
        catalogue: &Catalogue,
    ) -> Result<DiagramLayout, JoineryError> {
        let flat = self.flatten(design, catalogue)?;
        let layout = DiagramLayout::to_screen(&flat, self.config.diagram())?;
        info!(
            design:% = design,
            width = layout.width(),
            height = layout.height();
            "Diagram laid out"
        );
        Ok(layout)
    }

    fn validate_if_enabled(&self, design: &Design) -> Result<(), JoineryError> {
        if self.config.compose().validate() {
            self.validate(design)
        } else {
            Ok(())
        }
    }
}
