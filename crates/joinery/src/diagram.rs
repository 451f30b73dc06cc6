//! Diagram to screen conversion.
//!
//! Diagram centers are measured in icon widths with y pointing up. Screen
//! positions are measured in screen units with y pointing down, and are
//! shifted so that every icon, stroke included, lies inside the canvas.

use indexmap::IndexMap;
use log::debug;

use joinery_core::{geometry::DiagramPoint, identifier::Id, model::Design};

use crate::{config::DiagramConfig, error::ComposeError};

/// Screen positions of the pieces of a flat design and the canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    positions: IndexMap<Id, DiagramPoint>,
    width: f32,
    height: f32,
}

impl DiagramLayout {
    /// Projects the diagram centers of a flattened design to screen space.
    ///
    /// An empty design yields an empty layout whose canvas is only the
    /// margins.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::StructuralPrecondition`] if a piece has no
    /// diagram center.
    pub fn to_screen(design: &Design, config: &DiagramConfig) -> Result<Self, ComposeError> {
        let icon_width = config.icon_width();
        let icon_max = config.icon_width_max();
        let margin = config.margin();

        let mut positions = IndexMap::with_capacity(design.pieces().len());
        for piece in design.pieces() {
            let Some(center) = piece.center() else {
                return Err(ComposeError::structural(format!(
                    "piece `{}` of design `{design}` has no diagram center",
                    piece.id()
                )));
            };
            let scaled = DiagramPoint::new(center.x() * icon_width, -(center.y() * icon_width));
            positions.insert(piece.id(), scaled);
        }

        if positions.is_empty() {
            return Ok(Self {
                positions,
                width: 2.0 * margin,
                height: 2.0 * margin,
            });
        }

        let inset = margin + (icon_max - icon_width);
        let min_x = positions.values().map(|p| p.x()).fold(f32::INFINITY, f32::min) - inset;
        let min_y = positions.values().map(|p| p.y()).fold(f32::INFINITY, f32::min) - inset;
        let offset = DiagramPoint::new(-min_x, -min_y);
        for position in positions.values_mut() {
            *position = position.add_point(offset);
        }

        let max_x = positions.values().map(|p| p.x()).fold(f32::NEG_INFINITY, f32::max);
        let max_y = positions.values().map(|p| p.y()).fold(f32::NEG_INFINITY, f32::max);
        let layout = Self {
            positions,
            width: max_x + 2.0 * margin + icon_max,
            height: max_y + 2.0 * margin + icon_max,
        };

        debug!(
            pieces = layout.positions.len(),
            width = layout.width,
            height = layout.height;
            "Diagram projected to screen"
        );
        Ok(layout)
    }

    /// Screen position of a piece
    pub fn position(&self, piece: Id) -> Option<DiagramPoint> {
        self.positions.get(&piece).copied()
    }

    /// Screen positions in design order
    pub fn positions(&self) -> impl Iterator<Item = (Id, DiagramPoint)> + '_ {
        self.positions.iter().map(|(id, point)| (*id, *point))
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}
