//! Configuration types for Joinery composition.
//!
//! This module provides configuration structures that control how designs
//! are composed and how diagrams are projected to screen space. All types
//! implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining compose and diagram settings.
//! - [`ComposeConfig`] - Root selection, unconnected pieces and validation.
//! - [`DiagramConfig`] - Icon metrics used by the diagram to screen conversion.
//!
//! # Example
//!
//! ```
//! # use joinery::config::{AppConfig, RootSelection};
//! let config = AppConfig::default();
//! assert_eq!(config.compose().root_selection(), RootSelection::LowestId);
//! assert!(config.compose().validate());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Composition configuration section.
    #[serde(default)]
    compose: ComposeConfig,

    /// Diagram configuration section.
    #[serde(default)]
    diagram: DiagramConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `compose` - Composition settings.
    /// * `diagram` - Diagram to screen conversion settings.
    pub fn new(compose: ComposeConfig, diagram: DiagramConfig) -> Self {
        Self { compose, diagram }
    }

    /// Returns the composition configuration.
    pub fn compose(&self) -> &ComposeConfig {
        &self.compose
    }

    /// Returns the diagram configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }
}

/// How the root of each connected component is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootSelection {
    /// The placed piece with the lowest id, else the piece with the lowest
    /// id. Neighbors are visited in ascending id order, so the result does
    /// not depend on the order pieces and connections are listed in.
    #[default]
    LowestId,

    /// The first placed piece in input order, else the first piece.
    /// Neighbors are visited in connection order.
    InputOrder,
}

/// Composition settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposeConfig {
    #[serde(default)]
    root_selection: RootSelection,

    /// Give unconnected pieces without a plane the world XY plane.
    #[serde(default)]
    place_unconnected: bool,

    /// Validate the design before composing it.
    #[serde(default = "default_true")]
    validate: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            root_selection: RootSelection::default(),
            place_unconnected: false,
            validate: true,
        }
    }
}

impl ComposeConfig {
    pub fn new(root_selection: RootSelection, place_unconnected: bool, validate: bool) -> Self {
        Self {
            root_selection,
            place_unconnected,
            validate,
        }
    }

    pub fn with_root_selection(mut self, root_selection: RootSelection) -> Self {
        self.root_selection = root_selection;
        self
    }

    pub fn with_place_unconnected(mut self, place_unconnected: bool) -> Self {
        self.place_unconnected = place_unconnected;
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn root_selection(&self) -> RootSelection {
        self.root_selection
    }

    pub fn place_unconnected(&self) -> bool {
        self.place_unconnected
    }

    pub fn validate(&self) -> bool {
        self.validate
    }
}

/// Icon metrics for diagram to screen conversion, in screen units.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramConfig {
    #[serde(default = "default_icon_width")]
    icon_width: f32,

    #[serde(default = "default_icon_stroke")]
    icon_stroke: f32,

    #[serde(default)]
    margin: f32,
}

fn default_icon_width() -> f32 {
    48.0
}

fn default_icon_stroke() -> f32 {
    1.0
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            icon_width: default_icon_width(),
            icon_stroke: default_icon_stroke(),
            margin: 0.0,
        }
    }
}

impl DiagramConfig {
    pub fn new(icon_width: f32, icon_stroke: f32, margin: f32) -> Self {
        Self {
            icon_width,
            icon_stroke,
            margin,
        }
    }

    /// Width of a piece icon. One diagram unit maps to this many screen units.
    pub fn icon_width(&self) -> f32 {
        self.icon_width
    }

    pub fn icon_stroke(&self) -> f32 {
        self.icon_stroke
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Width of an icon including its stroke on both sides
    pub fn icon_width_max(&self) -> f32 {
        self.icon_width + 2.0 * self.icon_stroke
    }
}
