//! Explicit per-type validation of the data model.
//!
//! Validation never repairs anything. Each [`Validate`] implementation
//! reports every problem it finds as a [`ValidationError`] carrying the path
//! of the offending element (for example `pieces[2].plane.xAxis`).

use std::collections::HashSet;

use thiserror::Error;

use crate::{
    geometry::{Plane, Vector},
    identifier::Id,
    model::{Connection, Design, Piece, Port, Type},
};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.path, .message))]
pub struct ValidationError {
    path: String,
    message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path of the offending element, empty for the validated value itself
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefixes the path with the name of the containing element
    fn nested(mut self, prefix: &str) -> Self {
        self.path = if self.path.is_empty() {
            prefix.to_string()
        } else if self.path.starts_with('[') {
            format!("{prefix}{}", self.path)
        } else {
            format!("{prefix}.{}", self.path)
        };
        self
    }
}

fn describe(path: &str, message: &str) -> String {
    if path.is_empty() {
        message.to_string()
    } else {
        format!("{path}: {message}")
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    messages.join("; ")
}

/// A non-empty list of validation problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Returns the individual problems
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Checks the invariants of a model value.
pub trait Validate {
    /// Returns every problem found, or `Ok(())` when the value is valid.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Accumulates problems while walking a value.
#[derive(Debug, Default)]
struct Collector {
    errors: Vec<ValidationError>,
}

impl Collector {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(path, message));
    }

    fn nest(&mut self, prefix: &str, result: Result<(), ValidationErrors>) {
        if let Err(errors) = result {
            self.errors
                .extend(errors.into_iter().map(|error| error.nested(prefix)));
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

impl Validate for Vector {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();
        if self.is_zero() {
            collector.push("", "vector must not be zero");
        } else if !self.is_unit() {
            collector.push(
                "",
                format!("vector must be unit length, found length {}", self.length()),
            );
        }
        collector.finish()
    }
}

impl Validate for Plane {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();
        if !self.origin().is_finite() {
            collector.push("origin", "origin must be finite");
        }
        let x_result = self.x_axis().validate();
        let y_result = self.y_axis().validate();
        let axes_valid = x_result.is_ok() && y_result.is_ok();
        collector.nest("xAxis", x_result);
        collector.nest("yAxis", y_result);
        if axes_valid && !self.x_axis().is_orthogonal_to(self.y_axis()) {
            collector.push("", "xAxis and yAxis must be orthogonal");
        }
        collector.finish()
    }
}

impl Validate for Port {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();
        match self.point() {
            Some(point) if !point.is_finite() => collector.push("point", "point must be finite"),
            Some(_) => {}
            None => collector.push("point", "port has no point"),
        }
        match self.direction() {
            Some(direction) => collector.nest("direction", direction.validate()),
            None => collector.push("direction", "port has no direction"),
        }
        if !(0.0..1.0).contains(&self.t()) {
            collector.push("t", format!("t must be in [0, 1), found {}", self.t()));
        }
        collector.finish()
    }
}

impl Validate for Type {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();
        if self.name().is_default() {
            collector.push("name", "type has no name");
        }
        let mut seen: HashSet<Id> = HashSet::new();
        for (index, port) in self.ports().iter().enumerate() {
            let path = format!("ports[{index}]");
            if !seen.insert(port.id()) {
                collector.push(
                    path.as_str(),
                    format!("duplicate port id `{}`", port.id()),
                );
            }
            collector.nest(&path, port.validate());
        }
        collector.finish()
    }
}

impl Validate for Piece {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();
        match (self.type_key(), self.design_key()) {
            (Some(_), Some(_)) => {
                collector.push("", "piece must reference a type or a design, not both")
            }
            (None, None) => collector.push("", "piece references neither a type nor a design"),
            _ => {}
        }
        if let Some(plane) = self.plane() {
            collector.nest("plane", plane.validate());
        }
        if let Some(center) = self.center() {
            if !(center.x().is_finite() && center.y().is_finite()) {
                collector.push("center", "center must be finite");
            }
        }
        collector.finish()
    }
}

impl Validate for Connection {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();
        if self.connected().piece() == self.connecting().piece() {
            collector.push(
                "",
                format!("piece `{}` cannot connect to itself", self.connected().piece()),
            );
        }
        if self.offset().is_zero() {
            collector.push("", "diagram offset (x, y) must not be zero");
        }
        let finite = [
            self.gap(),
            self.shift(),
            self.rise(),
            self.rotation(),
            self.turn(),
            self.tilt(),
        ]
        .iter()
        .all(|value| value.is_finite());
        if !finite {
            collector.push("", "joint parameters must be finite");
        }
        collector.finish()
    }
}

impl Validate for Design {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut collector = Collector::default();
        if self.name().is_default() {
            collector.push("name", "design has no name");
        }

        let mut piece_ids: HashSet<Id> = HashSet::new();
        for (index, piece) in self.pieces().iter().enumerate() {
            let path = format!("pieces[{index}]");
            if !piece_ids.insert(piece.id()) {
                collector.push(
                    path.as_str(),
                    format!("duplicate piece id `{}`", piece.id()),
                );
            }
            collector.nest(&path, piece.validate());
        }

        let mut tuples: HashSet<(Id, Option<Id>, Id, Option<Id>)> = HashSet::new();
        for (index, connection) in self.connections().iter().enumerate() {
            let path = format!("connections[{index}]");
            for (role, side) in [
                ("connected", connection.connected()),
                ("connecting", connection.connecting()),
            ] {
                if !piece_ids.contains(&side.piece()) {
                    collector.push(
                        format!("{path}.{role}"),
                        format!("references unknown piece `{}`", side.piece()),
                    );
                }
            }

            let forward = (
                connection.connected().piece(),
                connection.connected().design_piece(),
                connection.connecting().piece(),
                connection.connecting().design_piece(),
            );
            let backward = (forward.2, forward.3, forward.0, forward.1);
            if tuples.contains(&forward) || tuples.contains(&backward) {
                collector.push(path.as_str(), format!("duplicate connection `{connection}`"));
            }
            tuples.insert(forward);

            collector.nest(&path, connection.validate());
        }
        collector.finish()
    }
}
