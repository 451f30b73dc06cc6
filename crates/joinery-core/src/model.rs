//! The kit-of-parts data model.
//!
//! A kit is a catalogue of reusable [`Type`]s, each exposing [`Port`]s. A
//! [`Design`] places [`Piece`]s (instances of a type or of a nested design)
//! and joins them with [`Connection`]s between two [`Side`]s.
//!
//! All types serialise with camelCase field names. Optional fields are
//! omitted when absent and angles are normalised into `[0, 360)` on
//! construction and on deserialisation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    geometry::{DiagramPoint, Plane, Point, Vector},
    identifier::Id,
};

/// Wraps an angle in degrees into `[0, 360)`.
///
/// # Examples
///
/// ```
/// # use joinery_core::model::normalize_angle;
/// assert_eq!(normalize_angle(370.0), 10.0);
/// assert_eq!(normalize_angle(-90.0), 270.0);
/// assert_eq!(normalize_angle(360.0), 0.0);
/// ```
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn deserialize_angle<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(normalize_angle)
}

fn default_offset_y() -> f32 {
    1.0
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

/// A named value with an optional unit and definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    unit: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    definition: String,
}

impl Quality {
    /// Creates a quality with the given name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: String::new(),
            definition: String::new(),
        }
    }

    /// Sets the unit of the value
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the definition (text or uri) of the quality
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }
}

/// A typed catalogue key for a [`Type`]: name plus variant.
///
/// The empty variant is the default variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeKey {
    name: Id,
    #[serde(default)]
    variant: Id,
}

impl TypeKey {
    pub fn new(name: impl Into<Id>, variant: impl Into<Id>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn variant(&self) -> Id {
        self.variant
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.variant)
    }
}

/// A typed catalogue key for a [`Design`]: name, variant and view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DesignKey {
    name: Id,
    #[serde(default)]
    variant: Id,
    #[serde(default)]
    view: Id,
}

impl DesignKey {
    pub fn new(name: impl Into<Id>, variant: impl Into<Id>, view: impl Into<Id>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            view: view.into(),
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn variant(&self) -> Id {
        self.variant
    }

    pub fn view(&self) -> Id {
        self.view
    }
}

impl fmt::Display for DesignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}#{}", self.name, self.variant, self.view)
    }
}

/// A connection point on a [`Type`] with a direction.
///
/// The empty id names the default port of the type. `t` places the port
/// along the outline of the piece icon in diagrams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default)]
    id: Id,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<Vector>,
    #[serde(default)]
    t: f32,
}

impl Port {
    /// Creates a port with the given id, point and direction
    pub fn new(id: impl Into<Id>, point: Point, direction: Vector) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            point: Some(point),
            direction: Some(direction),
            t: 0.0,
        }
    }

    /// Creates a port without geometry. Such a port fails validation and
    /// cannot take part in composition.
    pub fn without_geometry(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            point: None,
            direction: None,
            t: 0.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_t(mut self, t: f32) -> Self {
        self.t = t;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn point(&self) -> Option<Point> {
        self.point
    }

    pub fn direction(&self) -> Option<Vector> {
        self.direction
    }

    pub fn t(&self) -> f32 {
        self.t
    }
}

/// A reusable catalogue entry with ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    name: Id,
    #[serde(default)]
    variant: Id,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    unit: String,
    #[serde(default)]
    ports: Vec<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    qualities: Vec<Quality>,
}

impl Type {
    pub fn new(name: impl Into<Id>, variant: impl Into<Id>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            description: String::new(),
            unit: String::new(),
            ports: Vec::new(),
            qualities: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.qualities.push(quality);
        self
    }

    /// Returns the catalogue key of this type
    pub fn key(&self) -> TypeKey {
        TypeKey::new(self.name, self.variant)
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn variant(&self) -> Id {
        self.variant
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn qualities(&self) -> &[Quality] {
        &self.qualities
    }

    /// Finds a port by id.
    ///
    /// The empty id resolves to the port with the empty id, or to the first
    /// port when the type declares no such port.
    pub fn port(&self, id: Id) -> Option<&Port> {
        self.ports
            .iter()
            .find(|port| port.id == id)
            .or_else(|| if id.is_default() { self.ports.first() } else { None })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key().fmt(f)
    }
}

/// An instance of a [`Type`] or of a nested [`Design`] inside a design.
///
/// A piece references exactly one of the two; that is checked by
/// validation. `plane` and `center` are absent until the piece is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(default)]
    id: Id,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    type_key: Option<TypeKey>,
    #[serde(rename = "design", default, skip_serializing_if = "Option::is_none")]
    design_key: Option<DesignKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plane: Option<Plane>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center: Option<DiagramPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    qualities: Vec<Quality>,
}

impl Piece {
    /// Creates an unplaced piece of the given type
    pub fn of_type(id: impl Into<Id>, type_key: TypeKey) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            type_key: Some(type_key),
            design_key: None,
            plane: None,
            center: None,
            qualities: Vec::new(),
        }
    }

    /// Creates an unplaced piece that instantiates a nested design
    pub fn of_design(id: impl Into<Id>, design_key: DesignKey) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            type_key: None,
            design_key: Some(design_key),
            plane: None,
            center: None,
            qualities: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.plane = Some(plane);
        self
    }

    pub fn with_center(mut self, center: DiagramPoint) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.qualities.push(quality);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn type_key(&self) -> Option<TypeKey> {
        self.type_key
    }

    pub fn design_key(&self) -> Option<DesignKey> {
        self.design_key
    }

    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    pub fn center(&self) -> Option<DiagramPoint> {
        self.center
    }

    pub fn qualities(&self) -> &[Quality] {
        &self.qualities
    }

    /// Returns the value of the first quality with the given name
    pub fn quality(&self, name: &str) -> Option<&str> {
        self.qualities
            .iter()
            .find(|quality| quality.name == name)
            .map(Quality::value)
    }

    /// Returns true if the piece carries an explicit plane
    pub fn is_placed(&self) -> bool {
        self.plane.is_some()
    }

    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = Some(plane);
    }

    pub fn set_center(&mut self, center: DiagramPoint) {
        self.center = Some(center);
    }

    /// Sets a quality, replacing every existing quality with the same name.
    pub fn set_quality(&mut self, quality: Quality) {
        self.qualities.retain(|existing| existing.name != quality.name);
        self.qualities.push(quality);
    }
}

/// One end of a [`Connection`]: a piece, optionally a piece inside that
/// piece's nested design, and a port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Side {
    piece: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    design_piece: Option<Id>,
    #[serde(default)]
    port: Id,
}

impl Side {
    /// Creates a side on a piece's port
    pub fn new(piece: impl Into<Id>, port: impl Into<Id>) -> Self {
        Self {
            piece: piece.into(),
            design_piece: None,
            port: port.into(),
        }
    }

    /// Routes the side through a piece of the nested design
    pub fn with_design_piece(mut self, design_piece: impl Into<Id>) -> Self {
        self.design_piece = Some(design_piece.into());
        self
    }

    pub fn piece(&self) -> Id {
        self.piece
    }

    pub fn design_piece(&self) -> Option<Id> {
        self.design_piece
    }

    pub fn port(&self) -> Id {
        self.port
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece)?;
        if let Some(design_piece) = self.design_piece {
            write!(f, ":{design_piece}")?;
        }
        if !self.port.is_default() {
            write!(f, ":{}", self.port)?;
        }
        Ok(())
    }
}

/// A relative joint between two sides.
///
/// `gap`, `shift` and `rise` are offsets along the parent port frame;
/// `rotation`, `turn` and `tilt` are angles in degrees, always stored in
/// `[0, 360)`. `(x, y)` is the diagram offset of the connecting piece
/// relative to the connected piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    connected: Side,
    connecting: Side,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    gap: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    shift: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    rise: f64,
    #[serde(default, deserialize_with = "deserialize_angle", skip_serializing_if = "is_zero")]
    rotation: f64,
    #[serde(default, deserialize_with = "deserialize_angle", skip_serializing_if = "is_zero")]
    turn: f64,
    #[serde(default, deserialize_with = "deserialize_angle", skip_serializing_if = "is_zero")]
    tilt: f64,
    #[serde(default)]
    x: f32,
    #[serde(default = "default_offset_y")]
    y: f32,
}

impl Connection {
    /// Creates a connection with zero offsets and angles and the default
    /// diagram offset `(0, 1)`.
    pub fn new(connected: Side, connecting: Side) -> Self {
        Self {
            connected,
            connecting,
            description: String::new(),
            gap: 0.0,
            shift: 0.0,
            rise: 0.0,
            rotation: 0.0,
            turn: 0.0,
            tilt: 0.0,
            x: 0.0,
            y: default_offset_y(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_rise(mut self, rise: f64) -> Self {
        self.rise = rise;
        self
    }

    /// Sets the rotation about the parent port direction, wrapped into `[0, 360)`
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = normalize_angle(degrees);
        self
    }

    /// Sets the turn about the rise axis, wrapped into `[0, 360)`
    pub fn with_turn(mut self, degrees: f64) -> Self {
        self.turn = normalize_angle(degrees);
        self
    }

    /// Sets the tilt about the shift axis, wrapped into `[0, 360)`
    pub fn with_tilt(mut self, degrees: f64) -> Self {
        self.tilt = normalize_angle(degrees);
        self
    }

    /// Sets the diagram offset of the connecting piece
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn connected(&self) -> &Side {
        &self.connected
    }

    pub fn connecting(&self) -> &Side {
        &self.connecting
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn rise(&self) -> f64 {
        self.rise
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn turn(&self) -> f64 {
        self.turn
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Returns the diagram offset `(x, y)`
    pub fn offset(&self) -> DiagramPoint {
        DiagramPoint::new(self.x, self.y)
    }

    /// Returns true if the connection joins the two pieces, in either direction
    pub fn joins(&self, a: Id, b: Id) -> bool {
        (self.connected.piece == a && self.connecting.piece == b)
            || (self.connected.piece == b && self.connecting.piece == a)
    }

    /// Returns the same joint seen from the other side.
    ///
    /// Only the roles of the sides change; joint parameters are kept as is.
    pub fn swapped(&self) -> Self {
        let mut swapped = self.clone();
        std::mem::swap(&mut swapped.connected, &mut swapped.connecting);
        swapped
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.connected, self.connecting)
    }
}

/// A collection of pieces joined by connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    name: Id,
    #[serde(default)]
    variant: Id,
    #[serde(default)]
    view: Id,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    unit: String,
    #[serde(default)]
    pieces: Vec<Piece>,
    #[serde(default)]
    connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    qualities: Vec<Quality>,
}

impl Design {
    pub fn new(name: impl Into<Id>) -> Self {
        Self {
            name: name.into(),
            variant: Id::default(),
            view: Id::default(),
            description: String::new(),
            unit: String::new(),
            pieces: Vec::new(),
            connections: Vec::new(),
            qualities: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<Id>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_view(mut self, view: impl Into<Id>) -> Self {
        self.view = view.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_piece(mut self, piece: Piece) -> Self {
        self.pieces.push(piece);
        self
    }

    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.qualities.push(quality);
        self
    }

    /// Returns the catalogue key of this design
    pub fn key(&self) -> DesignKey {
        DesignKey::new(self.name, self.variant, self.view)
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn variant(&self) -> Id {
        self.variant
    }

    pub fn view(&self) -> Id {
        self.view
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn qualities(&self) -> &[Quality] {
        &self.qualities
    }

    /// Finds a piece by id
    pub fn piece(&self, id: Id) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    /// Replaces the piece list
    pub fn set_pieces(&mut self, pieces: Vec<Piece>) {
        self.pieces = pieces;
    }

    /// Replaces the connection list
    pub fn set_connections(&mut self, connections: Vec<Connection>) {
        self.connections = connections;
    }

    /// Removes every connection, returning them
    pub fn take_connections(&mut self) -> Vec<Connection> {
        std::mem::take(&mut self.connections)
    }
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_normalize_angle_wraps_into_range() {
        assert_approx_eq!(f64, normalize_angle(0.0), 0.0);
        assert_approx_eq!(f64, normalize_angle(725.0), 5.0);
        assert_approx_eq!(f64, normalize_angle(-360.0), 0.0);
        assert_approx_eq!(f64, normalize_angle(-1.0), 359.0);
        assert!(normalize_angle(-1e-15) < 360.0);
    }

    #[test]
    fn test_connection_defaults() {
        let connection = Connection::new(Side::new("a", ""), Side::new("b", ""));
        assert_eq!(connection.gap(), 0.0);
        assert_eq!(connection.rotation(), 0.0);
        assert_eq!(connection.offset(), DiagramPoint::new(0.0, 1.0));
    }

    #[test]
    fn test_connection_builder_normalizes_angles() {
        let connection = Connection::new(Side::new("a", ""), Side::new("b", ""))
            .with_rotation(450.0)
            .with_turn(-90.0)
            .with_tilt(360.0);
        assert_approx_eq!(f64, connection.rotation(), 90.0);
        assert_approx_eq!(f64, connection.turn(), 270.0);
        assert_approx_eq!(f64, connection.tilt(), 0.0);
    }

    #[test]
    fn test_connection_deserialize_defaults_and_normalization() {
        let json = r#"{
            "connected": { "piece": "a", "port": "top" },
            "connecting": { "piece": "b", "designPiece": "inner" },
            "gap": 2.5,
            "rotation": -45
        }"#;
        let connection: Connection = serde_json::from_str(json).unwrap();

        assert_eq!(connection.connected().port(), "top");
        assert!(connection.connecting().port().is_default());
        assert_eq!(connection.connecting().design_piece(), Some(Id::new("inner")));
        assert_approx_eq!(f64, connection.gap(), 2.5);
        assert_approx_eq!(f64, connection.rotation(), 315.0);
        assert_eq!(connection.offset(), DiagramPoint::new(0.0, 1.0));
    }

    #[test]
    fn test_display_ids() {
        let side = Side::new("wall", "left").with_design_piece("panel");
        assert_eq!(side.to_string(), "wall:panel:left");
        assert_eq!(Side::new("wall", "").to_string(), "wall");

        let connection = Connection::new(Side::new("a", "p"), Side::new("b", "q"));
        assert_eq!(connection.to_string(), "a:p--b:q");

        assert_eq!(Type::new("column", "steel").to_string(), "column#steel");
        assert_eq!(
            Design::new("house").with_view("plan").to_string(),
            "house##plan"
        );
    }

    #[test]
    fn test_type_port_lookup() {
        let column = Type::new("column", "")
            .with_port(Port::new("top", Point::new(0.0, 0.0, 3.0), Vector::z_axis()))
            .with_port(Port::new(
                "bottom",
                Point::origin(),
                Vector::z_axis().reverse(),
            ));

        assert_eq!(column.port(Id::new("bottom")).unwrap().id(), "bottom");
        assert!(column.port(Id::new("side")).is_none());
        // No port with the empty id, so the first port is the default
        assert_eq!(column.port(Id::default()).unwrap().id(), "top");
    }

    #[test]
    fn test_type_explicit_default_port_wins() {
        let slab = Type::new("slab", "")
            .with_port(Port::new("edge", Point::origin(), Vector::x_axis()))
            .with_port(Port::new("", Point::origin(), Vector::z_axis()));

        let port = slab.port(Id::default()).unwrap();
        assert_eq!(port.direction(), Some(Vector::z_axis()));
    }

    #[test]
    fn test_piece_set_quality_replaces_existing() {
        let mut piece = Piece::of_type("a", TypeKey::new("column", ""))
            .with_quality(Quality::new("joinery.depth", "3"))
            .with_quality(Quality::new("material", "oak"));

        piece.set_quality(Quality::new("joinery.depth", "1"));

        assert_eq!(piece.quality("joinery.depth"), Some("1"));
        assert_eq!(piece.quality("material"), Some("oak"));
        assert_eq!(
            piece
                .qualities()
                .iter()
                .filter(|q| q.name() == "joinery.depth")
                .count(),
            1
        );
    }

    #[test]
    fn test_piece_serde_shape() {
        let piece = Piece::of_type("a", TypeKey::new("column", ""))
            .with_plane(Plane::world_xy())
            .with_center(DiagramPoint::new(1.0, 2.0));
        let json = serde_json::to_value(&piece).unwrap();

        assert_eq!(json["id"], "a");
        assert_eq!(json["type"]["name"], "column");
        assert!(json.get("design").is_none());
        assert_eq!(json["center"]["y"], 2.0);

        let back: Piece = serde_json::from_value(json).unwrap();
        assert_eq!(back, piece);
    }

    #[test]
    fn test_connection_swapped_keeps_parameters() {
        let connection = Connection::new(Side::new("a", "p"), Side::new("b", "q"))
            .with_gap(1.0)
            .with_turn(30.0);
        let swapped = connection.swapped();

        assert_eq!(swapped.connected().piece(), "b");
        assert_eq!(swapped.connecting().piece(), "a");
        assert_approx_eq!(f64, swapped.gap(), 1.0);
        assert_approx_eq!(f64, swapped.turn(), 30.0);
        assert!(swapped.joins(Id::new("a"), Id::new("b")));
    }

    #[test]
    fn test_design_take_connections() {
        let mut design = Design::new("pair")
            .with_piece(Piece::of_type("a", TypeKey::new("t", "")))
            .with_piece(Piece::of_type("b", TypeKey::new("t", "")))
            .with_connection(Connection::new(Side::new("a", ""), Side::new("b", "")));

        let taken = design.take_connections();
        assert_eq!(taken.len(), 1);
        assert!(design.connections().is_empty());
        assert!(design.piece(Id::new("b")).is_some());
    }
}
