//! Typed catalogue of kit entries.
//!
//! The composition engine resolves a piece's type through a [`TypeKey`] and
//! a nested design through a [`DesignKey`]. Lookups are map-based on these
//! small value keys, so `("ab", "c")` and `("a", "bc")` can never collide.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    identifier::Id,
    model::{Design, DesignKey, Port, Type, TypeKey},
};

/// A kit as it is stored on disk: plain lists of types and designs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    #[serde(default)]
    types: Vec<Type>,
    #[serde(default)]
    designs: Vec<Design>,
}

impl Kit {
    pub fn new(types: Vec<Type>, designs: Vec<Design>) -> Self {
        Self { types, designs }
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn designs(&self) -> &[Design] {
        &self.designs
    }
}

/// Read-only lookup of types, ports and nested designs.
///
/// # Examples
///
/// ```
/// # use joinery_core::{catalogue::Catalogue, geometry::{Point, Vector}, identifier::Id};
/// # use joinery_core::model::{Port, Type, TypeKey};
/// let catalogue = Catalogue::new().with_type(
///     Type::new("column", "").with_port(Port::new("top", Point::origin(), Vector::z_axis())),
/// );
///
/// let key = TypeKey::new("column", "");
/// assert!(catalogue.port(&key, Id::new("top")).is_some());
/// assert!(catalogue.get_type(&TypeKey::new("beam", "")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    types: HashMap<TypeKey, Type>,
    designs: HashMap<DesignKey, Design>,
}

impl Catalogue {
    /// Creates an empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type, replacing any entry with the same key
    pub fn with_type(mut self, ty: Type) -> Self {
        self.insert_type(ty);
        self
    }

    /// Adds a design, replacing any entry with the same key
    pub fn with_design(mut self, design: Design) -> Self {
        self.insert_design(design);
        self
    }

    pub fn insert_type(&mut self, ty: Type) {
        let key = ty.key();
        if self.types.insert(key, ty).is_some() {
            warn!(key:% = key; "Duplicate type in catalogue, keeping the last one");
        }
    }

    pub fn insert_design(&mut self, design: Design) {
        let key = design.key();
        if self.designs.insert(key, design).is_some() {
            warn!(key:% = key; "Duplicate design in catalogue, keeping the last one");
        }
    }

    /// Looks up a type by name and variant
    pub fn get_type(&self, key: &TypeKey) -> Option<&Type> {
        self.types.get(key)
    }

    /// Looks up a design by name, variant and view
    pub fn get_design(&self, key: &DesignKey) -> Option<&Design> {
        self.designs.get(key)
    }

    /// Looks up a port of a type, applying the default-port fallback of
    /// [`Type::port`]
    pub fn port(&self, key: &TypeKey, port: Id) -> Option<&Port> {
        self.get_type(key).and_then(|ty| ty.port(port))
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    pub fn designs(&self) -> impl Iterator<Item = &Design> {
        self.designs.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn design_count(&self) -> usize {
        self.designs.len()
    }
}

impl From<Kit> for Catalogue {
    fn from(kit: Kit) -> Self {
        let mut catalogue = Catalogue::new();
        for ty in kit.types {
            catalogue.insert_type(ty);
        }
        for design in kit.designs {
            catalogue.insert_design(design);
        }
        catalogue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Vector};

    fn column(variant: &str) -> Type {
        Type::new("column", variant)
            .with_port(Port::new("top", Point::new(0.0, 0.0, 3.0), Vector::z_axis()))
    }

    #[test]
    fn test_variants_are_distinct_entries() {
        let catalogue = Catalogue::new()
            .with_type(column(""))
            .with_type(column("steel"));

        assert_eq!(catalogue.type_count(), 2);
        assert!(catalogue.get_type(&TypeKey::new("column", "steel")).is_some());
        assert!(catalogue.get_type(&TypeKey::new("column", "oak")).is_none());
    }

    #[test]
    fn test_keys_do_not_collide_on_concatenation() {
        let catalogue = Catalogue::new().with_type(Type::new("ab", "c"));

        assert!(catalogue.get_type(&TypeKey::new("ab", "c")).is_some());
        assert!(catalogue.get_type(&TypeKey::new("a", "bc")).is_none());
    }

    #[test]
    fn test_port_lookup_uses_default_fallback() {
        let catalogue = Catalogue::new().with_type(column(""));
        let key = TypeKey::new("column", "");

        assert_eq!(catalogue.port(&key, Id::default()).unwrap().id(), "top");
        assert!(catalogue.port(&key, Id::new("bottom")).is_none());
    }

    #[test]
    fn test_duplicate_type_keeps_last() {
        let catalogue = Catalogue::new()
            .with_type(column("").with_description("first"))
            .with_type(column("").with_description("second"));

        assert_eq!(catalogue.type_count(), 1);
        let ty = catalogue.get_type(&TypeKey::new("column", "")).unwrap();
        assert_eq!(ty.description(), "second");
    }

    #[test]
    fn test_from_kit_json() {
        let json = r#"{
            "types": [
                { "name": "column", "ports": [
                    { "id": "top", "point": { "z": 3 }, "direction": { "z": 1 } }
                ] }
            ],
            "designs": [ { "name": "frame", "view": "plan" } ]
        }"#;
        let kit: Kit = serde_json::from_str(json).unwrap();
        let catalogue = Catalogue::from(kit);

        let port = catalogue
            .port(&TypeKey::new("column", ""), Id::new("top"))
            .unwrap();
        assert_eq!(port.point(), Some(Point::new(0.0, 0.0, 3.0)));
        assert!(
            catalogue
                .get_design(&DesignKey::new("frame", "", "plan"))
                .is_some()
        );
    }
}
