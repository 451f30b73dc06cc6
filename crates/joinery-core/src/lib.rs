//! Joinery Core Types and Definitions
//!
//! This crate provides the foundational types for describing kits of parts
//! and the designs assembled from them. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Points, vectors, planes and rigid transforms ([`geometry`] module)
//! - **Model**: Types, ports, pieces, connections and designs ([`model`] module)
//! - **Catalogue**: Typed lookup of types and nested designs ([`catalogue::Catalogue`])
//! - **Validation**: Explicit per-type invariant checks ([`validate::Validate`])

pub mod catalogue;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod validate;
