//! Core data types for brace wrap fitting.
//!
//! This crate provides the foundational types shared by the wrap pipeline:
//!
//! - [`PointCloud`] - An ordered sequence of 3D points
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! This crate has no dependencies beyond `nalgebra` (and optional `serde`).
//! It can be used in CLI tools, servers, and WASM targets alike.
//!
//! # Precision
//!
//! All coordinates are `f32`, matching the raw `[x, y, z, ...]` float32
//! buffers exchanged with scanners and viewers.
//!
//! # Coordinate System
//!
//! - X: width (left/right)
//! - Y: height (up/down) — the slicing axis for wrap fitting
//! - Z: depth (front/back)
//!
//! # Example
//!
//! ```
//! use wrap_types::{PointCloud, Point3};
//!
//! let cloud = PointCloud::from_positions(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 2.0, 0.5),
//! ]);
//!
//! assert_eq!(cloud.len(), 2);
//! assert!(!cloud.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod cloud;
mod mesh;

pub use bounds::Aabb;
pub use cloud::PointCloud;
pub use mesh::IndexedMesh;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
