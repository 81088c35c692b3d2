#![doc = include_str!("../../README.md")]
//! Crate-specific API surface for `shapewkb-core`.

pub mod cursor;
pub mod error;
pub mod flags;
pub mod geometry;
pub mod import;
pub mod interop;
pub mod wkb;

pub use error::{Result, ShapeWkbError};
pub use flags::ImportFlags;
pub use geometry::{Geometry, GeometryType, MultiPath, MultiPoint, Point, VertexDescription};
pub use import::{decode_element, decode_structure, OgcStructure};
