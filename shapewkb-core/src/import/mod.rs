//! WKB import: type dispatch and the decode entry points.
//!
//! Every element decoder reads through a [`WkbCursor`] positioned at the
//! element header and advances it by exactly the bytes it consumed. The
//! byte order is resolved from each element header and kept on the cursor,
//! so the caller's buffer is only ever borrowed immutably.

mod multi_point;
mod path;
mod point;
mod structure;

pub use structure::{decode_structure, Leaves, OgcStructure};

use tracing::trace;

use crate::cursor::WkbCursor;
use crate::error::{Result, ShapeWkbError};
use crate::flags::ImportFlags;
use crate::geometry::{Geometry, GeometryType};
use crate::wkb::{read_header, ByteOrder, WkbGeometryType};

/// Decode one WKB element.
///
/// Returns the geometry and the number of bytes consumed, so callers can
/// step over the element in a larger stream. `target` is either a concrete
/// shape family the element must belong to, or [`GeometryType::Unknown`].
///
/// # Example
///
/// ```
/// use shapewkb_core::{decode_element, Geometry, GeometryType, ImportFlags};
///
/// // LINESTRING(5 5), a single-point path
/// let mut blob = vec![0x01];
/// blob.extend_from_slice(&2u32.to_le_bytes());
/// blob.extend_from_slice(&1u32.to_le_bytes());
/// blob.extend_from_slice(&5.0f64.to_le_bytes());
/// blob.extend_from_slice(&5.0f64.to_le_bytes());
///
/// let (geom, consumed) = decode_element(&blob, GeometryType::Polyline, ImportFlags::DEFAULT).unwrap();
/// assert_eq!(consumed, blob.len());
/// match geom {
///     Geometry::Polyline(path) => {
///         assert_eq!(path.part_count(), 1);
///         assert_eq!(path.position(), &[5.0, 5.0, 5.0, 5.0]);
///     }
///     other => panic!("expected polyline, got {other:?}"),
/// }
/// ```
pub fn decode_element(
    buf: &[u8],
    target: GeometryType,
    flags: ImportFlags,
) -> Result<(Geometry, usize)> {
    let mut cursor = WkbCursor::new(buf, ByteOrder::LittleEndian);
    let geometry = import_element(&mut cursor, target, flags)?;
    trace!(
        kind = geometry.geometry_type().name(),
        consumed = cursor.adjustment(),
        "decoded WKB element"
    );
    Ok((geometry, cursor.adjustment()))
}

/// Dispatch the element at the cursor to its decoder.
pub(crate) fn import_element(
    cursor: &mut WkbCursor<'_>,
    target: GeometryType,
    flags: ImportFlags,
) -> Result<Geometry> {
    let header = read_header(cursor)?;
    let type_code = header.type_code;
    if type_code.kind == WkbGeometryType::GeometryCollection {
        return Err(ShapeWkbError::InvalidTypeCode(header.raw_type));
    }

    let family = type_code.kind.shape_family();
    if target != GeometryType::Unknown && target != family {
        return Err(ShapeWkbError::TypeMismatch {
            expected: target.name(),
            found: type_code.kind.name(),
        });
    }

    trace!(
        raw_type = header.raw_type,
        offset = cursor.adjustment(),
        "importing WKB element"
    );

    let description = type_code.description();
    match type_code.kind {
        WkbGeometryType::Point => point::import_point(cursor, description).map(Geometry::Point),
        WkbGeometryType::MultiPoint => {
            multi_point::import_multi_point(cursor, description).map(Geometry::MultiPoint)
        }
        WkbGeometryType::LineString => {
            path::import_polyline(cursor, false, description).map(Geometry::Polyline)
        }
        WkbGeometryType::MultiLineString => {
            path::import_polyline(cursor, true, description).map(Geometry::Polyline)
        }
        WkbGeometryType::Polygon => {
            path::import_polygon(cursor, false, description, flags).map(Geometry::Polygon)
        }
        WkbGeometryType::MultiPolygon => {
            path::import_polygon(cursor, true, description, flags).map(Geometry::Polygon)
        }
        WkbGeometryType::GeometryCollection => {
            Err(ShapeWkbError::InvalidTypeCode(header.raw_type))
        }
    }
}
