use tracing::debug;

use crate::cursor::WkbCursor;
use crate::error::{Result, ShapeWkbError};
use crate::geometry::{MultiPoint, Semantics, VertexDescription};
use crate::wkb::WKB_HEADER_LEN;

/// Offset of the first point header: header + point count.
const FIRST_POINT: usize = WKB_HEADER_LEN + 4;

pub(super) fn import_multi_point(
    cursor: &mut WkbCursor<'_>,
    description: VertexDescription,
) -> Result<MultiPoint> {
    let point_count = cursor.read_count(WKB_HEADER_LEN)?;
    let point_len = WKB_HEADER_LEN + description.coordinate_len();
    let payload_len = point_count
        .checked_mul(point_len)
        .ok_or(ShapeWkbError::BufferBounds {
            offset: cursor.adjustment() + FIRST_POINT,
            len: usize::MAX,
            available: cursor.buffer_len(),
        })?;
    cursor.ensure(FIRST_POINT, payload_len)?;

    let mut position = Vec::with_capacity(2 * point_count);
    let mut zs = description
        .has_z
        .then(|| Vec::with_capacity(point_count));
    let mut ms = description
        .has_m
        .then(|| Vec::with_capacity(point_count));
    let mut z_non_default = false;
    let mut m_non_default = false;

    let mut offset = FIRST_POINT;
    for _ in 0..point_count {
        offset += WKB_HEADER_LEN; // skip redundant byte order and type fields
        position.push(cursor.read_f64(offset)?);
        position.push(cursor.read_f64(offset + 8)?);
        offset += 16;
        if let Some(zs) = &mut zs {
            let z = cursor.read_f64(offset)?;
            z_non_default |= !Semantics::Z.is_default_value(z);
            zs.push(z);
            offset += 8;
        }
        if let Some(ms) = &mut ms {
            let m = cursor.read_f64(offset)?;
            m_non_default |= !Semantics::M.is_default_value(m);
            ms.push(m);
            offset += 8;
        }
    }

    if zs.is_some() && !z_non_default {
        debug!(point_count, "dropping all-default Z stream");
        zs = None;
    }
    if ms.is_some() && !m_non_default {
        debug!(point_count, "dropping all-default M stream");
        ms = None;
    }

    cursor.advance(offset);
    Ok(MultiPoint::from_streams(description, position, zs, ms))
}
