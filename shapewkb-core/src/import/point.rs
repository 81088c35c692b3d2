use crate::cursor::WkbCursor;
use crate::error::Result;
use crate::geometry::{Point, VertexDescription};
use crate::wkb::WKB_HEADER_LEN;

/// Read one X,Y[,Z][,M] tuple at `offset`. Absent attributes read as NaN.
pub(super) fn read_tuple(
    cursor: &WkbCursor<'_>,
    offset: usize,
    description: VertexDescription,
) -> Result<[f64; 4]> {
    let x = cursor.read_f64(offset)?;
    let y = cursor.read_f64(offset + 8)?;
    let mut next = offset + 16;
    let mut z = f64::NAN;
    if description.has_z {
        z = cursor.read_f64(next)?;
        next += 8;
    }
    let mut m = f64::NAN;
    if description.has_m {
        m = cursor.read_f64(next)?;
    }
    Ok([x, y, z, m])
}

pub(super) fn import_point(
    cursor: &mut WkbCursor<'_>,
    description: VertexDescription,
) -> Result<Point> {
    let len = description.coordinate_len();
    let [x, y, z, m] = read_tuple(cursor, WKB_HEADER_LEN, description)?;
    cursor.advance(WKB_HEADER_LEN + len);

    // NaN X marks POINT EMPTY; the remaining values are ignored
    if x.is_nan() {
        return Ok(Point::empty(description));
    }
    Ok(Point::new(description, x, y, z, m))
}
