//! Bridges from the vertex-array model to the georust ecosystem.
//!
//! [`Geometry`] and [`OgcStructure`] implement [`GeozeroGeometry`], so any
//! geozero processor (WKT, GeoJSON, WKB writers, the `geo` builder) can
//! consume decoded values. Polygon rings are emitted closed and grouped into
//! one OGC polygon per outer ring.

use geozero::error::Result as GeozeroResult;
use geozero::{CoordDimensions, GeomProcessor, GeozeroGeometry, ToGeo};

use crate::error::Result;
use crate::geometry::{Geometry, MultiPath, MultiPoint, Point, VertexDescription};
use crate::import::OgcStructure;

fn coord_dimensions(description: VertexDescription) -> CoordDimensions {
    match (description.has_z, description.has_m) {
        (false, false) => CoordDimensions::xy(),
        (true, false) => CoordDimensions::xyz(),
        (true, true) => CoordDimensions::xyzm(),
        (false, true) => {
            let mut dims = CoordDimensions::xy();
            dims.m = true;
            dims
        }
    }
}

fn process_vertex<P: GeomProcessor>(
    processor: &mut P,
    (x, y): (f64, f64),
    z: Option<f64>,
    m: Option<f64>,
    idx: usize,
) -> GeozeroResult<()> {
    if processor.multi_dim() {
        processor.coordinate(x, y, z, m, None, None, idx)
    } else {
        processor.xy(x, y, idx)
    }
}

fn process_point<P: GeomProcessor>(
    point: &Point,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    if point.is_empty() {
        return processor.empty_point(idx);
    }
    processor.point_begin(idx)?;
    process_vertex(processor, (point.x(), point.y()), point.z(), point.m(), 0)?;
    processor.point_end(idx)
}

fn process_multi_point<P: GeomProcessor>(
    points: &MultiPoint,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.multipoint_begin(points.vertex_count(), idx)?;
    for vertex in 0..points.vertex_count() {
        process_vertex(
            processor,
            points.xy(vertex),
            points.z(vertex),
            points.m(vertex),
            vertex,
        )?;
    }
    processor.multipoint_end(idx)
}

/// Emit one part as a linestring; closed parts repeat their start vertex.
fn process_path<P: GeomProcessor>(
    path: &MultiPath,
    part: usize,
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    let range = path.path_range(part);
    let start = range.start;
    let closing = path.is_closed_path(part);
    let size = range.len() + usize::from(closing);

    processor.linestring_begin(tagged, size, idx)?;
    for (i, vertex) in range.enumerate() {
        process_vertex(processor, path.xy(vertex), path.z(vertex), path.m(vertex), i)?;
    }
    if closing {
        process_vertex(
            processor,
            path.xy(start),
            path.z(start),
            path.m(start),
            size - 1,
        )?;
    }
    processor.linestring_end(tagged, idx)
}

fn process_polyline<P: GeomProcessor>(
    polyline: &MultiPath,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    match polyline.part_count() {
        0 => {
            processor.linestring_begin(true, 0, idx)?;
            processor.linestring_end(true, idx)
        }
        1 => process_path(polyline, 0, true, idx, processor),
        n => {
            processor.multilinestring_begin(n, idx)?;
            for part in 0..n {
                process_path(polyline, part, false, part, processor)?;
            }
            processor.multilinestring_end(idx)
        }
    }
}

fn process_polygon<P: GeomProcessor>(
    polygon: &MultiPath,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    let groups = polygon.ogc_polygon_ranges();
    match groups.as_slice() {
        [] => {
            processor.polygon_begin(true, 0, idx)?;
            processor.polygon_end(true, idx)
        }
        [rings] => {
            processor.polygon_begin(true, rings.len(), idx)?;
            for (i, ring) in rings.clone().enumerate() {
                process_path(polygon, ring, false, i, processor)?;
            }
            processor.polygon_end(true, idx)
        }
        groups => {
            processor.multipolygon_begin(groups.len(), idx)?;
            for (k, rings) in groups.iter().enumerate() {
                processor.polygon_begin(false, rings.len(), k)?;
                for (i, ring) in rings.clone().enumerate() {
                    process_path(polygon, ring, false, i, processor)?;
                }
                processor.polygon_end(false, k)?;
            }
            processor.multipolygon_end(idx)
        }
    }
}

fn process_geometry<P: GeomProcessor>(
    geometry: &Geometry,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    match geometry {
        Geometry::Point(point) => process_point(point, idx, processor),
        Geometry::MultiPoint(points) => process_multi_point(points, idx, processor),
        Geometry::Polyline(polyline) => process_polyline(polyline, idx, processor),
        Geometry::Polygon(polygon) => process_polygon(polygon, idx, processor),
    }
}

impl GeozeroGeometry for Geometry {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()>
    where
        Self: Sized,
    {
        process_geometry(self, 0, processor)
    }

    fn dims(&self) -> CoordDimensions {
        coord_dimensions(self.description())
    }
}

impl GeozeroGeometry for OgcStructure {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()>
    where
        Self: Sized,
    {
        enum Step<'a> {
            Enter(&'a OgcStructure, usize),
            Exit(usize),
        }

        let mut work = vec![Step::Enter(self, 0)];
        while let Some(step) = work.pop() {
            match step {
                Step::Enter(OgcStructure::Leaf { geometry, .. }, idx) => {
                    process_geometry(geometry, idx, processor)?;
                }
                Step::Enter(OgcStructure::Collection { children, .. }, idx) => {
                    processor.geometrycollection_begin(children.len(), idx)?;
                    work.push(Step::Exit(idx));
                    for (i, child) in children.iter().enumerate().rev() {
                        work.push(Step::Enter(child, i));
                    }
                }
                Step::Exit(idx) => processor.geometrycollection_end(idx)?,
            }
        }
        Ok(())
    }

    fn dims(&self) -> CoordDimensions {
        coord_dimensions(self.description())
    }
}

/// Convert a decoded geometry into a `geo::Geometry<f64>` (XY only).
///
/// An empty point becomes `POINT(NaN NaN)`.
///
/// # Example
///
/// ```
/// use shapewkb_core::interop::to_geo;
/// use shapewkb_core::{decode_element, GeometryType, ImportFlags};
///
/// let mut blob = vec![0x01];
/// blob.extend_from_slice(&1u32.to_le_bytes());
/// blob.extend_from_slice(&1.0f64.to_le_bytes());
/// blob.extend_from_slice(&2.0f64.to_le_bytes());
///
/// let (geom, _) = decode_element(&blob, GeometryType::Unknown, ImportFlags::DEFAULT).unwrap();
/// assert_eq!(to_geo(&geom).unwrap(), geo::Geometry::Point(geo::Point::new(1.0, 2.0)));
/// ```
pub fn to_geo(geometry: &Geometry) -> Result<geo::Geometry<f64>> {
    if let Geometry::Point(point) = geometry {
        if point.is_empty() {
            return Ok(geo::Geometry::Point(geo::Point::new(f64::NAN, f64::NAN)));
        }
    }
    Ok(ToGeo::to_geo(geometry)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathFlags;
    use geozero::ToWkt;

    fn two_squares() -> MultiPath {
        let outer = PathFlags::CLOSED | PathFlags::OGC_START_POLYGON;
        MultiPath::from_streams(
            VertexDescription::XY,
            vec![
                0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, //
                5.0, 5.0, 5.0, 6.0, 6.0, 6.0, 6.0, 5.0,
            ],
            None,
            None,
            vec![4, 8],
            vec![outer, outer],
        )
    }

    #[test]
    fn two_outer_rings_export_as_multipolygon() {
        let geom = Geometry::Polygon(two_squares());
        let wkt = geom.to_wkt().unwrap();
        assert!(wkt.starts_with("MULTIPOLYGON"), "got: {wkt}");

        match to_geo(&geom).unwrap() {
            geo::Geometry::MultiPolygon(mp) => {
                assert_eq!(mp.0.len(), 2);
                // closing vertex restored
                assert_eq!(mp.0[0].exterior().0.len(), 5);
            }
            other => panic!("expected MultiPolygon, got {other:?}"),
        }
    }

    #[test]
    fn empty_point_converts_to_nan_point() {
        let geom = Geometry::Point(Point::empty(VertexDescription::XY));
        match to_geo(&geom).unwrap() {
            geo::Geometry::Point(p) => {
                assert!(p.x().is_nan());
                assert!(p.y().is_nan());
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn open_polyline_is_not_closed_on_export() {
        let line = MultiPath::from_streams(
            VertexDescription::XY,
            vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0],
            None,
            None,
            vec![3],
            vec![PathFlags::NONE],
        );
        match to_geo(&Geometry::Polyline(line)).unwrap() {
            geo::Geometry::LineString(ls) => assert_eq!(ls.0.len(), 3),
            other => panic!("expected LineString, got {other:?}"),
        }
    }

    #[test]
    fn dims_follow_description() {
        let geom = Geometry::Point(Point::new(
            VertexDescription::new(false, true),
            1.0,
            2.0,
            0.0,
            7.0,
        ));
        let dims = geom.dims();
        assert!(!dims.z);
        assert!(dims.m);
    }
}
