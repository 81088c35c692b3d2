//! Polygon and polyline import.
//!
//! Both shapes are read in two passes over the same WKB structure. The
//! sizing pass counts model vertices and non-empty parts; the fill pass then
//! writes into streams allocated with exactly that capacity. The passes share
//! [`walk_parts`] and [`part_layout`], so they always agree on how an encoded
//! part maps onto the model:
//!
//! - 0 points: the part is dropped.
//! - 1 point: the point is written twice.
//! - polygon ring of 3+ points whose last tuple equals the first: the closing
//!   tuple is not stored.
//! - anything else: every point is stored.
//!
//! Polygon rings are then re-oriented: outer rings clockwise, holes
//! counter-clockwise.

use tracing::debug;

use super::point::read_tuple;
use crate::cursor::WkbCursor;
use crate::error::{Result, ShapeWkbError};
use crate::flags::ImportFlags;
use crate::geometry::simplicity::classify_weak;
use crate::geometry::{same_values, MultiPath, PathFlags, Semantics, VertexDescription};
use crate::wkb::WKB_HEADER_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathKind {
    Polyline,
    Polygon,
}

/// How one encoded part maps onto model vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartLayout {
    Empty,
    /// One encoded point, stored twice.
    SinglePoint,
    /// The first `n` encoded points are stored.
    Run(usize),
}

impl PartLayout {
    fn model_vertices(self) -> usize {
        match self {
            PartLayout::Empty => 0,
            PartLayout::SinglePoint => 2,
            PartLayout::Run(n) => n,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PartVisit {
    /// First non-empty part of its WKB element.
    starts_element: bool,
    /// Offset of the part's first coordinate tuple.
    offset: usize,
    layout: PartLayout,
}

fn same_tuple(a: [f64; 4], b: [f64; 4]) -> bool {
    same_values(&a, &b)
}

/// Decide the layout of a part with `point_count` tuples at `offset`.
///
/// Only the first and last tuples are read; the whole payload is bounds
/// checked so later passes cannot run past the buffer.
fn part_layout(
    cursor: &WkbCursor<'_>,
    offset: usize,
    point_count: usize,
    kind: PathKind,
    description: VertexDescription,
) -> Result<PartLayout> {
    let len = description.coordinate_len();
    let payload = point_count
        .checked_mul(len)
        .ok_or(ShapeWkbError::BufferBounds {
            offset: cursor.adjustment().saturating_add(offset),
            len: usize::MAX,
            available: cursor.buffer_len(),
        })?;
    cursor.ensure(offset, payload)?;

    Ok(match point_count {
        0 => PartLayout::Empty,
        1 => PartLayout::SinglePoint,
        n if n == 2 || kind == PathKind::Polyline => PartLayout::Run(n),
        n => {
            let first = read_tuple(cursor, offset, description)?;
            let last = read_tuple(cursor, offset + (n - 1) * len, description)?;
            if same_tuple(first, last) {
                PartLayout::Run(n - 1)
            } else {
                PartLayout::Run(n)
            }
        }
    })
}

/// Walk every part of a (Multi)LineString or (Multi)Polygon at the cursor,
/// calling `visit` for each non-empty part. Returns the offset just past the
/// element.
fn walk_parts<F>(
    cursor: &WkbCursor<'_>,
    multi: bool,
    kind: PathKind,
    description: VertexDescription,
    mut visit: F,
) -> Result<usize>
where
    F: FnMut(PartVisit) -> Result<()>,
{
    let len = description.coordinate_len();
    let (element_count, mut offset) = if multi {
        (cursor.read_count(WKB_HEADER_LEN)?, WKB_HEADER_LEN + 4)
    } else {
        (1, 0)
    };

    for _ in 0..element_count {
        offset += WKB_HEADER_LEN; // skip redundant byte order and type fields
        let part_count = match kind {
            PathKind::Polygon => {
                let rings = cursor.read_count(offset)?;
                offset += 4;
                rings
            }
            PathKind::Polyline => 1,
        };

        let mut starts_element = true;
        for _ in 0..part_count {
            let point_count = cursor.read_count(offset)?;
            offset += 4;
            let layout = part_layout(cursor, offset, point_count, kind, description)?;
            if layout != PartLayout::Empty {
                visit(PartVisit {
                    starts_element,
                    offset,
                    layout,
                })?;
                starts_element = false;
            }
            // bounds checked by part_layout
            offset += point_count * len;
        }
    }
    Ok(offset)
}

/// Preallocated output streams for the fill pass.
struct StreamFill {
    description: VertexDescription,
    kind: PathKind,
    position: Vec<f64>,
    zs: Option<Vec<f64>>,
    ms: Option<Vec<f64>>,
    parts: Vec<usize>,
    path_flags: Vec<PathFlags>,
    z_non_default: bool,
    m_non_default: bool,
}

impl StreamFill {
    fn with_capacity(
        description: VertexDescription,
        kind: PathKind,
        vertex_count: usize,
        part_count: usize,
    ) -> Self {
        Self {
            description,
            kind,
            position: Vec::with_capacity(2 * vertex_count),
            zs: description.has_z.then(|| Vec::with_capacity(vertex_count)),
            ms: description.has_m.then(|| Vec::with_capacity(vertex_count)),
            parts: Vec::with_capacity(part_count),
            path_flags: Vec::with_capacity(part_count),
            z_non_default: false,
            m_non_default: false,
        }
    }

    fn push_vertex(&mut self, [x, y, z, m]: [f64; 4]) {
        self.position.push(x);
        self.position.push(y);
        if let Some(zs) = &mut self.zs {
            self.z_non_default |= !Semantics::Z.is_default_value(z);
            zs.push(z);
        }
        if let Some(ms) = &mut self.ms {
            self.m_non_default |= !Semantics::M.is_default_value(m);
            ms.push(m);
        }
    }

    fn push_part(&mut self, cursor: &WkbCursor<'_>, visit: PartVisit) -> Result<()> {
        let len = self.description.coordinate_len();
        match visit.layout {
            PartLayout::Empty => return Ok(()),
            PartLayout::SinglePoint => {
                let tuple = read_tuple(cursor, visit.offset, self.description)?;
                self.push_vertex(tuple);
                self.push_vertex(tuple);
            }
            PartLayout::Run(n) => {
                for i in 0..n {
                    let tuple = read_tuple(cursor, visit.offset + i * len, self.description)?;
                    self.push_vertex(tuple);
                }
            }
        }

        self.parts.push(self.position.len() / 2);
        let mut flags = PathFlags::NONE;
        if self.kind == PathKind::Polygon {
            // WKB rings are always closed
            flags.insert(PathFlags::CLOSED);
            if visit.starts_element {
                flags.insert(PathFlags::OGC_START_POLYGON);
            }
        }
        self.path_flags.push(flags);
        Ok(())
    }

    fn finish(mut self) -> MultiPath {
        if self.zs.is_some() && !self.z_non_default {
            debug!(
                vertices = self.position.len() / 2,
                "dropping all-default Z stream"
            );
            self.zs = None;
        }
        if self.ms.is_some() && !self.m_non_default {
            debug!(
                vertices = self.position.len() / 2,
                "dropping all-default M stream"
            );
            self.ms = None;
        }
        MultiPath::from_streams(
            self.description,
            self.position,
            self.zs,
            self.ms,
            self.parts,
            self.path_flags,
        )
    }
}

/// Run both passes. Returns the model and the bytes the element occupies.
fn import_paths(
    cursor: &WkbCursor<'_>,
    multi: bool,
    kind: PathKind,
    description: VertexDescription,
) -> Result<(MultiPath, usize)> {
    let mut vertex_count = 0usize;
    let mut part_count = 0usize;
    walk_parts(cursor, multi, kind, description, |visit| {
        vertex_count += visit.layout.model_vertices();
        part_count += 1;
        Ok(())
    })?;

    let mut fill = StreamFill::with_capacity(description, kind, vertex_count, part_count);
    let end = walk_parts(cursor, multi, kind, description, |visit| {
        fill.push_part(cursor, visit)
    })?;
    debug_assert_eq!(fill.position.len(), 2 * vertex_count);
    debug_assert_eq!(fill.parts.len(), part_count);

    Ok((fill.finish(), end))
}

/// Reverse outer rings that run counter-clockwise and holes that run
/// clockwise.
///
/// Zero-area rings are left alone, including outer rings. Reversing them
/// would change nothing measurable and would make re-decoding a normalized
/// buffer move vertices.
fn normalize_ring_orientation(polygon: &mut MultiPath) {
    for ring in 0..polygon.part_count() {
        let area = polygon.ring_area(ring);
        let outer = polygon.is_outer_ring(ring);
        if (outer && area < 0.0) || (!outer && area > 0.0) {
            debug!(ring, area, outer, "reversing ring orientation");
            polygon.reverse_path(ring);
        }
    }
}

pub(super) fn import_polygon(
    cursor: &mut WkbCursor<'_>,
    multi: bool,
    description: VertexDescription,
    flags: ImportFlags,
) -> Result<MultiPath> {
    let (mut polygon, end) = import_paths(cursor, multi, PathKind::Polygon, description)?;
    normalize_ring_orientation(&mut polygon);
    if flags.runs_weak_simplicity() {
        polygon.set_simplicity(classify_weak(&polygon));
    }
    cursor.advance(end);
    Ok(polygon)
}

pub(super) fn import_polyline(
    cursor: &mut WkbCursor<'_>,
    multi: bool,
    description: VertexDescription,
) -> Result<MultiPath> {
    let (polyline, end) = import_paths(cursor, multi, PathKind::Polyline, description)?;
    cursor.advance(end);
    Ok(polyline)
}
