use std::ops::{BitOr, Range};

use super::simplicity::Simplicity;
use super::{same_stream, same_values, Semantics, VertexDescription};

/// Per-part bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PathFlags(u8);

impl PathFlags {
    pub const NONE: PathFlags = PathFlags(0);
    /// The part is a closed ring; its closing vertex is implicit.
    pub const CLOSED: PathFlags = PathFlags(0x01);
    /// The part is the outer ring of an OGC polygon; following parts up to
    /// the next flagged one are its holes.
    pub const OGC_START_POLYGON: PathFlags = PathFlags(0x04);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: PathFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: PathFlags) {
        self.0 |= other.0;
    }
}

impl BitOr for PathFlags {
    type Output = PathFlags;

    fn bitor(self, rhs: PathFlags) -> PathFlags {
        PathFlags(self.0 | rhs.0)
    }
}

/// Polyline or polygon: vertex streams split into parts.
///
/// `parts[i]` is the exclusive end vertex of part `i`; part 0 starts at
/// vertex 0. Every part holds at least two vertices.
#[derive(Debug, Clone)]
pub struct MultiPath {
    description: VertexDescription,
    position: Vec<f64>,
    z: Option<Vec<f64>>,
    m: Option<Vec<f64>>,
    parts: Vec<usize>,
    path_flags: Vec<PathFlags>,
    simplicity: Simplicity,
}

impl MultiPath {
    pub fn empty(description: VertexDescription) -> Self {
        Self::from_streams(
            description,
            Vec::new(),
            None,
            None,
            Vec::new(),
            Vec::new(),
        )
    }

    /// Take ownership of already-filled streams without copying them.
    ///
    /// A `None` stream for an attribute present in `description` means every
    /// vertex carries the attribute's default value.
    pub fn from_streams(
        description: VertexDescription,
        position: Vec<f64>,
        z: Option<Vec<f64>>,
        m: Option<Vec<f64>>,
        parts: Vec<usize>,
        path_flags: Vec<PathFlags>,
    ) -> Self {
        debug_assert_eq!(parts.len(), path_flags.len());
        debug_assert_eq!(parts.last().copied().unwrap_or(0) * 2, position.len());
        debug_assert!(parts
            .iter()
            .scan(0, |start, &end| {
                let len = end.checked_sub(*start);
                *start = end;
                Some(len)
            })
            .all(|len| len.is_some_and(|len| len >= 2)));
        Self {
            description,
            position,
            z: z.filter(|_| description.has_z),
            m: m.filter(|_| description.has_m),
            parts,
            path_flags,
            simplicity: Simplicity::Unknown,
        }
    }

    pub fn description(&self) -> VertexDescription {
        self.description
    }

    pub fn vertex_count(&self) -> usize {
        self.position.len() / 2
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn z_values(&self) -> Option<&[f64]> {
        self.z.as_deref()
    }

    pub fn m_values(&self) -> Option<&[f64]> {
        self.m.as_deref()
    }

    /// Exclusive end vertex of each part.
    pub fn parts(&self) -> &[usize] {
        &self.parts
    }

    pub fn path_flags(&self) -> &[PathFlags] {
        &self.path_flags
    }

    pub fn simplicity(&self) -> Simplicity {
        self.simplicity
    }

    pub fn set_simplicity(&mut self, simplicity: Simplicity) {
        self.simplicity = simplicity;
    }

    pub fn path_start(&self, path: usize) -> usize {
        if path == 0 {
            0
        } else {
            self.parts[path - 1]
        }
    }

    pub fn path_end(&self, path: usize) -> usize {
        self.parts[path]
    }

    pub fn path_range(&self, path: usize) -> Range<usize> {
        self.path_start(path)..self.path_end(path)
    }

    pub fn path_size(&self, path: usize) -> usize {
        self.path_range(path).len()
    }

    pub fn is_closed_path(&self, path: usize) -> bool {
        self.path_flags[path].contains(PathFlags::CLOSED)
    }

    /// True when `path` begins a new OGC polygon (an outer ring).
    pub fn is_outer_ring(&self, path: usize) -> bool {
        self.path_flags[path].contains(PathFlags::OGC_START_POLYGON)
    }

    /// Ranges of parts forming one OGC polygon each: an outer ring followed
    /// by its holes.
    pub fn ogc_polygon_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for path in 0..self.part_count() {
            match ranges.last_mut() {
                Some(range) if !self.is_outer_ring(path) => range.end = path + 1,
                _ => ranges.push(path..path + 1),
            }
        }
        ranges
    }

    pub fn xy(&self, vertex: usize) -> (f64, f64) {
        (self.position[2 * vertex], self.position[2 * vertex + 1])
    }

    pub fn z(&self, vertex: usize) -> Option<f64> {
        self.description.has_z.then(|| match &self.z {
            Some(z) => z[vertex],
            None => Semantics::Z.default_value(),
        })
    }

    pub fn m(&self, vertex: usize) -> Option<f64> {
        self.description.has_m.then(|| match &self.m {
            Some(m) => m[vertex],
            None => Semantics::M.default_value(),
        })
    }

    /// Signed planar area of a ring, positive when the ring runs clockwise
    /// (Y up). The closing segment back to the start vertex is implied.
    ///
    /// # Example
    ///
    /// ```
    /// use shapewkb_core::geometry::{MultiPath, PathFlags, VertexDescription};
    ///
    /// let ring = MultiPath::from_streams(
    ///     VertexDescription::XY,
    ///     vec![0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0],
    ///     None,
    ///     None,
    ///     vec![4],
    ///     vec![PathFlags::CLOSED | PathFlags::OGC_START_POLYGON],
    /// );
    /// assert_eq!(ring.ring_area(0), 100.0);
    /// assert!(ring.is_clockwise_ring(0));
    /// ```
    pub fn ring_area(&self, path: usize) -> f64 {
        let range = self.path_range(path);
        if range.len() < 3 {
            return 0.0;
        }
        // relative to the first vertex to keep the products small
        let (x0, y0) = self.xy(range.start);
        let mut twice_area = 0.0;
        let (mut px, mut py) = (0.0, 0.0);
        for vertex in range.start + 1..range.end {
            let (x, y) = self.xy(vertex);
            let (dx, dy) = (x - x0, y - y0);
            twice_area += px * dy - dx * py;
            px = dx;
            py = dy;
        }
        -0.5 * twice_area
    }

    pub fn is_clockwise_ring(&self, path: usize) -> bool {
        self.ring_area(path) > 0.0
    }

    /// Sum of ring areas: outer rings count positive, holes negative.
    pub fn calculate_area_2d(&self) -> f64 {
        (0..self.part_count()).map(|path| self.ring_area(path)).sum()
    }

    /// Reverse the vertex order of one part in place. A closed path keeps
    /// its start vertex.
    pub fn reverse_path(&mut self, path: usize) {
        let range = self.path_range(path);
        let start = range.start + usize::from(self.is_closed_path(path));
        let end = range.end;
        if end <= start + 1 {
            return;
        }

        let xy = &mut self.position[2 * start..2 * end];
        let n = end - start;
        for i in 0..n / 2 {
            let j = n - 1 - i;
            xy.swap(2 * i, 2 * j);
            xy.swap(2 * i + 1, 2 * j + 1);
        }
        if let Some(z) = &mut self.z {
            z[start..end].reverse();
        }
        if let Some(m) = &mut self.m {
            m[start..end].reverse();
        }
    }
}

/// Streams compare value by value with NaN matching NaN, so a decoded path
/// with NaN measures still equals itself.
impl PartialEq for MultiPath {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.parts == other.parts
            && self.path_flags == other.path_flags
            && self.simplicity == other.simplicity
            && same_values(&self.position, &other.position)
            && same_stream(self.z.as_deref(), other.z.as_deref())
            && same_stream(self.m.as_deref(), other.m.as_deref())
    }
}
