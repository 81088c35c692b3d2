//! Multi-part, vertex-array geometry model produced by the WKB importers.
//!
//! Coordinates live in flat streams: `position` holds interleaved X,Y and the
//! optional `z` / `m` streams run parallel to it, one value per vertex.

mod multi_path;
mod multi_point;
mod point;
pub mod simplicity;

pub use multi_path::{MultiPath, PathFlags};
pub use multi_point::MultiPoint;
pub use point::Point;
pub use simplicity::Simplicity;

/// Logical shape family, also used as the caller's target-type hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryType {
    /// Wildcard: accept any decoded kind.
    #[default]
    Unknown,
    Point,
    MultiPoint,
    Polyline,
    Polygon,
}

impl GeometryType {
    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Unknown => "Unknown",
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::Polyline => "Polyline",
            GeometryType::Polygon => "Polygon",
        }
    }
}

/// Per-vertex attribute beyond X,Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantics {
    Z,
    M,
}

impl Semantics {
    /// Value an attribute takes when its stream is absent.
    pub fn default_value(self) -> f64 {
        match self {
            Semantics::Z => 0.0,
            Semantics::M => f64::NAN,
        }
    }

    /// Bitwise comparison against the default; every NaN counts as NaN.
    ///
    /// Any NaN payload matches the M default, so an M stream holding only
    /// non-canonical NaNs is still dropped.
    pub fn is_default_value(self, value: f64) -> bool {
        let default = self.default_value();
        if default.is_nan() {
            value.is_nan()
        } else {
            value.to_bits() == default.to_bits()
        }
    }
}

/// Which attributes the vertices of a geometry carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexDescription {
    pub has_z: bool,
    pub has_m: bool,
}

impl VertexDescription {
    pub const XY: VertexDescription = VertexDescription {
        has_z: false,
        has_m: false,
    };

    pub const fn new(has_z: bool, has_m: bool) -> Self {
        Self { has_z, has_m }
    }

    pub fn has_attribute(self, semantics: Semantics) -> bool {
        match semantics {
            Semantics::Z => self.has_z,
            Semantics::M => self.has_m,
        }
    }

    /// Bytes of one encoded X,Y[,Z][,M] tuple.
    pub fn coordinate_len(self) -> usize {
        8 * (2 + usize::from(self.has_z) + usize::from(self.has_m))
    }

    /// "XY", "Z", "M" or "ZM".
    pub fn label(self) -> &'static str {
        crate::wkb::dimensions_label(self.has_z, self.has_m)
    }
}

/// Coordinate equality where NaN matches NaN.
pub(crate) fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

pub(crate) fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&a, &b)| same_value(a, b))
}

pub(crate) fn same_stream(a: Option<&[f64]>, b: Option<&[f64]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => same_values(a, b),
        _ => false,
    }
}

/// A decoded geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    Polyline(MultiPath),
    Polygon(MultiPath),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::Polyline(_) => GeometryType::Polyline,
            Geometry::Polygon(_) => GeometryType::Polygon,
        }
    }

    pub fn description(&self) -> VertexDescription {
        match self {
            Geometry::Point(p) => p.description(),
            Geometry::MultiPoint(mp) => mp.description(),
            Geometry::Polyline(path) | Geometry::Polygon(path) => path.description(),
        }
    }

    pub fn has_z(&self) -> bool {
        self.description().has_z
    }

    pub fn has_m(&self) -> bool {
        self.description().has_m
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(p) => p.is_empty(),
            Geometry::MultiPoint(mp) => mp.is_empty(),
            Geometry::Polyline(path) | Geometry::Polygon(path) => path.is_empty(),
        }
    }

    /// Number of vertices in the model (not on the wire).
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Point(p) => usize::from(!p.is_empty()),
            Geometry::MultiPoint(mp) => mp.vertex_count(),
            Geometry::Polyline(path) | Geometry::Polygon(path) => path.vertex_count(),
        }
    }

    pub fn as_multi_path(&self) -> Option<&MultiPath> {
        match self {
            Geometry::Polyline(path) | Geometry::Polygon(path) => Some(path),
            _ => None,
        }
    }
}
