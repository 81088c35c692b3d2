//! Cheap structural simplicity hint for decoded polygons.
//!
//! This is not a topology check: rings may still cross each other or
//! themselves. Downstream operators read the hint to decide whether a full
//! simplify pass is needed.

use super::MultiPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Simplicity {
    /// Not classified (for example the import was flagged non-trusted).
    #[default]
    Unknown,
    /// A ring is structurally degenerate.
    NotSimple,
    /// Every ring passed the structural checks.
    Weak,
}

/// Classify a polygon.
///
/// A ring passes when it has at least three vertices, finite X,Y values, no
/// two consecutive equal vertices (the implied closing segment included)
/// and a non-zero area.
pub fn classify_weak(polygon: &MultiPath) -> Simplicity {
    for ring in 0..polygon.part_count() {
        if !ring_is_weak_simple(polygon, ring) {
            return Simplicity::NotSimple;
        }
    }
    Simplicity::Weak
}

fn ring_is_weak_simple(polygon: &MultiPath, ring: usize) -> bool {
    let range = polygon.path_range(ring);
    if range.len() < 3 {
        return false;
    }
    let mut prev = polygon.xy(range.end - 1);
    for vertex in range {
        let xy = polygon.xy(vertex);
        if !xy.0.is_finite() || !xy.1.is_finite() || xy == prev {
            return false;
        }
        prev = xy;
    }
    polygon.ring_area(ring) != 0.0
}
