//! OGC structure import: nested `GEOMETRYCOLLECTION`s as a tree.
//!
//! The walker keeps an explicit stack of open collections instead of
//! recursing, so nesting depth is bounded by the buffer, not by the native
//! call stack. The tree drops iteratively for the same reason.

use tracing::trace;

use super::import_element;
use crate::cursor::WkbCursor;
use crate::error::{Result, ShapeWkbError};
use crate::flags::ImportFlags;
use crate::geometry::{Geometry, GeometryType, VertexDescription};
use crate::wkb::{read_header, ByteOrder, WkbGeometryType, WKB_HEADER_LEN};

/// Node of a decoded OGC structure.
#[derive(Debug, Clone, PartialEq)]
pub enum OgcStructure {
    /// A non-collection element with its OGC kind (band stripped).
    Leaf {
        kind: WkbGeometryType,
        geometry: Geometry,
    },
    /// A `GEOMETRYCOLLECTION` and its elements in encoded order.
    Collection {
        description: VertexDescription,
        children: Vec<OgcStructure>,
    },
}

impl OgcStructure {
    pub fn kind(&self) -> WkbGeometryType {
        match self {
            OgcStructure::Leaf { kind, .. } => *kind,
            OgcStructure::Collection { .. } => WkbGeometryType::GeometryCollection,
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match self {
            OgcStructure::Leaf { geometry, .. } => Some(geometry),
            OgcStructure::Collection { .. } => None,
        }
    }

    pub fn children(&self) -> &[OgcStructure] {
        match self {
            OgcStructure::Leaf { .. } => &[],
            OgcStructure::Collection { children, .. } => children,
        }
    }

    pub fn description(&self) -> VertexDescription {
        match self {
            OgcStructure::Leaf { geometry, .. } => geometry.description(),
            OgcStructure::Collection { description, .. } => *description,
        }
    }

    pub fn has_z(&self) -> bool {
        self.description().has_z
    }

    pub fn has_m(&self) -> bool {
        self.description().has_m
    }

    /// Depth-first iterator over the leaves, in encoded order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            pending: vec![std::slice::from_ref(self)],
        }
    }
}

impl Drop for OgcStructure {
    fn drop(&mut self) {
        let mut pending = match self {
            OgcStructure::Collection { children, .. } => std::mem::take(children),
            OgcStructure::Leaf { .. } => return,
        };
        while let Some(mut node) = pending.pop() {
            if let OgcStructure::Collection { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

/// Iterator returned by [`OgcStructure::leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    pending: Vec<&'a [OgcStructure]>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (WkbGeometryType, &'a Geometry);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(level) = self.pending.last_mut() {
            let Some((node, rest)) = level.split_first() else {
                self.pending.pop();
                continue;
            };
            *level = rest;
            match node {
                OgcStructure::Leaf { kind, geometry } => return Some((*kind, geometry)),
                OgcStructure::Collection { children, .. } => self.pending.push(children),
            }
        }
        None
    }
}

/// An open collection on the walker stack.
struct Frame {
    description: VertexDescription,
    expected: usize,
    consumed: usize,
    children: Vec<OgcStructure>,
}

impl Frame {
    fn new(description: VertexDescription, expected: usize) -> Self {
        Self {
            description,
            expected,
            consumed: 0,
            children: Vec::new(),
        }
    }

    fn is_complete(&self) -> bool {
        self.consumed == self.expected
    }

    fn into_structure(self) -> OgcStructure {
        OgcStructure::Collection {
            description: self.description,
            children: self.children,
        }
    }
}

/// Decode a WKB element, possibly a nested `GEOMETRYCOLLECTION`, as a tree.
///
/// The first element read fixes Z/M presence for the whole tree; any later
/// element that disagrees fails with
/// [`ShapeWkbError::InconsistentAttributes`].
///
/// # Example
///
/// ```
/// use shapewkb_core::{decode_structure, ImportFlags};
/// use shapewkb_core::wkb::WkbGeometryType;
///
/// // GEOMETRYCOLLECTION(POINT(1 2))
/// let mut blob = vec![0x01];
/// blob.extend_from_slice(&7u32.to_le_bytes());
/// blob.extend_from_slice(&1u32.to_le_bytes());
/// blob.push(0x01);
/// blob.extend_from_slice(&1u32.to_le_bytes());
/// blob.extend_from_slice(&1.0f64.to_le_bytes());
/// blob.extend_from_slice(&2.0f64.to_le_bytes());
///
/// let (tree, consumed) = decode_structure(&blob, ImportFlags::DEFAULT).unwrap();
/// assert_eq!(consumed, blob.len());
/// assert_eq!(tree.kind(), WkbGeometryType::GeometryCollection);
/// assert_eq!(tree.children().len(), 1);
/// assert_eq!(tree.children()[0].kind(), WkbGeometryType::Point);
/// ```
pub fn decode_structure(buf: &[u8], flags: ImportFlags) -> Result<(OgcStructure, usize)> {
    let mut cursor = WkbCursor::new(buf, ByteOrder::LittleEndian);
    let mut dimensions: Option<VertexDescription> = None;

    // synthetic root holding the single top-level element
    let mut stack = vec![Frame::new(VertexDescription::XY, 1)];
    let mut root = None;

    while let Some(frame) = stack.last_mut() {
        if frame.is_complete() {
            if let Some(done) = stack.pop() {
                match stack.last_mut() {
                    Some(parent) => parent.children.push(done.into_structure()),
                    None => root = Some(done),
                }
            }
            continue;
        }
        frame.consumed += 1;

        let header = read_header(&mut cursor)?;
        let description = header.type_code.description();
        match dimensions {
            None => dimensions = Some(description),
            Some(expected) if expected != description => {
                return Err(ShapeWkbError::InconsistentAttributes {
                    expected: expected.label(),
                    found: description.label(),
                });
            }
            Some(_) => {}
        }

        if header.type_code.kind == WkbGeometryType::GeometryCollection {
            let count = cursor.read_count(WKB_HEADER_LEN)?;
            trace!(
                count,
                depth = stack.len(),
                offset = cursor.adjustment(),
                "entering geometry collection"
            );
            cursor.advance(WKB_HEADER_LEN + 4);
            stack.push(Frame::new(description, count));
        } else {
            let geometry = import_element(&mut cursor, GeometryType::Unknown, flags)?;
            let leaf = OgcStructure::Leaf {
                kind: header.type_code.kind,
                geometry,
            };
            if let Some(parent) = stack.last_mut() {
                parent.children.push(leaf);
            }
        }
    }

    let tree = root
        .and_then(|mut root| root.children.pop())
        .ok_or(ShapeWkbError::BufferBounds {
            offset: 0,
            len: WKB_HEADER_LEN,
            available: buf.len(),
        })?;
    trace!(consumed = cursor.adjustment(), "decoded OGC structure");
    Ok((tree, cursor.adjustment()))
}
