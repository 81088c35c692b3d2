//! WKB (Well-Known Binary) header layout and type codes.
//!
//! Wire format:
//!   [0x01|0x00]   byte order marker (NDR little-endian / XDR big-endian)
//!   [u32]         geometry type code (in the declared byte order)
//!                   base kind (1=Point, 2=LineString, …, 7=GeometryCollection)
//!                   + 1000 for Z, + 2000 for M, + 3000 for ZM
//!   …             geometry payload

use crate::cursor::WkbCursor;
use crate::error::{Result, ShapeWkbError};
use crate::geometry::{GeometryType, VertexDescription};

// ── Byte order markers ────────────────────────────────────────────────────────
pub const WKB_NDR: u8 = 0x01;
pub const WKB_XDR: u8 = 0x00;

// ── Geometry type codes (OGC base kinds) ──────────────────────────────────────
pub const WKB_POINT: u32 = 1;
pub const WKB_LINESTRING: u32 = 2;
pub const WKB_POLYGON: u32 = 3;
pub const WKB_MULTIPOINT: u32 = 4;
pub const WKB_MULTILINESTRING: u32 = 5;
pub const WKB_MULTIPOLYGON: u32 = 6;
pub const WKB_GEOMETRYCOLLECTION: u32 = 7;

// ── Attribute bands ───────────────────────────────────────────────────────────
pub const WKB_Z_BAND: u32 = 1000;
pub const WKB_M_BAND: u32 = 2000;
pub const WKB_ZM_BAND: u32 = 3000;

/// Byte order marker + type code.
pub const WKB_HEADER_LEN: usize = 5;

/// Byte order of a WKB element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Resolve the order from a header marker. Anything other than NDR reads
    /// as big-endian.
    pub fn from_marker(marker: u8) -> Self {
        if marker == WKB_NDR {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    pub fn marker(self) -> u8 {
        match self {
            ByteOrder::LittleEndian => WKB_NDR,
            ByteOrder::BigEndian => WKB_XDR,
        }
    }
}

/// Base shape kind of a WKB type code, with the attribute band stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WkbGeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl WkbGeometryType {
    pub fn from_code(base: u32) -> Option<Self> {
        match base {
            WKB_POINT => Some(WkbGeometryType::Point),
            WKB_LINESTRING => Some(WkbGeometryType::LineString),
            WKB_POLYGON => Some(WkbGeometryType::Polygon),
            WKB_MULTIPOINT => Some(WkbGeometryType::MultiPoint),
            WKB_MULTILINESTRING => Some(WkbGeometryType::MultiLineString),
            WKB_MULTIPOLYGON => Some(WkbGeometryType::MultiPolygon),
            WKB_GEOMETRYCOLLECTION => Some(WkbGeometryType::GeometryCollection),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            WkbGeometryType::Point => WKB_POINT,
            WkbGeometryType::LineString => WKB_LINESTRING,
            WkbGeometryType::Polygon => WKB_POLYGON,
            WkbGeometryType::MultiPoint => WKB_MULTIPOINT,
            WkbGeometryType::MultiLineString => WKB_MULTILINESTRING,
            WkbGeometryType::MultiPolygon => WKB_MULTIPOLYGON,
            WkbGeometryType::GeometryCollection => WKB_GEOMETRYCOLLECTION,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WkbGeometryType::Point => "Point",
            WkbGeometryType::LineString => "LineString",
            WkbGeometryType::Polygon => "Polygon",
            WkbGeometryType::MultiPoint => "MultiPoint",
            WkbGeometryType::MultiLineString => "MultiLineString",
            WkbGeometryType::MultiPolygon => "MultiPolygon",
            WkbGeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// True for the kinds whose payload starts with an element count.
    pub fn is_multi(self) -> bool {
        matches!(
            self,
            WkbGeometryType::MultiPoint
                | WkbGeometryType::MultiLineString
                | WkbGeometryType::MultiPolygon
                | WkbGeometryType::GeometryCollection
        )
    }

    /// Logical shape family used to check a caller's target type.
    ///
    /// Collections have no family and map to [`GeometryType::Unknown`].
    pub fn shape_family(self) -> GeometryType {
        match self {
            WkbGeometryType::Point => GeometryType::Point,
            WkbGeometryType::MultiPoint => GeometryType::MultiPoint,
            WkbGeometryType::LineString | WkbGeometryType::MultiLineString => {
                GeometryType::Polyline
            }
            WkbGeometryType::Polygon | WkbGeometryType::MultiPolygon => GeometryType::Polygon,
            WkbGeometryType::GeometryCollection => GeometryType::Unknown,
        }
    }
}

/// A WKB type code split into its base kind and attribute band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WkbTypeCode {
    pub kind: WkbGeometryType,
    pub has_z: bool,
    pub has_m: bool,
}

impl WkbTypeCode {
    /// Split a raw type code.
    ///
    /// # Example
    ///
    /// ```
    /// use shapewkb_core::wkb::{WkbGeometryType, WkbTypeCode};
    ///
    /// let code = WkbTypeCode::parse(3006).unwrap();
    /// assert_eq!(code.kind, WkbGeometryType::MultiPolygon);
    /// assert!(code.has_z && code.has_m);
    /// assert!(WkbTypeCode::parse(9999).is_err());
    /// ```
    pub fn parse(raw: u32) -> Result<Self> {
        let (has_z, has_m) = match raw / 1000 {
            0 => (false, false),
            1 => (true, false),
            2 => (false, true),
            3 => (true, true),
            _ => return Err(ShapeWkbError::InvalidTypeCode(raw)),
        };
        let kind = WkbGeometryType::from_code(raw % 1000)
            .ok_or(ShapeWkbError::InvalidTypeCode(raw))?;
        Ok(Self { kind, has_z, has_m })
    }

    pub fn code(self) -> u32 {
        let band = match (self.has_z, self.has_m) {
            (false, false) => 0,
            (true, false) => WKB_Z_BAND,
            (false, true) => WKB_M_BAND,
            (true, true) => WKB_ZM_BAND,
        };
        self.kind.code() + band
    }

    pub fn description(self) -> VertexDescription {
        VertexDescription::new(self.has_z, self.has_m)
    }

    /// Bytes per encoded coordinate tuple.
    pub fn coordinate_len(self) -> usize {
        self.description().coordinate_len()
    }
}

/// Parsed WKB element header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WkbHeader {
    pub byte_order: ByteOrder,
    /// Type code as found on the wire.
    pub raw_type: u32,
    pub type_code: WkbTypeCode,
}

/// Peek at a WKB header without decoding the payload.
///
/// # Example
///
/// ```
/// use shapewkb_core::wkb::{parse_wkb_header, ByteOrder, WkbGeometryType};
///
/// let mut blob = vec![0x00];
/// blob.extend_from_slice(&1003u32.to_be_bytes());
/// let hdr = parse_wkb_header(&blob).unwrap();
/// assert_eq!(hdr.byte_order, ByteOrder::BigEndian);
/// assert_eq!(hdr.type_code.kind, WkbGeometryType::Polygon);
/// assert!(hdr.type_code.has_z);
/// ```
pub fn parse_wkb_header(blob: &[u8]) -> Result<WkbHeader> {
    let mut cursor = WkbCursor::new(blob, ByteOrder::LittleEndian);
    read_header(&mut cursor)
}

/// Read the header at the cursor position and switch the cursor to the
/// declared byte order. The cursor is not advanced.
pub(crate) fn read_header(cursor: &mut WkbCursor<'_>) -> Result<WkbHeader> {
    let byte_order = ByteOrder::from_marker(cursor.read_u8(0)?);
    cursor.set_byte_order(byte_order);
    let raw_type = cursor.read_u32(1)?;
    let type_code = WkbTypeCode::parse(raw_type)?;
    Ok(WkbHeader {
        byte_order,
        raw_type,
        type_code,
    })
}

pub(crate) fn dimensions_label(has_z: bool, has_m: bool) -> &'static str {
    match (has_z, has_m) {
        (true, true) => "ZM",
        (true, false) => "Z",
        (false, true) => "M",
        (false, false) => "XY",
    }
}

/// Return a human-readable geometry type name.
///
/// # Example
///
/// ```
/// use shapewkb_core::wkb::geom_type_name;
///
/// assert_eq!(geom_type_name(3), "Polygon");
/// assert_eq!(geom_type_name(1001), "Point Z");
/// assert_eq!(geom_type_name(3005), "MultiLineString ZM");
/// assert_eq!(geom_type_name(42), "Unknown");
/// ```
pub fn geom_type_name(raw_type: u32) -> String {
    match WkbTypeCode::parse(raw_type) {
        Ok(code) if code.has_z || code.has_m => format!(
            "{} {}",
            code.kind.name(),
            dimensions_label(code.has_z, code.has_m)
        ),
        Ok(code) => code.kind.name().to_string(),
        Err(_) => "Unknown".to_string(),
    }
}
