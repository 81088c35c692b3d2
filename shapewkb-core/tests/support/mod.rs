//! WKB blob builder shared by the integration tests.
#![allow(dead_code)]

use shapewkb_core::wkb::ByteOrder;

/// Appends WKB fields in one byte order.
pub struct WkbBuilder {
    order: ByteOrder,
    bytes: Vec<u8>,
}

impl WkbBuilder {
    pub fn le() -> Self {
        Self::new(ByteOrder::LittleEndian)
    }

    pub fn be() -> Self {
        Self::new(ByteOrder::BigEndian)
    }

    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            bytes: Vec::new(),
        }
    }

    pub fn header(mut self, type_code: u32) -> Self {
        self.bytes.push(self.order.marker());
        self.u32(type_code)
    }

    pub fn u32(mut self, value: u32) -> Self {
        match self.order {
            ByteOrder::LittleEndian => self.bytes.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::BigEndian => self.bytes.extend_from_slice(&value.to_be_bytes()),
        }
        self
    }

    pub fn f64s(mut self, values: &[f64]) -> Self {
        for v in values {
            match self.order {
                ByteOrder::LittleEndian => self.bytes.extend_from_slice(&v.to_le_bytes()),
                ByteOrder::BigEndian => self.bytes.extend_from_slice(&v.to_be_bytes()),
            }
        }
        self
    }

    pub fn bytes(mut self, raw: &[u8]) -> Self {
        self.bytes.extend_from_slice(raw);
        self
    }

    /// A point element with the given type code and flat coordinates.
    pub fn point(self, type_code: u32, coords: &[f64]) -> Self {
        self.header(type_code).f64s(coords)
    }

    /// A linestring element; `dims` is the number of values per vertex.
    pub fn line_string(self, type_code: u32, dims: usize, coords: &[f64]) -> Self {
        self.header(type_code)
            .u32((coords.len() / dims) as u32)
            .f64s(coords)
    }

    /// A polygon element, one flat coordinate slice per ring.
    pub fn polygon(self, type_code: u32, dims: usize, rings: &[&[f64]]) -> Self {
        let mut this = self.header(type_code).u32(rings.len() as u32);
        for ring in rings {
            this = this.u32((ring.len() / dims) as u32).f64s(ring);
        }
        this
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Clockwise 10x10 square, closed (Y up).
pub const CW_SQUARE: &[f64] = &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0];

/// Counter-clockwise 10x10 square, closed.
pub const CCW_SQUARE: &[f64] = &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, 0.0, 0.0];

/// Clockwise 2x2 square inside [`CW_SQUARE`], closed.
pub const CW_HOLE: &[f64] = &[4.0, 4.0, 4.0, 6.0, 6.0, 6.0, 6.0, 4.0, 4.0, 4.0];
