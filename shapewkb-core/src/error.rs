use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShapeWkbError {
    #[error("invalid WKB type code: {0}")]
    InvalidTypeCode(u32),

    #[error("invalid shape type: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("buffer bounds: {len} bytes at offset {offset} exceed buffer of {available} bytes")]
    BufferBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("inconsistent attributes: collection is {expected}, element is {found}")]
    InconsistentAttributes {
        expected: &'static str,
        found: &'static str,
    },

    #[error("geozero error: {0}")]
    Geozero(#[from] geozero::error::GeozeroError),
}

pub type Result<T> = std::result::Result<T, ShapeWkbError>;
