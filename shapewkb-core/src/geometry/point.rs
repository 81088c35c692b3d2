use super::{same_value, Semantics, VertexDescription};

/// A single vertex. An empty point has NaN X; its other values are not
/// meaningful.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    description: VertexDescription,
    x: f64,
    y: f64,
    z: f64,
    m: f64,
}

impl Point {
    pub fn empty(description: VertexDescription) -> Self {
        Self {
            description,
            x: f64::NAN,
            y: f64::NAN,
            z: f64::NAN,
            m: f64::NAN,
        }
    }

    /// Build a point; attributes missing from `description` are ignored.
    pub fn new(description: VertexDescription, x: f64, y: f64, z: f64, m: f64) -> Self {
        if x.is_nan() {
            return Self::empty(description);
        }
        Self {
            description,
            x,
            y,
            z: if description.has_z {
                z
            } else {
                Semantics::Z.default_value()
            },
            m: if description.has_m {
                m
            } else {
                Semantics::M.default_value()
            },
        }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(VertexDescription::XY, x, y, 0.0, f64::NAN)
    }

    pub fn description(&self) -> VertexDescription {
        self.description
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_nan()
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z value, `None` when the point is empty or carries no Z.
    pub fn z(&self) -> Option<f64> {
        (self.description.has_z && !self.is_empty()).then_some(self.z)
    }

    /// M value, `None` when the point is empty or carries no M.
    pub fn m(&self) -> Option<f64> {
        (self.description.has_m && !self.is_empty()).then_some(self.m)
    }
}

/// Two empty points are equal when their descriptions match; otherwise only
/// the attributes the description carries are compared, NaN matching NaN.
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        if self.description != other.description || self.is_empty() != other.is_empty() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        same_value(self.x, other.x)
            && same_value(self.y, other.y)
            && (!self.description.has_z || same_value(self.z, other.z))
            && (!self.description.has_m || same_value(self.m, other.m))
    }
}
