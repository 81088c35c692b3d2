use super::{same_stream, same_values, Semantics, VertexDescription};

/// Unordered vertex set without parts.
#[derive(Debug, Clone)]
pub struct MultiPoint {
    description: VertexDescription,
    position: Vec<f64>,
    z: Option<Vec<f64>>,
    m: Option<Vec<f64>>,
}

impl MultiPoint {
    pub fn empty(description: VertexDescription) -> Self {
        Self {
            description,
            position: Vec::new(),
            z: None,
            m: None,
        }
    }

    /// Take ownership of already-filled streams.
    ///
    /// A `None` stream for an attribute present in `description` means every
    /// vertex carries the attribute's default value.
    pub fn from_streams(
        description: VertexDescription,
        position: Vec<f64>,
        z: Option<Vec<f64>>,
        m: Option<Vec<f64>>,
    ) -> Self {
        debug_assert!(position.len() % 2 == 0);
        debug_assert!(z.as_ref().is_none_or(|z| z.len() * 2 == position.len()));
        debug_assert!(m.as_ref().is_none_or(|m| m.len() * 2 == position.len()));
        Self {
            description,
            position,
            z: z.filter(|_| description.has_z),
            m: m.filter(|_| description.has_m),
        }
    }

    pub fn description(&self) -> VertexDescription {
        self.description
    }

    pub fn vertex_count(&self) -> usize {
        self.position.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
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
}

impl PartialEq for MultiPoint {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && same_values(&self.position, &other.position)
            && same_stream(self.z.as_deref(), other.z.as_deref())
            && same_stream(self.m.as_deref(), other.m.as_deref())
    }
}
