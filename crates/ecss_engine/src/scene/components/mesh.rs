//! Mesh component
//!
//! Generic storage for vertex-attribute arrays (positions, colors,
//! normals, bone weights, bone ids) plus an index sequence for primitive
//! assembly. Positions and colors are 4-component rows with a trailing
//! homogeneous 1.0. The mesh itself knows nothing about the graphics
//! backend; a render system turns these arrays into GPU resources.
//!
//! Row-count consistency across attributes and index range are validated
//! at attachment time, not discovered during rendering.

use crate::scene::error::SceneError;

use super::Component;

/// One named vertex-attribute array
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    /// Attribute name, e.g. `position`, `color`, `normal`, `bone_weight`
    pub name: String,
    /// One 4-component row per vertex
    pub data: Vec<[f32; 4]>,
}

impl VertexAttribute {
    /// Create a named attribute array
    pub fn new(name: impl Into<String>, data: Vec<[f32; 4]>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Vertex-attribute arrays and primitive indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshComponent {
    attributes: Vec<VertexAttribute>,
    indices: Vec<u32>,
    initialized: bool,
}

impl MeshComponent {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows shared by every attached attribute; `None` while empty
    pub fn row_count(&self) -> Option<usize> {
        self.attributes.first().map(|a| a.data.len())
    }

    /// Attach a vertex-attribute array
    ///
    /// Fails if the row count differs from the attributes already attached.
    pub fn add_attribute(&mut self, attribute: VertexAttribute) -> Result<(), SceneError> {
        if let Some(expected) = self.row_count() {
            if attribute.data.len() != expected {
                return Err(SceneError::AttributeLengthMismatch {
                    name: attribute.name,
                    rows: attribute.data.len(),
                    expected,
                });
            }
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// Set the index sequence for primitive assembly
    ///
    /// Fails if any index references a vertex row that does not exist.
    pub fn set_indices(&mut self, indices: Vec<u32>) -> Result<(), SceneError> {
        let rows = self.row_count().unwrap_or(0);
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= rows) {
            return Err(SceneError::IndexOutOfRange { index, rows });
        }
        self.indices = indices;
        Ok(())
    }

    /// All attached attributes in attachment order
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// The index sequence
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Whether the one-time init pass has run for this mesh
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Component for MeshComponent {
    fn init(&mut self) {
        self.initialized = true;
    }
}
