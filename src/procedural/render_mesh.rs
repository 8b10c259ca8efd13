/// Geometric description of a small indexed mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderMesh {
    /// Vertex positions.
    pub coords: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates, if any.
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Triangle list indices into `coords`.
    pub indices: Vec<u16>,
}

impl RenderMesh {
    /// Creates a new mesh.
    ///
    /// # Panics
    /// Panics if `uvs` does not have one entry per coordinate, or if an index
    /// is out of bounds.
    pub fn new(coords: Vec<[f32; 3]>, uvs: Option<Vec<[f32; 2]>>, indices: Vec<u16>) -> RenderMesh {
        if let Some(ref uvs) = uvs {
            assert_eq!(uvs.len(), coords.len(), "one uv per vertex is required");
        }
        assert!(
            indices.iter().all(|&i| (i as usize) < coords.len()),
            "index out of bounds"
        );

        RenderMesh {
            coords,
            uvs,
            indices,
        }
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether this mesh has texture coordinates.
    #[inline]
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }
}
