use super::RenderMesh;

/// Generates a unit cuboid mesh (half-extents of 0.5), without texture coordinates.
pub fn unit_cuboid() -> RenderMesh {
    let coords = vec![
        [-0.5, -0.5, 0.5],
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, -0.5, 0.5],
        [-0.5, 0.5, 0.5],
        [-0.5, 0.5, -0.5],
        [0.5, 0.5, -0.5],
        [0.5, 0.5, 0.5],
    ];

    #[rustfmt::skip]
    let indices = vec![
        4, 5, 0,  5, 1, 0, // -x
        5, 6, 1,  6, 2, 1, // -z
        6, 7, 3,  2, 6, 3, // +x
        7, 4, 0,  3, 7, 0, // +z
        0, 1, 2,  3, 0, 2, // -y
        7, 6, 5,  4, 7, 5, // +y
    ];

    RenderMesh::new(coords, None, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cuboid_has_twelve_triangles() {
        let cube = unit_cuboid();
        assert_eq!(cube.coords.len(), 8);
        assert_eq!(cube.num_triangles(), 12);
    }

    #[test]
    fn unit_cuboid_is_centered() {
        let cube = unit_cuboid();
        assert_eq!(cube.coords[0], [-0.5, -0.5, 0.5]);
        assert_eq!(cube.coords[6], [0.5, 0.5, -0.5]);
        assert!(!cube.has_uvs());
    }
}
