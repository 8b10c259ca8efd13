use super::RenderMesh;

/// Generates a unit square on the XY plane, centered at the origin.
///
/// Texture coordinates put the first row of an image at the top edge (+Y),
/// which is how guide-view pixels are laid out.
pub fn unit_square() -> RenderMesh {
    let coords = vec![
        [-0.5, -0.5, 0.0],
        [0.5, -0.5, 0.0],
        [0.5, 0.5, 0.0],
        [-0.5, 0.5, 0.0],
    ];
    let uvs = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let indices = vec![0, 1, 2, 0, 2, 3];

    RenderMesh::new(coords, Some(uvs), indices)
}

/// Generates the outline of the unit square as a flat frame of triangles.
///
/// The frame lies inside the square's edges and is `thickness` wide, so it
/// stays within the same bounds as [`unit_square`].
///
/// # Panics
/// Panics if `thickness` is not in `(0, 0.5)`.
pub fn unit_square_outline(thickness: f32) -> RenderMesh {
    assert!(
        thickness > 0.0 && thickness < 0.5,
        "outline thickness must be in (0, 0.5)"
    );

    let o = 0.5;
    let i = 0.5 - thickness;

    // Outer ring 0..4, inner ring 4..8, both counter-clockwise from bottom-left.
    let coords = vec![
        [-o, -o, 0.0],
        [o, -o, 0.0],
        [o, o, 0.0],
        [-o, o, 0.0],
        [-i, -i, 0.0],
        [i, -i, 0.0],
        [i, i, 0.0],
        [-i, i, 0.0],
    ];

    let mut indices = Vec::with_capacity(24);
    for side in 0..4u16 {
        let next = (side + 1) % 4;
        indices.extend_from_slice(&[side, next, 4 + next, side, 4 + next, 4 + side]);
    }

    RenderMesh::new(coords, None, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_has_two_triangles_and_uvs() {
        let square = unit_square();
        assert_eq!(square.num_triangles(), 2);
        assert!(square.has_uvs());
        // Top-left corner samples the first image row.
        assert_eq!(square.uvs.as_ref().unwrap()[3], [0.0, 0.0]);
    }

    #[test]
    fn outline_is_a_frame_of_eight_triangles() {
        let outline = unit_square_outline(0.05);
        assert_eq!(outline.num_triangles(), 8);
        assert!(!outline.has_uvs());
        assert!(outline
            .coords
            .iter()
            .all(|c| c[0].abs() <= 0.5 && c[1].abs() <= 0.5));
        assert!((outline.coords[4][0] + 0.45).abs() < 1.0e-6);
        assert!((outline.coords[6][1] - 0.45).abs() < 1.0e-6);
    }

    #[test]
    #[should_panic]
    fn outline_thicker_than_half_panics() {
        let _ = unit_square_outline(0.5);
    }
}
