//! Simplistic Wavefront OBJ parser.
//!
//! Only positions, texture coordinates and faces are read. Faces are
//! triangulated as fans and flattened into a non-indexed triangle list, which
//! is what the textured pipeline draws. Normals, groups and materials are
//! skipped.

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use crate::error::{Error, Result};

/// CPU-side vertex data of a model, ready to be uploaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelData {
    /// Triangle list positions, three per triangle.
    pub vertices: Vec<[f32; 3]>,
    /// One texture coordinate per vertex.
    pub texture_coordinates: Vec<[f32; 2]>,
}

impl ModelData {
    /// Number of vertices to draw.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Size of the position buffer in bytes.
    #[inline]
    pub fn vertices_byte_len(&self) -> u64 {
        (std::mem::size_of::<f32>() * 3 * self.vertex_count()) as u64
    }

    /// Size of the texture coordinate buffer in bytes.
    #[inline]
    pub fn texture_coordinates_byte_len(&self) -> u64 {
        (std::mem::size_of::<f32>() * 2 * self.vertex_count()) as u64
    }
}

/// Reads and parses an OBJ file.
///
/// A file without any face is an error, so callers never upload an empty model.
/// Bytes that are not UTF-8 are replaced before parsing; they can only appear
/// in comments and names, which are skipped.
pub fn parse_file(path: &Path) -> Result<ModelData> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let data = parse(&String::from_utf8_lossy(&bytes))?;

    if data.vertices.is_empty() {
        return Err(Error::EmptyMesh(path.display().to_string()));
    }

    Ok(data)
}

/// Parses OBJ source text.
pub fn parse(source: &str) -> Result<ModelData> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut data = ModelData::default();

    for (i, line) in source.lines().enumerate() {
        let line_no = i + 1;
        let line = match line.find('#') {
            Some(comment) => &line[..comment],
            None => line,
        };

        let mut words = line.split_whitespace();

        match words.next() {
            Some("v") => {
                let [x, y, z] = parse_floats::<3>(&mut words, 3, line_no)?;
                positions.push([x, y, z]);
            }
            Some("vt") => {
                // The v component is optional and defaults to 0.
                let [u, v] = parse_floats::<2>(&mut words, 1, line_no)?;
                uvs.push([u, v]);
            }
            Some("f") => {
                let corners = words
                    .map(|w| parse_corner(w, positions.len(), uvs.len(), line_no))
                    .collect::<Result<Vec<_>>>()?;

                if corners.len() < 3 {
                    return Err(parse_error(
                        line_no,
                        format!("face has {} vertices, at least 3 needed", corners.len()),
                    ));
                }

                for k in 1..corners.len() - 1 {
                    for corner in [corners[0], corners[k], corners[k + 1]] {
                        data.vertices.push(positions[corner.0]);
                        data.texture_coordinates
                            .push(corner.1.map(|t| uvs[t]).unwrap_or([0.0, 0.0]));
                    }
                }
            }
            // Normals, groups, smoothing, materials and blank lines.
            _ => {}
        }
    }

    Ok(data)
}

fn parse_error(line: usize, message: String) -> Error {
    Error::ObjParse { line, message }
}

/// Reads up to `N` floats; missing trailing components past `required` are 0.
fn parse_floats<const N: usize>(
    words: &mut SplitWhitespace,
    required: usize,
    line: usize,
) -> Result<[f32; N]> {
    let mut out = [0.0; N];

    for (k, slot) in out.iter_mut().enumerate() {
        match words.next() {
            Some(w) => {
                *slot = w
                    .parse()
                    .map_err(|_| parse_error(line, format!("invalid number `{}`", w)))?;
            }
            None if k < required => {
                return Err(parse_error(
                    line,
                    format!("expected {} components, found {}", required, k),
                ));
            }
            None => break,
        }
    }

    Ok(out)
}

/// Parses `v`, `v/vt`, `v//vn` or `v/vt/vn` into zero-based indices.
fn parse_corner(
    word: &str,
    npositions: usize,
    nuvs: usize,
    line: usize,
) -> Result<(usize, Option<usize>)> {
    let mut parts = word.split('/');

    let position = match parts.next() {
        Some(p) if !p.is_empty() => resolve_index(p, npositions, line)?,
        _ => return Err(parse_error(line, format!("missing vertex index in `{}`", word))),
    };

    let uv = match parts.next() {
        Some(t) if !t.is_empty() => Some(resolve_index(t, nuvs, line)?),
        _ => None,
    };

    Ok((position, uv))
}

/// OBJ indices are 1-based; negative ones count back from the last element read.
fn resolve_index(word: &str, len: usize, line: usize) -> Result<usize> {
    let index: i64 = word
        .parse()
        .map_err(|_| parse_error(line, format!("invalid index `{}`", word)))?;

    let resolved = if index > 0 {
        index - 1
    } else {
        len as i64 + index
    };

    if index == 0 || resolved < 0 || resolved >= len as i64 {
        return Err(parse_error(
            line,
            format!("index {} out of range ({} elements)", index, len),
        ));
    }

    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# a unit quad
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_fan_triangulated() {
        let data = parse(QUAD).unwrap();

        assert_eq!(data.vertex_count(), 6);
        assert_eq!(
            data.vertices,
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ]
        );
        assert_eq!(data.texture_coordinates[2], [1.0, 1.0]);
        assert_eq!(data.texture_coordinates[5], [0.0, 1.0]);
    }

    #[test]
    fn byte_lengths_follow_vertex_count() {
        let data = parse(QUAD).unwrap();

        assert_eq!(data.vertices_byte_len(), 6 * 3 * 4);
        assert_eq!(data.texture_coordinates_byte_len(), 6 * 2 * 4);
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5\nf -3/-1 -2/-1 -1/-1\n";
        let data = parse(src).unwrap();

        assert_eq!(data.vertices[0], [0.0, 0.0, 0.0]);
        assert_eq!(data.vertices[2], [0.0, 1.0, 0.0]);
        assert_eq!(data.texture_coordinates, vec![[0.5, 0.0]; 3]);
    }

    #[test]
    fn faces_without_uvs_get_zero_coordinates() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let data = parse(src).unwrap();

        assert_eq!(data.texture_coordinates, vec![[0.0, 0.0]; 3]);
    }

    #[test]
    fn out_of_range_index_reports_the_line() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";

        match parse(src) {
            Err(Error::ObjParse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn degenerate_face_is_rejected() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        assert!(matches!(parse(src), Err(Error::ObjParse { line: 3, .. })));
    }

    #[test]
    fn bad_number_is_rejected() {
        assert!(matches!(
            parse("v 0 zero 0\n"),
            Err(Error::ObjParse { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("definitely/not/here.obj");
        assert!(matches!(parse_file(path), Err(Error::Io { .. })));
    }

    #[test]
    fn file_without_faces_is_empty() {
        let dir = std::env::temp_dir().join(format!("ar_overlay_obj_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("points.obj");
        fs::write(&path, "v 0 0 0\nv 1 1 1\n").unwrap();

        assert!(matches!(parse_file(&path), Err(Error::EmptyMesh(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn latin1_comments_are_tolerated() {
        let dir = std::env::temp_dir().join(format!("ar_overlay_obj_latin1_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("blender.obj");
        fs::write(
            &path,
            b"# Cr\xe9\xe9 par Blender\nmtllib mat\xe9riaux.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();

        let data = parse_file(&path).unwrap();
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.vertices[1], [1.0, 0.0, 0.0]);

        let _ = fs::remove_dir_all(&dir);
    }
}
