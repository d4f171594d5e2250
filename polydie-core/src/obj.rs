/// Wavefront OBJ loader (geometry only)
use std::fs;
use std::path::Path;

use log::{info, warn};
use nalgebra::Point3;
use nom::{
    bytes::complete::take_while,
    character::complete::{i64 as index, space0, space1},
    combinator::{all_consuming, opt},
    multi::separated_list1,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Face, Polyhedron};

/// Parse OBJ text into a polyhedron.
///
/// Only `v` and `f` statements are read; texture coordinates, normals,
/// groups and materials are skipped. Face references may be `i`, `i/t`,
/// `i//n` or `i/t/n`, with negative indices counting back from the last
/// vertex defined so far.
pub fn parse_obj(input: &str) -> Result<Polyhedron> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut skipped = 0usize;

    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        let Some((keyword, rest)) = split_keyword(content) else {
            continue;
        };
        match keyword {
            "v" => {
                let (_, (x, y, z)) = parse_vertex(rest).map_err(|_| Error::Parse {
                    line,
                    message: format!("expected `v x y z [w]`, found `{content}`"),
                })?;
                vertices.push(Point3::new(x, y, z));
            }
            "f" => {
                let (_, refs) = parse_face(rest).map_err(|_| Error::Parse {
                    line,
                    message: format!("expected `f v1 v2 v3 ...`, found `{content}`"),
                })?;
                if refs.len() < 3 {
                    return Err(Error::Parse {
                        line,
                        message: format!("face has {} vertices, at least 3 required", refs.len()),
                    });
                }
                let indices = refs
                    .into_iter()
                    .map(|r| resolve_index(r, vertices.len(), line))
                    .collect::<Result<Vec<_>>>()?;
                faces.push(Face::new(indices));
            }
            _ => skipped += 1,
        }
    }

    if vertices.is_empty() || faces.is_empty() {
        return Err(Error::EmptyModel);
    }
    if skipped > 0 {
        warn!("skipped {skipped} unsupported OBJ statements");
    }
    info!("parsed OBJ: {} vertices, {} faces", vertices.len(), faces.len());
    Polyhedron::new(vertices, faces)
}

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Polyhedron> {
    let path = path.as_ref();
    info!("loading OBJ model from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_obj(&text)
}

fn split_keyword(content: &str) -> Option<(&str, &str)> {
    if content.is_empty() {
        return None;
    }
    Some(match content.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim_start()),
        None => (content, ""),
    })
}

fn parse_vertex(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, (x, y, z, _w)) = all_consuming(terminated(
        tuple((
            float,
            preceded(space1, float),
            preceded(space1, float),
            opt(preceded(space1, float)),
        )),
        space0,
    ))(input)?;
    Ok((input, (x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    all_consuming(terminated(separated_list1(space1, face_ref), space0))(input)
}

/// A vertex reference, discarding any `/texture/normal` suffix
fn face_ref(input: &str) -> IResult<&str, i64> {
    terminated(
        index,
        take_while(|c: char| c == '/' || c == '-' || c.is_ascii_digit()),
    )(input)
}

/// Turns a 1-based (or negative, relative) OBJ index into a 0-based one
fn resolve_index(raw: i64, defined: usize, line: usize) -> Result<usize> {
    let resolved = match raw {
        0 => None,
        i if i > 0 => usize::try_from(i - 1).ok(),
        i => usize::try_from(i.unsigned_abs())
            .ok()
            .and_then(|back| defined.checked_sub(back)),
    };
    resolved.ok_or_else(|| Error::Parse {
        line,
        message: format!("vertex index {raw} is out of range"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# a unit square split into nothing
o square
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1 4/1/1
";

    #[test]
    fn test_parse_quad_with_texture_and_normal_refs() {
        let poly = parse_obj(QUAD).unwrap();
        assert_eq!(poly.vertex_count(), 4);
        assert_eq!(poly.face_count(), 1);
        assert_eq!(poly.faces()[0].indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let poly = parse_obj(obj).unwrap();
        assert_eq!(poly.faces()[0].indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_double_slash_and_trailing_comment() {
        let obj = "v 0 0 0 1.0\nv 1 0 0\nv 0 1 0 # apex\nf 1//1 2//1 3//1  # tri\n";
        let poly = parse_obj(obj).unwrap();
        assert_eq!(poly.faces()[0].indices(), &[0, 1, 2]);
        assert_eq!(poly.vertices()[2], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_scientific_notation() {
        let obj = "v 1e-1 -2.5E+1 3\nv 0 0 0\nv 0 0 1\nf 1 2 3\n";
        let poly = parse_obj(obj).unwrap();
        assert!((poly.vertices()[0].x - 0.1).abs() < 1e-6);
        assert!((poly.vertices()[0].y + 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let obj = "v 0 0 0\nv 1 zero 0\n";
        match parse_obj(obj).unwrap_err() {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_face_is_rejected() {
        let obj = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        assert!(matches!(parse_obj(obj), Err(Error::Parse { line: 3, .. })));
    }

    #[test]
    fn test_index_zero_is_rejected() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(matches!(parse_obj(obj), Err(Error::Parse { line: 4, .. })));
    }

    #[test]
    fn test_out_of_range_index_is_invalid_geometry() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";
        assert!(matches!(parse_obj(obj), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn test_empty_model() {
        assert!(matches!(parse_obj("# nothing\n"), Err(Error::EmptyModel)));
        assert!(matches!(parse_obj("v 0 0 0\n"), Err(Error::EmptyModel)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_obj("/nonexistent/teapot.obj").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
