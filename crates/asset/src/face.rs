//! Face records: `i`, `i/j`, `i/j/k` and `i//k` corner references.

use crate::config::NumericPolicy;

/// Faces larger than a quad are cut down to their first four corners.
pub const MAX_FACE_CORNERS: usize = 4;

/// Zero-based pool references for one triangle corner.
///
/// Values come straight from the file minus one, so they may be negative or
/// past the end of their pool. Bounds are settled when the mesh is expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceCorner {
    pub position: i64,
    pub tex_coord: i64,
    pub normal: i64,
}

impl FaceCorner {
    pub fn new(position: i64, tex_coord: i64, normal: i64) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }
}

/// Parse one whitespace-delimited face field.
///
/// Returns `None` only under [`NumericPolicy::Strict`], when the position is
/// missing or any present sub-field is not an integer.
pub fn parse_corner(token: &str, policy: NumericPolicy) -> Option<FaceCorner> {
    let mut split = token.split('/');
    let position = split.next();
    let tex_coord = split.next();
    let normal = split.next();

    match policy {
        NumericPolicy::Permissive => Some(FaceCorner::new(
            lenient_index(position),
            lenient_index(tex_coord),
            lenient_index(normal),
        )),
        NumericPolicy::Strict => {
            let position = match position {
                Some(value) if !value.is_empty() => strict_index(value)?,
                _ => return None,
            };
            Some(FaceCorner::new(
                position,
                optional_index(tex_coord)?,
                optional_index(normal)?,
            ))
        }
    }
}

/// Corners of the triangles covering a face: (1,2,3), plus (1,3,4) for quads.
pub fn triangulate(corners: &[FaceCorner]) -> impl Iterator<Item = FaceCorner> + '_ {
    let order: &[usize] = match corners.len() {
        0..=2 => &[],
        3 => &[0, 1, 2],
        _ => &[0, 1, 2, 0, 2, 3],
    };
    order.iter().map(move |&i| corners[i])
}

fn lenient_index(value: Option<&str>) -> i64 {
    value.and_then(strict_index).unwrap_or(0)
}

fn optional_index(value: Option<&str>) -> Option<i64> {
    match value {
        None | Some("") => Some(0),
        Some(v) => strict_index(v),
    }
}

fn strict_index(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().map(|raw| raw.saturating_sub(1))
}
