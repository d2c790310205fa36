//! Property-based tests for decoder invariants.

use std::fmt::Write;

use asset::{MeshDecoder, load_obj_from_str};
use proptest::prelude::*;

fn prefixed(tag: &str, fields: Vec<String>) -> Vec<String> {
    std::iter::once(tag.to_string()).chain(fields).collect()
}

/// One OBJ record as its whitespace-separated tokens, including junk indices.
fn record() -> impl Strategy<Value = Vec<String>> {
    let num = (-40i32..40)
        .prop_map(|v| (v as f32 * 0.25).to_string())
        .boxed();
    let idx = prop_oneof![
        (-3i64..12).prop_map(|i| i.to_string()),
        Just(String::new()),
        Just("x".to_string()),
    ]
    .boxed();
    let corner = (idx.clone(), idx.clone(), idx).prop_map(|(a, b, c)| format!("{a}/{b}/{c}"));
    prop_oneof![
        prop::collection::vec(num.clone(), 3).prop_map(|c| prefixed("v", c)),
        prop::collection::vec(num.clone(), 3).prop_map(|c| prefixed("vn", c)),
        prop::collection::vec(num, 2).prop_map(|c| prefixed("vt", c)),
        prop::collection::vec(corner, 1..=5).prop_map(|c| prefixed("f", c)),
        Just(vec!["g".to_string(), "group".to_string()]),
    ]
}

fn join(records: &[Vec<String>], sep: &str) -> String {
    records
        .iter()
        .map(|r| r.join(sep))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Property: corner count is a multiple of three and matches every buffer length
#[test]
fn proptest_corner_count_is_whole_triangles() {
    proptest!(|(records in prop::collection::vec(record(), 0..40))| {
        let src = join(&records, " ");
        let (mesh, stats) = MeshDecoder::default()
            .decode_with_stats(src.as_bytes())
            .expect("in-memory decode never fails");

        prop_assert_eq!(mesh.vertex_count() % 3, 0);
        prop_assert_eq!(mesh.vertex_count(), stats.triangles * 3);
        prop_assert_eq!(mesh.positions().len(), mesh.vertex_count() * 3);
        prop_assert_eq!(mesh.normals().len(), mesh.vertex_count() * 3);
        prop_assert_eq!(mesh.tex_coords().len(), mesh.vertex_count() * 2);
    });
}

/// Property: doubled spaces and tabs decode the same as single spaces
#[test]
fn proptest_spacing_does_not_matter() {
    proptest!(|(records in prop::collection::vec(record(), 0..30))| {
        let single = load_obj_from_str(&join(&records, " ")).expect("single");
        let double = load_obj_from_str(&join(&records, "  ")).expect("double");
        let tabbed = load_obj_from_str(&join(&records, " \t")).expect("tabbed");
        prop_assert_eq!(&single, &double);
        prop_assert_eq!(&single, &tabbed);
    });
}

/// Property: decoding is deterministic down to the byte
#[test]
fn proptest_decode_is_idempotent() {
    proptest!(|(records in prop::collection::vec(record(), 0..30))| {
        let src = join(&records, " ");
        let a = load_obj_from_str(&src).expect("first");
        let b = load_obj_from_str(&src).expect("second");
        prop_assert_eq!(a.positions_le_bytes(), b.positions_le_bytes());
        prop_assert_eq!(a.normals_le_bytes(), b.normals_le_bytes());
        prop_assert_eq!(a.tex_coords_le_bytes(), b.tex_coords_le_bytes());
    });
}

/// Property: in-range triangle faces reproduce the referenced positions exactly
#[test]
fn proptest_in_range_faces_round_trip() {
    proptest!(|(
        points in prop::collection::vec(prop::array::uniform3(-50i32..50), 1..10),
        faces in prop::collection::vec(prop::array::uniform3(0usize..100), 0..20)
    )| {
        let n = points.len();
        let mut src = String::new();
        for p in &points {
            writeln!(src, "v {} {} {}", p[0], p[1], p[2]).unwrap();
        }
        for f in &faces {
            writeln!(src, "f {} {} {}", f[0] % n + 1, f[1] % n + 1, f[2] % n + 1).unwrap();
        }

        let mesh = load_obj_from_str(&src).expect("decode");
        prop_assert_eq!(mesh.vertex_count(), faces.len() * 3);
        for (i, idx) in faces.iter().flatten().enumerate() {
            let p = points[idx % n];
            let expected = [p[0] as f32, p[1] as f32, p[2] as f32];
            prop_assert_eq!(mesh.vertex(i).unwrap().position, expected);
        }
    });
}

/// Property: arbitrary text never panics and never fails
#[test]
fn proptest_arbitrary_text_is_tolerated() {
    proptest!(|(text in "\\PC{0,300}")| {
        prop_assert!(load_obj_from_str(&text).is_ok());
    });
}
