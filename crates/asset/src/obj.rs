//! OBJ decoder producing flat, non-indexed position/normal/uv buffers.
//!
//! Supports `v`, `vn`, `vt` and triangle/quad `f` records. Everything else
//! (`g`, `o`, `s`, `mtllib`, `usemtl`, comments) is skipped. Bad content
//! never fails a decode; only the underlying stream can.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::SplitWhitespace,
};

use corelib::{CoreError, CoreResult};
use log::Level;

use crate::{
    config::{DecoderConfig, NumericPolicy},
    face::{self, FaceCorner, MAX_FACE_CORNERS},
    mesh::{MeshBuffers, NORMAL_COMPONENTS, POSITION_COMPONENTS, TEX_COORD_COMPONENTS},
};

/// Stand-in data for references into an empty pool.
static ZEROS: [f32; 3] = [0.0; 3];

/// Counters collected during one decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub positions: usize,
    pub normals: usize,
    pub tex_coords: usize,
    /// Triangles emitted, after quads are split.
    pub triangles: usize,
    pub skipped_lines: usize,
    /// References past either end of a non-empty pool, replaced by its last record.
    pub clamped_refs: usize,
    /// References into an empty pool, written as zeros.
    pub zero_filled_refs: usize,
}

/// Load an OBJ mesh from a file path with default settings.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> CoreResult<MeshBuffers> {
    MeshDecoder::default().decode_path(path)
}

/// Load an OBJ mesh from any byte stream with default settings.
pub fn load_obj_from_reader<R: Read>(reader: R) -> CoreResult<MeshBuffers> {
    MeshDecoder::default().decode(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> CoreResult<MeshBuffers> {
    MeshDecoder::default().decode(contents.as_bytes())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MeshDecoder {
    config: DecoderConfig,
}

impl MeshDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Open `path` and decode it. The file is closed before this returns.
    pub fn decode_path(&self, path: impl AsRef<Path>) -> CoreResult<MeshBuffers> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Decoding OBJ file {}", path.display());
        self.decode(file)
    }

    pub fn decode<R: Read>(&self, reader: R) -> CoreResult<MeshBuffers> {
        self.decode_with_stats(reader).map(|(mesh, _)| mesh)
    }

    /// Decode the whole stream, then expand it into per-corner buffers.
    ///
    /// The reader is consumed and dropped on every path, including read faults.
    /// A read fault discards everything parsed so far.
    pub fn decode_with_stats<R: Read>(
        &self,
        reader: R,
    ) -> CoreResult<(MeshBuffers, DecodeStats)> {
        let capacity = self.config.read_buffer_size.max(1);
        let mut reader = BufReader::with_capacity(capacity, reader);
        let mut pools = Pools::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            line_no += 1;
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| CoreError::Io {
                    line: line_no,
                    source,
                })?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            pools.parse_line(&line, line_no, self.config.numeric_policy);
        }

        let (mesh, stats) = pools.unshare();
        self.log_summary(&stats);
        Ok((mesh, stats))
    }

    fn log_summary(&self, stats: &DecodeStats) {
        let level = if self.config.log_stats {
            Level::Info
        } else {
            Level::Debug
        };
        log::log!(
            level,
            "Vertices: {}, normals: {}, texture coords: {}, triangles: {}, skipped lines: {}",
            stats.positions,
            stats.normals,
            stats.tex_coords,
            stats.triangles,
            stats.skipped_lines
        );
        if stats.clamped_refs > 0 {
            log::warn!(
                "{} face references were out of range and reuse the last record of their pool",
                stats.clamped_refs
            );
        }
    }
}

/// Transient state of one decode: flat coordinate pools plus triangulated corners.
#[derive(Default)]
struct Pools {
    positions: Vec<f32>,
    normals: Vec<f32>,
    tex_coords: Vec<f32>,
    corners: Vec<FaceCorner>,
    stats: DecodeStats,
}

impl Pools {
    fn parse_line(&mut self, line: &str, line_no: usize, policy: NumericPolicy) {
        // split_whitespace also swallows doubled spaces, tabs and a trailing '\r'.
        let mut fields = line.split_whitespace();
        let Some(tag) = fields.next() else {
            return;
        };

        let accepted = if tag.eq_ignore_ascii_case("v") {
            read_components::<3>(fields, policy).map(|p| {
                self.positions.extend_from_slice(&p);
                self.stats.positions += 1;
            })
        } else if tag.eq_ignore_ascii_case("vn") {
            read_components::<3>(fields, policy).map(|n| {
                self.normals.extend_from_slice(&n);
                self.stats.normals += 1;
            })
        } else if tag.eq_ignore_ascii_case("vt") {
            // Optional third (w) component is not stored.
            read_components::<2>(fields, policy).map(|t| {
                self.tex_coords.extend_from_slice(&t);
                self.stats.tex_coords += 1;
            })
        } else if tag.eq_ignore_ascii_case("f") {
            self.parse_face(fields, line_no, policy)
        } else {
            return;
        };

        if accepted.is_none() {
            log::debug!("Skipping malformed '{}' record on line {}", tag, line_no);
            self.stats.skipped_lines += 1;
        }
    }

    fn parse_face(
        &mut self,
        mut fields: SplitWhitespace<'_>,
        line_no: usize,
        policy: NumericPolicy,
    ) -> Option<()> {
        let mut corners = [FaceCorner::default(); MAX_FACE_CORNERS];
        let mut count = 0;
        for token in fields.by_ref().take(MAX_FACE_CORNERS) {
            corners[count] = face::parse_corner(token, policy)?;
            count += 1;
        }
        if count < 3 {
            return None;
        }
        if fields.next().is_some() {
            log::debug!(
                "Face on line {} has more than {} corners; extra corners ignored",
                line_no,
                MAX_FACE_CORNERS
            );
        }

        let before = self.corners.len();
        self.corners.extend(face::triangulate(&corners[..count]));
        self.stats.triangles += (self.corners.len() - before) / 3;
        Some(())
    }

    /// Expand every corner into its own position/uv/normal entries.
    fn unshare(self) -> (MeshBuffers, DecodeStats) {
        let Pools {
            positions,
            normals,
            tex_coords,
            corners,
            mut stats,
        } = self;

        let mut mesh = MeshBuffers::zeroed(corners.len());
        for (i, corner) in corners.iter().enumerate() {
            let (position, hit) = lookup(&positions, POSITION_COMPONENTS, corner.position);
            stats.tally(hit);
            let (uv, hit) = lookup(&tex_coords, TEX_COORD_COMPONENTS, corner.tex_coord);
            stats.tally(hit);
            let (normal, hit) = lookup(&normals, NORMAL_COMPONENTS, corner.normal);
            stats.tally(hit);
            mesh.set_corner(i, position, uv, normal);
        }
        (mesh, stats)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lookup {
    Hit,
    Clamped,
    Empty,
}

impl DecodeStats {
    fn tally(&mut self, lookup: Lookup) {
        match lookup {
            Lookup::Hit => {}
            Lookup::Clamped => self.clamped_refs += 1,
            Lookup::Empty => self.zero_filled_refs += 1,
        }
    }
}

/// Record `index` of a flat pool of `width`-float records.
///
/// Out-of-range indices (negative or past the end) fall back to the last
/// record; an empty pool yields zeros.
fn lookup(pool: &[f32], width: usize, index: i64) -> (&[f32], Lookup) {
    let count = pool.len() / width;
    if count == 0 {
        return (&ZEROS[..width], Lookup::Empty);
    }
    match usize::try_from(index) {
        Ok(i) if i < count => (&pool[i * width..(i + 1) * width], Lookup::Hit),
        _ => {
            let last = (count - 1) * width;
            (&pool[last..last + width], Lookup::Clamped)
        }
    }
}

fn read_components<const N: usize>(
    mut fields: SplitWhitespace<'_>,
    policy: NumericPolicy,
) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        match fields.next().map(str::parse::<f32>) {
            Some(Ok(value)) => *slot = value,
            _ if policy.is_strict() => return None,
            _ => {}
        }
    }
    Some(out)
}
