//! CPU-side mesh buffers produced by the decoder, ready for non-indexed draws.

use bytemuck::{Pod, Zeroable};

pub const POSITION_COMPONENTS: usize = 3;
pub const NORMAL_COMPONENTS: usize = 3;
pub const TEX_COORD_COMPONENTS: usize = 2;

/// Vertex with position/normal/uv. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Three parallel per-corner arrays. Every triangle owns its three corners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    normals: Vec<f32>,
    tex_coords: Vec<f32>,
    vertex_count: usize,
}

impl MeshBuffers {
    /// Zero-filled buffers for `vertex_count` corners.
    pub(crate) fn zeroed(vertex_count: usize) -> Self {
        debug_assert_eq!(vertex_count % 3, 0);
        Self {
            positions: vec![0.0; vertex_count * POSITION_COMPONENTS],
            normals: vec![0.0; vertex_count * NORMAL_COMPONENTS],
            tex_coords: vec![0.0; vertex_count * TEX_COORD_COMPONENTS],
            vertex_count,
        }
    }

    /// Overwrite corner `i` in all three arrays.
    pub(crate) fn set_corner(&mut self, i: usize, position: &[f32], uv: &[f32], normal: &[f32]) {
        let p = i * POSITION_COMPONENTS;
        self.positions[p..p + POSITION_COMPONENTS].copy_from_slice(position);
        let t = i * TEX_COORD_COMPONENTS;
        self.tex_coords[t..t + TEX_COORD_COMPONENTS].copy_from_slice(uv);
        let n = i * NORMAL_COMPONENTS;
        self.normals[n..n + NORMAL_COMPONENTS].copy_from_slice(normal);
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Number of triangle corners, always a multiple of three.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Gather corner `i` into a single vertex.
    pub fn vertex(&self, i: usize) -> Option<MeshVertex> {
        if i >= self.vertex_count {
            return None;
        }
        let p = i * POSITION_COMPONENTS;
        let n = i * NORMAL_COMPONENTS;
        let t = i * TEX_COORD_COMPONENTS;
        Some(MeshVertex::new(
            [self.positions[p], self.positions[p + 1], self.positions[p + 2]],
            [self.normals[n], self.normals[n + 1], self.normals[n + 2]],
            [self.tex_coords[t], self.tex_coords[t + 1]],
        ))
    }

    /// Interleave the three arrays, one [`MeshVertex`] per corner.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        (0..self.vertex_count).filter_map(|i| self.vertex(i)).collect()
    }

    pub fn positions_le_bytes(&self) -> Vec<u8> {
        le_bytes(&self.positions)
    }

    pub fn normals_le_bytes(&self) -> Vec<u8> {
        le_bytes(&self.normals)
    }

    pub fn tex_coords_le_bytes(&self) -> Vec<u8> {
        le_bytes(&self.tex_coords)
    }

    /// Consume the buffers as `(positions, normals, tex_coords)`.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        (self.positions, self.normals, self.tex_coords)
    }
}

/// Raw bytes of interleaved vertices in native layout, for direct GPU upload.
pub fn vertex_bytes(vertices: &[MeshVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

fn le_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
