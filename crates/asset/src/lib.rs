//! Asset loading: Wavefront OBJ meshes expanded into flat, non-indexed buffers.
//! Positions, normals and texture coordinates come out as parallel `f32`
//! arrays, one entry per triangle corner.

pub mod config;
pub mod face;
pub mod mesh;
pub mod obj;

pub use config::{DecoderConfig, NumericPolicy};
pub use corelib::{CoreError, CoreResult};
pub use mesh::{MeshBuffers, MeshVertex};
pub use obj::{
    DecodeStats, MeshDecoder, load_obj_from_path, load_obj_from_reader, load_obj_from_str,
};
