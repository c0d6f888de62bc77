//! Procedural arrow mesh: a cylinder shaft capped by a narrower cone.
//!
//! The arrow starts at the origin and points along local +Z. The shaft fills
//! the first [`CYLINDER_HEIGHT_RATIO`] of the length, the cone the rest.

use std::f32::consts::TAU;

use crate::engine::error::GizmoError;

/// Fraction of the arrow length taken by the cylinder shaft.
pub const CYLINDER_HEIGHT_RATIO: f32 = 0.8;

/// Cone base radius relative to the shaft radius. The cone is narrower than
/// the shaft, which leaves a visible step where they meet.
pub const CONE_BASE_RADIUS_RATIO: f32 = 0.6;

/// Radial segment count used by the overlay.
pub const DEFAULT_SEGMENTS: u32 = 24;

/// Smallest segment count that still encloses a volume.
pub const MIN_SEGMENTS: u32 = 3;

pub type Vertex = [f32; 3];

/// Immutable vertex/index pair for one arrow.
///
/// Layout of `vertices`:
/// - `0..2*segments`: shaft rays as interleaved (base, top) pairs
/// - `2*segments..3*segments`: cone base ring
/// - last: apex
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    segments: u32,
}

impl ArrowMesh {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Index of the first cone base vertex.
    pub fn cone_base_start(&self) -> usize {
        2 * self.segments as usize
    }

    /// Index of the apex vertex.
    pub fn apex_index(&self) -> usize {
        self.vertices.len() - 1
    }
}

/// Builds the arrow mesh.
///
/// Rejects non-finite or non-positive `length`/`radius` and `segments < 3`
/// instead of producing degenerate geometry.
pub fn build_arrow_mesh(length: f32, radius: f32, segments: u32) -> Result<ArrowMesh, GizmoError> {
    if !(length.is_finite() && length > 0.0) {
        return Err(GizmoError::invalid(format!("arrow length must be positive, got {length}")));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(GizmoError::invalid(format!("arrow radius must be positive, got {radius}")));
    }
    if segments < MIN_SEGMENTS {
        return Err(
            GizmoError::invalid(format!("arrow needs at least {MIN_SEGMENTS} segments, got {segments}"))
        );
    }

    let segs = segments as usize;
    let cylinder_height = length * CYLINDER_HEIGHT_RATIO;
    let cone_radius = radius * CONE_BASE_RADIUS_RATIO;

    let mut vertices = Vec::with_capacity(3 * segs + 1);
    let mut indices = Vec::with_capacity(3 * (3 * segs));

    let ray = |i: usize| {
        let angle = TAU * (i as f32) / (segments as f32);
        (angle.cos(), angle.sin())
    };

    // Shaft rays
    for i in 0..segs {
        let (c, s) = ray(i);
        vertices.push([c * radius, s * radius, 0.0]);
        vertices.push([c * radius, s * radius, cylinder_height]);
    }

    // Cone base ring
    let base_start = vertices.len() as u32;
    for i in 0..segs {
        let (c, s) = ray(i);
        vertices.push([c * cone_radius, s * cone_radius, cylinder_height]);
    }

    let apex = vertices.len() as u32;
    vertices.push([0.0, 0.0, length]);

    for i in 0..segs {
        let next = (i + 1) % segs;
        let (i0, i1) = ((2 * i) as u32, (2 * i + 1) as u32);
        let (j0, j1) = ((2 * next) as u32, (2 * next + 1) as u32);
        indices.extend_from_slice(&[i0, j0, i1, i1, j0, j1]);
    }

    for i in 0..segs {
        let b0 = base_start + i as u32;
        let b1 = base_start + ((i + 1) % segs) as u32;
        indices.extend_from_slice(&[b0, b1, apex]);
    }

    Ok(ArrowMesh { vertices, indices, segments })
}
