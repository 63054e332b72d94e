//! Lyon-based line rendering for orbit paths and other polylines.
//!
//! Scene polylines are projected through the camera each frame and stroked
//! on the CPU into a flat triangle-list vertex buffer.
//!
//! # Usage
//!
//! ```ignore
//! // Runner, once per frame:
//! vectors.clear();
//! draw_polylines(&scene, &camera, &mut vectors);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};
use crate::components::mesh::Rgba;
use crate::components::node::NodeKind;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::PerspectiveCamera;

/// Per-vertex data for line rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: Rgba,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// State for line rendering.
///
/// Holds the lyon tessellator and the output vertex buffer.
/// Cleared each frame and populated by drawing commands.
pub struct VectorState {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a VectorState holding at most `max_vertices` per frame.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    /// Whole triangles that would overflow the capacity are discarded.
    fn flush_geometry(&mut self) {
        let room = self.max_vertices.saturating_sub(self.vertex_count());
        let take = self.geometry.indices.len().min(room) / 3 * 3;
        if take < self.geometry.indices.len() {
            log::warn!(
                "vector buffer full: dropped {} vertices",
                self.geometry.indices.len() - take
            );
        }
        for idx in &self.geometry.indices[..take] {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Tessellate a stroked open polyline.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        if points.len() < 2 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);

        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Tessellate an arbitrary stroked lyon Path.
    pub fn stroke_path(&mut self, path: &Path, width: f32, color: Rgba) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        match result {
            Ok(_) => self.flush_geometry(),
            Err(e) => {
                log::debug!("stroke tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Project and stroke every active polyline node.
///
/// Runs of consecutive visible points are stroked separately, so a loop
/// passing behind the camera is split rather than drawn across the screen.
pub fn draw_polylines(scene: &SceneGraph, camera: &PerspectiveCamera, vectors: &mut VectorState) {
    let view_projection = camera.view_projection();
    let mut run: Vec<Vec2> = Vec::with_capacity(128);

    for node in scene.iter() {
        if !node.active {
            continue;
        }
        let NodeKind::Polyline { points, color, width } = &node.kind else {
            continue;
        };
        let world = scene.world_matrix(node.id);
        run.clear();
        for local in points {
            match camera.project_with(&view_projection, world.transform_point3(*local)) {
                Some(proj) => run.push(proj.pos),
                None => {
                    vectors.stroke_polyline(&run, *width, *color);
                    run.clear();
                }
            }
        }
        vectors.stroke_polyline(&run, *width, *color);
    }
}
