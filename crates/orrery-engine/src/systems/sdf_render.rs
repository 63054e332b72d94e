use crate::components::node::NodeKind;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Smallest radius written for a point sprite, in pixels.
const MIN_POINT_RADIUS: f32 = 0.5;

/// Build the SDF instance buffer from sphere and point-cloud nodes.
///
/// Everything is projected through `camera`, culled at the near plane and
/// sorted far to near (painter's order). Point clouds are written as tiny
/// unlit spheres. When the buffer is full the nearest instances win.
pub fn build_sdf_buffer(scene: &SceneGraph, camera: &PerspectiveCamera, buffer: &mut SDFBuffer) {
    buffer.clear();
    let view_projection = camera.view_projection();
    let mut staged: Vec<SDFInstance> = Vec::with_capacity(scene.len());

    for node in scene.iter() {
        if !node.active {
            continue;
        }
        match &node.kind {
            NodeKind::Sphere(mesh) => {
                let center = scene.world_position(node.id);
                let Some(proj) = camera.project_with(&view_projection, center) else {
                    continue;
                };
                staged.push(SDFInstance {
                    x: proj.pos.x,
                    y: proj.pos.y,
                    radius: mesh.radius * proj.scale,
                    depth: proj.depth,
                    r: mesh.color.r,
                    g: mesh.color.g,
                    b: mesh.color.b,
                    shininess: mesh.shininess,
                    emissive: mesh.emissive,
                    ..Default::default()
                });
            }
            NodeKind::Points { points, color, size } => {
                let world = scene.world_matrix(node.id);
                for local in points {
                    let Some(proj) = camera.project_with(&view_projection, world.transform_point3(*local)) else {
                        continue;
                    };
                    staged.push(SDFInstance {
                        x: proj.pos.x,
                        y: proj.pos.y,
                        radius: (size * 0.5 * proj.scale).max(MIN_POINT_RADIUS),
                        depth: proj.depth,
                        r: color.r * color.a,
                        g: color.g * color.a,
                        b: color.b * color.a,
                        shininess: 0.0,
                        emissive: 1.0,
                        ..Default::default()
                    });
                }
            }
            NodeKind::Group | NodeKind::Polyline { .. } => {}
        }
    }

    staged.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    let overflow = staged.len().saturating_sub(buffer.capacity());
    for instance in staged.into_iter().skip(overflow) {
        buffer.push(instance);
    }
    if overflow > 0 {
        log::warn!("SDF buffer full: dropped {} far instances", overflow);
    }
}
