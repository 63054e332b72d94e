//! Ray picking against sphere nodes.

use glam::Vec3;
use crate::api::types::NodeId;
use crate::components::node::NodeKind;
use crate::core::scene::SceneGraph;

/// A half-line from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest non-negative hit distance of a ray against a sphere.
/// A ray starting inside the sphere reports the exit point.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// A pick result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub state_index: Option<usize>,
    pub distance: f32,
}

/// Intersect a ray with the given sphere nodes and return the nearest hit.
/// Inactive nodes and non-sphere nodes are skipped.
pub fn pick_nearest(
    scene: &SceneGraph,
    candidates: impl IntoIterator<Item = NodeId>,
    ray: &Ray,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for id in candidates {
        let node = match scene.get(id) {
            Some(n) if n.active => n,
            _ => continue,
        };
        let radius = match &node.kind {
            NodeKind::Sphere(mesh) => mesh.radius,
            _ => continue,
        };
        let center = scene.world_position(id);
        if let Some(distance) = ray_sphere(ray, center, radius) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Hit {
                    node: id,
                    state_index: node.state_index,
                    distance,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{MeshComponent, Rgb};
    use crate::components::node::Node;

    #[test]
    fn head_on_hit_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = ray_sphere(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn miss_returns_none() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(ray_sphere(&ray, Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(ray_sphere(&ray, Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn inside_sphere_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray_sphere(&ray, Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn pick_nearest_prefers_closer_sphere() {
        let mut scene = SceneGraph::new();
        let far = scene.spawn(
            Node::sphere(MeshComponent::sphere(1.0, Rgb::WHITE))
                .with_position(Vec3::new(0.0, 0.0, -10.0))
                .with_state_index(1),
        );
        let near = scene.spawn(
            Node::sphere(MeshComponent::sphere(1.0, Rgb::WHITE))
                .with_position(Vec3::new(0.0, 0.0, -5.0))
                .with_state_index(0),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = pick_nearest(&scene, [far, near], &ray).unwrap();
        assert_eq!(hit.node, near);
        assert_eq!(hit.state_index, Some(0));
    }

    #[test]
    fn pick_skips_non_candidates_and_inactive() {
        let mut scene = SceneGraph::new();
        let blocker = scene.spawn(
            Node::sphere(MeshComponent::sphere(1.0, Rgb::WHITE)).with_position(Vec3::new(0.0, 0.0, -3.0)),
        );
        let mut hidden = Node::sphere(MeshComponent::sphere(1.0, Rgb::WHITE)).with_position(Vec3::new(0.0, 0.0, -6.0));
        hidden.active = false;
        let hidden = scene.spawn(hidden);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(pick_nearest(&scene, [hidden], &ray).is_none());
        assert_eq!(pick_nearest(&scene, [hidden, blocker], &ray).unwrap().node, blocker);
    }
}
