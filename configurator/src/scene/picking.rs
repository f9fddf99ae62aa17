//! Pointer intersection: maps the cursor to the nearest part under it.
//!
//! Uses manual ray tests against registered part meshes (bounding box, then
//! triangles) instead of Bevy's mesh picking, so egui panels keep their input.

use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use bevy::render::primitives::Aabb;
use bevy::window::PrimaryWindow;

use crate::camera::ConfiguratorCamera;
use crate::events::PartNavClicked;
use crate::part::Part;
use crate::scene::parts::{highlight, restore, PartAppearance, PartMesh};
use crate::state::{HoverController, HoverTransition};

/// Set by the UI layer each frame while the pointer is over a panel.
#[derive(Resource, Debug, Default)]
pub struct PointerCapture {
    pub over_ui: bool,
}

/// Converts a cursor position in logical pixels to normalized device
/// coordinates, y up. `None` outside the viewport.
pub fn pointer_ndc(cursor: Vec2, viewport: Rect) -> Option<Vec2> {
    let size = viewport.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let local = (cursor - viewport.min) / size;
    let ndc = Vec2::new(local.x * 2.0 - 1.0, 1.0 - local.y * 2.0);
    (ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0).then_some(ndc)
}

/// World-space ray through the pointer. `direction` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PointerRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        Some(Self {
            origin,
            direction: direction.try_normalize()?,
        })
    }

    /// Unprojects the NDC point on the near and far planes (reverse-z).
    pub fn from_ndc(camera: &Camera, camera_transform: &GlobalTransform, ndc: Vec2) -> Option<Self> {
        let near = camera.ndc_to_world(camera_transform, ndc.extend(1.0))?;
        let far = camera.ndc_to_world(camera_transform, ndc.extend(f32::EPSILON))?;
        Self::new(near, far - near)
    }
}

/// The pointer ray for this frame, `None` when the cursor is outside the
/// viewport or there is no window or camera.
#[derive(Resource, Debug, Default)]
pub struct CursorRay(pub Option<PointerRay>);

/// Distance along the ray to the part's surface, honouring the full global
/// transform (rotation and scale included).
///
/// The bounding box is the broad phase. When the mesh is available its
/// triangles decide the hit, so a part nested inside another part's box is
/// still reachable. Without a usable triangle list the box distance is used.
pub fn ray_hits_part(
    ray: &PointerRay,
    transform: &GlobalTransform,
    aabb: &Aabb,
    mesh: Option<&Mesh>,
) -> Option<f32> {
    let to_local = transform.compute_matrix().inverse();
    let origin = to_local.transform_point3(ray.origin);
    // Not normalized: `t` stays a world distance under scaling.
    let direction = to_local.transform_vector3(ray.direction);
    let center: Vec3 = aabb.center.into();
    let half: Vec3 = aabb.half_extents.into();
    let box_hit = ray_aabb_intersect(origin, direction, center - half, center + half)?;
    match mesh.and_then(|mesh| ray_mesh_intersect(origin, direction, mesh)) {
        Some(surface_hit) => surface_hit,
        None => Some(box_hit),
    }
}

fn ray_aabb_intersect(origin: Vec3, dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < f32::EPSILON {
            if o < aabb_min[axis] || o > aabb_max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (aabb_min[axis] - o) / d;
        let t2 = (aabb_max[axis] - o) / d;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
    }
    if t_enter <= t_exit && t_exit > 0.0 {
        Some(t_enter.max(0.0))
    } else {
        None
    }
}

/// Nearest triangle hit in mesh space. The outer `None` means the mesh has
/// no triangle list to test against.
fn ray_mesh_intersect(origin: Vec3, dir: Vec3, mesh: &Mesh) -> Option<Option<f32>> {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return None;
    }
    let Some(VertexAttributeValues::Float32x3(positions)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };
    let vertex = |i: usize| positions.get(i).copied().map(Vec3::from_array);
    let indices: Vec<usize> = match mesh.indices() {
        Some(indices) => indices.iter().collect(),
        None => (0..positions.len()).collect(),
    };

    let mut nearest: Option<f32> = None;
    for triangle in indices.chunks_exact(3) {
        let (Some(v0), Some(v1), Some(v2)) =
            (vertex(triangle[0]), vertex(triangle[1]), vertex(triangle[2]))
        else {
            continue;
        };
        if let Some(t) = ray_triangle_intersect(origin, dir, v0, v1, v2) {
            if nearest.is_none_or(|best| t < best) {
                nearest = Some(t);
            }
        }
    }
    Some(nearest)
}

/// Möller-Trumbore. Returns the ray parameter of the hit, in front of the
/// origin only. Both faces count.
fn ray_triangle_intersect(origin: Vec3, dir: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Nearest hit wins; on equal distance the earlier hit is kept.
pub fn nearest_part(hits: impl IntoIterator<Item = (Part, f32)>) -> Option<Part> {
    let mut best: Option<(Part, f32)> = None;
    for (part, dist) in hits {
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((part, dist));
        }
    }
    best.map(|(part, _)| part)
}

/// The part under `ray`, if any. Pure query over the current scene state.
pub fn resolve<'a>(
    ray: &PointerRay,
    parts: impl IntoIterator<Item = (&'a PartMesh, &'a GlobalTransform, &'a Aabb, Option<&'a Mesh>)>,
) -> Option<Part> {
    nearest_part(parts.into_iter().filter_map(|(part, tf, aabb, mesh)| {
        ray_hits_part(ray, tf, aabb, mesh).map(|d| (part.0, d))
    }))
}

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<ConfiguratorCamera>>,
) -> Option<PointerRay> {
    let cursor = windows.get_single().ok()?.cursor_position()?;
    let (camera, cam_transform) = cameras.get_single().ok()?;
    let viewport = camera.logical_viewport_rect()?;
    let ndc = pointer_ndc(cursor, viewport)?;
    PointerRay::from_ndc(camera, cam_transform, ndc)
}

/// Unprojects the cursor through the configurator camera into [`CursorRay`].
pub fn cursor_ray_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<ConfiguratorCamera>>,
    mut ray: ResMut<CursorRay>,
) {
    ray.0 = cursor_ray(&windows, &cameras);
}

/// Resolves the hovered part and applies the highlight transition, every frame.
pub fn hover_system(
    cursor_ray: Res<CursorRay>,
    capture: Res<PointerCapture>,
    bounds: Query<(&PartMesh, &GlobalTransform, &Aabb, Option<&Mesh3d>)>,
    meshes: Res<Assets<Mesh>>,
    parts: Query<(&PartMesh, &PartAppearance, &MeshMaterial3d<StandardMaterial>)>,
    mut hover: ResMut<HoverController>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let hit = match cursor_ray.0 {
        Some(ray) if !capture.over_ui => resolve(
            &ray,
            bounds.iter().map(|(part, tf, aabb, mesh)| {
                (part, tf, aabb, mesh.and_then(|m| meshes.get(&m.0)))
            }),
        ),
        _ => None,
    };
    let transition = hover.update(hit);
    apply_hover_transition(transition, &parts, &mut materials);
}

pub fn apply_hover_transition(
    transition: HoverTransition,
    parts: &Query<(&PartMesh, &PartAppearance, &MeshMaterial3d<StandardMaterial>)>,
    materials: &mut Assets<StandardMaterial>,
) {
    if transition.is_empty() {
        return;
    }
    for (mesh, appearance, handle) in parts.iter() {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        if transition.restore == Some(mesh.0) {
            restore(material, appearance);
        }
        if transition.highlight == Some(mesh.0) {
            highlight(material);
        }
    }
}

/// Left click on the hovered part selects it.
pub fn click_select_system(
    mouse: Res<ButtonInput<MouseButton>>,
    capture: Res<PointerCapture>,
    hover: Res<HoverController>,
    mut clicks: EventWriter<PartNavClicked>,
) {
    if !mouse.just_pressed(MouseButton::Left) || capture.over_ui {
        return;
    }
    if let Some(part) = hover.hovered() {
        clicks.send(PartNavClicked(part));
    }
}
