//! Sandbox World
//!
//! A small headless [`PhysicsWorld`] used by the integration tests and the
//! `garage_sandbox` binary. It is deliberately simple:
//!
//! - Colliders are axis-aligned boxes; object rotation does not rotate them
//! - Characters move axis-by-axis (X, Z, then Y) and stop at the first collider
//! - Free rigid bodies integrate force and gravity; bodies joined by fixed
//!   joints move as one rigid group and land on static colliders
//!
//! Objects are kept in a `BTreeMap` so queries iterate in creation order and
//! results are reproducible.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use glam::{Quat, Vec3};

use super::collision::{Aabb, aabb_surface_normal, sweep_axis};
use super::types::{
    BoxCollider, Constraints, Dynamics, Material, ObjectId, ObjectTag, Pose, Prefab, RayHit,
};
use super::world::PhysicsWorld;

/// Gravity acceleration in meters per second squared
pub const SANDBOX_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Default rigid-body mass in kilograms
pub const DEFAULT_MASS: f32 = 100.0;

#[derive(Debug, Clone)]
struct RigidBody {
    dynamics: Dynamics,
    mass: f32,
    velocity: Vec3,
    force: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct CharacterBody {
    enabled: bool,
    grounded: bool,
}

#[derive(Debug, Clone)]
struct SceneObject {
    name: String,
    parent: Option<ObjectId>,
    /// Relative to the parent, or world space when unparented
    local: Pose,
    scale: f32,
    active: bool,
    collider: Option<BoxCollider>,
    body: Option<RigidBody>,
    character: Option<CharacterBody>,
    materials: Vec<Material>,
    tag: ObjectTag,
}

/// Headless scene registry with box-collider physics.
#[derive(Debug, Clone)]
pub struct SandboxWorld {
    objects: BTreeMap<ObjectId, SceneObject>,
    joints: BTreeSet<(ObjectId, ObjectId)>,
    next_id: u32,
    pub gravity: Vec3,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            joints: BTreeSet::new(),
            next_id: 1,
            gravity: SANDBOX_GRAVITY,
        }
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Ids of every live object, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Static floor whose top face lies at `y = top`.
    pub fn spawn_ground(&mut self, half_size: f32, top: f32) -> ObjectId {
        let prefab = Prefab {
            name: "Ground".to_string(),
            collider: Some(BoxCollider::centered(Vec3::new(half_size, 1.0, half_size))),
            dynamics: None,
            materials: Vec::new(),
            tag: ObjectTag::Untagged,
        };
        self.instantiate(&prefab, Pose::at(Vec3::new(0.0, top - 1.0, 0.0)))
    }

    /// Character with a box collider whose centre is the object pivot.
    pub fn spawn_character(&mut self, name: &str, pose: Pose, half_extents: Vec3) -> ObjectId {
        let prefab = Prefab {
            name: name.to_string(),
            collider: Some(BoxCollider::centered(half_extents)),
            dynamics: None,
            materials: Vec::new(),
            tag: ObjectTag::Player,
        };
        let id = self.instantiate(&prefab, pose);
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.character = Some(CharacterBody {
                enabled: true,
                grounded: false,
            });
        }
        id
    }

    /// Join two bodies with a fixed joint. Joining an object to itself is ignored.
    pub fn add_fixed_joint(&mut self, a: ObjectId, b: ObjectId) {
        if a == b || !self.exists(a) || !self.exists(b) {
            return;
        }
        self.joints.insert(ordered(a, b));
    }

    pub fn remove_fixed_joint(&mut self, a: ObjectId, b: ObjectId) {
        self.joints.remove(&ordered(a, b));
    }

    pub fn velocity(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.get(&id)?.body.as_ref().map(|b| b.velocity)
    }

    /// World-space collider box, if the object currently collides.
    pub fn collider_aabb(&self, id: ObjectId) -> Option<Aabb> {
        let obj = self.objects.get(&id)?;
        let collider = obj.collider?;
        if !self.active_in_hierarchy(id) {
            return None;
        }
        if obj.character.is_some_and(|c| !c.enabled) {
            return None;
        }
        let pose = self.world_pose(id)?;
        Some(Aabb::from_center(
            pose.position + collider.center * obj.scale,
            collider.half_extents * obj.scale,
        ))
    }

    /// Advance free rigid bodies by `dt` seconds.
    ///
    /// Joined bodies share one velocity and move rigidly; each group's vertical
    /// move stops on colliders outside the group that are not free bodies.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let mut seen: HashSet<ObjectId> = HashSet::new();
        let free: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, o)| o.parent.is_none() && o.body.as_ref().is_some_and(|b| !b.dynamics.kinematic))
            .map(|(id, _)| *id)
            .collect();

        for start in free {
            if seen.contains(&start) {
                continue;
            }
            let group: Vec<ObjectId> = self
                .joint_group(start)
                .into_iter()
                .filter(|id| {
                    self.objects
                        .get(id)
                        .and_then(|o| o.body.as_ref())
                        .is_some_and(|b| !b.dynamics.kinematic)
                })
                .collect();
            seen.extend(group.iter().copied());
            self.step_group(&group, dt);
        }
    }

    fn step_group(&mut self, group: &[ObjectId], dt: f32) {
        let mut mass = 0.0;
        let mut momentum = Vec3::ZERO;
        let mut force = Vec3::ZERO;
        let mut gravity_mass = 0.0;
        let mut position_locked = false;

        for id in group {
            let Some(body) = self.objects.get(id).and_then(|o| o.body.as_ref()) else {
                continue;
            };
            mass += body.mass;
            momentum += body.velocity * body.mass;
            force += body.force;
            if body.dynamics.use_gravity {
                gravity_mass += body.mass;
            }
            if matches!(
                body.dynamics.constraints,
                Constraints::FreezePosition | Constraints::FreezeAll
            ) {
                position_locked = true;
            }
        }
        if mass <= 0.0 {
            return;
        }

        let mut velocity = if position_locked {
            Vec3::ZERO
        } else {
            let accel = force / mass + self.gravity * (gravity_mass / mass);
            momentum / mass + accel * dt
        };

        let members: HashSet<ObjectId> = group.iter().copied().collect();
        let obstacles: Vec<Aabb> = self
            .objects
            .keys()
            .filter(|id| !members.contains(id))
            .filter(|id| {
                self.objects
                    .get(id)
                    .and_then(|o| o.body.as_ref())
                    .is_none_or(|b| b.dynamics.kinematic)
            })
            .filter_map(|id| self.collider_aabb(*id))
            .collect();

        let mut delta = velocity * dt;
        for id in group {
            if let Some(aabb) = self.collider_aabb(*id) {
                let allowed = sweep_axis(&aabb, 1, delta.y, obstacles.iter());
                if allowed.abs() < delta.y.abs() {
                    delta.y = allowed;
                }
            }
        }
        if delta.y != velocity.y * dt {
            // Landed
            velocity.y = 0.0;
        }

        for id in group {
            if let Some(obj) = self.objects.get_mut(id) {
                obj.local.position += delta;
                if let Some(body) = obj.body.as_mut() {
                    body.velocity = velocity;
                    body.force = Vec3::ZERO;
                }
            }
        }
    }

    /// All objects reachable through joints from `start`, `start` first.
    fn joint_group(&self, start: ObjectId) -> Vec<ObjectId> {
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(id) = queue.pop_front() {
            out.push(id);
            for n in self.joint_neighbors(id) {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        out
    }

    fn world_pose(&self, id: ObjectId) -> Option<Pose> {
        let obj = self.objects.get(&id)?;
        match obj.parent {
            Some(parent) => Some(self.world_pose(parent)?.mul(&obj.local)),
            None => Some(obj.local),
        }
    }

    fn active_in_hierarchy(&self, id: ObjectId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.objects.get(&current) {
                Some(obj) if obj.active => cursor = obj.parent,
                _ => return false,
            }
        }
        true
    }

    fn is_descendant_of(&self, id: ObjectId, ancestor: ObjectId) -> bool {
        let mut cursor = self.objects.get(&id).and_then(|o| o.parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.objects.get(&current).and_then(|o| o.parent);
        }
        false
    }
}

#[inline]
fn ordered(a: ObjectId, b: ObjectId) -> (ObjectId, ObjectId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl PhysicsWorld for SandboxWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for id in self.objects.keys() {
            let Some(aabb) = self.collider_aabb(*id) else {
                continue;
            };
            let Some(t) = aabb.ray_cast(origin, dir) else {
                continue;
            };
            if t > max_distance || best.is_some_and(|b| b.distance <= t) {
                continue;
            }
            let mut point = origin + dir * t;
            let normal = aabb_surface_normal(point, aabb.min, aabb.max);
            // Contact lies exactly on the face plane
            for axis in 0..3 {
                if normal[axis] > 0.0 {
                    point[axis] = aabb.max[axis];
                } else if normal[axis] < 0.0 {
                    point[axis] = aabb.min[axis];
                }
            }
            best = Some(RayHit {
                object: *id,
                point,
                normal,
                distance: t,
            });
        }
        best
    }

    fn overlap_box(&self, center: Vec3, half_extents: Vec3) -> Vec<ObjectId> {
        let query = Aabb::from_center(center, half_extents);
        self.objects
            .keys()
            .filter(|id| self.collider_aabb(**id).is_some_and(|a| a.overlaps(&query)))
            .copied()
            .collect()
    }

    fn move_character(&mut self, id: ObjectId, displacement: Vec3) -> bool {
        let Some(mut mover) = self.collider_aabb(id) else {
            return false;
        };
        let obstacles: Vec<Aabb> = self
            .objects
            .keys()
            .filter(|other| **other != id && !self.is_descendant_of(**other, id))
            .filter_map(|other| self.collider_aabb(*other))
            .collect();

        let mut applied = Vec3::ZERO;
        for axis in [0, 2, 1] {
            let allowed = sweep_axis(&mover, axis, displacement[axis], obstacles.iter());
            applied[axis] = allowed;
            let mut offset = Vec3::ZERO;
            offset[axis] = allowed;
            mover = mover.translated(offset);
        }
        let grounded = displacement.y < 0.0 && applied.y > displacement.y;

        if let Some(pose) = self.world_pose(id) {
            self.set_pose(id, Pose::new(pose.position + applied, pose.rotation));
        }
        if let Some(character) = self.objects.get_mut(&id).and_then(|o| o.character.as_mut()) {
            character.grounded = grounded;
        }
        grounded
    }

    fn is_grounded(&self, id: ObjectId) -> bool {
        self.objects
            .get(&id)
            .and_then(|o| o.character)
            .is_some_and(|c| c.enabled && c.grounded)
    }

    fn set_character_enabled(&mut self, id: ObjectId, enabled: bool) {
        if let Some(character) = self.objects.get_mut(&id).and_then(|o| o.character.as_mut()) {
            character.enabled = enabled;
            if !enabled {
                character.grounded = false;
            }
        }
    }

    fn instantiate(&mut self, prefab: &Prefab, pose: Pose) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            SceneObject {
                name: prefab.name.clone(),
                parent: None,
                local: pose,
                scale: 1.0,
                active: true,
                collider: prefab.collider,
                body: prefab.dynamics.map(|dynamics| RigidBody {
                    dynamics,
                    mass: DEFAULT_MASS,
                    velocity: Vec3::ZERO,
                    force: Vec3::ZERO,
                }),
                character: None,
                materials: prefab.materials.clone(),
                tag: prefab.tag,
            },
        );
        id
    }

    fn destroy(&mut self, id: ObjectId) {
        if self.objects.remove(&id).is_none() {
            return;
        }
        let children: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, o)| o.parent == Some(id))
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.destroy(child);
        }
        self.joints.retain(|(a, b)| *a != id && *b != id);
    }

    fn exists(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    fn name(&self, id: ObjectId) -> Option<String> {
        self.objects.get(&id).map(|o| o.name.clone())
    }

    fn pose(&self, id: ObjectId) -> Option<Pose> {
        self.world_pose(id)
    }

    fn set_pose(&mut self, id: ObjectId, pose: Pose) {
        let parent_pose = self
            .objects
            .get(&id)
            .and_then(|o| o.parent)
            .and_then(|p| self.world_pose(p));
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.local = match parent_pose {
                Some(parent) => parent.relative_to(&pose),
                None => pose,
            };
        }
    }

    fn local_pose(&self, id: ObjectId) -> Option<Pose> {
        self.objects.get(&id).map(|o| o.local)
    }

    fn set_local_pose(&mut self, id: ObjectId, pose: Pose) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.local = pose;
        }
    }

    fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(&id).and_then(|o| o.parent)
    }

    fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) {
        if let Some(p) = parent {
            // Refuse cycles and dangling parents
            if p == id || !self.exists(p) || self.is_descendant_of(p, id) {
                return;
            }
        }
        let Some(world) = self.world_pose(id) else {
            return;
        };
        let parent_pose = parent.and_then(|p| self.world_pose(p));
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.parent = parent;
            obj.local = match parent_pose {
                Some(pp) => pp.relative_to(&world),
                None => world,
            };
        }
    }

    fn scale(&self, id: ObjectId) -> f32 {
        self.objects.get(&id).map_or(1.0, |o| o.scale)
    }

    fn set_scale(&mut self, id: ObjectId, scale: f32) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.scale = scale;
        }
    }

    fn set_active(&mut self, id: ObjectId, active: bool) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.active = active;
        }
    }

    fn is_active(&self, id: ObjectId) -> bool {
        self.active_in_hierarchy(id)
    }

    fn remove_collider(&mut self, id: ObjectId) -> bool {
        self.objects
            .get_mut(&id)
            .is_some_and(|o| o.collider.take().is_some())
    }

    fn tag(&self, id: ObjectId) -> ObjectTag {
        self.objects.get(&id).map_or(ObjectTag::Untagged, |o| o.tag)
    }

    fn body_root(&self, id: ObjectId) -> Option<ObjectId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let obj = self.objects.get(&current)?;
            if obj.body.is_some() {
                return Some(current);
            }
            cursor = obj.parent;
        }
        None
    }

    fn materials(&self, id: ObjectId) -> Vec<Material> {
        self.objects
            .get(&id)
            .map(|o| o.materials.clone())
            .unwrap_or_default()
    }

    fn set_materials(&mut self, id: ObjectId, materials: &[Material]) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.materials = materials.to_vec();
        }
    }

    fn dynamics(&self, id: ObjectId) -> Option<Dynamics> {
        self.objects.get(&id)?.body.as_ref().map(|b| b.dynamics)
    }

    fn set_dynamics(&mut self, id: ObjectId, dynamics: Dynamics) {
        if let Some(body) = self.objects.get_mut(&id).and_then(|o| o.body.as_mut()) {
            body.dynamics = dynamics;
            if dynamics.kinematic {
                body.velocity = Vec3::ZERO;
            }
        }
    }

    fn add_force(&mut self, id: ObjectId, force: Vec3) {
        if let Some(body) = self.objects.get_mut(&id).and_then(|o| o.body.as_mut()) {
            if !body.dynamics.kinematic {
                body.force += force;
            }
        }
    }

    fn move_rotation(&mut self, id: ObjectId, rotation: Quat) {
        let Some(pivot) = self.world_pose(id) else {
            return;
        };
        if self.objects.get(&id).is_none_or(|o| o.body.is_none()) {
            return;
        }
        let delta = (rotation * pivot.rotation.inverse()).normalize();

        // Fixed joints carry the rest of the group around the pivot
        for member in self.joint_group(id) {
            let Some(pose) = self.world_pose(member) else {
                continue;
            };
            let moved = if member == id {
                Pose::new(pose.position, rotation.normalize())
            } else {
                Pose::new(
                    pivot.position + delta * (pose.position - pivot.position),
                    (delta * pose.rotation).normalize(),
                )
            };
            self.set_pose(member, moved);
        }
    }

    fn joint_neighbors(&self, id: ObjectId) -> Vec<ObjectId> {
        self.joints
            .iter()
            .filter_map(|(a, b)| {
                if *a == id {
                    Some(*b)
                } else if *b == id {
                    Some(*a)
                } else {
                    None
                }
            })
            .collect()
    }
}
