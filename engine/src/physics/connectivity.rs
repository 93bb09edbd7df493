//! Structure connectivity
//!
//! Breadth-first discovery of the set of bodies transitively linked to a
//! starting body by fixed joints. Nothing is cached: the structure is
//! rediscovered each time it is needed.

use std::collections::{HashSet, VecDeque};

use super::types::ObjectId;
use super::world::PhysicsWorld;

/// Every object joint-connected to `start`, including `start` itself.
///
/// Objects are returned in breadth-first order with `start` first; each
/// object appears exactly once.
pub fn connected_structure<W: PhysicsWorld + ?Sized>(world: &W, start: ObjectId) -> Vec<ObjectId> {
    if !world.exists(start) {
        return Vec::new();
    }

    let mut connected = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        connected.push(current);
        for neighbor in world.joint_neighbors(current) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    connected
}

/// First object of the structure around `start`, in breadth-first order,
/// for which `predicate` holds.
pub fn find_in_structure<W, P>(world: &W, start: ObjectId, mut predicate: P) -> Option<ObjectId>
where
    W: PhysicsWorld + ?Sized,
    P: FnMut(ObjectId) -> bool,
{
    connected_structure(world, start)
        .into_iter()
        .find(|id| predicate(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::sandbox::SandboxWorld;
    use crate::physics::types::{Pose, Prefab};

    fn spawn(world: &mut SandboxWorld, n: usize) -> Vec<ObjectId> {
        (0..n)
            .map(|i| world.instantiate(&Prefab::empty(format!("n{i}")), Pose::IDENTITY))
            .collect()
    }

    #[test]
    fn test_single_node() {
        let mut world = SandboxWorld::new();
        let ids = spawn(&mut world, 1);
        assert_eq!(connected_structure(&world, ids[0]), vec![ids[0]]);
    }

    #[test]
    fn test_unknown_start_is_empty() {
        let world = SandboxWorld::new();
        assert!(connected_structure(&world, ObjectId(99)).is_empty());
    }

    #[test]
    fn test_chain_from_either_end() {
        let mut world = SandboxWorld::new();
        let ids = spawn(&mut world, 3);
        world.add_fixed_joint(ids[0], ids[1]);
        world.add_fixed_joint(ids[1], ids[2]);

        assert_eq!(connected_structure(&world, ids[0]), ids);
        let mut from_end = connected_structure(&world, ids[2]);
        assert_eq!(from_end[0], ids[2]);
        from_end.sort();
        assert_eq!(from_end, ids);
    }

    #[test]
    fn test_cycle_visits_each_once() {
        let mut world = SandboxWorld::new();
        let ids = spawn(&mut world, 4);
        for i in 0..4 {
            world.add_fixed_joint(ids[i], ids[(i + 1) % 4]);
        }
        world.add_fixed_joint(ids[0], ids[2]);
        let found = connected_structure(&world, ids[1]);
        assert_eq!(found.len(), 4);
        let unique: HashSet<ObjectId> = found.iter().copied().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_disjoint_structures_stay_apart() {
        let mut world = SandboxWorld::new();
        let ids = spawn(&mut world, 5);
        world.add_fixed_joint(ids[0], ids[1]);
        world.add_fixed_joint(ids[2], ids[3]);
        world.add_fixed_joint(ids[3], ids[4]);

        let left: HashSet<ObjectId> = connected_structure(&world, ids[1]).into_iter().collect();
        assert_eq!(left, HashSet::from([ids[0], ids[1]]));
        let right: HashSet<ObjectId> = connected_structure(&world, ids[4]).into_iter().collect();
        assert_eq!(right, HashSet::from([ids[2], ids[3], ids[4]]));
    }

    #[test]
    fn test_breadth_first_layering() {
        let mut world = SandboxWorld::new();
        let ids = spawn(&mut world, 4);
        // ids[0] - ids[1] - ids[3], ids[0] - ids[2]
        world.add_fixed_joint(ids[0], ids[1]);
        world.add_fixed_joint(ids[1], ids[3]);
        world.add_fixed_joint(ids[0], ids[2]);
        let order = connected_structure(&world, ids[0]);
        assert_eq!(order[0], ids[0]);
        assert_eq!(order[3], ids[3]);
    }

    #[test]
    fn test_find_in_structure() {
        let mut world = SandboxWorld::new();
        let ids = spawn(&mut world, 3);
        world.add_fixed_joint(ids[0], ids[1]);
        world.add_fixed_joint(ids[1], ids[2]);
        let target = ids[2];
        assert_eq!(find_in_structure(&world, ids[0], |id| id == target), Some(target));
        assert_eq!(find_in_structure(&world, ids[0], |_| false), None);
    }
}
