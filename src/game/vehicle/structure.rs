//! Vehicle Structures
//!
//! A vehicle is the set of blocks joined to its driver block. Structures are
//! rediscovered from the joint graph whenever they are needed.

use crate::physics::{Dynamics, ObjectId, PhysicsWorld, connected_structure};

use super::driver::DriverRegistry;

/// One joint-connected structure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Structure {
    /// Every member in breadth-first order from the search start
    pub members: Vec<ObjectId>,
    /// First member carrying a driver, in the same order
    pub driver: Option<ObjectId>,
}

impl Structure {
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.members.contains(&id)
    }
}

/// Walk the joint graph from `start` and note its driver, if any.
pub fn discover_structure<W: PhysicsWorld + ?Sized>(
    world: &W,
    start: ObjectId,
    drivers: &DriverRegistry,
) -> Structure {
    let members = connected_structure(world, start);
    let driver = members.iter().copied().find(|id| drivers.contains(*id));
    Structure { members, driver }
}

/// Unfreeze every member with a rigid body. Returns how many were released.
///
/// All members are released in the same call, so a structure is never left
/// partly frozen.
pub fn release_structure<W: PhysicsWorld + ?Sized>(world: &mut W, members: &[ObjectId]) -> usize {
    let mut released = 0;
    for &id in members {
        if world.dynamics(id).is_some() {
            world.set_dynamics(id, Dynamics::free());
            released += 1;
        }
    }
    log::debug!("[Vehicle] Released {released}/{} blocks", members.len());
    released
}
