//! Collision layers.
//!
//! Every collider created by [`PhysicsWorld`](crate::PhysicsWorld) belongs to
//! exactly one of these groups. Overlap queries take a mask of groups to hit.

use rapier3d::prelude::{Group, InteractionGroups};

/// Static level geometry
pub const ENVIRONMENT: Group = Group::GROUP_1;
/// Enemy agents
pub const AGENT: Group = Group::GROUP_2;
/// Whoever the enemies are fighting
pub const TARGET: Group = Group::GROUP_3;
/// Thrown or fired objects
pub const PROJECTILE: Group = Group::GROUP_4;

/// Interaction groups for a collider that is a member of `layer` and
/// collides with everything.
pub fn member_of(layer: Group) -> InteractionGroups {
    InteractionGroups::new(layer, Group::ALL)
}

/// Interaction groups for projectiles. They pass through enemy agents.
pub fn projectile_groups() -> InteractionGroups {
    InteractionGroups::new(PROJECTILE, Group::ALL.difference(AGENT))
}

/// Interaction groups for a query that only hits colliders in `mask`.
pub fn query_mask(mask: Group) -> InteractionGroups {
    InteractionGroups::new(Group::ALL, mask)
}

/// Build a layer mask from raw bits, dropping unknown bits.
pub fn from_bits(bits: u32) -> Group {
    Group::from_bits_truncate(bits)
}
