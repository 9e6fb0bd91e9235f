//! Range guards and attack leaves.

use glam::Quat;
use sentinel_bt::TreeStatus;
use tracing::debug;

use crate::context::{CombatWorld, EnemyContext, Navigator};

/// `Success` when the target is within melee range (inclusive)
pub fn check_melee_range<N: Navigator, W: CombatWorld>(ctx: &mut EnemyContext<N, W>) -> TreeStatus {
    let melee = ctx.config.melee_range;
    TreeStatus::from_bool(ctx.distance_sq_to_target() <= melee * melee)
}

/// `Success` when the target is beyond melee range and short of ranged range
pub fn check_ranged_range<N: Navigator, W: CombatWorld>(ctx: &mut EnemyContext<N, W>) -> TreeStatus {
    let melee = ctx.config.melee_range;
    let ranged = ctx.config.ranged_range;
    let distance_sq = ctx.distance_sq_to_target();
    TreeStatus::from_bool(melee * melee < distance_sq && distance_sq < ranged * ranged)
}

/// Strike whatever target-layer collider sits at the attack point.
///
/// Fails while the cooldown runs or when nothing is hit. A hit restarts the
/// cooldown.
pub fn melee_attack<N: Navigator, W: CombatWorld>(ctx: &mut EnemyContext<N, W>) -> TreeStatus {
    if !ctx.state.attack_ready() {
        return TreeStatus::Failure;
    }

    let point = ctx.nav.transform().transform_point(ctx.config.attack_point);
    let hits = ctx
        .world
        .overlap_sphere(point, ctx.config.attack_radius, ctx.config.target_layers());

    if hits.is_empty() {
        debug!(?point, "melee attack missed");
        return TreeStatus::Failure;
    }

    debug!(hits = hits.len(), "melee attack");
    ctx.state.cooldown = ctx.config.attack_cooldown;
    TreeStatus::Success
}

/// Turn toward the target and fire a projectile at it.
///
/// Fails only while the cooldown runs. The turn is limited to what the agent
/// can rotate this tick; the shot itself is aimed straight at the target.
pub fn range_attack<N: Navigator, W: CombatWorld>(ctx: &mut EnemyContext<N, W>) -> TreeStatus {
    if !ctx.state.attack_ready() {
        return TreeStatus::Failure;
    }

    let target = ctx.target.position;
    let mut transform = ctx.nav.transform();
    transform.turn_towards_point(target, ctx.nav.angular_speed() * ctx.time.delta);
    ctx.nav.set_rotation(transform.rotation);

    let prefab = ctx.config.projectile_prefab();
    let projectile = ctx
        .world
        .spawn_projectile(&prefab, transform.position, Quat::IDENTITY);
    let impulse = (target - transform.position) * ctx.config.projectile_impulse;
    ctx.world.apply_impulse(projectile, impulse);
    ctx.world
        .schedule_despawn(projectile, ctx.config.attack_cooldown);

    debug!(?projectile, ?impulse, "range attack");
    ctx.state.cooldown = ctx.config.attack_cooldown;
    TreeStatus::Success
}
