//! Movement leaves: wandering and pursuit.

use glam::Vec3;
use noise::NoiseFn;
use rand::Rng;
use sentinel_bt::TreeStatus;
use tracing::debug;

use crate::context::{CombatWorld, EnemyContext, Navigator};
use crate::seek::seek;

/// Drift around randomly.
///
/// The persistent wander target is jittered on the ground plane, pushed back
/// onto the wander circle and biased forward by a smooth noise value over
/// time. The resulting local point is converted to world space and sought.
pub fn wander<N: Navigator, W: CombatWorld>(ctx: &mut EnemyContext<N, W>) -> TreeStatus {
    let jitter = ctx.config.wander_jitter;
    let dx: f32 = ctx.rng.gen_range(-1.0..=1.0);
    let dz: f32 = ctx.rng.gen_range(-1.0..=1.0);

    let target = ctx.state.wander_target + Vec3::new(dx * jitter, 0.0, dz * jitter);
    let target = target.normalize_or_zero() * ctx.config.wander_radius;
    ctx.state.wander_target = target;

    let noise = ctx.noise.get([ctx.time.elapsed, 0.0]) as f32;
    let bias = (noise * 0.5 + 0.5).clamp(0.0, 1.0) * ctx.config.wander_forward_scale;

    let local = target + Vec3::NEG_Z * bias;
    let destination = ctx.nav.transform().transform_point(local);

    debug!(?destination, "wander");
    seek(ctx, destination)
}

/// Chase the target, leading it when it is on the move.
///
/// Goes straight for the target when it is behind the enemy and heading the
/// same way, when it is standing still, or when neither side can move.
/// Otherwise aims at the point the target will reach after the look-ahead
/// time.
pub fn pursue<N: Navigator, W: CombatWorld>(ctx: &mut EnemyContext<N, W>) -> TreeStatus {
    let agent = ctx.nav.transform();
    let target = ctx.target;
    let to_target = target.position - agent.position;

    let max_speed = ctx.nav.speed();
    let closing_speed_sq = max_speed * max_speed + target.velocity.length_squared();

    let destination = if closing_speed_sq <= f32::EPSILON || seek_directly(ctx, to_target) {
        target.position
    } else {
        let look_ahead = to_target.length_squared() / closing_speed_sq;
        target.position + target.forward * look_ahead
    };

    debug!(?destination, "pursue");
    seek(ctx, destination)
}

fn seek_directly<N: Navigator, W: CombatWorld>(ctx: &EnemyContext<N, W>, to_target: Vec3) -> bool {
    let config = &ctx.config;
    let target = &ctx.target;

    let stationary =
        target.velocity.length_squared() * ctx.time.delta < config.stationary_threshold;
    if stationary || to_target.length_squared() <= f32::EPSILON {
        return true;
    }

    let forward = ctx.nav.transform().forward();
    let relative_heading = forward.angle_between(to_target).to_degrees();
    let heading_difference = forward.angle_between(target.forward).to_degrees();

    relative_heading > config.overshoot_angle_deg
        && heading_difference < config.heading_tolerance_deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use crate::context::TargetSnapshot;
    use crate::test_support::{context, MockNavigator, MockWorld};
    use sentinel_core::FrameTime;

    #[test]
    fn test_wander_without_jitter_moves_ahead() {
        let config = EnemyConfig {
            wander_jitter: 0.0,
            ..Default::default()
        };
        let mut ctx = context(config, MockNavigator::at(Vec3::new(2.0, 0.0, 2.0)), MockWorld::new());

        assert_eq!(wander(&mut ctx), TreeStatus::Running);
        assert_eq!(ctx.state.wander_target, Vec3::ZERO);

        let destination = ctx.nav.destinations[0];
        assert!((destination.x - 2.0).abs() < 1e-6);
        assert!(destination.z <= 2.0 && destination.z >= 1.75, "z = {}", destination.z);
    }

    #[test]
    fn test_wander_target_stays_on_circle() {
        let mut ctx = context(EnemyConfig::default(), MockNavigator::at(Vec3::ZERO), MockWorld::new());

        for _ in 0..20 {
            wander(&mut ctx);
            let length = ctx.state.wander_target.length();
            assert!(length == 0.0 || (length - 4.0).abs() < 1e-4);
            assert_eq!(ctx.state.wander_target.y, 0.0);
        }
    }

    #[test]
    fn test_wander_follows_agent_rotation() {
        let config = EnemyConfig {
            wander_jitter: 0.0,
            ..Default::default()
        };
        let mut nav = MockNavigator::at(Vec3::ZERO);
        // Facing +X
        nav.transform.rotation = glam::Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        let mut ctx = context(config, nav, MockWorld::new());
        ctx.time = FrameTime::new(0.1, 0.37);

        wander(&mut ctx);
        let destination = ctx.nav.destinations[0];
        assert!(destination.x > 0.0);
        assert!(destination.z.abs() < 1e-5);
    }

    #[test]
    fn test_wander_is_deterministic_per_seed() {
        let mut a = context(EnemyConfig::default(), MockNavigator::at(Vec3::ZERO), MockWorld::new());
        let mut b = context(EnemyConfig::default(), MockNavigator::at(Vec3::ZERO), MockWorld::new());

        wander(&mut a);
        wander(&mut b);
        assert_eq!(a.nav.destinations, b.nav.destinations);
    }

    #[test]
    fn test_pursue_stationary_target_directly() {
        let mut ctx = context(EnemyConfig::default(), MockNavigator::at(Vec3::ZERO), MockWorld::new());
        ctx.target = TargetSnapshot::stationary(Vec3::new(0.0, 0.0, -6.0));
        ctx.time = FrameTime::new(0.1, 1.0);

        assert_eq!(pursue(&mut ctx), TreeStatus::Running);
        assert_eq!(ctx.nav.destinations, vec![Vec3::new(0.0, 0.0, -6.0)]);
    }

    #[test]
    fn test_pursue_leads_moving_target() {
        let mut ctx = context(EnemyConfig::default(), MockNavigator::at(Vec3::ZERO), MockWorld::new());
        ctx.target = TargetSnapshot::new(Vec3::new(0.0, 0.0, -10.0), Vec3::X, Vec3::new(4.0, 0.0, 0.0));
        ctx.time = FrameTime::new(0.1, 1.0);

        pursue(&mut ctx);

        // look-ahead = 100 / (3² + 4²) = 4
        let destination = ctx.nav.destinations[0];
        assert!((destination - Vec3::new(4.0, 0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_pursue_target_behind_and_aligned_directly() {
        let mut ctx = context(EnemyConfig::default(), MockNavigator::at(Vec3::ZERO), MockWorld::new());
        ctx.target =
            TargetSnapshot::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::new(0.0, 0.0, -4.0));
        ctx.time = FrameTime::new(0.1, 1.0);

        pursue(&mut ctx);
        assert_eq!(ctx.nav.destinations, vec![Vec3::new(0.0, 0.0, 5.0)]);
    }

    #[test]
    fn test_pursue_target_on_top_of_agent() {
        let mut ctx = context(EnemyConfig::default(), MockNavigator::at(Vec3::ZERO), MockWorld::new());
        ctx.target = TargetSnapshot::new(Vec3::ZERO, Vec3::X, Vec3::new(4.0, 0.0, 0.0));
        ctx.time = FrameTime::new(0.1, 1.0);

        pursue(&mut ctx);
        assert_eq!(ctx.nav.destinations, vec![Vec3::ZERO]);
    }

    #[test]
    fn test_pursue_with_no_closing_speed_stays_finite() {
        let config = EnemyConfig {
            stationary_threshold: 0.0,
            ..Default::default()
        };
        let mut nav = MockNavigator::at(Vec3::ZERO);
        nav.speed = 0.0;
        let mut ctx = context(config, nav, MockWorld::new());
        ctx.target = TargetSnapshot::stationary(Vec3::new(0.0, 0.0, -6.0));
        ctx.time = FrameTime::new(0.1, 1.0);

        pursue(&mut ctx);
        let destination = ctx.nav.destinations[0];
        assert!(destination.is_finite());
        assert_eq!(destination, Vec3::new(0.0, 0.0, -6.0));
    }
}
