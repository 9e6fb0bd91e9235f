//! Headless arena: one enemy against a scripted target.

use anyhow::ensure;
use glam::Vec3;
use sentinel_ai::{Enemy, GroundNavigator, Navigator, TargetSnapshot};
use sentinel_bt::TreeStatus;
use sentinel_core::{FrameTime, GameTime};
use sentinel_physics::{layers, AgentBody, PhysicsConfig, PhysicsWorld};
use tracing::{debug, info};

use crate::settings::{ArenaSettings, SimulationSettings};

/// Target that walks a circle, resting between laps
#[derive(Debug, Clone)]
pub struct ScriptedTarget {
    settings: ArenaSettings,
    angle: f32,
    phase_time: f32,
    walking: bool,
    snapshot: TargetSnapshot,
}

impl ScriptedTarget {
    pub fn new(settings: ArenaSettings) -> Self {
        let mut target = Self {
            settings,
            angle: 0.0,
            phase_time: 0.0,
            walking: true,
            snapshot: TargetSnapshot::default(),
        };
        target.snapshot = target.pose(Vec3::ZERO);
        target
    }

    /// Move along the script for `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        self.phase_time += delta;
        let phase_length = if self.walking {
            self.settings.target_walk_secs
        } else {
            self.settings.target_rest_secs
        };
        if self.phase_time >= phase_length {
            self.phase_time = 0.0;
            self.walking = !self.walking;
        }

        let radius = self.settings.target_radius;
        if !self.walking || radius <= 0.0 {
            self.snapshot = self.pose(Vec3::ZERO);
            return;
        }

        self.angle += self.settings.target_speed / radius * delta;
        let tangent = Vec3::new(-self.angle.sin(), 0.0, self.angle.cos());
        self.snapshot = self.pose(tangent * self.settings.target_speed);
    }

    fn pose(&self, velocity: Vec3) -> TargetSnapshot {
        let offset = Vec3::new(self.angle.cos(), 0.0, self.angle.sin()) * self.settings.target_radius;
        let forward = Vec3::new(-self.angle.sin(), 0.0, self.angle.cos());
        TargetSnapshot::new(self.settings.target_center + offset, forward, velocity)
    }

    pub fn snapshot(&self) -> TargetSnapshot {
        self.snapshot
    }
}

/// What happened during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArenaStats {
    /// Outer frames fed to the clock
    pub frames: u64,
    /// Fixed simulation ticks
    pub ticks: u64,
    pub evaluations: u64,
    pub successes: u64,
    pub melee_hits: u64,
    pub ranged_shots: u64,
    pub closest_approach: f32,
}

impl ArenaStats {
    pub fn attacks(&self) -> u64 {
        self.melee_hits + self.ranged_shots
    }
}

/// One enemy, one target, a physics world and a fixed-step clock.
///
/// Outer frames of `frame_secs` feed the [`GameTime`] accumulator, which
/// applies the time scale and delta clamp and releases fixed ticks.
pub struct Arena {
    enemy: Enemy<GroundNavigator, PhysicsWorld>,
    enemy_body: AgentBody,
    target: ScriptedTarget,
    target_body: AgentBody,
    time: GameTime,
    duration: f32,
    frame_secs: f32,
    stats: ArenaStats,
}

impl Arena {
    /// Create a new arena from settings
    pub fn new(settings: &SimulationSettings) -> anyhow::Result<Self> {
        let time = &settings.time;
        ensure!(
            time.fixed_timestep > 0.0,
            "fixed_timestep must be positive, got {}",
            time.fixed_timestep
        );
        ensure!(
            time.time_scale > 0.0,
            "time_scale must be positive, got {}",
            time.time_scale
        );
        ensure!(
            time.max_delta_time > 0.0,
            "max_delta_time must be positive, got {}",
            time.max_delta_time
        );
        ensure!(
            settings.arena.frame_secs > 0.0,
            "frame_secs must be positive, got {}",
            settings.arena.frame_secs
        );
        settings.navigator.validate()?;

        let mut physics = PhysicsWorld::with_config(PhysicsConfig {
            timestep: settings.time.fixed_timestep,
            ..Default::default()
        });
        physics.create_ground(0.0);

        let target = ScriptedTarget::new(settings.arena.clone());
        let target_body = AgentBody::spawn(&mut physics, target.snapshot().position, layers::TARGET);
        let enemy_body = AgentBody::spawn(&mut physics, settings.arena.enemy_start, layers::AGENT);
        physics.refresh_queries();

        let nav = GroundNavigator::new(settings.navigator.clone(), settings.arena.enemy_start);
        let enemy = Enemy::new(settings.enemy.clone(), nav, physics)?;

        Ok(Self {
            enemy,
            enemy_body,
            target,
            target_body,
            time: GameTime::new(settings.time.clone()),
            duration: settings.arena.duration_secs,
            frame_secs: settings.arena.frame_secs,
            stats: ArenaStats {
                closest_approach: f32::INFINITY,
                ..Default::default()
            },
        })
    }

    /// Run until the configured duration has been simulated
    pub fn run(&mut self) -> &ArenaStats {
        let step = self.time.config.fixed_timestep;
        let ticks = (self.duration / step).round() as u64;
        info!("Running arena for {} ticks of {:.4}s", ticks, step);

        while self.stats.ticks < ticks {
            self.time.update(self.frame_secs);
            self.stats.frames += 1;
            for _ in 0..self.time.fixed_steps() {
                if self.stats.ticks >= ticks {
                    break;
                }
                let frame = self.time.next_fixed_frame();
                self.step(frame);
            }
        }

        let stats = &self.stats;
        info!(
            "Arena finished: {} frames, {} ticks, {} evaluations, {} attacks ({} melee, {} ranged), closest approach {:.2}m",
            stats.frames,
            stats.ticks,
            stats.evaluations,
            stats.attacks(),
            stats.melee_hits,
            stats.ranged_shots,
            stats.closest_approach
        );
        &self.stats
    }

    /// Advance everything by one fixed tick
    pub fn step(&mut self, frame: FrameTime) {
        self.target.advance(frame.delta);
        let target = self.target.snapshot();
        self.target_body.sync(self.enemy.world_mut(), target.position);

        let cooldown_before = self.enemy.state().cooldown;
        let bodies_before = self.enemy.world().body_count();

        let status = self.enemy.tick(target, frame);

        if self.enemy.state().cooldown > cooldown_before {
            if self.enemy.world().body_count() > bodies_before {
                self.stats.ranged_shots += 1;
                debug!(elapsed = frame.elapsed, "enemy fired");
            } else {
                self.stats.melee_hits += 1;
                debug!(elapsed = frame.elapsed, "enemy struck");
            }
        }

        self.enemy.nav_mut().advance(frame.delta);
        let position = self.enemy.nav().transform().position;
        self.enemy_body.sync(self.enemy.world_mut(), position);
        self.enemy.world_mut().step();

        self.stats.ticks += 1;
        self.stats.evaluations = self.enemy.evaluations();
        if status == TreeStatus::Success {
            self.stats.successes += 1;
        }
        self.stats.closest_approach = self
            .stats
            .closest_approach
            .min(position.distance(target.position));
    }

    pub fn enemy(&self) -> &Enemy<GroundNavigator, PhysicsWorld> {
        &self.enemy
    }

    pub fn enemy_mut(&mut self) -> &mut Enemy<GroundNavigator, PhysicsWorld> {
        &mut self.enemy
    }
}
