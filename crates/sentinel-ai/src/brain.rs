//! Enemy decision tree and the per-tick driver around it.

use sentinel_bt::{leaf, selector, sequence, BehaviorTree, TreeStatus};
use sentinel_core::FrameTime;
use tracing::trace;

use crate::combat::{check_melee_range, check_ranged_range, melee_attack, range_attack};
use crate::config::{ConfigError, EnemyConfig};
use crate::context::{CombatWorld, EnemyContext, Navigator, TargetSnapshot};
use crate::state::CombatState;
use crate::steering::{pursue, wander};

/// Build the enemy tree.
///
/// ```text
/// Selector "enemy"
/// ├── Sequence "melee":  CheckMeleeRange, Pursue, MeleeAttack
/// ├── Sequence "ranged": CheckRangedRange, RangeAttack
/// └── Wander
/// ```
pub fn build_enemy_tree<N, W>() -> BehaviorTree<EnemyContext<N, W>>
where
    N: Navigator + 'static,
    W: CombatWorld + 'static,
{
    let root = selector(
        "enemy",
        vec![
            sequence(
                "melee",
                vec![
                    leaf("CheckMeleeRange", check_melee_range::<N, W>),
                    leaf("Pursue", pursue::<N, W>),
                    leaf("MeleeAttack", melee_attack::<N, W>),
                ],
            ),
            sequence(
                "ranged",
                vec![
                    leaf("CheckRangedRange", check_ranged_range::<N, W>),
                    leaf("RangeAttack", range_attack::<N, W>),
                ],
            ),
            leaf("Wander", wander::<N, W>),
        ],
    );
    BehaviorTree::from_boxed(root)
}

/// One enemy: its decision tree plus everything the tree acts on
pub struct Enemy<N, W> {
    tree: BehaviorTree<EnemyContext<N, W>>,
    context: EnemyContext<N, W>,
}

impl<N, W> Enemy<N, W>
where
    N: Navigator + 'static,
    W: CombatWorld + 'static,
{
    /// Create a new enemy. Rejects invalid tuning.
    pub fn new(config: EnemyConfig, nav: N, world: W) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree: build_enemy_tree(),
            context: EnemyContext::new(config, nav, world),
        })
    }

    /// Run one simulation tick
    pub fn tick(&mut self, target: TargetSnapshot, frame: FrameTime) -> TreeStatus {
        self.context.target = target;
        self.context.time = frame;
        self.context.state.countdown(frame.delta);

        let status = self.tree.tick(&mut self.context);
        trace!(?status, cooldown = self.context.state.cooldown, "enemy ticked");
        status
    }

    /// Status reported by the last tick
    pub fn status(&self) -> TreeStatus {
        self.tree.last_status()
    }

    /// Ticks that evaluated the tree
    pub fn evaluations(&self) -> u64 {
        self.tree.evaluations()
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.context.config
    }

    pub fn state(&self) -> &CombatState {
        &self.context.state
    }

    pub fn state_mut(&mut self) -> &mut CombatState {
        &mut self.context.state
    }

    pub fn nav(&self) -> &N {
        &self.context.nav
    }

    pub fn nav_mut(&mut self) -> &mut N {
        &mut self.context.nav
    }

    pub fn world(&self) -> &W {
        &self.context.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.context.world
    }
}
