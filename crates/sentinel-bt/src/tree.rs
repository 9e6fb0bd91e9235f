//! Top-level tree driver.

use std::fmt;

use tracing::trace;

use crate::{Node, TreeStatus};

/// Owns a root node and evaluates it once per tick.
///
/// After the root reports `Success`, the following tick is skipped: no node is
/// evaluated and the tree reports `Running`. Evaluation resumes the tick after.
pub struct BehaviorTree<C> {
    root: Box<dyn Node<C>>,
    last_status: TreeStatus,
    evaluations: u64,
}

impl<C> BehaviorTree<C> {
    /// Create a new tree around its root node
    pub fn new<N: Node<C> + 'static>(root: N) -> Self {
        Self::from_boxed(Box::new(root))
    }

    /// Create a new tree from an already boxed root
    pub fn from_boxed(root: Box<dyn Node<C>>) -> Self {
        Self {
            root,
            last_status: TreeStatus::Running,
            evaluations: 0,
        }
    }

    /// Advance the tree by one tick
    pub fn tick(&mut self, ctx: &mut C) -> TreeStatus {
        if self.last_status.is_success() {
            trace!(root = self.root.name(), "skipping tick after success");
            self.last_status = TreeStatus::Running;
            return TreeStatus::Running;
        }

        self.last_status = self.root.evaluate(ctx);
        self.evaluations += 1;
        self.last_status
    }

    /// Status stored by the most recent tick
    pub fn last_status(&self) -> TreeStatus {
        self.last_status
    }

    /// Force the stored status back to `Running`
    pub fn reset_status(&mut self) {
        self.last_status = TreeStatus::Running;
    }

    /// Number of ticks that actually evaluated the root
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn root_name(&self) -> &str {
        self.root.name()
    }
}

impl<C> fmt::Debug for BehaviorTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.root.name())
            .field("last_status", &self.last_status)
            .field("evaluations", &self.evaluations)
            .finish()
    }
}
