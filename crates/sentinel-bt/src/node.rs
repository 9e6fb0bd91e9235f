//! Node evaluation contract.

use crate::TreeStatus;

/// A behavior tree node evaluated against a context once per tick.
///
/// The context `C` carries whatever agent and world state the leaves read and
/// write. The protocol imposes no side-effect contract of its own; side effects
/// belong to leaves.
pub trait Node<C> {
    /// Evaluate this node for the current tick.
    fn evaluate(&mut self, ctx: &mut C) -> TreeStatus;

    /// Name used in traces and debug output.
    fn name(&self) -> &str;
}

/// Lets `Box<dyn Node<C>>` be passed wherever a node is expected.
impl<C> Node<C> for Box<dyn Node<C>> {
    #[inline]
    fn evaluate(&mut self, ctx: &mut C) -> TreeStatus {
        (**self).evaluate(ctx)
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }
}
