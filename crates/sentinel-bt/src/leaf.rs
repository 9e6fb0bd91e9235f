//! Leaf nodes wrapping decision and action functions.

use std::fmt;

use crate::{Node, TreeStatus};

type LeafFn<C> = Box<dyn FnMut(&mut C) -> TreeStatus>;

/// A named decision or action.
///
/// Leaves are the only nodes that touch the context. The wrapped function may
/// return `Running` to ask to be called again next tick.
pub struct Leaf<C> {
    name: String,
    action: LeafFn<C>,
}

impl<C> Leaf<C> {
    /// Create a new leaf from a name and its behavior
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: FnMut(&mut C) -> TreeStatus + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(action),
        }
    }
}

impl<C> Node<C> for Leaf<C> {
    #[inline]
    fn evaluate(&mut self, ctx: &mut C) -> TreeStatus {
        (self.action)(ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<C> fmt::Debug for Leaf<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf").field("name", &self.name).finish()
    }
}
