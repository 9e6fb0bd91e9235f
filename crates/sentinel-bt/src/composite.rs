//! Composite nodes.
//!
//! Composites own an ordered list of children plus a cursor pointing at the
//! child currently being worked on. Only the cursor child is evaluated on a
//! tick, so a child that returned `Running` is resumed next tick without
//! re-running the siblings before it. The cursor returns to the first child
//! whenever the composite itself reaches a terminal status.

use std::fmt;

use tracing::trace;

use crate::{Node, TreeStatus};

/// Named child list plus cursor, shared by [`Sequence`] and [`Selector`].
struct Children<C> {
    name: String,
    nodes: Vec<Box<dyn Node<C>>>,
    cursor: usize,
}

impl<C> Children<C> {
    fn new(name: impl Into<String>, nodes: Vec<Box<dyn Node<C>>>) -> Self {
        Self {
            name: name.into(),
            nodes,
            cursor: 0,
        }
    }

    /// Evaluate the cursor child. `stop` ends the composite early and is
    /// returned as is; any other terminal status advances the cursor, and
    /// `exhausted` is returned once every child has produced it.
    fn tick(&mut self, ctx: &mut C, kind: &str, stop: TreeStatus, exhausted: TreeStatus) -> TreeStatus {
        let Some(child) = self.nodes.get_mut(self.cursor) else {
            self.cursor = 0;
            return exhausted;
        };

        let status = child.evaluate(ctx);
        trace!(node = %self.name, kind, child = self.cursor, ?status, "child evaluated");

        if status == TreeStatus::Running {
            return TreeStatus::Running;
        }
        if status == stop {
            self.cursor = 0;
            return stop;
        }

        self.cursor += 1;
        if self.cursor >= self.nodes.len() {
            self.cursor = 0;
            exhausted
        } else {
            TreeStatus::Running
        }
    }

    fn debug(&self, kind: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.nodes.iter().map(|c| c.name()).collect();
        f.debug_struct(kind)
            .field("name", &self.name)
            .field("cursor", &self.cursor)
            .field("children", &names)
            .finish()
    }
}

/// Construction and inspection API common to both composites
macro_rules! composite_api {
    ($ty:ident, $order:literal) => {
        impl<C> $ty<C> {
            #[doc = concat!("Create an empty ", stringify!($ty))]
            pub fn new(name: impl Into<String>) -> Self {
                Self::from_children(name, Vec::new())
            }

            #[doc = concat!("Create a ", stringify!($ty), " from an already-built child list")]
            pub fn from_children(name: impl Into<String>, children: Vec<Box<dyn Node<C>>>) -> Self {
                Self {
                    children: Children::new(name, children),
                }
            }

            #[doc = concat!("Append a child. Insertion order is ", $order, " order.")]
            pub fn add_child<N: Node<C> + 'static>(&mut self, node: N) {
                self.children.nodes.push(Box::new(node));
            }

            #[doc = concat!("Builder form of [`", stringify!($ty), "::add_child`]")]
            pub fn with_child<N: Node<C> + 'static>(mut self, node: N) -> Self {
                self.add_child(node);
                self
            }

            /// Index of the child that will be evaluated next
            pub fn cursor(&self) -> usize {
                self.children.cursor
            }

            /// Number of direct children
            pub fn len(&self) -> usize {
                self.children.nodes.len()
            }

            /// True when no child has been added
            pub fn is_empty(&self) -> bool {
                self.children.nodes.is_empty()
            }
        }

        impl<C> fmt::Debug for $ty<C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.children.debug(stringify!($ty), f)
            }
        }
    };
}

/// Executes children left to right until one fails (logical AND).
///
/// # Semantics
///
/// Per tick, only the cursor child is evaluated:
/// - `Failure`: the cursor resets and the sequence returns `Failure`
/// - `Running`: the sequence returns `Running` and resumes the same child next tick
/// - `Success`: the cursor advances; the sequence returns `Success` after its
///   last child succeeds, otherwise `Running`
///
/// An empty sequence succeeds immediately.
pub struct Sequence<C> {
    children: Children<C>,
}

composite_api!(Sequence, "execution");

impl<C> Node<C> for Sequence<C> {
    fn evaluate(&mut self, ctx: &mut C) -> TreeStatus {
        self.children
            .tick(ctx, "sequence", TreeStatus::Failure, TreeStatus::Success)
    }

    fn name(&self) -> &str {
        &self.children.name
    }
}

/// Executes children left to right until one succeeds (logical OR).
///
/// # Semantics
///
/// Mirror image of [`Sequence`]:
/// - `Success`: the cursor resets and the selector returns `Success`
/// - `Running`: the selector returns `Running` and resumes the same child next tick
/// - `Failure`: the cursor advances; the selector returns `Failure` after its
///   last child fails, otherwise `Running`
///
/// An empty selector fails immediately.
///
/// # Priorities
///
/// The first child has the highest priority. Once the cursor has moved past a
/// branch, that branch is not re-checked until the selector resolves, so a
/// running lower-priority branch is never interrupted by a higher-priority one
/// that just became viable.
pub struct Selector<C> {
    children: Children<C>,
}

composite_api!(Selector, "priority");

impl<C> Node<C> for Selector<C> {
    fn evaluate(&mut self, ctx: &mut C) -> TreeStatus {
        self.children
            .tick(ctx, "selector", TreeStatus::Success, TreeStatus::Failure)
    }

    fn name(&self) -> &str {
        &self.children.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Leaf;

    #[derive(Default)]
    struct TestContext {
        calls: Vec<&'static str>,
        value: i32,
    }

    fn succeed(name: &'static str) -> Leaf<TestContext> {
        Leaf::new(name, move |ctx: &mut TestContext| {
            ctx.calls.push(name);
            ctx.value += 1;
            TreeStatus::Success
        })
    }

    fn fail(name: &'static str) -> Leaf<TestContext> {
        Leaf::new(name, move |ctx: &mut TestContext| {
            ctx.calls.push(name);
            TreeStatus::Failure
        })
    }

    /// Leaf that replays a fixed script of statuses, then repeats the last one
    fn scripted(name: &'static str, script: Vec<TreeStatus>) -> Leaf<TestContext> {
        let mut step = 0;
        Leaf::new(name, move |ctx: &mut TestContext| {
            ctx.calls.push(name);
            let status = script[step.min(script.len() - 1)];
            step += 1;
            status
        })
    }

    #[test]
    fn test_sequence_of_successes_takes_one_tick_per_child() {
        let mut seq = Sequence::new("seq")
            .with_child(succeed("a"))
            .with_child(succeed("b"))
            .with_child(succeed("c"));
        let mut ctx = TestContext::default();

        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Success);
        assert_eq!(seq.cursor(), 0);

        // N+1th evaluation restarts at the first child
        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(ctx.calls, vec!["a", "b", "c", "a"]);
        assert_eq!(ctx.value, 4);
    }

    #[test]
    fn test_sequence_fails_on_first_failure_and_resets() {
        let mut seq = Sequence::new("seq")
            .with_child(succeed("a"))
            .with_child(fail("b"))
            .with_child(succeed("c"));
        let mut ctx = TestContext::default();

        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Failure);
        assert_eq!(seq.cursor(), 0);

        seq.evaluate(&mut ctx);
        assert_eq!(ctx.calls, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_sequence_resumes_running_child() {
        let mut seq = Sequence::new("seq")
            .with_child(succeed("guard"))
            .with_child(scripted(
                "walk",
                vec![TreeStatus::Running, TreeStatus::Running, TreeStatus::Success],
            ));
        let mut ctx = TestContext::default();

        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(seq.evaluate(&mut ctx), TreeStatus::Success);

        // The guard ran once; the running child was resumed in place
        assert_eq!(ctx.calls, vec!["guard", "walk", "walk", "walk"]);
    }

    #[test]
    fn test_empty_sequence_succeeds() {
        let mut seq: Sequence<TestContext> = Sequence::new("empty");
        assert_eq!(seq.evaluate(&mut TestContext::default()), TreeStatus::Success);
    }

    #[test]
    fn test_selector_succeeds_on_first_success_and_resets() {
        let mut sel = Selector::new("sel")
            .with_child(fail("a"))
            .with_child(succeed("b"))
            .with_child(succeed("c"));
        let mut ctx = TestContext::default();

        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Success);
        assert_eq!(sel.cursor(), 0);

        sel.evaluate(&mut ctx);
        assert_eq!(ctx.calls, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_selector_fails_when_all_fail() {
        let mut sel = Selector::new("sel").with_child(fail("a")).with_child(fail("b"));
        let mut ctx = TestContext::default();

        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Failure);
        assert_eq!(sel.cursor(), 0);
    }

    #[test]
    fn test_selector_does_not_interrupt_running_branch() {
        let mut high_priority_calls = 0;
        let mut sel = Selector::new("sel")
            .with_child(Leaf::new("high", move |ctx: &mut TestContext| {
                high_priority_calls += 1;
                ctx.calls.push("high");
                // Fails only on its first check
                TreeStatus::from_bool(high_priority_calls > 1)
            }))
            .with_child(scripted(
                "low",
                vec![TreeStatus::Running, TreeStatus::Running, TreeStatus::Success],
            ));
        let mut ctx = TestContext::default();

        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Running); // high fails
        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Running); // low running
        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Running); // low running
        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Success); // low done

        assert_eq!(ctx.calls, vec!["high", "low", "low", "low"]);
    }

    #[test]
    fn test_empty_selector_fails() {
        let mut sel: Selector<TestContext> = Selector::new("empty");
        assert_eq!(sel.evaluate(&mut TestContext::default()), TreeStatus::Failure);
    }

    #[test]
    fn test_debug_lists_children() {
        let seq = Sequence::new("melee").with_child(succeed("in_range"));
        let text = format!("{seq:?}");
        assert!(text.contains("melee"));
        assert!(text.contains("in_range"));
    }

    #[test]
    fn test_composites_share_construction_api() {
        let mut seq: Sequence<TestContext> = Sequence::new("seq");
        let mut sel: Selector<TestContext> = Selector::from_children("sel", vec![Box::new(fail("x"))]);
        assert!(seq.is_empty());
        assert_eq!(sel.len(), 1);

        seq.add_child(succeed("a"));
        sel.add_child(succeed("b"));
        assert_eq!(seq.len(), 1);
        assert!(!sel.is_empty());
        assert_eq!(sel.name(), "sel");

        let text = format!("{sel:?}");
        assert!(text.starts_with("Selector"));
        assert!(text.contains("\"x\", \"b\""));

        let mut ctx = TestContext::default();
        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Running);
        assert_eq!(sel.evaluate(&mut ctx), TreeStatus::Success);
        assert_eq!(ctx.calls, vec!["x", "b"]);
    }
}
