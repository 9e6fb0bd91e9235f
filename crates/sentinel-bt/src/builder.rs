//! Shorthand constructors for assembling trees inline.
//!
//! ```
//! use sentinel_bt::{leaf, selector, sequence, BehaviorTree, TreeStatus};
//!
//! let root = selector(
//!     "root",
//!     vec![
//!         sequence("attack", vec![leaf("in_range", |hp: &mut i32| TreeStatus::from_bool(*hp > 0))]),
//!         leaf("idle", |_: &mut i32| TreeStatus::Success),
//!     ],
//! );
//! let mut tree = BehaviorTree::from_boxed(root);
//! assert_eq!(tree.tick(&mut 1), TreeStatus::Success);
//! ```

use crate::{Leaf, Node, Selector, Sequence, TreeStatus};

/// Boxed [`Sequence`] over `children`
pub fn sequence<C: 'static>(
    name: impl Into<String>,
    children: Vec<Box<dyn Node<C>>>,
) -> Box<dyn Node<C>> {
    Box::new(Sequence::from_children(name, children))
}

/// Boxed [`Selector`] over `children`
pub fn selector<C: 'static>(
    name: impl Into<String>,
    children: Vec<Box<dyn Node<C>>>,
) -> Box<dyn Node<C>> {
    Box::new(Selector::from_children(name, children))
}

/// Boxed [`Leaf`] around `action`
pub fn leaf<C: 'static, F>(name: impl Into<String>, action: F) -> Box<dyn Node<C>>
where
    F: FnMut(&mut C) -> TreeStatus + 'static,
{
    Box::new(Leaf::new(name, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_builders() {
        let mut root = sequence(
            "root",
            vec![
                leaf("first", |n: &mut u32| {
                    *n += 1;
                    TreeStatus::Success
                }),
                selector(
                    "choice",
                    vec![leaf("ok", |n: &mut u32| {
                        *n += 10;
                        TreeStatus::Success
                    })],
                ),
            ],
        );
        let mut n = 0;

        assert_eq!(root.evaluate(&mut n), TreeStatus::Running);
        assert_eq!(root.evaluate(&mut n), TreeStatus::Success);
        assert_eq!(n, 11);
        assert_eq!(root.name(), "root");
    }
}
