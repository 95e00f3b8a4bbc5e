//! Bottom-up tree transformation.
//!
//! A [`Transform`] folds a tree into a single value: children are folded
//! before their parent, left to right, and each node is visited exactly
//! once. The driver keeps its own work stack, so input depth is bounded
//! by memory rather than by the call stack.

use crate::tree::{Child, Token, Tree};

/// Bottom-up fold over a tree.
pub trait Transform {
    type Out;

    /// Fold a token leaf.
    fn token(&mut self, token: &Token) -> Self::Out;

    /// Fold a node from its kind tag and already-folded children.
    fn node(&mut self, kind: &str, children: Vec<Self::Out>) -> Self::Out;
}

/// Run `fold` over `tree` and return the root's folded value.
pub fn transform<T: Transform>(fold: &mut T, tree: &Tree) -> T::Out {
    enum Task<'a> {
        Enter(&'a Tree),
        Leaf(&'a Token),
        Finish(&'a Tree),
    }

    let mut tasks = vec![Task::Enter(tree)];
    let mut values: Vec<T::Out> = Vec::new();
    while let Some(task) = tasks.pop() {
        match task {
            Task::Enter(node) => {
                tasks.push(Task::Finish(node));
                for child in node.children.iter().rev() {
                    tasks.push(match child {
                        Child::Node(sub) => Task::Enter(sub),
                        Child::Token(token) => Task::Leaf(token),
                    });
                }
            }
            Task::Leaf(token) => values.push(fold.token(token)),
            Task::Finish(node) => {
                let split = values.len() - node.children.len();
                let children = values.split_off(split);
                values.push(fold.node(&node.kind, children));
            }
        }
    }
    values.pop().expect("value stack empty after walk")
}
