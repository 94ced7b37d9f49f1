//! The contract every mutation rule implements
//!
//! The engine asks each registered rule whether it can mutate a node and, if
//! so, pulls replacement nodes from the returned [`Mutations`] one at a time.

use std::fmt;

use crate::definition::Definition;
use crate::error::{MutationError, Result};
use crate::node::{Node, NodeId};
use crate::tree::Tree;

pub mod array_item;
pub mod true_value;

pub use array_item::ArrayItem;
pub use true_value::TrueValue;

/// A mutation rule
///
/// Rules never modify the tree they are given; they only build new nodes.
pub trait Mutator: Send + Sync {
    /// Catalog entry for this rule, independent of any configuration
    fn definition() -> Definition
    where
        Self: Sized;

    /// Rule name as it appears in configuration files and reports
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Whether `mutate` can be called for `node`.
    ///
    /// Returns `false` for node kinds the rule does not handle and for ids
    /// that are not in `tree`.
    fn can_mutate(&self, tree: &Tree, node: NodeId) -> bool;

    /// Lazily produce the replacement nodes for `node`.
    ///
    /// Fails with [`MutationError::ContractViolation`] when `can_mutate`
    /// would return `false`.
    fn mutate<'t>(&self, tree: &'t Tree, node: NodeId) -> Result<Mutations<'t>>;
}

/// Replacement nodes produced by one `mutate` call
///
/// Nodes are built on demand and the sequence can only be walked once.
pub struct Mutations<'t> {
    inner: Box<dyn Iterator<Item = Node> + 't>,
}

impl<'t> Mutations<'t> {
    /// A single replacement, built when first requested
    pub fn once(build: impl FnOnce() -> Node + 't) -> Self {
        Self {
            inner: Box::new(std::iter::once_with(build)),
        }
    }
}

impl Iterator for Mutations<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for Mutations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutations").finish_non_exhaustive()
    }
}

/// Build the error returned when `mutate` is called on a rejected node
pub(crate) fn contract_violation<M: Mutator + ?Sized>(
    mutator: &M,
    tree: &Tree,
    node: NodeId,
) -> MutationError {
    let kind = match tree.get(node) {
        Some(n) => n.kind.label().to_string(),
        None => format!("missing {}", node),
    };
    MutationError::ContractViolation {
        mutator: mutator.name().to_string(),
        kind,
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("ast_mutators::mutator::ArrayItem"), "ArrayItem");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_mutations_are_lazy() {
        use std::cell::Cell;

        let built = Cell::new(0);
        let mut mutations = Mutations::once(|| {
            built.set(built.get() + 1);
            Node::new(NodeKind::Int { value: 1 })
        });

        assert_eq!(built.get(), 0);
        assert!(mutations.next().is_some());
        assert_eq!(built.get(), 1);
        assert!(mutations.next().is_none());
        assert_eq!(built.get(), 1);
    }
}
