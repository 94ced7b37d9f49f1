//! `[$key => $value]` to `$key > $value` for impure keys or values

use crate::definition::{Definition, MutatorCategory};
use crate::error::Result;
use crate::mutator::{contract_violation, Mutations, Mutator};
use crate::node::{BinaryOperator, Node, NodeId, NodeKind};
use crate::tree::Tree;

/// Replaces a keyed array entry whose key or value may have a side effect
/// with a `>` comparison of the same two expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayItem;

impl ArrayItem {
    pub fn new() -> Self {
        Self
    }
}

impl Mutator for ArrayItem {
    fn definition() -> Definition {
        Definition::new(
            "Replaces a key-value pair (`[$key => $value]`) array declaration with a value array \
             declaration (`[$key > $value]`) where the key or the value are potentially impure \
             (i.e. have a side-effect); For example `[foo() => $b->bar]`.",
            MutatorCategory::SemanticReduction,
            Some(
                "This mutation highlights the reliance of the side-effect(s) of the called key(s) \
                 and/or value(s) - completely disregarding the actual values of the array. The \
                 array content should either be checked or the impure calls should be made \
                 outside of the scope of the array.",
            ),
        )
    }

    fn can_mutate(&self, tree: &Tree, node: NodeId) -> bool {
        match tree.get(node).map(|n| &n.kind) {
            Some(NodeKind::ArrayItem {
                key: Some(key),
                value,
                ..
            }) => has_side_effects(tree, *value) || has_side_effects(tree, *key),
            _ => false,
        }
    }

    fn mutate<'t>(&self, tree: &'t Tree, node: NodeId) -> Result<Mutations<'t>> {
        if !self.can_mutate(tree, node) {
            return Err(contract_violation(self, tree, node));
        }

        let Some(Node {
            kind: NodeKind::ArrayItem {
                key: Some(key),
                value,
                ..
            },
            attributes,
        }) = tree.get(node)
        else {
            return Err(contract_violation(self, tree, node));
        };

        let (left, right) = (*key, *value);
        Ok(Mutations::once(move || {
            Node::with_attributes(
                NodeKind::BinaryOp {
                    op: BinaryOperator::Greater,
                    left,
                    right,
                },
                attributes.clone(),
            )
        }))
    }
}

/// Expressions whose evaluation may run arbitrary code.
fn has_side_effects(tree: &Tree, id: NodeId) -> bool {
    matches!(
        tree.get(id).map(|n| &n.kind),
        // property reads can go through __get()
        Some(NodeKind::PropertyFetch { .. } | NodeKind::MethodCall { .. } | NodeKind::FuncCall { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MutationError;
    use crate::node::{Attributes, Callee, Name, Span};
    use pretty_assertions::assert_eq;

    fn call(tree: &mut Tree, name: &str) -> NodeId {
        tree.func_call(Callee::Name(Name::new(name)), vec![])
    }

    /// `[foo() => $b->bar]`, returning the entry
    fn impure_entry(tree: &mut Tree) -> NodeId {
        let key = call(tree, "foo");
        let b = tree.variable("b");
        let value = tree.property_fetch(b, "bar");
        let item = tree.array_item(Some(key), value);
        tree.array(vec![item]);
        item
    }

    #[test]
    fn test_mutates_impure_pair_into_comparison() {
        let mut tree = Tree::new();
        let item = impure_entry(&mut tree);
        tree.connect_parents().unwrap();

        let mutator = ArrayItem::new();
        assert!(mutator.can_mutate(&tree, item));

        let mutations: Vec<_> = mutator.mutate(&tree, item).unwrap().collect();
        assert_eq!(mutations.len(), 1);
        assert_eq!(tree.render_node(&mutations[0]), "foo() > $b->bar");
    }

    #[test]
    fn test_replacement_reuses_key_and_value() {
        let mut tree = Tree::new();
        let item = impure_entry(&mut tree);
        let span = Span {
            start_line: 3,
            end_line: 3,
            start_pos: 10,
            end_pos: 28,
        };
        tree.set_attributes(item, Attributes::at(span)).unwrap();

        let Some(NodeKind::ArrayItem {
            key: Some(key),
            value,
            ..
        }) = tree.get(item).map(|n| n.kind.clone())
        else {
            panic!("expected a keyed array item");
        };

        let replacement = ArrayItem.mutate(&tree, item).unwrap().next().unwrap();
        assert_eq!(
            replacement.kind,
            NodeKind::BinaryOp {
                op: BinaryOperator::Greater,
                left: key,
                right: value,
            }
        );
        assert_eq!(replacement.attributes.span, Some(span));
    }

    #[test]
    fn test_each_side_effecting_kind_triggers() {
        // key is a method call, value pure
        let mut tree = Tree::new();
        let obj = tree.variable("obj");
        let key = tree.method_call(obj, "key", vec![]);
        let value = tree.int(1);
        let item = tree.array_item(Some(key), value);
        assert!(ArrayItem.can_mutate(&tree, item));

        // key pure, value is a function call
        let key = tree.string("k");
        let value = call(&mut tree, "bar");
        let item = tree.array_item(Some(key), value);
        assert!(ArrayItem.can_mutate(&tree, item));

        // key is a property fetch
        let obj = tree.variable("obj");
        let key = tree.property_fetch(obj, "name");
        let value = tree.variable("v");
        let item = tree.array_item(Some(key), value);
        assert!(ArrayItem.can_mutate(&tree, item));
    }

    #[test]
    fn test_pure_pairs_are_skipped() {
        let mut tree = Tree::new();
        let key = tree.string("k");
        let value = tree.int(1);
        let item = tree.array_item(Some(key), value);
        assert!(!ArrayItem.can_mutate(&tree, item));

        let a = tree.variable("a");
        let b = tree.variable("b");
        let one = tree.int(1);
        let sum = tree.binary(BinaryOperator::Plus, b, one);
        let item = tree.array_item(Some(a), sum);
        assert!(!ArrayItem.can_mutate(&tree, item));
    }

    #[test]
    fn test_entry_without_key_is_skipped() {
        let mut tree = Tree::new();
        let value = call(&mut tree, "foo");
        let item = tree.array_item(None, value);
        assert!(!ArrayItem.can_mutate(&tree, item));
    }

    #[test]
    fn test_other_nodes_are_skipped() {
        let mut tree = Tree::new();
        let call = call(&mut tree, "foo");
        assert!(!ArrayItem.can_mutate(&tree, call));
        assert!(!ArrayItem.can_mutate(&tree, NodeId(42)));
    }

    #[test]
    fn test_mutate_rejected_node_is_contract_violation() {
        let mut tree = Tree::new();
        let key = tree.string("k");
        let value = tree.int(1);
        let item = tree.array_item(Some(key), value);

        let err = ArrayItem.mutate(&tree, item).unwrap_err();
        match err {
            MutationError::ContractViolation { mutator, kind } => {
                assert_eq!(mutator, "ArrayItem");
                assert_eq!(kind, "ArrayItem");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_definition() {
        let definition = ArrayItem::definition();
        assert_eq!(definition.category, MutatorCategory::SemanticReduction);
        assert!(definition.description.contains("[foo() => $b->bar]"));
        assert!(definition.rationale.is_some());
    }
}
