//! `true` to `false`, except where the literal selects a built-in's behavior

use serde_yaml::Value;
use tracing::trace;

use crate::config::MutatorSettings;
use crate::definition::{Definition, MutatorCategory};
use crate::error::Result;
use crate::mutator::{contract_violation, Mutations, Mutator};
use crate::node::{Callee, Name, Node, NodeId, NodeKind};
use crate::tree::Tree;

/// Functions whose boolean argument only toggles strict comparison.
/// Flipping it there is off unless re-enabled in the settings.
const DEFAULT_SETTINGS: [(&str, bool); 2] = [("array_search", false), ("in_array", false)];

/// Replaces the `true` constant with `false`.
///
/// When the literal is an argument of a function listed in the settings, the
/// setting decides: only an explicit `false` suppresses the mutation. Any
/// other value, of any type, allows it.
#[derive(Debug, Clone)]
pub struct TrueValue {
    settings: MutatorSettings,
}

impl TrueValue {
    pub fn new(settings: &MutatorSettings) -> Self {
        let defaults = DEFAULT_SETTINGS
            .iter()
            .fold(MutatorSettings::new(), |s, (name, allowed)| s.with(name, *allowed));

        Self {
            settings: MutatorSettings::merged(&defaults, settings),
        }
    }

    /// Built-in defaults merged with the user settings
    pub fn settings(&self) -> &MutatorSettings {
        &self.settings
    }

    fn is_true_literal(tree: &Tree, node: NodeId) -> bool {
        matches!(
            tree.get(node).map(|n| &n.kind),
            Some(NodeKind::ConstFetch { name }) if name.to_lower_string() == "true"
        )
    }

    /// Name of the function the literal is passed to, if it is passed
    /// directly as an argument to a call with a static name
    fn enclosing_function(tree: &Tree, node: NodeId) -> Option<&Name> {
        let grand_parent = tree.parent(node).and_then(|parent| tree.parent(parent))?;

        match tree.get(grand_parent).map(|n| &n.kind) {
            Some(NodeKind::FuncCall {
                name: Callee::Name(name),
                ..
            }) => Some(name),
            _ => None,
        }
    }
}

impl Default for TrueValue {
    fn default() -> Self {
        Self::new(&MutatorSettings::default())
    }
}

impl Mutator for TrueValue {
    fn definition() -> Definition {
        Definition::new(
            "Replaces a boolean literal (`true`) with its opposite value (`false`).",
            MutatorCategory::OrthogonalReplacement,
            None,
        )
    }

    fn can_mutate(&self, tree: &Tree, node: NodeId) -> bool {
        if !Self::is_true_literal(tree, node) {
            return false;
        }

        let Some(function) = Self::enclosing_function(tree, node) else {
            return true;
        };

        match self.settings.get(&function.to_lower_string()) {
            Some(Value::Bool(false)) => {
                trace!(function = %function, node = %node, "true literal left alone by settings");
                false
            }
            _ => true,
        }
    }

    fn mutate<'t>(&self, tree: &'t Tree, node: NodeId) -> Result<Mutations<'t>> {
        if !self.can_mutate(tree, node) {
            return Err(contract_violation(self, tree, node));
        }

        let attributes = tree
            .get(node)
            .map(|n| n.attributes.clone())
            .unwrap_or_default();

        Ok(Mutations::once(move || {
            Node::with_attributes(
                NodeKind::ConstFetch {
                    name: Name::new("false"),
                },
                attributes,
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MutationError;
    use pretty_assertions::assert_eq;

    /// `name(true, $arr)`, returning the tree and the `true` node
    fn call_with_true(name: Name) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let literal = tree.const_fetch(Name::new("true"));
        let arr = tree.variable("arr");
        tree.func_call(Callee::Name(name), vec![literal, arr]);
        tree.connect_parents().unwrap();
        (tree, literal)
    }

    #[test]
    fn test_mutates_standalone_true() {
        let mut tree = Tree::new();
        let literal = tree.const_fetch(Name::new("true"));
        tree.connect_parents().unwrap();

        let mutator = TrueValue::default();
        assert!(mutator.can_mutate(&tree, literal));

        let mutations: Vec<_> = mutator.mutate(&tree, literal).unwrap().collect();
        assert_eq!(mutations.len(), 1);
        assert_eq!(tree.render_node(&mutations[0]), "false");
    }

    #[test]
    fn test_literal_name_is_case_insensitive() {
        let mut tree = Tree::new();
        let upper = tree.const_fetch(Name::new("TRUE"));
        let qualified = tree.const_fetch(Name::fully_qualified("True"));
        let other = tree.const_fetch(Name::new("false"));
        let constant = tree.const_fetch(Name::new("PHP_EOL"));

        let mutator = TrueValue::default();
        assert!(mutator.can_mutate(&tree, upper));
        assert!(mutator.can_mutate(&tree, qualified));
        assert!(!mutator.can_mutate(&tree, other));
        assert!(!mutator.can_mutate(&tree, constant));
    }

    #[test]
    fn test_other_node_kinds_are_skipped() {
        let mut tree = Tree::new();
        let string = tree.string("true");
        let variable = tree.variable("true");

        let mutator = TrueValue::default();
        assert!(!mutator.can_mutate(&tree, string));
        assert!(!mutator.can_mutate(&tree, variable));
        assert!(!mutator.can_mutate(&tree, NodeId(99)));
    }

    #[test]
    fn test_default_settings_skip_strict_flags() {
        let mutator = TrueValue::default();

        let (tree, literal) = call_with_true(Name::new("in_array"));
        assert!(!mutator.can_mutate(&tree, literal));

        let (tree, literal) = call_with_true(Name::new("array_search"));
        assert!(!mutator.can_mutate(&tree, literal));
    }

    #[test]
    fn test_function_name_is_case_insensitive() {
        let mutator = TrueValue::default();

        let (tree, literal) = call_with_true(Name::new("IN_ARRAY"));
        assert!(!mutator.can_mutate(&tree, literal));

        let (tree, literal) = call_with_true(Name::fully_qualified("Array_Search"));
        assert!(!mutator.can_mutate(&tree, literal));
    }

    #[test]
    fn test_settings_reenable_function() {
        let settings = MutatorSettings::new().with("in_array", true);
        let mutator = TrueValue::new(&settings);

        let (tree, literal) = call_with_true(Name::new("in_array"));
        assert!(mutator.can_mutate(&tree, literal));

        let replacement = mutator.mutate(&tree, literal).unwrap().next().unwrap();
        let mutant = tree.substitute(literal, replacement).unwrap();
        assert_eq!(mutant.render(mutant.root().unwrap()), "in_array(false, $arr)");

        // array_search keeps its default
        let (tree, literal) = call_with_true(Name::new("array_search"));
        assert!(!mutator.can_mutate(&tree, literal));
    }

    #[test]
    fn test_non_boolean_setting_allows_mutation() {
        let (tree, literal) = call_with_true(Name::new("in_array"));

        for value in [Value::from("false"), Value::from(0_i64), Value::Null] {
            let settings = MutatorSettings::new().with("in_array", value);
            assert!(TrueValue::new(&settings).can_mutate(&tree, literal));
        }
    }

    #[test]
    fn test_unlisted_function_is_always_mutated() {
        let (tree, literal) = call_with_true(Name::new("strpos"));
        assert!(TrueValue::default().can_mutate(&tree, literal));

        let settings = MutatorSettings::new()
            .with("in_array", false)
            .with("array_search", false)
            .with("count", false);
        assert!(TrueValue::new(&settings).can_mutate(&tree, literal));
    }

    #[test]
    fn test_settings_can_disable_other_functions() {
        let settings = MutatorSettings::new().with("Strpos", false);
        let (tree, literal) = call_with_true(Name::new("strpos"));
        assert!(!TrueValue::new(&settings).can_mutate(&tree, literal));
    }

    #[test]
    fn test_dynamic_callee_is_mutated() {
        let mut tree = Tree::new();
        let literal = tree.const_fetch(Name::new("true"));
        let callee = tree.variable("in_array");
        tree.func_call(Callee::Expr(callee), vec![literal]);
        tree.connect_parents().unwrap();

        assert!(TrueValue::default().can_mutate(&tree, literal));
    }

    #[test]
    fn test_only_direct_arguments_are_gated() {
        // in_array($a, [true]): grandparent is an array, not the call
        let mut tree = Tree::new();
        let a = tree.variable("a");
        let literal = tree.const_fetch(Name::new("true"));
        let item = tree.array_item(None, literal);
        let array = tree.array(vec![item]);
        tree.func_call(Callee::Name(Name::new("in_array")), vec![a, array]);
        tree.connect_parents().unwrap();

        assert!(TrueValue::default().can_mutate(&tree, literal));
    }

    #[test]
    fn test_missing_parent_links_mutate_unconditionally() {
        let mut tree = Tree::new();
        let literal = tree.const_fetch(Name::new("true"));
        let arr = tree.variable("arr");
        tree.func_call(Callee::Name(Name::new("in_array")), vec![literal, arr]);

        assert!(TrueValue::default().can_mutate(&tree, literal));
    }

    #[test]
    fn test_mutate_rejected_node_is_contract_violation() {
        let (tree, literal) = call_with_true(Name::new("in_array"));
        let err = TrueValue::default().mutate(&tree, literal).unwrap_err();
        assert!(matches!(
            err,
            MutationError::ContractViolation { ref mutator, ref kind }
                if mutator == "TrueValue" && kind == "ConstFetch"
        ));
    }

    #[test]
    fn test_effective_settings() {
        let settings = MutatorSettings::new().with("in_array", true);
        let mutator = TrueValue::new(&settings);
        assert_eq!(mutator.settings().len(), 2);
        assert_eq!(mutator.settings().get("in_array"), Some(&Value::Bool(true)));
        assert_eq!(
            mutator.settings().get("array_search"),
            Some(&Value::Bool(false))
        );
    }
}
