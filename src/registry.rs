//! The set of mutation rules available to the engine
//!
//! Rules are registered in a static table so their definitions can be listed
//! without building any instance. [`MutatorRegistry::from_config`] builds the
//! enabled rules once per run.

use tracing::debug;

use crate::config::{Config, MutatorSettings};
use crate::definition::Definition;
use crate::error::Result;
use crate::mutator::{ArrayItem, Mutations, Mutator, TrueValue};
use crate::node::{Node, NodeId};
use crate::tree::Tree;

/// A registered rule type
struct Registration {
    name: &'static str,
    definition: fn() -> Definition,
    build: fn(&MutatorSettings) -> Box<dyn Mutator>,
}

const REGISTRATIONS: &[Registration] = &[
    Registration {
        name: "ArrayItem",
        definition: ArrayItem::definition,
        build: build_array_item,
    },
    Registration {
        name: "TrueValue",
        definition: TrueValue::definition,
        build: build_true_value,
    },
];

fn build_array_item(_: &MutatorSettings) -> Box<dyn Mutator> {
    Box::new(ArrayItem::new())
}

fn build_true_value(settings: &MutatorSettings) -> Box<dyn Mutator> {
    Box::new(TrueValue::new(settings))
}

/// Names of every registered rule, in registration order
pub fn known_names() -> Vec<&'static str> {
    REGISTRATIONS.iter().map(|r| r.name).collect()
}

/// Catalog entries of every registered rule
pub fn definitions() -> Vec<(&'static str, Definition)> {
    REGISTRATIONS
        .iter()
        .map(|r| (r.name, (r.definition)()))
        .collect()
}

/// The enabled rules for one run
pub struct MutatorRegistry {
    mutators: Vec<Box<dyn Mutator>>,
}

impl MutatorRegistry {
    /// Build every enabled rule with its configured settings
    pub fn from_config(config: &Config) -> Result<Self> {
        // Report the first problem; `Config::validate` lists all of them
        config.validate().map_err(|mut errors| errors.swap_remove(0))?;

        let mut mutators = Vec::new();
        for registration in REGISTRATIONS {
            if !config.is_enabled(registration.name) {
                debug!(mutator = registration.name, "mutator disabled by configuration");
                continue;
            }

            let settings = config.settings_for(registration.name);
            debug!(
                mutator = registration.name,
                settings = settings.len(),
                "building mutator"
            );
            mutators.push((registration.build)(&settings));
        }

        Ok(Self { mutators })
    }

    pub fn mutators(&self) -> impl Iterator<Item = &dyn Mutator> {
        self.mutators.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.mutators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutators.is_empty()
    }

    /// Enabled rules that accept `node`
    pub fn applicable<'a>(
        &'a self,
        tree: &'a Tree,
        node: NodeId,
    ) -> impl Iterator<Item = &'a dyn Mutator> + 'a {
        self.mutators()
            .filter(move |mutator| mutator.can_mutate(tree, node))
    }

    /// Every replacement for `node` from every applicable rule, tagged with
    /// the rule name. Replacements are built as the iterator is consumed.
    pub fn mutations<'a>(
        &'a self,
        tree: &'a Tree,
        node: NodeId,
    ) -> impl Iterator<Item = (&'static str, Node)> + 'a {
        self.applicable(tree, node)
            .filter_map(move |mutator| {
                // applicable() already checked can_mutate
                mutator
                    .mutate(tree, node)
                    .ok()
                    .map(|mutations: Mutations<'a>| (mutator.name(), mutations))
            })
            .flat_map(|(name, mutations)| mutations.map(move |replacement| (name, replacement)))
    }
}

impl Default for MutatorRegistry {
    fn default() -> Self {
        Self {
            mutators: REGISTRATIONS
                .iter()
                .map(|r| (r.build)(&MutatorSettings::default()))
                .collect(),
        }
    }
}
