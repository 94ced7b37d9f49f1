//! Syntax-tree mutation rules for mutation testing
//!
//! Each rule looks at one node of a syntax tree, optionally together with its
//! parent and grandparent, and proposes replacement nodes that change the
//! program's meaning. An engine substitutes the replacements one at a time
//! and runs the test suite against each resulting mutant.
//!
//! # Example Configuration
//!
//! ```yaml
//! version: "1.0"
//! mutators:
//!   ArrayItem: true
//!   TrueValue:
//!     settings:
//!       in_array: true
//! ```
//!
//! # Usage
//!
//! ```
//! use ast_mutators::{Callee, MutatorRegistry, Name, Tree};
//!
//! // in_array(true, $haystack)
//! let mut tree = Tree::new();
//! let literal = tree.const_fetch(Name::new("true"));
//! let haystack = tree.variable("haystack");
//! tree.func_call(Callee::Name(Name::new("in_array")), vec![literal, haystack]);
//! tree.connect_parents().unwrap();
//!
//! // The strict flag of in_array is not mutated by default
//! let registry = MutatorRegistry::default();
//! assert_eq!(registry.mutations(&tree, literal).count(), 0);
//! ```

pub mod ancestry;
pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;
pub mod logging;
pub mod mutator;
pub mod node;
pub mod registry;
pub mod tree;

// Re-export main types at crate root
pub use catalog::Catalog;
pub use config::{Config, MutatorEntry, MutatorSettings};
pub use definition::{Definition, MutatorCategory};
pub use error::{MutationError, Result};
pub use mutator::{ArrayItem, Mutations, Mutator, TrueValue};
pub use node::{Attributes, BinaryOperator, Callee, Name, Node, NodeId, NodeKind, Span};
pub use registry::MutatorRegistry;
pub use tree::Tree;
