//! Error types for mutation rules

use thiserror::Error;

/// Errors that can occur while configuring or invoking mutation rules
#[derive(Debug, Error)]
pub enum MutationError {
    /// `mutate` was called on a node the rule does not accept
    #[error("Mutator '{mutator}' cannot mutate a '{kind}' node; check can_mutate first")]
    ContractViolation { mutator: String, kind: String },

    /// Configuration names a mutator that is not registered
    #[error("Unknown mutator '{name}'\n  Known mutators: {}", known.join(", "))]
    UnknownMutator { name: String, known: Vec<String> },

    /// A node id does not belong to the tree it was used with
    #[error("Node {id} does not exist in a tree of {len} nodes")]
    InvalidNode { id: u32, len: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Result type for mutation operations
pub type Result<T> = std::result::Result<T, MutationError>;
