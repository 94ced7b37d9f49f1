//! Rule metadata used for catalogs and reports

use std::fmt;

use serde::Serialize;

/// How a mutation changes the meaning of the code it replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutatorCategory {
    /// Swaps a construct for an unrelated one of the same shape
    OrthogonalReplacement,
    /// Removes behavior from the code
    SemanticReduction,
    /// Adds behavior to the code
    SemanticAddition,
}

impl MutatorCategory {
    pub fn label(self) -> &'static str {
        match self {
            MutatorCategory::OrthogonalReplacement => "orthogonal replacement",
            MutatorCategory::SemanticReduction => "semantic reduction",
            MutatorCategory::SemanticAddition => "semantic addition",
        }
    }
}

impl fmt::Display for MutatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Description of what a rule does and why it is worth running
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub description: &'static str,
    pub category: MutatorCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<&'static str>,
}

impl Definition {
    pub const fn new(
        description: &'static str,
        category: MutatorCategory,
        rationale: Option<&'static str>,
    ) -> Self {
        Self {
            description,
            category,
            rationale,
        }
    }
}
