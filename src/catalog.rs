//! Catalog of mutation rules
//!
//! This module formats and displays rule definitions.

use colored::Colorize;
use serde::Serialize;

use crate::definition::{Definition, MutatorCategory};
use crate::error::{MutationError, Result};
use crate::registry;

/// One rule in the catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    #[serde(flatten)]
    pub definition: Definition,
}

/// Definitions of every registered rule
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub mutators: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        let mutators = registry::definitions()
            .into_iter()
            .map(|(name, definition)| CatalogEntry { name, definition })
            .collect();
        Self { mutators }
    }

    /// Number of rules in a category
    pub fn count(&self, category: MutatorCategory) -> usize {
        self.mutators
            .iter()
            .filter(|m| m.definition.category == category)
            .count()
    }

    pub fn total(&self) -> usize {
        self.mutators.len()
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| MutationError::ConfigError {
            message: format!("Failed to serialize catalog: {}", e),
        })
    }

    /// Print the catalog to stdout
    pub fn print(&self) {
        println!();
        println!("{}", "Mutators".bold());
        println!("{}", "=".repeat(60));

        for entry in &self.mutators {
            println!();
            println!(
                "{} {}",
                entry.name.bold(),
                format!("[{}]", entry.definition.category).dimmed()
            );
            println!("  {}", entry.definition.description);
            if let Some(rationale) = entry.definition.rationale {
                println!("  {} {}", "Why:".yellow(), rationale);
            }
        }

        println!();
        println!("{}", "Summary".bold());
        println!("{}", "-".repeat(40));
        println!("Total mutators:    {}", self.total());
        for category in [
            MutatorCategory::OrthogonalReplacement,
            MutatorCategory::SemanticReduction,
            MutatorCategory::SemanticAddition,
        ] {
            let count = self.count(category);
            if count > 0 {
                println!("{:<19}{}", format!("{}:", category), count);
            }
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_counts() {
        let catalog = Catalog::new();
        assert_eq!(catalog.total(), 2);
        assert_eq!(catalog.count(MutatorCategory::SemanticReduction), 1);
        assert_eq!(catalog.count(MutatorCategory::OrthogonalReplacement), 1);
        assert_eq!(catalog.count(MutatorCategory::SemanticAddition), 0);
    }

    #[test]
    fn test_catalog_yaml() {
        let yaml = Catalog::new().to_yaml().unwrap();
        assert!(yaml.contains("name: ArrayItem"));
        assert!(yaml.contains("category: semantic_reduction"));
        assert!(yaml.contains("name: TrueValue"));
        assert!(yaml.contains("category: orthogonal_replacement"));
    }
}
