//! CLI for the mutation rule catalog

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use ast_mutators::{logging, Catalog, Config, Mutator, MutatorRegistry, TrueValue};

#[derive(Parser)]
#[command(name = "ast-mutators")]
#[command(author, version, about = "Syntax-tree mutation rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every mutator with its description
    Catalog {
        /// Print the catalog as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Validate a mutator configuration file
    Validate {
        /// Path to the mutators config file
        #[arg(short, long, default_value = "mutators.yaml")]
        config: PathBuf,
    },

    /// Show example configuration
    Example,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Catalog { yaml } => print_catalog(yaml),
        Commands::Validate { config } => validate_config(&config),
        Commands::Example => {
            print_example();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn print_catalog(yaml: bool) -> anyhow::Result<ExitCode> {
    let catalog = Catalog::new();
    if yaml {
        print!("{}", catalog.to_yaml()?);
    } else {
        catalog.print();
    }
    Ok(ExitCode::SUCCESS)
}

fn validate_config(config_path: &Path) -> anyhow::Result<ExitCode> {
    println!("{}", "Loading configuration...".dimmed());
    let config = Config::load(config_path)
        .with_context(|| format!("could not load '{}'", config_path.display()))?;

    println!("Found {} mutator entries in config", config.mutators.len());
    println!();

    if let Err(errors) = config.validate() {
        for error in &errors {
            println!("{} {}", "✗".red(), error);
        }
        println!();
        println!(
            "{} {} of {} entries have errors",
            "✗".red().bold(),
            errors.len(),
            config.mutators.len()
        );
        return Ok(ExitCode::FAILURE);
    }

    let registry = MutatorRegistry::from_config(&config)?;
    for mutator in registry.mutators() {
        println!("{} {}", "✓".green(), mutator.name());
    }

    // Only TrueValue takes settings today
    if config.is_enabled("TrueValue") {
        let true_value = TrueValue::new(&config.settings_for("TrueValue"));
        for (function, value) in true_value.settings().iter() {
            let value = serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| "?".to_string());
            println!("    {} {} = {}", "·".dimmed(), function, value);
        }
    }

    println!();
    println!(
        "{} {} of {} mutators enabled",
        "✓".green().bold(),
        registry.len(),
        ast_mutators::registry::known_names().len()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_example() {
    let example = r#"# Example mutators.yaml configuration file
version: "1.0"

mutators:
  # Keyed array entries with impure keys or values
  ArrayItem: true

  # true -> false
  TrueValue:
    settings:
      # mutate the strict flag of in_array(), left alone by default
      in_array: true
      # stop mutating true passed to my_flagged_helper()
      my_flagged_helper: false
"#;

    println!("{}", example);
}
