//! modgraph CLI
//!
//! Loads module manifests from a plugin source tree and resolves them into
//! a build order or a full compilation plan.

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use modgraph::{
    BuildConfiguration, BuildContext, DescriptorValidator, ModuleDiscovery, TargetPlatform,
    ValidationResult,
};

#[derive(Parser)]
#[command(name = "modgraph", version, about = "Module build-graph resolution")]
struct Cli {
    /// Target platform to resolve for
    #[arg(long, global = true, default_value = "linux")]
    platform: TargetPlatform,

    /// Build configuration to resolve for
    #[arg(long, global = true, default_value = "development")]
    configuration: BuildConfiguration,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate every manifest under a source tree
    Validate {
        /// Root directory to scan
        dir: PathBuf,
    },
    /// Resolve the build graph and print the build order
    Resolve {
        /// Root directory to scan
        dir: PathBuf,
    },
    /// Print a module's transitive public interface
    Interface {
        /// Root directory to scan
        dir: PathBuf,
        /// Module to inspect
        module: String,
    },
    /// Emit the compilation plan
    Plan {
        /// Root directory to scan
        dir: PathBuf,
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    modgraph::logging::init_logging(cli.log_filter.as_deref());

    let context = BuildContext::new(cli.platform, cli.configuration);

    match cli.command {
        Command::Validate { dir } => validate(&dir),
        Command::Resolve { dir } => {
            let graph = ModuleDiscovery::new(&dir).load_graph()?;
            let resolved = graph.resolve(&context)?;
            for module in &resolved.build_order {
                println!("{}", module);
            }
            Ok(())
        }
        Command::Interface { dir, module } => {
            let graph = ModuleDiscovery::new(&dir).load_graph()?;
            let interface = graph.transitive_public_interface(&module)?;
            println!("modules:");
            for m in &interface.modules {
                println!("  {}", m);
            }
            println!("include paths:");
            for path in &interface.include_paths {
                println!("  {}", path);
            }
            Ok(())
        }
        Command::Plan { dir, json } => {
            let graph = ModuleDiscovery::new(&dir).load_graph()?;
            let plan = graph.compilation_plan(&context)?;
            if json {
                println!("{}", plan.to_json()?);
            } else {
                println!("plan for {} / {}", plan.platform, plan.configuration);
                for unit in &plan.units {
                    println!("{}", unit.module);
                    for path in &unit.include_search_paths {
                        println!("  -I {}", path);
                    }
                    for dep in &unit.link_dependencies {
                        println!("  link {}", dep);
                    }
                    for dynamic in &unit.dynamic_modules {
                        println!("  dynamic {}", dynamic);
                    }
                }
            }
            Ok(())
        }
    }
}

/// Report every invalid manifest instead of stopping at the first
fn validate(dir: &Path) -> anyhow::Result<()> {
    let discovered = ModuleDiscovery::new(dir).discover_modules()?;
    let validator = DescriptorValidator::new();

    let mut failures = 0usize;
    for module in &discovered {
        let descriptor = match module.manifest.to_descriptor() {
            Ok(d) => d,
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", module.directory.display(), e);
                continue;
            }
        };
        if let ValidationResult::Invalid(errors) = validator.validate(&descriptor) {
            failures += 1;
            for error in errors {
                eprintln!("{}: {}", descriptor.name, error);
            }
        }
    }

    println!(
        "{} manifests checked, {} invalid",
        discovered.len(),
        failures
    );
    if failures > 0 {
        return Err(anyhow!("{} invalid manifest(s)", failures));
    }
    Ok(())
}
