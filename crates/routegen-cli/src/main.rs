//! routegen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use routegen_core::{GenerationOptions, Metadata, NoImplicitAdditionalProperties, RouteGenerator};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "routegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate the routes module from controller metadata
    Routes {
        /// Path to the controller metadata (JSON or YAML)
        #[arg(long)]
        metadata: PathBuf,
        /// Options file (YAML, JSON or TOML); flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Target middleware (express, koa, hapi)
        #[arg(long)]
        middleware: Option<String>,
        /// Custom template file used instead of the bundled one
        #[arg(long)]
        middleware_template: Option<String>,
        /// Directory to write the routes file into (must exist)
        #[arg(long)]
        routes_dir: Option<PathBuf>,
        /// Routes file name (default: routes.ts)
        #[arg(long)]
        routes_file_name: Option<String>,
        /// Generate ES module output
        #[arg(long)]
        esm: bool,
        /// Policy for models without an explicit additionalProperties schema
        #[arg(long)]
        no_implicit_additional_properties: Option<NoImplicitAdditionalProperties>,
        /// Prefix for every route
        #[arg(long)]
        base_path: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Routes {
            metadata,
            config,
            middleware,
            middleware_template,
            routes_dir,
            routes_file_name,
            esm,
            no_implicit_additional_properties,
            base_path,
        } => {
            let mut options = match (&config, routes_dir.clone()) {
                (Some(path), _) => GenerationOptions::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load options from {}", path.display()))?,
                (None, Some(dir)) => GenerationOptions::new(dir),
                (None, None) => anyhow::bail!("either --config or --routes-dir is required"),
            };

            if let Some(dir) = routes_dir {
                options.routes_dir = dir;
            }
            if let Some(middleware) = middleware {
                options.middleware = middleware;
            }
            if middleware_template.is_some() {
                options.middleware_template = middleware_template;
            }
            if routes_file_name.is_some() {
                options.routes_file_name = routes_file_name;
            }
            if esm {
                options.esm = true;
            }
            if let Some(policy) = no_implicit_additional_properties {
                options.no_implicit_additional_properties = policy;
            }
            if let Some(base_path) = base_path {
                options.base_path = base_path;
            }

            let metadata = Metadata::from_file(&metadata)
                .await
                .with_context(|| format!("Failed to load metadata from {}", metadata.display()))?;

            tracing::info!(
                middleware = %options.middleware,
                controllers = metadata.controllers.len(),
                methods = metadata.method_count(),
                "Generating routes"
            );

            let generator = RouteGenerator::new(metadata, options);
            let (target, written) = generator
                .generate_file()
                .await
                .context("Failed to generate routes")?;

            if written {
                println!("Generated routes: {}", target.display());
            } else {
                println!("Routes unchanged: {}", target.display());
            }
        }
    }
    Ok(())
}
