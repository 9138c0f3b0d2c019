//! # openapi-zod
//!
//! CLI tool for generating TypeScript Zod request schemas from OpenAPI
//! documents.
//!
//! ## Usage
//!
//! ```bash
//! # Generate schemas from a document
//! openapi-zod generate --input openapi.yaml
//!
//! # Generate into a specific directory and file
//! openapi-zod generate --input openapi.json --output ./src/api --file requests.ts
//!
//! # Dry run to preview changes
//! openapi-zod generate --input openapi.yaml --dry-run
//!
//! # Initialize configuration
//! openapi-zod init
//!
//! # Validate that generated schemas are up-to-date
//! openapi-zod validate --path ./generated/schemas.ts --input openapi.yaml
//! ```

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use openapi_zod_cli::{
    config::{CliArgs, ConfigManager},
    error::{CliError, ConfigError},
    generator::SchemaGenerator,
    load_document,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "openapi-zod")]
#[command(author, version, about = "Generate TypeScript Zod request schemas from OpenAPI documents", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Zod request schemas from an OpenAPI document
    Generate {
        /// OpenAPI document (.json, .yaml or .yml)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the generated TypeScript file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file name
        #[arg(short, long)]
        file: Option<String>,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new openapi-zod configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "openapi-zod.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated schemas are up-to-date
    Validate {
        /// Path to generated schemas file
        #[arg(short, long)]
        path: PathBuf,

        /// OpenAPI document the file was generated from
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(log_filter(verbose, rust_log.as_deref()))
        .init();
}

/// Directives from `RUST_LOG` win when set; otherwise `-v` picks the level.
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default().trim())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            file,
            dry_run,
            config,
        } => cmd_generate(input, output, file, dry_run, config),

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate {
            path,
            input,
            config,
        } => cmd_validate(path, input, config),
    }
}

/// Generate command implementation.
fn cmd_generate(
    input: PathBuf,
    output: Option<PathBuf>,
    file: Option<String>,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            output_file: file,
            ..Default::default()
        },
    );

    println!("{} {}", "Reading".cyan(), input.display());
    let document = load_document(&input)?;

    println!("{}", "Generating Zod schemas...".cyan());
    let generated = SchemaGenerator::new(&config).generate(&document)?;
    println!(
        "  Generated {} route schema(s)",
        generated.routes.len().to_string().green()
    );
    for route in &generated.routes {
        println!("    {} {}", route.schema_name, route.label.dimmed());
    }

    let writer = FileWriter::new(dry_run);
    match writer.write(&config.output_path(), &generated.content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::Unchanged { path } => {
            println!("{} {} is up-to-date", "✓".green(), path.display());
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            print!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        return Err(ConfigError::AlreadyExists { path: output }.into());
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(
    schema_path: PathBuf,
    input: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    println!("{}", "Validating schemas...".cyan());

    if !schema_path.exists() {
        return Err(CliError::Validation(format!(
            "Schema file not found: {}",
            schema_path.display()
        )));
    }
    let existing = std::fs::read_to_string(&schema_path)?;

    let config = ConfigManager::load(config_path.as_deref())?;
    let document = load_document(&input)?;
    let generated = SchemaGenerator::new(&config).generate(&document)?;

    if existing.trim() == generated.content.trim() {
        println!("{} Schemas are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Schemas are out of date", "✗".red());
        println!("  Run 'openapi-zod generate' to update");
        Err(CliError::Validation("Schemas are out of date".to_string()))
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
