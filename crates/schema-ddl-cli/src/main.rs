//! schema-ddl CLI - Turn pending schema changes into executable DDL.

use clap::{Parser, Subcommand};
use schema_ddl::core::Operation;
use schema_ddl::{BatchResult, ChangeFile, Config, DdlError, DialectKind, Pipeline, TranslatorCatalog};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(name = "schema-ddl")]
#[command(about = "Generate DDL scripts from pending schema changes")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target dialect, overriding the change file and configuration
    #[arg(short, long)]
    dialect: Option<String>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a change file into a DDL script
    Generate {
        /// Path to YAML change file
        file: PathBuf,
    },

    /// List registered translators
    Translators,

    /// Validate the configuration and print its hash
    CheckConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, DdlError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(DdlError::Config)?;

    let config = load_config(cli.config.as_deref())?;
    let dialect_override = cli.dialect.as_deref().map(DialectKind::from_name).transpose()?;

    match &cli.command {
        Commands::Generate { file } => generate(&cli, &config, dialect_override, file),
        Commands::Translators => {
            list_translators(dialect_override, cli.output_json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::CheckConfig => {
            let dialect = dialect_override.map_or_else(|| config.dialect_kind(), Ok)?;
            if cli.output_json {
                let out = serde_json::json!({
                    "valid": true,
                    "dialect": dialect.name(),
                    "hash": config.hash(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Configuration is valid");
                println!("  Dialect: {}", dialect);
                println!("  Hash: {}", config.hash());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, DdlError> {
    match path {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn generate(
    cli: &Cli,
    config: &Config,
    dialect_override: Option<DialectKind>,
    file: &Path,
) -> Result<ExitCode, DdlError> {
    let changes = ChangeFile::load(file)?;
    info!("Loaded {} changes from {:?}", changes.changes.len(), file);

    // Command line wins over the change file, which wins over the config
    let dialect = match dialect_override {
        Some(dialect) => dialect,
        None => match changes.dialect_kind()? {
            Some(dialect) => dialect,
            None => config.dialect_kind()?,
        },
    };

    let catalog = TranslatorCatalog::with_builtins();
    let pipeline = Pipeline::new(&catalog, dialect).with_translation(config.translation);
    let result = pipeline.run(changes.into_records(config.options));

    for outcome in result.failed() {
        if let schema_ddl::RecordState::Failed { error } = &outcome.state {
            error!(
                "Change {} ({}) failed: {}",
                outcome.index + 1,
                outcome.object.as_deref().unwrap_or("unbuilt record"),
                error
            );
        }
    }

    if cli.output_json {
        print_json(&result, dialect, config)?;
    } else {
        print_script(&result, dialect, config);
    }

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{} of {} changes failed", result.failed().len(), result.outcomes.len());
        Ok(ExitCode::FAILURE)
    }
}

fn print_script(result: &BatchResult, dialect: DialectKind, config: &Config) {
    println!("-- Generated by schema-ddl {}", env!("CARGO_PKG_VERSION"));
    println!("-- Dialect: {}", dialect);
    println!("-- Config hash: {}", config.hash());
    println!("-- Checksum: {}", result.sink.checksum());
    for warning in &result.warnings {
        println!("-- Warning: {}: {}", warning.object, warning.message);
    }
    print!("{}", result.sink.to_script());
}

fn print_json(result: &BatchResult, dialect: DialectKind, config: &Config) -> Result<(), DdlError> {
    let out = serde_json::json!({
        "dialect": dialect.name(),
        "config_hash": config.hash(),
        "checksum": result.sink.checksum(),
        "success": result.is_success(),
        "statements": result.sink.statements(),
        "outcomes": result.outcomes,
        "warnings": result.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn list_translators(dialect: Option<DialectKind>, output_json: bool) -> Result<(), DdlError> {
    let catalog = TranslatorCatalog::with_builtins();
    let rows: Vec<_> = catalog
        .pairs()
        .into_iter()
        .filter(|(_, d)| dialect.map_or(true, |filter| filter == *d))
        .filter_map(|(kind, d)| {
            let translator = catalog.get(kind, d)?;
            let caps = translator.capabilities();
            let operations: Vec<String> = [
                Operation::Create,
                Operation::Modify,
                Operation::Rename,
                Operation::Delete,
            ]
            .into_iter()
            .filter(|op| caps.allows(*op))
            .map(|op| op.to_string())
            .collect();
            Some((d, kind, operations))
        })
        .collect();

    if output_json {
        let out: Vec<_> = rows
            .iter()
            .map(|(d, kind, operations)| {
                serde_json::json!({
                    "dialect": d.name(),
                    "kind": kind.label(),
                    "operations": operations,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{:<10} {:<16} OPERATIONS", "DIALECT", "KIND");
        for (d, kind, operations) in rows {
            println!("{:<10} {:<16} {}", d.name(), kind.label(), operations.join(", "));
        }
    }
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Stdout carries the script
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        "json" => subscriber.json().try_init(),
        "text" => subscriber.try_init(),
        other => return Err(format!("Unknown log format: '{}'", other)),
    };
    installed.map_err(|e| e.to_string())
}
