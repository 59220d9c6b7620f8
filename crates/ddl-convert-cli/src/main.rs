//! ddl-convert CLI - Convert CREATE TABLE statements to Flink and Spark SQL.

use clap::{Args, Parser, Subcommand};
use ddl_convert::{
    compress, Affix, CaseStrategy, Config, ConversionOutput, ConvertError, DdlConverter,
    DuplicateStrategy, ErrorMode, SchemaRequest, SqlRequest, TableSchema,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "ddl-convert")]
#[command(about = "Convert Oracle, DM and MySQL CREATE TABLE statements to Flink and Spark SQL")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

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

/// Settings shared by the conversion subcommands. Each overrides the
/// configuration file.
#[derive(Args)]
struct ConversionArgs {
    /// Source dialect: oracle, dm, mysql
    #[arg(long)]
    source: Option<String>,

    /// Target engine: flink, spark
    #[arg(long)]
    target: Option<String>,

    /// Target catalog
    #[arg(long)]
    catalog: Option<String>,

    /// Database for tables without a schema qualifier
    #[arg(long)]
    database: Option<String>,

    /// Identifier case: preserve, upper, lower
    #[arg(long)]
    case: Option<String>,

    /// Skip tables that fail to convert instead of aborting
    #[arg(long)]
    skip_errors: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DDL script
    Sql {
        /// DDL file, or - for stdin
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// Print the script on a single line
        #[arg(long)]
        compress: bool,
    },

    /// Convert table schemas described in YAML or JSON
    Schema {
        /// Schema file (.yaml, .yml or .json) holding a list of tables
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// Database name affix: prefix:VALUE or suffix:VALUE
        #[arg(long)]
        database_affix: Option<String>,

        /// Table name affix: prefix:VALUE or suffix:VALUE
        #[arg(long)]
        table_affix: Option<String>,

        /// Duplicate table handling: ignore, overwrite, error
        #[arg(long)]
        duplicate: Option<String>,
    },

    /// List supported source/target pairs
    Dialects,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(ConvertError::Config)?;

    let converter = DdlConverter::new();

    match cli.command {
        Commands::Dialects => {
            let pairs = converter.catalog().mapper_pairs();
            if cli.output_json {
                let pairs: Vec<_> = pairs
                    .iter()
                    .map(|(source, target)| serde_json::json!({ "source": source, "target": target }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&pairs)?);
            } else {
                for (source, target) in pairs {
                    println!("{} -> {}", source, target);
                }
            }
        }

        Commands::Sql {
            input,
            conversion,
            compress: single_line,
        } => {
            let config = resolve_config(cli.config.as_deref(), &conversion)?;
            let sql = read_input(&input)?;

            let mut request = SqlRequest::new(config.source, config.target, &config.catalog, sql)
                .with_options(config.options());
            request.database = config.database.clone();

            let output = converter.convert_sql(&request)?;
            if cli.output_json {
                print_json(&output)?;
            } else {
                let script = output.script(config.create_database);
                if single_line {
                    println!("{}", compress(&script));
                } else {
                    println!("{}", script);
                }
            }
        }

        Commands::Schema {
            input,
            conversion,
            database_affix,
            table_affix,
            duplicate,
        } => {
            let mut config = resolve_config(cli.config.as_deref(), &conversion)?;
            if let Some(affix) = database_affix {
                config.naming.database_affix = affix.parse::<Affix>()?;
            }
            if let Some(affix) = table_affix {
                config.naming.table_affix = affix.parse::<Affix>()?;
            }
            if let Some(duplicate) = duplicate {
                config.naming.duplicate = duplicate.parse::<DuplicateStrategy>()?;
            }
            config.validate()?;

            let tables = read_schema(&input)?;
            let mut request = SchemaRequest::new(config.source, config.target, &config.catalog, tables)
                .with_options(config.options())
                .with_create_database(config.create_database);
            request.database = config.database.clone();

            let output = converter.convert_schema(&request)?;
            if cli.output_json {
                print_json(&output)?;
            } else {
                // Schema-mode results already carry their CREATE DATABASE.
                println!("{}", output.script(false));
            }
        }
    }

    Ok(())
}

/// Load the configuration file if given, then apply command-line overrides.
fn resolve_config(path: Option<&Path>, args: &ConversionArgs) -> Result<Config, ConvertError> {
    let mut config = match path {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => {
            let missing = |flag: &str| {
                ConvertError::Config(format!("--{} is required when no --config is given", flag))
            };
            let source = args.source.as_deref().ok_or_else(|| missing("source"))?;
            let target = args.target.as_deref().ok_or_else(|| missing("target"))?;
            let catalog = args.catalog.as_deref().ok_or_else(|| missing("catalog"))?;
            Config::new(source.parse()?, target.parse()?, catalog)
        }
    };

    if let Some(source) = &args.source {
        config.source = source.parse()?;
    }
    if let Some(target) = &args.target {
        config.target = target.parse()?;
    }
    if let Some(catalog) = &args.catalog {
        config.catalog = catalog.clone();
    }
    if let Some(database) = &args.database {
        config.database = Some(database.clone());
    }
    if let Some(case) = &args.case {
        config.naming.case = case.parse::<CaseStrategy>()?;
    }
    if args.skip_errors {
        config.error_mode = ErrorMode::Skip;
    }

    config.validate()?;
    Ok(config)
}

fn read_input(input: &str) -> Result<String, ConvertError> {
    if input == "-" {
        let mut sql = String::new();
        std::io::stdin().read_to_string(&mut sql)?;
        Ok(sql)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn read_schema(path: &Path) -> Result<Vec<TableSchema>, ConvertError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn print_json(output: &ConversionOutput) -> Result<(), ConvertError> {
    let errors: Vec<_> = output
        .errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "index": e.index,
                "table": e.table,
                "error": e.error.to_string(),
            })
        })
        .collect();
    let value = serde_json::json!({
        "results": output.results,
        "errors": errors,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("unknown verbosity '{}'", other)),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}
