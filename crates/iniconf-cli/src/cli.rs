//! iniconf CLI - Command-line interface for INI configuration files
//!
//! Usage:
//!   iniconf get config.ini database host
//!   iniconf dump config.ini --format json
//!   iniconf check config.ini

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use iniconf_core::{Config, Resolver};
use std::path::PathBuf;
use std::process::ExitCode;

/// iniconf - INI configuration with %(name)s interpolation
#[derive(Parser)]
#[command(name = "iniconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a single value
    Get {
        /// Configuration file
        file: PathBuf,

        /// Section name
        section: String,

        /// Option name
        option: String,

        /// Print the raw value without interpolation
        #[arg(short, long)]
        raw: bool,

        /// Convert the value before printing
        #[arg(short = 't', long = "type", value_enum, default_value = "string")]
        value_type: ValueType,

        /// Value to print if the section or option doesn't exist
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Export the configuration
    Dump {
        /// Configuration file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "ini")]
        format: DumpFormat,

        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List section names
    Sections {
        /// Configuration file
        file: PathBuf,
    },

    /// List option names visible from a section
    Options {
        /// Configuration file
        file: PathBuf,

        /// Section name
        section: String,
    },

    /// Parse files and resolve every option
    Check {
        /// Configuration file(s) to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DumpFormat {
    Ini,
    Json,
    Yaml,
}

/// Run the CLI with the process arguments
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Get {
            file,
            section,
            option,
            raw,
            value_type,
            default,
        } => cmd_get(file, &section, &option, raw, value_type, default),

        Commands::Dump {
            file,
            format,
            output,
        } => cmd_dump(file, format, output),

        Commands::Sections { file } => cmd_sections(file),

        Commands::Options { file, section } => cmd_options(file, &section),

        Commands::Check { files } => cmd_check(files),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(file: &PathBuf) -> Result<Config, String> {
    Config::load(file).map_err(|e| format!("Failed to load {}: {}", file.display(), e))
}

/// Look up a value and render it as text
fn lookup(
    resolver: &Resolver<'_>,
    section: &str,
    option: &str,
    raw: bool,
    value_type: ValueType,
) -> iniconf_core::Result<String> {
    if raw {
        return resolver.get_raw_string(section, option);
    }
    match value_type {
        ValueType::String => resolver.get_string(section, option),
        ValueType::Int => resolver.get_int(section, option).map(|v| v.to_string()),
        ValueType::Float => resolver.get_float(section, option).map(|v| v.to_string()),
        ValueType::Bool => resolver.get_bool(section, option).map(|v| v.to_string()),
    }
}

fn cmd_get(
    file: PathBuf,
    section: &str,
    option: &str,
    raw: bool,
    value_type: ValueType,
    default: Option<String>,
) -> ExitCode {
    let config = match load_config(&file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    match lookup(&config.resolver(), section, option, raw, value_type) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_not_found() && default.is_some() => {
            log::debug!("using default for [{}] {}: {}", section, option, e.kind.as_str());
            println!("{}", default.unwrap_or_default());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn cmd_dump(file: PathBuf, format: DumpFormat, output: Option<PathBuf>) -> ExitCode {
    let config = match load_config(&file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    let result = match format {
        DumpFormat::Ini => Ok(config.to_ini_string(None)),
        DumpFormat::Json => config.to_json().map(|s| s + "\n"),
        DumpFormat::Yaml => config.to_yaml(),
    };

    match result {
        Ok(content) => {
            if let Some(output_path) = output {
                if let Err(e) = std::fs::write(&output_path, &content) {
                    eprintln!("{}: {}", "Error writing file".red(), e);
                    return ExitCode::from(2);
                }
                eprintln!("{} Wrote to {}", "✓".green(), output_path.display());
            } else {
                print!("{}", content);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn cmd_sections(file: PathBuf) -> ExitCode {
    match load_config(&file) {
        Ok(config) => {
            for section in config.sections() {
                println!("{}", section);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.red());
            ExitCode::from(2)
        }
    }
}

fn cmd_options(file: PathBuf, section: &str) -> ExitCode {
    let config = match load_config(&file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    match config.section_options(section) {
        Ok(options) => {
            for option in options {
                println!("{}", option);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

/// Resolve every stored option, returning `(section, option, error)` for each failure
fn resolve_all(config: &Config) -> Vec<(String, String, iniconf_core::Error)> {
    let resolver = config.resolver();
    let mut failures = Vec::new();

    for (section, options) in config.store().iter() {
        for option in options.keys() {
            if let Err(e) = resolver.get_string(section, option) {
                failures.push((section.to_string(), option.clone(), e));
            }
        }
    }

    failures
}

fn cmd_check(files: Vec<PathBuf>) -> ExitCode {
    let mut all_valid = true;

    for file in files {
        let config = match load_config(&file) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{} {}", "✗".red(), e);
                all_valid = false;
                continue;
            }
        };

        let failures = resolve_all(&config);
        if failures.is_empty() {
            println!("{} {}: valid", "✓".green(), file.display());
            continue;
        }

        all_valid = false;
        eprintln!("{} {}:", "✗".red(), file.display());
        for (section, option, e) in failures {
            eprintln!("  [{}] {}: {}", section, option, e.kind.as_str());
        }
    }

    if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iniconf_core::ErrorKind;

    const SAMPLE: &str = "[default]\nhost = example.com\n\n[s]\nurl = %(host)s/x\nport = 80\non = yes\nloop = %(loop)s\n";

    #[test]
    fn test_cli_parses_get() {
        let cli = Cli::try_parse_from([
            "iniconf", "get", "app.ini", "db", "port", "--type", "int", "-d", "5432",
        ])
        .unwrap();

        match cli.command {
            Commands::Get {
                value_type,
                default,
                raw,
                ..
            } => {
                assert_eq!(value_type, ValueType::Int);
                assert_eq!(default.as_deref(), Some("5432"));
                assert!(!raw);
            }
            _ => panic!("Expected Get"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["iniconf", "dump", "app.ini", "-f", "toml"]).is_err());
    }

    #[test]
    fn test_lookup_types() {
        let config = Config::from_ini(SAMPLE).unwrap();
        let r = config.resolver();

        assert_eq!(
            lookup(&r, "s", "url", false, ValueType::String).unwrap(),
            "example.com/x"
        );
        assert_eq!(
            lookup(&r, "s", "url", true, ValueType::String).unwrap(),
            "%(host)s/x"
        );
        assert_eq!(lookup(&r, "s", "port", false, ValueType::Int).unwrap(), "80");
        assert_eq!(lookup(&r, "s", "on", false, ValueType::Bool).unwrap(), "true");
        assert_eq!(
            lookup(&r, "s", "url", false, ValueType::Float)
                .unwrap_err()
                .kind,
            ErrorKind::CouldNotParse
        );
    }

    #[test]
    fn test_resolve_all_reports_failures() {
        let config = Config::from_ini(SAMPLE).unwrap();
        let failures = resolve_all(&config);

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "s");
        assert_eq!(failures[0].1, "loop");
        assert_eq!(failures[0].2.kind, ErrorKind::MaxDepthReached);
    }
}
