//! dbconf CLI - Inspect database configuration resolved from the environment
//!
//! Usage:
//!   dbconf show production --format json
//!   dbconf get development host
//!   dbconf check

use clap::{Parser, Subcommand};
use colored::Colorize;
use dbconf_core::{ConfigResolver, Environment, EnvironmentConfigs};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// dbconf - Database configuration from environment variables and secret files
#[derive(Parser, Debug)]
#[command(name = "dbconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dotenv file layered under the process environment (ignored if missing)
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print resolved configuration records
    Show {
        /// Environment to show (all if omitted)
        env: Option<Environment>,

        /// Output format: yaml, json
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Don't redact the password (use with caution)
        #[arg(long)]
        no_redact: bool,
    },

    /// Print a single field of one environment's record
    Get {
        /// Environment: development, test, production
        env: Environment,

        /// Field name (e.g., host, port, username)
        field: String,

        /// Don't redact the password (use with caution)
        #[arg(long)]
        no_redact: bool,
    },

    /// Check that records have everything needed to connect
    Check {
        /// Environment to check (all if omitted)
        env: Option<Environment>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// Initialize logging; `RUST_LOG` applies unless `--debug` is given
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run the CLI with the given arguments
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    log::debug!("dbconf starting with args: {:?}", cli);

    let configs = match load_configs(&cli.env_file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Show {
            env,
            format,
            no_redact,
        } => cmd_show(&configs, env, &format, no_redact),

        Commands::Get {
            env,
            field,
            no_redact,
        } => cmd_get(&configs, env, &field, no_redact),

        Commands::Check { env, format } => cmd_check(&configs, env, &format),
    }
}

fn load_configs(env_file: &Path) -> Result<EnvironmentConfigs, String> {
    ConfigResolver::from_dotenv(env_file)
        .map(|resolver| resolver.build_environment_configs())
        .map_err(|e| format!("Failed to load configuration: {}", e))
}

fn cmd_show(
    configs: &EnvironmentConfigs,
    env: Option<Environment>,
    format: &str,
    no_redact: bool,
) -> ExitCode {
    let redact = !no_redact;
    let result = match (env, format) {
        (Some(env), "json") => configs.get(env).to_json(redact),
        (Some(env), _) => configs.get(env).to_yaml(redact),
        (None, "json") => configs.to_json(redact),
        (None, _) => configs.to_yaml(redact),
    };

    match result {
        Ok(content) => {
            if format == "json" {
                println!("{}", content);
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

fn cmd_get(
    configs: &EnvironmentConfigs,
    env: Environment,
    field: &str,
    no_redact: bool,
) -> ExitCode {
    match configs.get(env).field_text(field, !no_redact) {
        Ok(Some(value)) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: '{}' is not set for {}", "Error".red(), field, env);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::from(2)
        }
    }
}

fn cmd_check(configs: &EnvironmentConfigs, env: Option<Environment>, format: &str) -> ExitCode {
    let selected: Vec<Environment> = match env {
        Some(env) => vec![env],
        None => Environment::ALL.to_vec(),
    };

    let mut all_ready = true;
    let mut report = Vec::new();

    for env in selected {
        match configs.get(env).connection_params() {
            Ok(params) => {
                if format == "json" {
                    report.push(serde_json::json!({
                        "environment": env.as_str(),
                        "ready": true,
                        "url": params.redacted_url(),
                    }));
                } else {
                    println!("{} {}: {}", "✓".green(), env, params.redacted_url());
                }
            }
            Err(e) => {
                all_ready = false;
                if format == "json" {
                    report.push(serde_json::json!({
                        "environment": env.as_str(),
                        "ready": false,
                        "error": e.to_string(),
                    }));
                } else {
                    eprintln!("{} {}: {}", "✗".red(), env, e);
                }
            }
        }
    }

    if format == "json" {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                return ExitCode::from(2);
            }
        }
    }

    if all_ready {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
