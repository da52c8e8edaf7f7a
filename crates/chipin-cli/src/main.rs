mod logging;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use chipin_core::{AppConfig, ChipList, ChipinError, Contact, ExitCode, load_contacts};
use chipin_tui::app::{App, Outcome};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "chipin",
    about = "Pick contacts as chips from the terminal",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Contacts file (.json or .toml). Without a subcommand, opens the picker.
    #[arg(short, long, global = true)]
    contacts: Option<PathBuf>,

    /// Config file to use instead of ~/.config/chipin/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output in JSON format (for scripts).
    /// Also enabled by setting CHIPIN_JSON=1.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive picker and print the selection.
    Pick {
        /// Title shown above the chips.
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the contacts a query would show in the dropdown.
    Filter {
        /// Text typed into the input.
        #[arg(default_value = "")]
        query: String,
        /// Emails already selected (excluded from the result).
        #[arg(long, action = clap::ArgAction::Append)]
        exclude: Vec<String>,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information.
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path.
    Path,
    /// Show all config values.
    List,
    /// Get a specific config key, e.g. `widget.debounce_ms`.
    Get { key: String },
    /// Write the default config file.
    Init {
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            e.downcast_ref::<ChipinError>()
                .map(ChipinError::exit_code)
                .unwrap_or(ExitCode::GeneralError)
        }
    };
    std::process::exit(code.code());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let start = Instant::now();
    let json_output = cli.json || std::env::var("CHIPIN_JSON").as_deref() == Ok("1");

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    match cli.command {
        None => {
            let contacts = require_contacts(cli.contacts.as_deref())?;
            pick(contacts, config, None, json_output)
        }

        Some(Commands::Pick { title }) => {
            let contacts = require_contacts(cli.contacts.as_deref())?;
            pick(contacts, config, title, json_output)
        }

        Some(Commands::Filter { query, exclude }) => {
            let contacts = require_contacts(cli.contacts.as_deref())?;
            let pool = filter_contacts(contacts, &query, &exclude);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": pool, "total": pool.len(), "query": query },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if pool.is_empty() {
                println!("No contacts match: {query}");
            } else {
                for contact in &pool {
                    println!("{contact}");
                }
            }
            Ok(ExitCode::Success)
        }

        Some(Commands::Config { action }) => {
            config_command(action, &config, &config_path, json_output)?;
            Ok(ExitCode::Success)
        }

        Some(Commands::Version) => {
            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "name": "chipin", "version": env!("CARGO_PKG_VERSION") }
                }))?;
            } else {
                println!("chipin {}", env!("CARGO_PKG_VERSION"));
            }
            Ok(ExitCode::Success)
        }
    }
}

fn require_contacts(path: Option<&Path>) -> Result<Vec<Contact>> {
    let path = path.ok_or_else(|| {
        ChipinError::ValidationError("no contacts file given; pass --contacts FILE".to_string())
    })?;
    let contacts = load_contacts(path)
        .with_context(|| format!("loading contacts from {}", path.display()))?;
    Ok(contacts)
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn pick(
    contacts: Vec<Contact>,
    config: AppConfig,
    title: Option<String>,
    json_output: bool,
) -> Result<ExitCode> {
    let mut app = App::new(contacts, config);
    if let Some(title) = title {
        app = app.with_title(title);
    }

    let outcome = chipin_tui::run_picker(&mut app)?;
    if outcome == Outcome::Cancelled {
        if json_output {
            print_json(&serde_json::json!({"status":"cancelled","data":[]}))?;
        }
        return Ok(ExitCode::Cancelled);
    }

    let selection = app.selection();
    if json_output {
        print_json(&serde_json::json!({
            "status": "ok",
            "data": selection,
            "meta": { "total": selection.len() }
        }))?;
    } else {
        for contact in &selection {
            println!("{contact}");
        }
    }
    Ok(ExitCode::Success)
}

/// Same pool the picker's dropdown would show for `query` with `exclude` chipped.
fn filter_contacts(contacts: Vec<Contact>, query: &str, exclude: &[String]) -> Vec<Contact> {
    let all: Vec<Arc<Contact>> = contacts.into_iter().map(Arc::new).collect();
    let mut chips = ChipList::new();
    for email in exclude {
        match all.iter().find(|c| c.key() == email) {
            Some(c) if !chips.contains_key(c.key()) => chips.append(c.clone()),
            Some(_) => {}
            None => tracing::warn!(%email, "excluded email is not in the contact list"),
        }
    }
    chipin_core::filter(&all, &chips, query)
        .into_iter()
        .map(|c| (*c).clone())
        .collect()
}

fn config_command(
    action: ConfigAction,
    config: &AppConfig,
    path: &Path,
    json_output: bool,
) -> Result<()> {
    match action {
        ConfigAction::Path => {
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"path":path}}))?;
            } else {
                println!("{}", path.display());
            }
        }
        ConfigAction::List => {
            let kv = config_key_values(config)?;
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":kv}))?;
            } else {
                for (k, v) in &kv {
                    println!("{k} = {v}");
                }
            }
        }
        ConfigAction::Get { key } => {
            let kv = config_key_values(config)?;
            match kv.get(key.as_str()) {
                Some(val) => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":{"key":key,"value":val}}))?;
                    } else {
                        println!("{val}");
                    }
                }
                None => {
                    return Err(ChipinError::ConfigError(format!("unknown config key: {key}")).into());
                }
            }
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(ChipinError::ConfigError(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))
                .into());
            }
            AppConfig::default().save_to(path)?;
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"path":path}}))?;
            } else {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

/// Flatten the config into `section.key = value` pairs.
fn config_key_values(config: &AppConfig) -> Result<BTreeMap<String, String>> {
    let value = serde_json::to_value(config)?;
    let mut out = BTreeMap::new();
    flatten("", &value, &mut out);
    Ok(out)
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut BTreeMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
