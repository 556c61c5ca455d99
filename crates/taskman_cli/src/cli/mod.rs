use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskman_core::config::ConfigOverrides;
use taskman_core::error::AppError;
use taskman_core::model::Priority;

#[derive(Parser, Debug)]
#[command(name = "taskman", author, version, about = "Personal task tracker backed by a JSON file", long_about = None)]
#[command(after_help = "Examples:\n  taskman add Review pull requests\n  taskman add --priority high Ship release\n  taskman list pending\n  taskman complete 1734652800000\n  taskman stats")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Task file to read and write (default: ./tasks.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from a JSON config file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: taskman add Review pull requests
    Add {
        /// Task description; all words are joined with spaces, options go before it
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
        /// low, medium or high
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// List tasks (all/completed/pending)
    ///
    /// Example: taskman list pending
    List {
        filter: Option<String>,
    },
    /// Mark a task as completed
    ///
    /// Example: taskman complete 1734652800000
    Complete {
        id: Option<String>,
    },
    /// Delete a task
    ///
    /// Example: taskman delete 1734652800000
    Delete {
        id: Option<String>,
    },
    /// Show task statistics
    Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    StorePath,
    DefaultPriority,
    Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, AppError> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| AppError::invalid_input("override must be in KEY=VALUE format"))?;

    let field = canonicalize_flag_name(key_raw)
        .ok_or_else(|| AppError::invalid_input("override key cannot be empty"))?;
    let target = match field.as_str() {
        "file" | "store" | "store_path" => ConfigOverrideTarget::StorePath,
        "priority" | "default_priority" => ConfigOverrideTarget::DefaultPriority,
        "color" | "colour" => ConfigOverrideTarget::Color,
        other => {
            return Err(AppError::invalid_input(format!(
                "unknown config field '{other}'"
            )));
        }
    };

    Ok(ParsedConfigOverride {
        target,
        value: value_raw.trim().to_string(),
    })
}

/// Folds every `--config-override` argument into one set of overrides; later
/// arguments win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::StorePath => {
                if parsed.value.is_empty() {
                    return Err(AppError::invalid_input("file override cannot be empty"));
                }
                overrides.store_path = Some(PathBuf::from(parsed.value));
            }
            ConfigOverrideTarget::DefaultPriority => {
                overrides.default_priority = Some(parsed.value.parse::<Priority>()?);
            }
            ConfigOverrideTarget::Color => {
                overrides.color = Some(parse_switch(&parsed.value)?);
            }
        }
    }
    Ok(overrides)
}

fn parse_switch(value: &str) -> Result<bool, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(AppError::invalid_input(format!(
            "expected true or false, got '{other}'"
        ))),
    }
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Positive integer id, or `None` when the argument is missing or not a number.
pub fn parse_task_id(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|id| *id != 0)
}
