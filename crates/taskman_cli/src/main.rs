use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::LevelFilter;
use std::io::{self, IsTerminal, Write};
use taskman_cli::cli::{Cli, Command, collect_overrides, parse_task_id};
use taskman_core::TaskStore;
use taskman_core::config::{self, Config};
use taskman_core::error::AppError;
use taskman_core::model::{ListFilter, Priority};
use taskman_core::render::{Console, OutputMode};
use taskman_core::warning::{LogWarnings, StoreWarning, WarningSink};

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn print_help() -> Result<(), AppError> {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{help}")?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback(cli.config.as_deref());
    if let Some(error) = loaded.error {
        LogWarnings.warn(StoreWarning::ConfigIgnored { error });
    }

    let mut overrides = collect_overrides(&cli.config_override)?;
    if let Some(file) = cli.file.clone() {
        overrides.store_path = Some(file);
    }
    Ok(config::merge_overrides(&loaded.config, &overrides))
}

fn output_mode(cli: &Cli, config: &Config) -> OutputMode {
    if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Plain {
            color: config.color_enabled() && io::stdout().is_terminal(),
        }
    }
}

fn run_command<W: Write>(
    command: Command,
    config: &Config,
    console: &mut Console<W>,
) -> Result<(), AppError> {
    let path = config.store_path();
    log::debug!("using task file {}", path.display());
    let mut store = TaskStore::open(path);

    match command {
        Command::Add {
            description,
            priority,
        } => {
            let description = description.join(" ");
            if description.trim().is_empty() {
                console.notice("Please provide a task description.")?;
                return Ok(());
            }

            let priority = match priority.as_deref().map(str::parse::<Priority>) {
                None => config.default_priority(),
                Some(Ok(priority)) => priority,
                Some(Err(_)) => {
                    console.notice("Priority must be one of: low, medium, high.")?;
                    return Ok(());
                }
            };

            let task = store.add_task(&description, priority)?;
            console.task_added(&task)?;
        }
        Command::List { filter } => {
            let filter = match filter.as_deref().map(str::parse::<ListFilter>) {
                None => ListFilter::All,
                Some(Ok(filter)) => filter,
                Some(Err(err)) => {
                    log::warn!("{}, listing all tasks", err.message());
                    ListFilter::All
                }
            };

            let tasks: Vec<_> = store.list_tasks(filter).collect();
            console.task_list(&tasks)?;
        }
        Command::Complete { id } => {
            let Some(id) = parse_task_id(id.as_deref()) else {
                console.notice("Please provide a task ID.")?;
                return Ok(());
            };

            match store.complete_task(id) {
                Some(task) => console.task_completed(&task)?,
                None => console.task_not_found(id)?,
            }
        }
        Command::Delete { id } => {
            let Some(id) = parse_task_id(id.as_deref()) else {
                console.notice("Please provide a task ID.")?;
                return Ok(());
            };

            match store.delete_task(id) {
                Some(task) => console.task_deleted(&task)?,
                None => console.task_not_found(id)?,
            }
        }
        Command::Stats => console.stats(&store.stats())?,
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            let mut console = Console::new(io::stdout().lock(), output_mode(&cli, &Config::default()));
            console.notice(err.message())?;
            return Ok(());
        }
    };

    let mode = output_mode(&cli, &config);
    let Some(command) = cli.command else {
        return print_help();
    };

    let mut console = Console::new(io::stdout().lock(), mode);
    run_command(command, &config, &mut console)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let shown = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    err.print().map_err(AppError::from)
                }
                _ => print_help(),
            };
            if let Err(err) = shown {
                eprintln!("ERROR: {}", err);
                std::process::exit(1);
            }
            return;
        }
    };

    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
