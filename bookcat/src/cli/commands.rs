//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Book, TreeNodeConvert};
use crate::exitcode;
use crate::infrastructure::ServiceContainer;
use crate::util::path::expand_env_vars;

/// Run the parsed command line, returning the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        Some(Commands::Isbn { isbn }) => cmd_isbn(&container(cli)?, isbn),
        Some(Commands::Find { title, author }) => cmd_find(&container(cli)?, title, author),
        Some(Commands::Tree { depth }) => cmd_tree(&container(cli)?, *depth),
        Some(Commands::Info) => cmd_info(&container(cli)?),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Err(CliError::Usage(
            "no command given, see `bookcat --help`".to_string(),
        )),
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(resolve_settings(cli)?))
}

/// Directory searched for `.bookcat.toml`: `--dir` or the working directory.
fn config_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(|e| {
            CliError::InvalidArgs(format!("cannot determine working directory: {e}"))
        }),
    }
}

/// Layered settings with command line flags applied last.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = config_dir(cli)?;
    let mut settings = Settings::load(Some(&dir))?;

    if let Some(catalog) = &cli.catalog {
        let raw = catalog.to_string_lossy();
        settings.catalog = PathBuf::from(expand_env_vars(&raw));
    }
    if let Some(shape) = cli.shape {
        settings.shape = shape;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn report(found: Option<&Book>, query: &str) -> i32 {
    match found {
        Some(book) => {
            output::success(book);
            exitcode::OK
        }
        None => {
            output::failure(format!("not found: {query}"));
            exitcode::NOT_FOUND
        }
    }
}

#[instrument(skip(container))]
fn cmd_isbn(container: &ServiceContainer, isbn: &str) -> CliResult<i32> {
    let tree = container.load_catalog()?;
    let searcher = tree.searcher();
    Ok(report(searcher.find_by_isbn(isbn), isbn))
}

#[instrument(skip(container))]
fn cmd_find(container: &ServiceContainer, title: &str, author: &str) -> CliResult<i32> {
    let tree = container.load_catalog()?;
    let searcher = tree.searcher();
    Ok(report(
        searcher.find_by_title_and_author(title, author),
        &format!("'{title}' by {author}"),
    ))
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, depth: usize) -> CliResult<i32> {
    let tree = container.load_catalog()?;
    output::info(tree.to_tree_string_to_depth(depth));
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn cmd_info(container: &ServiceContainer) -> CliResult<i32> {
    let stats = container.catalog_stats()?;
    output::header("Catalog");
    output::detail(format!("path:  {}", stats.path.display()));
    output::detail(format!("shape: {}", stats.shape));
    output::detail(format!("books: {}", stats.books));
    output::detail(format!("depth: {}", stats.depth));
    Ok(exitcode::OK)
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            let settings = resolve_settings(cli)?;
            output::info(settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            let local = local_config_path(&config_dir(cli)?);
            output::action("global", global);
            output::action("local", local.display());
        }
    }
    Ok(exitcode::OK)
}
