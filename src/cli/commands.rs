//! Command dispatch: maps parsed arguments onto the outline service.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{Direction, EditCommand, SHARED_DOCUMENT};
use crate::application::JsonResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::cli::render::render_forest;
use crate::config::{global_config_path, Settings};
use crate::domain::Forest;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Separator between breadcrumb entries.
const CRUMB_SEPARATOR: &str = " › ";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    // needs no settings
    if let Commands::Completion { shell } = command {
        return cmd_completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);
    let doc = document_name(cli, &container);
    let scope = cli.scope.as_str();
    debug!("document={}, scope={}", doc, scope);

    match command {
        Commands::Show { all } => cmd_show(&container, &doc, scope, *all),
        Commands::Add { id } => cmd_apply(&container, &doc, scope, EditCommand::Add { id: id.clone() }),
        Commands::AddRoot => cmd_apply(&container, &doc, scope, EditCommand::AddRoot),
        Commands::Edit { id, text } => cmd_apply(
            &container,
            &doc,
            scope,
            EditCommand::SetText {
                id: id.clone(),
                text: text.clone(),
            },
        ),
        Commands::Symbol { id, symbol } => cmd_apply(
            &container,
            &doc,
            scope,
            EditCommand::SetSymbol {
                id: id.clone(),
                symbol: *symbol,
            },
        ),
        Commands::Toggle { id } => {
            cmd_apply(&container, &doc, scope, EditCommand::Toggle { id: id.clone() })
        }
        Commands::Delete { id, force } => cmd_apply(
            &container,
            &doc,
            scope,
            EditCommand::Delete {
                id: id.clone(),
                force: *force,
            },
        ),
        Commands::Indent { id } => {
            cmd_apply(&container, &doc, scope, EditCommand::Indent { id: id.clone() })
        }
        Commands::Outdent { id } => {
            cmd_apply(&container, &doc, scope, EditCommand::Outdent { id: id.clone() })
        }
        Commands::Up { id } => {
            cmd_apply(&container, &doc, scope, EditCommand::MoveUp { id: id.clone() })
        }
        Commands::Next { id } => cmd_navigate(&container, &doc, scope, id, Direction::Next),
        Commands::Prev { id } => cmd_navigate(&container, &doc, scope, id, Direction::Prev),
        Commands::Path { id } => cmd_path(&container, &doc, id),
        Commands::Export { file } => cmd_export(&container, &doc, file.as_deref()),
        Commands::Import { file } => cmd_import(&container, &doc, file),
        Commands::List => cmd_list(&container, &doc),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn document_name(cli: &Cli, container: &ServiceContainer) -> String {
    if cli.shared {
        SHARED_DOCUMENT.to_string()
    } else {
        cli.doc
            .clone()
            .unwrap_or_else(|| container.settings.default_document.clone())
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_show(container: &ServiceContainer, doc: &str, scope: &str, all: bool) -> CliResult<()> {
    let forest = container.outline.view(doc, scope)?;
    print!("{}", render_forest(&forest, &container.settings.tree, all));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_apply(
    container: &ServiceContainer,
    doc: &str,
    scope: &str,
    command: EditCommand,
) -> CliResult<()> {
    let applied = container.outline.apply(doc, scope, &command)?;
    match &applied.refusal {
        Some(reason) => output::warning(&format!("{reason}, nothing changed")),
        None => output::info(&applied.focus),
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_navigate(
    container: &ServiceContainer,
    doc: &str,
    scope: &str,
    id: &str,
    direction: Direction,
) -> CliResult<()> {
    let target = container.outline.navigate(doc, scope, id, direction)?;
    output::info(&target);
    Ok(())
}

fn cmd_path(container: &ServiceContainer, doc: &str, id: &str) -> CliResult<()> {
    let crumbs = container.outline.breadcrumb(doc, id)?;
    let path = crumbs
        .iter()
        .map(|crumb| {
            if crumb.text.is_empty() {
                crumb.id.as_str()
            } else {
                crumb.text.as_str()
            }
        })
        .join(CRUMB_SEPARATOR);
    output::info(&path);
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_export(container: &ServiceContainer, doc: &str, file: Option<&Path>) -> CliResult<()> {
    let forest = container.outline.export(doc)?;
    let json = serde_json::to_string_pretty(&forest).with_document(doc)?;
    match file {
        Some(path) => {
            container
                .fs
                .write(path, &json)
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Exported", &path.display());
        }
        None => output::info(&json),
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_import(container: &ServiceContainer, doc: &str, file: &Path) -> CliResult<()> {
    let content = container
        .fs
        .read_to_string(file)
        .map_err(|e| InfraError::io(format!("read {}", file.display()), e))?;
    let forest: Forest = serde_json::from_str(&content).with_document(doc)?;
    container.outline.import(doc, &forest)?;
    output::success(&format!("Imported {} into {}", file.display(), doc));
    Ok(())
}

fn cmd_list(container: &ServiceContainer, current: &str) -> CliResult<()> {
    let documents = container.outline.documents()?;
    if documents.is_empty() {
        output::warning(&format!(
            "no documents in {}",
            container.settings.data_dir.display()
        ));
        return Ok(());
    }
    output::header(&format!("Documents ({})", container.settings.data_dir.display()));
    for name in documents {
        if name == current {
            output::detail(&format!("{name} *"));
        } else {
            output::detail(&name);
        }
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
