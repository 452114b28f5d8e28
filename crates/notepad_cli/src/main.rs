//! `notepad` binary: one-shot note commands and an interactive screen.

mod cli;
mod screen;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands};
use futures_util::StreamExt;
use notepad_core::{
    init_logging, init_stderr_logging, CoreConfig, Graph, IntentOutcome, ModifyOutcome,
    NoteIntent, NoteListViewModel, NoteListViewState, UiNote,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli);
    start_logging(&config)?;

    let graph = Graph::setup(&config)
        .with_context(|| format!("cannot open notes at {}", config.db_path.display()))?;

    let view_model = graph.note_list_view_model();
    match cli.command {
        Commands::Count => {
            let count = graph
                .note_repo()
                .note_count()
                .next()
                .await
                .context("note count stream ended")??;
            println!("{count}");
        }
        Commands::List => {
            let loaded = load(&view_model).await?;
            print_list(&loaded);
        }
        Commands::Add { title, description } => {
            load(&view_model).await?;
            expect_applied(view_model.dispatch(NoteIntent::OpenCreate)?, "created")?;
            match view_model.dispatch(NoteIntent::Create { title, description })? {
                IntentOutcome::Submitted(ModifyOutcome::Created(id)) => {
                    println!("Created note {id}")
                }
                IntentOutcome::Rejected(reason) => bail!("note not created: {reason}"),
                other => bail!("unexpected outcome: {other:?}"),
            }
        }
        Commands::Update {
            id,
            title,
            description,
        } => {
            load(&view_model).await?;
            let note = existing_note(&graph, id)?;
            expect_applied(view_model.dispatch(NoteIntent::OpenEdit(note))?, "updated")?;
            let intent = NoteIntent::Update(UiNote::new(id, title, description));
            expect_submitted(view_model.dispatch(intent)?, "updated")?;
            println!("Updated note {id}");
        }
        Commands::Delete { id } => {
            load(&view_model).await?;
            let note = existing_note(&graph, id)?;
            expect_applied(view_model.dispatch(NoteIntent::OpenEdit(note))?, "deleted")?;
            expect_submitted(view_model.dispatch(NoteIntent::Delete(id))?, "deleted")?;
            println!("Deleted note {id}");
        }
        Commands::Screen => {
            view_model.load()?;
            screen::run(&view_model).await?;
        }
    }

    view_model.stop();
    Ok(())
}

fn resolve_config(cli: &Cli) -> CoreConfig {
    let mut config = CoreConfig::from_env();
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level);
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir);
    }
    config
}

fn start_logging(config: &CoreConfig) -> anyhow::Result<()> {
    let result = match &config.log_dir {
        Some(dir) => init_logging(&config.log_level, &dir.to_string_lossy()),
        // Keep stderr quiet unless asked; stdout carries command output.
        None if config.log_level_set => init_stderr_logging(&config.log_level),
        None => init_stderr_logging("warn"),
    };
    result.map_err(anyhow::Error::msg)
}

/// Starts observing storage and waits for the first list.
async fn load(view_model: &NoteListViewModel) -> anyhow::Result<NoteListViewState> {
    view_model.load()?;
    let mut rx = view_model.state();
    let state = rx
        .wait_for(|state| !state.is_loading)
        .await
        .context("view state closed before notes loaded")?;
    Ok((*state).clone())
}

fn existing_note(graph: &Graph, id: i64) -> anyhow::Result<UiNote> {
    graph
        .note_repo()
        .note(id)?
        .with_context(|| format!("no note with id {id}"))
}

fn expect_applied(outcome: IntentOutcome, action: &str) -> anyhow::Result<()> {
    match outcome {
        IntentOutcome::Applied => Ok(()),
        IntentOutcome::Rejected(reason) => bail!("note not {action}: {reason}"),
        other => bail!("unexpected outcome: {other:?}"),
    }
}

fn expect_submitted(outcome: IntentOutcome, action: &str) -> anyhow::Result<()> {
    match outcome {
        IntentOutcome::Submitted(_) => Ok(()),
        IntentOutcome::Rejected(reason) => bail!("note not {action}: {reason}"),
        other => bail!("unexpected outcome: {other:?}"),
    }
}

fn print_list(state: &NoteListViewState) {
    if state.notes.is_empty() {
        println!("No notes");
        return;
    }
    for note in &state.notes {
        println!("{}\t{}\t{}", note.id, note.title, note.description);
    }
}
