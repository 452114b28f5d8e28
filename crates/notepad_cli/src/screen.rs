//! Interactive terminal screen in the imperative style.
//!
//! State changes are bound into a long-lived `MainBinding` and list adapter;
//! only the rows reported as changed are redrawn. User commands are read
//! line by line from stdin.

use anyhow::Context;
use log::debug;
use notepad_core::view::adapter::{ListChange, MainBinding, NoteListAdapter};
use notepad_core::view::{DELETE_LABEL, EMPTY_TEXT};
use notepad_core::{IntentOutcome, NoteForm, NoteIntent, NoteListViewModel, UiNote};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = concat!(
    "commands: new | open <n> | save <title> | <description> | ",
    "delete | dismiss | help | quit"
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    New,
    /// 1-based row number.
    Open(usize),
    Save(NoteForm),
    Delete,
    Dismiss,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ScreenCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "new" => Ok(ScreenCommand::New),
        "open" => rest
            .parse::<usize>()
            .ok()
            .filter(|row| *row > 0)
            .map(ScreenCommand::Open)
            .ok_or_else(|| format!("expected a row number, got `{rest}`")),
        "save" => rest
            .split_once('|')
            .map(|(title, description)| {
                ScreenCommand::Save(NoteForm::new(title.trim(), description.trim()))
            })
            .ok_or_else(|| "expected `save <title> | <description>`".to_string()),
        "delete" => Ok(ScreenCommand::Delete),
        "dismiss" => Ok(ScreenCommand::Dismiss),
        "help" | "?" => Ok(ScreenCommand::Help),
        "quit" | "exit" => Ok(ScreenCommand::Quit),
        other => Err(format!("unknown command `{other}`")),
    }
}

/// Runs the screen until `quit` or end of input.
pub async fn run(view_model: &NoteListViewModel) -> anyhow::Result<()> {
    let (clicks_tx, mut clicks) = mpsc::unbounded_channel::<UiNote>();
    let mut adapter = NoteListAdapter::new(move |note| {
        let _ = clicks_tx.send(note.clone());
    });
    let mut binding = MainBinding::default();
    let mut state_rx = view_model.state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    let initial = state_rx.borrow_and_update().clone();
    let changes = binding.bind(&initial, &mut adapter);
    draw(&binding, &adapter, &changes);

    loop {
        // State first, then clicks: a command must see the bindings its
        // predecessor produced. Input waits until the first list arrives.
        tokio::select! {
            biased;
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                let changes = binding.bind(&state, &mut adapter);
                draw(&binding, &adapter, &changes);
            }
            Some(note) = clicks.recv() => {
                report(view_model.dispatch(NoteIntent::OpenEdit(note))?);
            }
            line = lines.next_line(), if !binding.progress_visible => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                debug!("event=screen_command module=cli command={}", line.trim());
                match parse_command(&line) {
                    Ok(ScreenCommand::Quit) => break,
                    Ok(command) => handle(command, view_model, &binding, &adapter)?,
                    Err(message) => println!("! {message}"),
                }
            }
        }
    }

    view_model.stop();
    Ok(())
}

fn handle(
    command: ScreenCommand,
    view_model: &NoteListViewModel,
    binding: &MainBinding,
    adapter: &NoteListAdapter,
) -> anyhow::Result<()> {
    match command {
        ScreenCommand::New => {
            if binding.fab.clickable {
                report(view_model.dispatch(NoteIntent::OpenCreate)?);
            } else {
                println!("! {}", binding.fab.text);
            }
        }
        ScreenCommand::Open(row) => {
            if !adapter.click(row - 1) {
                println!("! no row {row}");
            }
        }
        ScreenCommand::Save(form) => match binding.dialog.as_ref() {
            None => println!("! no dialog open; use `new` or `open <n>`"),
            Some(_) if !form.can_confirm() => {
                println!("! title and description must not be blank")
            }
            Some(dialog) => {
                let intent = match dialog.editing {
                    Some(id) => NoteIntent::Update(UiNote::new(id, form.title, form.description)),
                    None => NoteIntent::Create {
                        title: form.title,
                        description: form.description,
                    },
                };
                report(view_model.dispatch(intent)?);
            }
        },
        ScreenCommand::Delete => match binding.dialog.as_ref().and_then(|dialog| dialog.editing) {
            Some(id) => report(view_model.dispatch(NoteIntent::Delete(id))?),
            None => println!("! `{DELETE_LABEL}` is only available in an edit dialog"),
        },
        ScreenCommand::Dismiss => report(view_model.dispatch(NoteIntent::Dismiss)?),
        ScreenCommand::Help => println!("{HELP}"),
        ScreenCommand::Quit => {}
    }
    Ok(())
}

fn report(outcome: IntentOutcome) {
    if let IntentOutcome::Rejected(reason) = outcome {
        println!("! {reason}");
    }
}

fn draw(binding: &MainBinding, adapter: &NoteListAdapter, changes: &[ListChange]) {
    println!("== Notepad ==");
    if binding.progress_visible {
        println!("  loading...");
    }
    if binding.empty_visible {
        println!("  {EMPTY_TEXT}");
    }
    if binding.list_visible {
        for position in 0..adapter.item_count() {
            let Some(row) = adapter.bind(position) else {
                continue;
            };
            let marker = if changes.iter().any(|change| touches(change, position)) {
                '*'
            } else {
                ' '
            };
            println!("{marker} {}. {}: {}", position + 1, row.title, row.description);
        }
    }

    let fab_state = if binding.fab.clickable { "" } else { " (disabled)" };
    println!("  [{}]{fab_state}", binding.fab.text);

    if let Some(dialog) = &binding.dialog {
        println!("  -- {} --", dialog.title);
        println!("     title: {}", dialog.form.title);
        println!("     description: {}", dialog.form.description);
        if dialog.delete_visible {
            println!("     [{}] [{DELETE_LABEL}]", dialog.confirm_label);
        } else {
            println!("     [{}]", dialog.confirm_label);
        }
    }
}

fn touches(change: &ListChange, position: usize) -> bool {
    matches!(
        change,
        ListChange::Inserted { position: p } | ListChange::Changed { position: p } if *p == position
    )
}
