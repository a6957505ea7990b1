use crate::app::{
    action::Action, command::Command, input::map_event_to_action, reducer, state::AppState,
    tasks::handle_command, ui,
};
use crate::domain::notebook::NotebookFacade;

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(100);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    adapter: Arc<dyn NotebookFacade>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, adapter, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    adapter: Arc<dyn NotebookFacade>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Notebook file watcher
    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok() {
            let _ = notify_tx.try_send(());
        }
    })?;

    let notebook_path = adapter.notebook_path();
    if notebook_path.exists() {
        watcher.watch(&notebook_path, RecursiveMode::NonRecursive)?;
    }

    let action_tx_clone = action_tx.clone();
    tokio::spawn(async move {
        let mut pending = false;
        let debounce_duration = Duration::from_millis(500);

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(debounce_duration) => {
                        let _ = action_tx_clone.send(Action::ExternalChangeDetected).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    // Initial load
    handle_command(Command::LoadNotebook, adapter.clone(), action_tx.clone())?;

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        // A stashed palette dispatch runs first: the frame above is the
        // palette-closing frame, so the focus handoff has already happened.
        let action = if let Some(pending) = app_state.pending_dispatch.take() {
            Some(pending)
        } else {
            tokio::select! {
                _ = interval.tick() => Some(Action::Tick),

                // User Input
                Some(res) = event_rx.recv() => {
                    let event = match res {
                        Ok(e) => e,
                        Err(e) => return Err(e.into()),
                    };
                    map_event_to_action(event, &app_state, terminal.size()?)
                },

                // Async Results
                Some(a) = action_rx.recv() => Some(a),
            }
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            if let Action::Quit = action {
                break;
            }

            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            if let Some(cmd) = command {
                handle_command(cmd, adapter.clone(), action_tx.clone())?;
            }
        }
    }

    // History survives the session even if no palette selection flushed it.
    app_state.recent_commands.save();

    Ok(())
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
