use super::{
    action::Action,
    command::Command,
    palette, providers,
    state::{AppMode, AppState, CommandPaletteState, ConfirmState, ErrorState},
};
use std::time::{Duration, Instant};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const STATUS_LINGER: Duration = Duration::from_secs(4);

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    match action {
        // --- System ---
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            state.spinner =
                SPINNER_FRAMES[state.frame_count as usize % SPINNER_FRAMES.len()].to_string();
            if let Some(clear_at) = state.status_clear_time {
                if Instant::now() >= clear_at {
                    state.status_message = None;
                    state.status_clear_time = None;
                }
            }
        }
        Action::Resize(_, _) => {}
        Action::Quit => {
            state.should_quit = true;
        }

        // --- Cell focus ---
        Action::FocusNextCell => {
            let count = state.notebook.as_ref().map_or(0, |nb| nb.cells.len());
            if count > 0 {
                let i = match state.cell_list_state.selected() {
                    Some(i) if i + 1 < count => i + 1,
                    Some(_) => 0,
                    None => 0,
                };
                state.cell_list_state.select(Some(i));
            }
        }
        Action::FocusPrevCell => {
            let count = state.notebook.as_ref().map_or(0, |nb| nb.cells.len());
            if count > 0 {
                let i = match state.cell_list_state.selected() {
                    Some(0) | None => count - 1,
                    Some(i) => i - 1,
                };
                state.cell_list_state.select(Some(i));
            }
        }
        Action::FocusCell(i) => {
            let count = state.notebook.as_ref().map_or(0, |nb| nb.cells.len());
            if i < count {
                state.cell_list_state.select(Some(i));
            }
        }

        // --- Notebook intents ---
        Action::Save if !state.status.closed => {
            return Some(Command::Save);
        }
        Action::RunStale if !state.status.closed => {
            return Some(Command::RunStale);
        }
        Action::RunAll if !state.status.closed => {
            return Some(Command::RunAll);
        }
        Action::RunCell(id) if !state.status.closed => {
            return Some(Command::RunCell(id));
        }
        Action::Interrupt if !state.status.closed => {
            return Some(Command::Interrupt);
        }
        Action::DeleteCellIntent(id) if !state.status.closed => {
            state.mode = AppMode::Confirm;
            state.confirm = Some(ConfirmState {
                message: format!("Delete cell {id}?"),
                on_confirm: Action::DeleteCell(id),
            });
        }
        Action::DeleteCell(id) if !state.status.closed => {
            state.mode = AppMode::Normal;
            state.confirm = None;
            return Some(Command::DeleteCell(id));
        }
        Action::UndoDeleteCell if !state.status.closed => {
            return Some(Command::UndoDeleteCell);
        }
        Action::MoveCellUp(id) if !state.status.closed => {
            return Some(Command::MoveCellUp(id));
        }
        Action::MoveCellDown(id) if !state.status.closed => {
            return Some(Command::MoveCellDown(id));
        }
        Action::ConvertCell(id, kind) if !state.status.closed => {
            return Some(Command::ConvertCell(id, kind));
        }
        Action::SaveRecovery => {
            return Some(Command::SaveRecovery);
        }
        Action::ShutdownIntent if !state.status.closed => {
            state.mode = AppMode::Confirm;
            state.confirm = Some(ConfirmState {
                message: "Terminate the kernel? Unsaved in-memory results are lost.".to_string(),
                on_confirm: Action::Shutdown,
            });
        }
        Action::Shutdown if !state.status.closed => {
            state.mode = AppMode::Normal;
            state.confirm = None;
            return Some(Command::Shutdown);
        }

        // --- Presentation ---
        Action::TogglePresenting if !state.status.closed => {
            state.status.presenting = !state.status.presenting;
        }
        Action::CycleLayout if !state.status.closed => {
            if let Some(nb) = &state.notebook {
                return Some(Command::SetLayout(nb.layout.next()));
            }
        }
        Action::SwitchTheme(palette_type) => {
            state.palette_type = palette_type;
            state.theme = crate::theme::Theme::from_palette_type(palette_type);
        }

        // --- Command palette ---
        Action::TogglePalette => {
            if state.mode == AppMode::CommandPalette {
                state.mode = AppMode::Normal;
                state.command_palette = None;
            } else {
                open_palette(state);
            }
        }
        Action::PaletteInput(key) => {
            if let Some(cp) = &mut state.command_palette {
                cp.input.input(key);
                cp.refresh_matches();
            }
        }
        Action::PaletteNext => {
            if let Some(cp) = &mut state.command_palette {
                cp.select_next();
            }
        }
        Action::PalettePrev => {
            if let Some(cp) = &mut state.command_palette {
                cp.select_prev();
            }
        }
        Action::PaletteSelect => {
            let selected = state
                .command_palette
                .as_ref()
                .and_then(|cp| cp.selected_row())
                .map(|row| (row.key.clone(), row.dispatch.clone()));
            if let Some((key, dispatch)) = selected {
                state.recent_commands.add(&key);
                state.recent_commands.save();
                // Phase one: close now so the palette releases input focus;
                // the loop runs the action after the next frame.
                state.mode = AppMode::Normal;
                state.command_palette = None;
                state.pending_dispatch = Some(dispatch);
            }
        }

        // --- Overlays ---
        Action::ToggleShortcuts => {
            state.mode = if state.mode == AppMode::Shortcuts {
                AppMode::Normal
            } else {
                AppMode::Shortcuts
            };
        }
        Action::ConfirmAccept => {
            if let Some(confirm) = state.confirm.take() {
                state.mode = AppMode::Normal;
                return update(state, confirm.on_confirm);
            }
        }
        Action::CancelMode => {
            state.mode = AppMode::Normal;
            state.command_palette = None;
            state.confirm = None;
            state.last_error = None;
        }

        // --- Async results ---
        Action::NotebookLoaded(notebook) => {
            state.apply_notebook(*notebook);
            refresh_palette(state);
        }
        Action::RunStateChanged(running) => {
            state.status.running = running;
            state.run_control.set_running(running, Instant::now());
        }
        Action::NotebookClosed => {
            state.status.closed = true;
            state.status.running = false;
            state.run_control.set_running(false, Instant::now());
            refresh_palette(state);
        }
        Action::OperationStarted(task) => {
            state.active_tasks.push(task);
        }
        Action::OperationCompleted(result) => {
            if !state.active_tasks.is_empty() {
                state.active_tasks.remove(0);
            }
            match result {
                Ok(msg) => {
                    state.status_message = Some(msg);
                    state.status_clear_time = Some(Instant::now() + STATUS_LINGER);
                    return Some(Command::LoadNotebook);
                }
                Err(msg) => {
                    state.last_error = Some(ErrorState::new(msg));
                }
            }
        }
        Action::ErrorOccurred(msg) => {
            state.last_error = Some(ErrorState::new(msg));
        }
        Action::ExternalChangeDetected => {
            state.status.needs_run = true;
            state.status_message = Some("Notebook changed on disk".to_string());
            state.status_clear_time = Some(Instant::now() + STATUS_LINGER);
            return Some(Command::LoadNotebook);
        }

        // Kernel intents arriving after shutdown fall through here and are
        // dropped (stale palette dispatches, late worker echoes).
        _ => {}
    }
    None
}

fn build_index(state: &AppState) -> palette::PaletteIndex {
    palette::build_palette(
        &state.registry,
        &state.status,
        providers::cell_actions(state.focused_cell()),
        providers::notebook_actions(&state.status),
        providers::config_actions(),
        state.recent_commands.entries(),
    )
}

fn open_palette(state: &mut AppState) {
    let index = build_index(state);
    let mut cp = CommandPaletteState {
        index,
        ..Default::default()
    };
    cp.refresh_matches();
    state.command_palette = Some(cp);
    state.mode = AppMode::CommandPalette;
}

/// Action providers are derived state; when they change under an open
/// palette the index is rebuilt with the query and selection kept.
fn refresh_palette(state: &mut AppState) {
    if state.command_palette.is_none() {
        return;
    }
    let index = build_index(state);
    if let Some(cp) = &mut state.command_palette {
        cp.index = index;
        cp.matches = palette::search_rows(&cp.index, &cp.query());
        cp.selected_index = cp
            .selected_index
            .min(cp.matches.len().saturating_sub(1));
    }
}
