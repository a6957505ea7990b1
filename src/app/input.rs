use crate::app::hotkeys::HotkeyId;
use crate::app::{action::Action, state::AppState, ui};
use crate::components::{controls, header};
use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEventKind};
use ratatui::layout::{Rect, Size};
use std::time::Instant;

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == crossterm::event::KeyEventKind::Release {
            return None;
        }
    }

    match app_state.mode {
        crate::app::state::AppMode::CommandPalette => match event {
            Event::Key(key) => Some(palette_key(app_state, key)),
            _ => None,
        },
        crate::app::state::AppMode::Shortcuts => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q' | '?') => Some(Action::ToggleShortcuts),
                _ => None,
            },
            _ => None,
        },
        crate::app::state::AppMode::Confirm => match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmAccept),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::CancelMode),
                _ => None,
            },
            _ => None,
        },
        crate::app::state::AppMode::Normal => match event {
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Key(key) => {
                // An open error modal swallows everything but its dismissal
                if app_state.last_error.is_some() {
                    return matches!(key.code, KeyCode::Esc).then_some(Action::CancelMode);
                }
                app_state
                    .keymap
                    .get_action(&key, &app_state.registry, &app_state.status)
            }
            Event::Mouse(mouse) => {
                let area =
                    Rect::new(0, 0, terminal_size.width, terminal_size.height);
                let layout = ui::get_layout(area);

                match mouse.kind {
                    MouseEventKind::ScrollUp => Some(Action::FocusPrevCell),
                    MouseEventKind::ScrollDown => Some(Action::FocusNextCell),
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(action) = controls::hit_test(
                            app_state,
                            layout.controls,
                            mouse.column,
                            mouse.row,
                            Instant::now(),
                        ) {
                            return Some(action);
                        }
                        if let Some(action) =
                            header::hit_test(app_state, layout.header, mouse.column, mouse.row)
                        {
                            return Some(action);
                        }
                        resolve_cell_click(app_state, layout.body, mouse.column, mouse.row)
                    }
                    _ => None,
                }
            }
            _ => None,
        },
    }
}

fn palette_key(app_state: &AppState<'_>, key: KeyEvent) -> Action {
    // The global toggle keeps working while the palette is open
    let toggle_keys = &app_state.registry.get(HotkeyId::CommandPalette).keys;
    if let Some(combo) = crate::app::hotkeys::parse_shortcut(toggle_keys) {
        if combo.matches(&key) {
            return Action::TogglePalette;
        }
    }

    match key.code {
        KeyCode::Esc => Action::CancelMode,
        KeyCode::Enter => Action::PaletteSelect,
        KeyCode::Down => Action::PaletteNext,
        KeyCode::Up => Action::PalettePrev,
        KeyCode::Tab => Action::PaletteNext,
        KeyCode::BackTab => Action::PalettePrev,
        _ => Action::PaletteInput(key),
    }
}

/// Map a click inside the cell-list body (accounting for the block border
/// and list scroll offset) to a focus change.
fn resolve_cell_click(
    app_state: &AppState<'_>,
    body: Rect,
    column: u16,
    row: u16,
) -> Option<Action> {
    let notebook = app_state.notebook.as_ref()?;
    if column <= body.x
        || column >= body.x + body.width.saturating_sub(1)
        || row <= body.y
        || row >= body.y + body.height.saturating_sub(1)
    {
        return None;
    }

    let clicked = (row - (body.y + 1)) as usize + app_state.cell_list_state.offset();
    if clicked < notebook.cells.len() {
        Some(Action::FocusCell(clicked))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Cell, CellId, CellKind, CellStatus, LayoutKind, Notebook};
    use crossterm::event::{KeyModifiers, MouseEvent};

    fn state_with_cells() -> AppState<'static> {
        let mut state = AppState::default();
        state.notebook = Some(Notebook {
            name: "demo".to_string(),
            layout: LayoutKind::Vertical,
            cells: (0..3)
                .map(|i| Cell {
                    id: CellId(format!("c{i}")),
                    name: format!("cell {i}"),
                    kind: CellKind::Code,
                    source: String::new(),
                    status: CellStatus::Idle,
                })
                .collect(),
            dirty: false,
            undo_available: false,
        });
        state.cell_list_state.select(Some(0));
        state
    }

    fn size() -> Size {
        Size::new(80, 24)
    }

    #[test]
    fn palette_mode_routes_text_to_the_query() {
        let mut state = state_with_cells();
        state.mode = crate::app::state::AppMode::CommandPalette;
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::empty());
        assert_eq!(
            map_event_to_action(Event::Key(key), &state, size()),
            Some(Action::PaletteInput(key))
        );
    }

    #[test]
    fn palette_toggle_hotkey_closes_from_inside() {
        let mut state = state_with_cells();
        state.mode = crate::app::state::AppMode::CommandPalette;
        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(
            map_event_to_action(Event::Key(key), &state, size()),
            Some(Action::TogglePalette)
        );
    }

    #[test]
    fn body_clicks_focus_the_clicked_cell() {
        let state = state_with_cells();
        // Body starts at y=1 (header) with a border row, so cell 1 sits at
        // row 3.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 3,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(
            map_event_to_action(Event::Mouse(click), &state, size()),
            Some(Action::FocusCell(1))
        );
    }

    #[test]
    fn controls_bar_clicks_win_over_cell_clicks() {
        let state = state_with_cells();
        // Bottom row belongs to the controls bar; the save segment starts
        // after the READY status segment.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 23,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(
            map_event_to_action(Event::Mouse(click), &state, size()),
            Some(Action::Save)
        );
    }

    #[test]
    fn error_modal_swallows_normal_keys() {
        let mut state = state_with_cells();
        state.last_error = Some(crate::app::state::ErrorState::new("boom"));
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert_eq!(map_event_to_action(Event::Key(quit), &state, size()), None);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::empty());
        assert_eq!(
            map_event_to_action(Event::Key(esc), &state, size()),
            Some(Action::CancelMode)
        );
    }
}
