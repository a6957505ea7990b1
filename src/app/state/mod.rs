use super::hotkeys::HotkeyRegistry;
use super::keymap::{KeyConfig, KeyMap};
use super::recent::RecentCommands;
use crate::app::action::Action;
use crate::domain::models::{Cell, Notebook};
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::time::Instant;

pub mod command_palette;
pub mod error;
pub mod input;
pub mod run_control;

// Re-exports
pub use command_palette::CommandPaletteState;
pub use error::ErrorState;
pub use input::AppTextArea;
pub use run_control::{RunButton, RunControlState, INTERRUPT_DEBOUNCE};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,         // Navigating the cell list
    CommandPalette, // Searchable action list
    Shortcuts,      // Keyboard shortcuts overlay
    Confirm,        // Yes/no prompt before a destructive action
}

/// Externally-owned notebook flags the controls render from. Mutated only
/// by reducer handling of worker results.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NotebookStatus {
    pub running: bool,
    pub needs_run: bool,
    pub needs_save: bool,
    pub closed: bool,
    pub presenting: bool,
    pub undo_available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmState {
    pub message: String,
    pub on_confirm: Action,
}

pub struct AppState<'a> {
    // --- Connectivity & Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>, // "Saved."
    pub status_clear_time: Option<Instant>,
    pub active_tasks: Vec<String>,
    pub spinner: String,
    pub frame_count: u64,

    // --- Notebook Data (The "Source of Truth") ---
    // None until the first load completes.
    pub notebook: Option<Notebook>,
    pub status: NotebookStatus,
    pub run_control: RunControlState,

    // --- UI State ---
    pub cell_list_state: ListState, // Selection doubles as the last-focused cell
    pub command_palette: Option<CommandPaletteState<'a>>,
    pub confirm: Option<ConfirmState>,

    // --- Palette two-phase dispatch ---
    // Phase one (selection) stashes the action here; the loop runs it only
    // after the palette-closing frame has been drawn.
    pub pending_dispatch: Option<Action>,

    // --- Command history ---
    pub recent_commands: RecentCommands,

    // --- Config ---
    pub registry: HotkeyRegistry,
    pub keymap: Arc<KeyMap>,
    pub palette_type: crate::theme::PaletteType,
    pub theme: crate::theme::Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: &KeyConfig) -> Self {
        let registry = HotkeyRegistry::with_overrides(&config.overrides());
        let keymap = Arc::new(KeyMap::from_registry(&registry));
        Self {
            registry,
            keymap,
            recent_commands: RecentCommands::load(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn focused_cell(&self) -> Option<&Cell> {
        let notebook = self.notebook.as_ref()?;
        notebook.cells.get(self.cell_list_state.selected()?)
    }

    /// Fold a freshly loaded notebook into the status flags the controls
    /// key off, preserving UI-owned flags (`presenting`, `closed`).
    pub fn apply_notebook(&mut self, notebook: Notebook) {
        self.status.needs_run = notebook.needs_run();
        self.status.needs_save = notebook.dirty;
        self.status.undo_available = notebook.undo_available;

        let cell_count = notebook.cells.len();
        if cell_count == 0 {
            self.cell_list_state.select(None);
        } else {
            let selected = self.cell_list_state.selected().unwrap_or(0);
            self.cell_list_state
                .select(Some(selected.min(cell_count - 1)));
        }
        self.notebook = Some(notebook);
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        let registry = HotkeyRegistry::default();
        let keymap = Arc::new(KeyMap::from_registry(&registry));
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            active_tasks: Vec::new(),
            spinner: "⠋".to_string(),
            frame_count: 0,
            notebook: None,
            status: NotebookStatus::default(),
            run_control: RunControlState::default(),
            cell_list_state: ListState::default(),
            command_palette: None,
            confirm: None,
            pending_dispatch: None,
            recent_commands: RecentCommands::default(),
            registry,
            keymap,
            palette_type: crate::theme::PaletteType::CatppuccinMocha,
            theme: crate::theme::Theme::default(),
        }
    }
}
