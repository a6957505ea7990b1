use crate::domain::models::{CellId, CellKind, Notebook};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Cell focus ---
    FocusNextCell,
    FocusPrevCell,
    FocusCell(usize),

    // --- Notebook intents ---
    // These trigger async facade tasks
    Save,              // Persist the notebook
    RunStale,          // Run every stale cell
    RunAll,            // Run every cell
    RunCell(CellId),   // Run one cell
    Interrupt,         // Stop the running execution
    DeleteCellIntent(CellId), // Ask before deleting (mouse path)
    DeleteCell(CellId),       // Delete without asking (palette path)
    UndoDeleteCell,
    MoveCellUp(CellId),
    MoveCellDown(CellId),
    ConvertCell(CellId, CellKind),
    SaveRecovery,   // Write a recovery snapshot to disk
    ShutdownIntent, // Ask before terminating the kernel
    Shutdown,       // Terminate without asking (palette path)

    // --- Presentation ---
    TogglePresenting,
    CycleLayout,
    SwitchTheme(crate::theme::PaletteType),

    // --- Command palette ---
    TogglePalette,
    PaletteInput(crossterm::event::KeyEvent),
    PaletteNext,
    PalettePrev,
    PaletteSelect,

    // --- Overlays ---
    ToggleShortcuts,
    ConfirmAccept,
    CancelMode,

    // --- Async Results (The "Callback") ---
    // Dispatched by the worker tasks back to the main loop
    NotebookLoaded(Box<Notebook>),
    RunStateChanged(bool),
    NotebookClosed,
    OperationStarted(String),
    OperationCompleted(Result<String, String>),
    ErrorOccurred(String),
    ExternalChangeDetected, // Notebook file modified outside the shell
}
