use crate::domain::models::{CellId, CellKind, LayoutKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadNotebook,
    Save,
    SaveRecovery,
    RunStale,
    RunAll,
    RunCell(CellId),
    Interrupt,
    DeleteCell(CellId),
    UndoDeleteCell,
    MoveCellUp(CellId),
    MoveCellDown(CellId),
    ConvertCell(CellId, CellKind),
    SetLayout(LayoutKind),
    Shutdown,
}
