use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub String);

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Code,
    Markdown,
    Sql,
}

impl CellKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CellKind::Code => "Code",
            CellKind::Markdown => "Markdown",
            CellKind::Sql => "SQL",
        }
    }

    #[must_use]
    pub fn all() -> &'static [CellKind] {
        &[CellKind::Code, CellKind::Markdown, CellKind::Sql]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    #[default]
    Idle,
    Queued,
    Running,
    Stale,
    Errored,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Vertical,
    Grid,
    Slides,
}

impl LayoutKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LayoutKind::Vertical => "Vertical",
            LayoutKind::Grid => "Grid",
            LayoutKind::Slides => "Slides",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            LayoutKind::Vertical => LayoutKind::Grid,
            LayoutKind::Grid => LayoutKind::Slides,
            LayoutKind::Slides => LayoutKind::Vertical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub name: String,
    pub kind: CellKind,
    pub source: String,
    #[serde(default)]
    pub status: CellStatus,
}

/// The notebook as the shell sees it. Cells carry transient execution
/// status; `dirty` and `undo_available` are adapter-side bookkeeping that
/// never reaches disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub name: String,
    pub layout: LayoutKind,
    pub cells: Vec<Cell>,
    pub dirty: bool,
    pub undo_available: bool,
}

impl Notebook {
    #[must_use]
    pub fn needs_run(&self) -> bool {
        self.cells
            .iter()
            .any(|c| matches!(c.status, CellStatus::Stale | CellStatus::Queued))
    }
}
