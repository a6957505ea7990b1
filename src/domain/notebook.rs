use crate::domain::models::{CellId, CellKind, LayoutKind, Notebook};
use anyhow::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotebookFacade: Send + Sync {
    // Returns the current document for the main view
    async fn load(&self) -> Result<Notebook>;

    // Persist the document; returns a human-readable confirmation
    async fn save(&self) -> Result<String>;

    // Write a timestamped snapshot next to the notebook; returns its path
    async fn save_recovery(&self) -> Result<String>;

    async fn run_stale(&self) -> Result<()>;
    async fn run_all(&self) -> Result<()>;
    async fn run_cell(&self, id: &CellId) -> Result<()>;
    async fn interrupt(&self) -> Result<()>;

    async fn delete_cell(&self, id: &CellId) -> Result<()>;
    async fn undo_delete_cell(&self) -> Result<bool>;
    async fn move_cell_up(&self, id: &CellId) -> Result<()>;
    async fn move_cell_down(&self, id: &CellId) -> Result<()>;
    async fn convert_cell(&self, id: &CellId, kind: CellKind) -> Result<()>;

    async fn set_layout(&self, layout: LayoutKind) -> Result<()>;

    // Terminate the kernel session; the notebook is read-only afterwards
    async fn shutdown(&self) -> Result<()>;

    fn notebook_path(&self) -> std::path::PathBuf;
}
