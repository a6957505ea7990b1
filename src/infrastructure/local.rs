use crate::domain::models::{Cell, CellId, CellKind, CellStatus, LayoutKind, Notebook};
use crate::domain::notebook::NotebookFacade;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// On-disk notebook format. Execution status is transient and is reset on
/// load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NotebookFile {
    name: String,
    #[serde(default)]
    layout: LayoutKind,
    #[serde(default)]
    cells: Vec<Cell>,
}

struct DocState {
    doc: NotebookFile,
    dirty: bool,
    // Deleted cells with their original positions, newest last
    undo_stack: Vec<(usize, Cell)>,
}

/// A notebook document on the local filesystem. Stands in for a kernel
/// session: cell execution here only transitions statuses.
pub struct LocalNotebook {
    path: PathBuf,
    inner: Mutex<DocState>,
}

impl LocalNotebook {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let mut doc: NotebookFile = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            for cell in &mut doc.cells {
                cell.status = CellStatus::Idle;
            }
            if doc.name.is_empty() {
                doc.name = name_from_path(&path);
            }
            doc
        } else {
            NotebookFile {
                name: name_from_path(&path),
                ..Default::default()
            }
        };

        Ok(Self {
            path,
            inner: Mutex::new(DocState {
                doc,
                dirty: false,
                undo_stack: Vec::new(),
            }),
        })
    }

    fn find_cell(doc: &NotebookFile, id: &CellId) -> Result<usize> {
        doc.cells
            .iter()
            .position(|c| &c.id == id)
            .with_context(|| format!("no cell {id} in the notebook"))
    }
}

fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "notebook".to_string(), |s| s.to_string_lossy().into_owned())
}

#[async_trait]
impl NotebookFacade for LocalNotebook {
    async fn load(&self) -> Result<Notebook> {
        let inner = self.inner.lock().await;
        Ok(Notebook {
            name: inner.doc.name.clone(),
            layout: inner.doc.layout,
            cells: inner.doc.cells.clone(),
            dirty: inner.dirty,
            undo_available: !inner.undo_stack.is_empty(),
        })
    }

    async fn save(&self) -> Result<String> {
        let mut inner = self.inner.lock().await;
        let content = toml::to_string_pretty(&inner.doc).context("serializing notebook")?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;
        inner.dirty = false;
        Ok(format!("Saved {}", self.path.display()))
    }

    async fn save_recovery(&self) -> Result<String> {
        let inner = self.inner.lock().await;
        let content = toml::to_string_pretty(&inner.doc).context("serializing notebook")?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let file_name = format!("{}.recovery-{stamp}.toml", inner.doc.name);
        let path = self
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(file_name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path.display().to_string())
    }

    async fn run_stale(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        for cell in &mut inner.doc.cells {
            if matches!(cell.status, CellStatus::Stale | CellStatus::Queued) {
                cell.status = CellStatus::Idle;
            }
        }
        Ok(())
    }

    async fn run_all(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        for cell in &mut inner.doc.cells {
            cell.status = CellStatus::Idle;
        }
        Ok(())
    }

    async fn run_cell(&self, id: &CellId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let idx = Self::find_cell(&inner.doc, id)?;
        inner.doc.cells[idx].status = CellStatus::Idle;
        Ok(())
    }

    async fn interrupt(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        // Whatever was in flight stays stale rather than half-run
        for cell in &mut inner.doc.cells {
            if matches!(cell.status, CellStatus::Running | CellStatus::Queued) {
                cell.status = CellStatus::Stale;
            }
        }
        Ok(())
    }

    async fn delete_cell(&self, id: &CellId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let idx = Self::find_cell(&inner.doc, id)?;
        let cell = inner.doc.cells.remove(idx);
        inner.undo_stack.push((idx, cell));
        inner.dirty = true;
        Ok(())
    }

    async fn undo_delete_cell(&self) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let Some((idx, cell)) = inner.undo_stack.pop() else {
            return Ok(false);
        };
        let idx = idx.min(inner.doc.cells.len());
        inner.doc.cells.insert(idx, cell);
        inner.dirty = true;
        Ok(true)
    }

    async fn move_cell_up(&self, id: &CellId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let idx = Self::find_cell(&inner.doc, id)?;
        if idx > 0 {
            inner.doc.cells.swap(idx, idx - 1);
            inner.dirty = true;
        }
        Ok(())
    }

    async fn move_cell_down(&self, id: &CellId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let idx = Self::find_cell(&inner.doc, id)?;
        if idx + 1 < inner.doc.cells.len() {
            inner.doc.cells.swap(idx, idx + 1);
            inner.dirty = true;
        }
        Ok(())
    }

    async fn convert_cell(&self, id: &CellId, kind: CellKind) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let idx = Self::find_cell(&inner.doc, id)?;
        let cell = &mut inner.doc.cells[idx];
        if cell.kind == kind {
            bail!("cell {id} is already {}", kind.label());
        }
        cell.kind = kind;
        cell.status = CellStatus::Stale;
        inner.dirty = true;
        Ok(())
    }

    async fn set_layout(&self, layout: LayoutKind) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.doc.layout = layout;
        inner.dirty = true;
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        // Nothing to tear down for a file-backed notebook; the shell flips
        // to its closed state on the resulting action.
        Ok(())
    }

    fn notebook_path(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(dir: &Path) -> PathBuf {
        let path = dir.join("demo.toml");
        std::fs::write(
            &path,
            r##"
name = "demo"
layout = "grid"

[[cells]]
id = "c1"
name = "imports"
kind = "code"
source = "import data"

[[cells]]
id = "c2"
name = "notes"
kind = "markdown"
source = "# Notes"
status = "stale"
"##,
        )
        .unwrap();
        path
    }

    #[tokio::test]
    async fn load_resets_transient_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let nb = LocalNotebook::new(write_fixture(dir.path())).unwrap();
        let loaded = nb.load().await.unwrap();
        assert_eq!(loaded.name, "demo");
        assert_eq!(loaded.layout, LayoutKind::Grid);
        assert!(loaded.cells.iter().all(|c| c.status == CellStatus::Idle));
        assert!(!loaded.dirty);
    }

    #[tokio::test]
    async fn missing_file_starts_an_empty_notebook() {
        let dir = tempfile::tempdir().unwrap();
        let nb = LocalNotebook::new(dir.path().join("fresh.toml")).unwrap();
        let loaded = nb.load().await.unwrap();
        assert_eq!(loaded.name, "fresh");
        assert!(loaded.cells.is_empty());
    }

    #[tokio::test]
    async fn delete_then_undo_restores_position_and_undo_flag() {
        let dir = tempfile::tempdir().unwrap();
        let nb = LocalNotebook::new(write_fixture(dir.path())).unwrap();

        nb.delete_cell(&CellId("c1".to_string())).await.unwrap();
        let after_delete = nb.load().await.unwrap();
        assert_eq!(after_delete.cells.len(), 1);
        assert!(after_delete.undo_available);
        assert!(after_delete.dirty);

        assert!(nb.undo_delete_cell().await.unwrap());
        let restored = nb.load().await.unwrap();
        assert_eq!(restored.cells[0].id.0, "c1");
        assert!(!restored.undo_available);

        // Nothing left to undo
        assert!(!nb.undo_delete_cell().await.unwrap());
    }

    #[tokio::test]
    async fn save_round_trips_and_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path());
        let nb = LocalNotebook::new(&path).unwrap();

        nb.move_cell_down(&CellId("c1".to_string())).await.unwrap();
        assert!(nb.load().await.unwrap().dirty);
        nb.save().await.unwrap();
        assert!(!nb.load().await.unwrap().dirty);

        let reread = LocalNotebook::new(&path).unwrap();
        let cells = reread.load().await.unwrap().cells;
        assert_eq!(cells[0].id.0, "c2");
        assert_eq!(cells[1].id.0, "c1");
    }

    #[tokio::test]
    async fn recovery_snapshot_lands_next_to_the_notebook() {
        let dir = tempfile::tempdir().unwrap();
        let nb = LocalNotebook::new(write_fixture(dir.path())).unwrap();
        let path = nb.save_recovery().await.unwrap();
        assert!(path.contains("recovery-"));
        assert!(std::path::Path::new(&path).exists());
    }

    #[tokio::test]
    async fn convert_rejects_the_current_kind() {
        let dir = tempfile::tempdir().unwrap();
        let nb = LocalNotebook::new(write_fixture(dir.path())).unwrap();
        let id = CellId("c1".to_string());
        assert!(nb.convert_cell(&id, CellKind::Code).await.is_err());
        nb.convert_cell(&id, CellKind::Markdown).await.unwrap();
        let loaded = nb.load().await.unwrap();
        assert_eq!(loaded.cells[0].kind, CellKind::Markdown);
        assert_eq!(loaded.cells[0].status, CellStatus::Stale);
    }

    #[tokio::test]
    async fn run_stale_clears_only_stale_and_queued() {
        let dir = tempfile::tempdir().unwrap();
        let nb = LocalNotebook::new(write_fixture(dir.path())).unwrap();
        let id = CellId("c2".to_string());
        nb.convert_cell(&id, CellKind::Code).await.unwrap(); // marks c2 stale
        nb.run_stale().await.unwrap();
        let loaded = nb.load().await.unwrap();
        assert!(loaded.cells.iter().all(|c| c.status == CellStatus::Idle));
    }
}
