use crate::app::{action::Action, command::Command};
use crate::domain::notebook::NotebookFacade;
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Run a `Command` as a spawned facade task, reporting lifecycle actions
/// back to the main loop.
pub fn handle_command(
    command: Command,
    adapter: Arc<dyn NotebookFacade>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::LoadNotebook => {
            tokio::spawn(async move {
                match adapter.load().await {
                    Ok(notebook) => {
                        let _ = tx.send(Action::NotebookLoaded(Box::new(notebook))).await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::ErrorOccurred(format!("Failed to load notebook: {e}")))
                            .await;
                    }
                }
            });
        }
        Command::Save => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted("Saving...".to_string()))
                    .await;
                match adapter.save().await {
                    Ok(msg) => {
                        let _ = tx.send(Action::OperationCompleted(Ok(msg))).await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                            .await;
                    }
                }
            });
        }
        Command::SaveRecovery => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted(
                        "Writing recovery snapshot...".to_string(),
                    ))
                    .await;
                match adapter.save_recovery().await {
                    Ok(path) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Ok(format!(
                                "Recovery snapshot written to {path}"
                            ))))
                            .await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                            .await;
                    }
                }
            });
        }
        Command::RunStale => {
            tokio::spawn(async move {
                run_execution(
                    tx,
                    "Running stale cells...".to_string(),
                    "Run complete",
                    move || async move { adapter.run_stale().await },
                )
                .await;
            });
        }
        Command::RunAll => {
            tokio::spawn(async move {
                run_execution(
                    tx,
                    "Running all cells...".to_string(),
                    "Run complete",
                    move || async move { adapter.run_all().await },
                )
                .await;
            });
        }
        Command::RunCell(id) => {
            tokio::spawn(async move {
                run_execution(
                    tx,
                    format!("Running cell {id}..."),
                    "Run complete",
                    move || async move { adapter.run_cell(&id).await },
                )
                .await;
            });
        }
        Command::Interrupt => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    "Interrupting...".to_string(),
                    "Execution interrupted",
                    move || async move { adapter.interrupt().await },
                )
                .await;
            });
        }
        Command::DeleteCell(id) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Deleting cell {id}..."),
                    "Cell deleted",
                    move || async move { adapter.delete_cell(&id).await },
                )
                .await;
            });
        }
        Command::UndoDeleteCell => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted("Restoring cell...".to_string()))
                    .await;
                match adapter.undo_delete_cell().await {
                    Ok(true) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Ok(
                                "Restored deleted cell".to_string()
                            )))
                            .await;
                    }
                    Ok(false) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Ok(
                                "Nothing to restore".to_string()
                            )))
                            .await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                            .await;
                    }
                }
            });
        }
        Command::MoveCellUp(id) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Moving cell {id}..."),
                    "Cell moved",
                    move || async move { adapter.move_cell_up(&id).await },
                )
                .await;
            });
        }
        Command::MoveCellDown(id) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Moving cell {id}..."),
                    "Cell moved",
                    move || async move { adapter.move_cell_down(&id).await },
                )
                .await;
            });
        }
        Command::ConvertCell(id, kind) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Converting cell {id}..."),
                    "Cell converted",
                    move || async move { adapter.convert_cell(&id, kind).await },
                )
                .await;
            });
        }
        Command::SetLayout(layout) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Switching layout to {}...", layout.label()),
                    "Layout switched",
                    move || async move { adapter.set_layout(layout).await },
                )
                .await;
            });
        }
        Command::Shutdown => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted(
                        "Shutting down kernel...".to_string(),
                    ))
                    .await;
                match adapter.shutdown().await {
                    Ok(()) => {
                        let _ = tx.send(Action::NotebookClosed).await;
                        let _ = tx
                            .send(Action::OperationCompleted(Ok(
                                "Kernel terminated".to_string()
                            )))
                            .await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                            .await;
                    }
                }
            });
        }
    }
    Ok(())
}

async fn run_operation<F, Fut>(
    tx: mpsc::Sender<Action>,
    start_msg: String,
    success_msg: &'static str,
    action: F,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send,
{
    let _ = tx.send(Action::OperationStarted(start_msg)).await;
    match action().await {
        Ok(()) => {
            let _ = tx
                .send(Action::OperationCompleted(Ok(success_msg.to_string())))
                .await;
        }
        Err(e) => {
            let _ = tx
                .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                .await;
        }
    }
}

/// Like `run_operation`, but brackets the call with run-state transitions
/// so the controls can debounce the interrupt affordance.
async fn run_execution<F, Fut>(
    tx: mpsc::Sender<Action>,
    start_msg: String,
    success_msg: &'static str,
    action: F,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send,
{
    let _ = tx.send(Action::OperationStarted(start_msg)).await;
    let _ = tx.send(Action::RunStateChanged(true)).await;
    let result = action().await;
    let _ = tx.send(Action::RunStateChanged(false)).await;
    match result {
        Ok(()) => {
            let _ = tx
                .send(Action::OperationCompleted(Ok(success_msg.to_string())))
                .await;
        }
        Err(e) => {
            let _ = tx
                .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                .await;
        }
    }
}
