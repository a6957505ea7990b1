use crate::app::action::Action;
use crate::app::hotkeys::HotkeyId;
use crate::app::palette::CommandAction;
use crate::app::state::NotebookStatus;
use crate::domain::models::{Cell, CellKind};
use crate::theme::PaletteType;

/// Actions scoped to the last-focused cell. Empty when nothing is focused.
#[must_use]
pub fn cell_actions(cell: Option<&Cell>) -> Vec<CommandAction> {
    let Some(cell) = cell else {
        return Vec::new();
    };
    let id = &cell.id;

    vec![
        CommandAction::new("Run cell", Action::RunCell(id.clone())),
        CommandAction::new("Move cell up", Action::MoveCellUp(id.clone())),
        CommandAction::new("Move cell down", Action::MoveCellDown(id.clone())),
        // The mouse path confirms; the palette's headless variant deletes
        // outright since the selection itself was deliberate.
        CommandAction::new("Delete cell", Action::DeleteCellIntent(id.clone()))
            .with_headless(Action::DeleteCell(id.clone())),
        CommandAction::group(
            "Convert cell to",
            CellKind::all()
                .iter()
                .filter(|kind| **kind != cell.kind)
                .map(|kind| {
                    CommandAction::new(
                        format!("Convert to {}", kind.label()),
                        Action::ConvertCell(id.clone(), *kind),
                    )
                })
                .collect(),
        ),
    ]
}

/// Notebook-scoped actions. Hotkey-bound entries are partitioned out by the
/// palette and rendered through the registry instead.
#[must_use]
pub fn notebook_actions(status: &NotebookStatus) -> Vec<CommandAction> {
    if status.closed {
        // Only recovery makes sense once the kernel is gone
        return vec![CommandAction::new(
            "Save recovery snapshot",
            Action::SaveRecovery,
        )];
    }

    vec![
        CommandAction::new("Save notebook", Action::Save).with_hotkey(HotkeyId::Save),
        CommandAction::new("Run stale cells", Action::RunStale).with_hotkey(HotkeyId::RunStale),
        CommandAction::new("Run all cells", Action::RunAll),
        CommandAction::new("Save recovery snapshot", Action::SaveRecovery),
        CommandAction::new("Shutdown kernel", Action::ShutdownIntent)
            .with_headless(Action::Shutdown),
    ]
}

/// Config-scoped actions: appearance switching, grouped under one parent.
#[must_use]
pub fn config_actions() -> Vec<CommandAction> {
    vec![CommandAction::group(
        "Theme",
        PaletteType::all()
            .iter()
            .map(|p| CommandAction::new(format!("Theme: {}", p.label()), Action::SwitchTheme(*p)))
            .collect(),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CellId, CellStatus};

    fn cell() -> Cell {
        Cell {
            id: CellId("c1".to_string()),
            name: "imports".to_string(),
            kind: CellKind::Code,
            source: String::new(),
            status: CellStatus::Idle,
        }
    }

    #[test]
    fn no_focused_cell_means_no_cell_actions() {
        assert!(cell_actions(None).is_empty());
    }

    #[test]
    fn convert_group_excludes_the_current_kind() {
        let cell = cell();
        let actions = cell_actions(Some(&cell));
        let group = actions.iter().find(|a| a.is_parent()).unwrap();
        assert!(group
            .children
            .iter()
            .all(|c| c.label != "Convert to Code"));
        assert_eq!(group.children.len(), CellKind::all().len() - 1);
    }

    #[test]
    fn closed_notebook_offers_only_recovery() {
        let status = NotebookStatus {
            closed: true,
            ..Default::default()
        };
        let actions = notebook_actions(&status);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].label, "Save recovery snapshot");
    }

    #[test]
    fn hotkey_bound_entries_declare_their_binding() {
        let actions = notebook_actions(&NotebookStatus::default());
        let save = actions.iter().find(|a| a.label == "Save notebook").unwrap();
        assert_eq!(save.hotkey, Some(HotkeyId::Save));
    }
}
