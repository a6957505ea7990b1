use crate::app::action::Action;
use crate::app::hotkeys::{HotkeyId, HotkeyRegistry};
use crate::app::state::NotebookStatus;
use std::collections::{HashMap, HashSet};

/// A provider-supplied invocable. Leaves carry an `invoke` action; a
/// non-empty `children` list marks a grouping whose members become
/// selectable in its place.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandAction {
    pub label: String,
    pub hotkey: Option<HotkeyId>,
    pub display_keys: Option<String>,
    pub invoke: Option<Action>,
    pub invoke_headless: Option<Action>,
    pub children: Vec<CommandAction>,
}

impl CommandAction {
    #[must_use]
    pub fn new(label: impl Into<String>, invoke: Action) -> Self {
        Self {
            label: label.into(),
            hotkey: None,
            display_keys: None,
            invoke: Some(invoke),
            invoke_headless: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(label: impl Into<String>, children: Vec<CommandAction>) -> Self {
        Self {
            label: label.into(),
            hotkey: None,
            display_keys: None,
            invoke: None,
            invoke_headless: None,
            children,
        }
    }

    #[must_use]
    pub fn with_hotkey(mut self, id: HotkeyId) -> Self {
        self.hotkey = Some(id);
        self
    }

    #[must_use]
    pub fn with_display_keys(mut self, keys: impl Into<String>) -> Self {
        self.display_keys = Some(keys.into());
        self
    }

    /// The headless handler skips any interaction the default handler would
    /// raise (confirmation prompts), which is what a keyboard-driven
    /// invocation wants.
    #[must_use]
    pub fn with_headless(mut self, action: Action) -> Self {
        self.invoke_headless = Some(action);
        self
    }

    #[must_use]
    pub fn is_parent(&self) -> bool {
        !self.children.is_empty()
    }

    fn dispatch(&self) -> Option<Action> {
        self.invoke_headless.clone().or_else(|| self.invoke.clone())
    }
}

/// Recursively expand groupings. Parents stay in the output (so label
/// lookups can recognize and reject them) but are never selectable.
#[must_use]
pub fn flatten_actions(actions: Vec<CommandAction>) -> Vec<CommandAction> {
    let mut out = Vec::new();
    for action in actions {
        let children = action.children.clone();
        out.push(action);
        if !children.is_empty() {
            out.extend(flatten_actions(children));
        }
    }
    out
}

/// One selectable palette row, resolved at aggregation time: the dedup key,
/// the display title, the authoritative shortcut text (if any), and the
/// action to dispatch (headless variant already preferred).
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteRow {
    pub key: String,
    pub title: String,
    pub keys: Option<String>,
    pub dispatch: Action,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaletteIndex {
    pub recent: Vec<PaletteRow>,
    pub commands: Vec<PaletteRow>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    Recent,
    Commands,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowRef {
    pub section: Section,
    pub index: usize,
}

impl PaletteIndex {
    #[must_use]
    pub fn get(&self, r: RowRef) -> Option<&PaletteRow> {
        match r.section {
            Section::Recent => self.recent.get(r.index),
            Section::Commands => self.commands.get(r.index),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.commands.is_empty()
    }
}

fn hotkey_row(
    registry: &HotkeyRegistry,
    status: &NotebookStatus,
    id: HotkeyId,
) -> Option<PaletteRow> {
    // No live dispatch means the shortcut has no target right now; the
    // entry renders nothing rather than a dead row.
    let dispatch = registry.dispatch(id, status)?;
    let hotkey = registry.get(id);
    Some(PaletteRow {
        key: id.as_str().to_string(),
        title: hotkey.name.to_string(),
        keys: Some(hotkey.keys.clone()),
        dispatch,
    })
}

fn plain_row(action: &CommandAction, title_prefix: Option<&str>) -> Option<PaletteRow> {
    let dispatch = action.dispatch()?;
    let title = match title_prefix {
        Some(prefix) => format!("{prefix}{}", action.label),
        None => action.label.clone(),
    };
    Some(PaletteRow {
        key: action.label.clone(),
        title,
        keys: action.display_keys.clone(),
        dispatch,
    })
}

/// Aggregate the three action sources and the recent history into one
/// deduplicated two-section index. Pure: providers are read, never mutated.
#[must_use]
pub fn build_palette(
    registry: &HotkeyRegistry,
    status: &NotebookStatus,
    cell_actions: Vec<CommandAction>,
    notebook_actions: Vec<CommandAction>,
    config_actions: Vec<CommandAction>,
    recent: &[String],
) -> PaletteIndex {
    let cell_actions = flatten_actions(cell_actions);
    let mut notebook_actions = flatten_actions(notebook_actions);
    notebook_actions.extend(flatten_actions(config_actions));

    let plain: Vec<&CommandAction> = notebook_actions
        .iter()
        .filter(|a| a.hotkey.is_none())
        .collect();

    // Label index for resolving recent entries. Later sources win on
    // collision; labels are unique across providers in practice.
    let mut index: HashMap<&str, &CommandAction> = HashMap::new();
    for action in &plain {
        index.insert(action.label.as_str(), action);
    }

    let recent_set: HashSet<&str> = recent.iter().map(String::as_str).collect();

    let mut recent_rows = Vec::new();
    for key in recent {
        if let Ok(id) = key.parse::<HotkeyId>() {
            if let Some(row) = hotkey_row(registry, status, id) {
                recent_rows.push(row);
            }
            continue;
        }
        if let Some(action) = index.get(key.as_str()) {
            if !action.is_parent() {
                if let Some(row) = plain_row(action, None) {
                    recent_rows.push(row);
                }
            }
        }
    }

    let mut command_rows = Vec::new();
    for id in registry.iter() {
        if recent_set.contains(id.as_str()) {
            continue; // Already shown under "Recently Used"
        }
        if let Some(row) = hotkey_row(registry, status, id) {
            command_rows.push(row);
        }
    }
    for action in &plain {
        if action.is_parent() || recent_set.contains(action.label.as_str()) {
            continue;
        }
        if let Some(row) = plain_row(action, None) {
            command_rows.push(row);
        }
    }
    for action in &cell_actions {
        if action.is_parent() || recent_set.contains(action.label.as_str()) {
            continue;
        }
        if let Some(row) = plain_row(action, Some("Cell > ")) {
            command_rows.push(row);
        }
    }

    PaletteIndex {
        recent: recent_rows,
        commands: command_rows,
    }
}

/// Filter rows by a query, recent section before commands so the section
/// grouping survives filtering. Within a section, two passes: title
/// substring hits outrank shortcut-text hits. An empty query returns
/// everything in aggregation order.
#[must_use]
pub fn search_rows(index: &PaletteIndex, query: &str) -> Vec<RowRef> {
    let mut results = search_section(&index.recent, Section::Recent, query);
    results.extend(search_section(&index.commands, Section::Commands, query));
    results
}

fn search_section(rows: &[PaletteRow], section: Section, query: &str) -> Vec<RowRef> {
    let refs = |i| RowRef { section, index: i };

    if query.is_empty() {
        return (0..rows.len()).map(refs).collect();
    }

    let query_lower = query.to_lowercase();
    let mut results = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.title.to_lowercase().contains(&query_lower) {
            results.push(refs(i));
        }
    }
    for (i, row) in rows.iter().enumerate() {
        if results.contains(&refs(i)) {
            continue;
        }
        if row
            .keys
            .as_deref()
            .is_some_and(|k| k.to_lowercase().contains(&query_lower))
        {
            results.push(refs(i));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> NotebookStatus {
        NotebookStatus::default()
    }

    fn registry() -> HotkeyRegistry {
        HotkeyRegistry::default()
    }

    fn keys_of(rows: &[PaletteRow]) -> Vec<&str> {
        rows.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn flatten_expands_groups_and_keeps_parents_marked() {
        let actions = vec![
            CommandAction::new("Solo", Action::Save),
            CommandAction::group(
                "Group",
                vec![
                    CommandAction::new("Child A", Action::RunStale),
                    CommandAction::new("Child B", Action::RunAll),
                ],
            ),
        ];
        let flat = flatten_actions(actions);
        let labels: Vec<&str> = flat.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["Solo", "Group", "Child A", "Child B"]);
        assert!(flat[1].is_parent());
        assert!(!flat[2].is_parent());
    }

    #[test]
    fn recent_plain_label_renders_once_and_is_deduped_from_commands() {
        let notebook = vec![CommandAction::new("save", Action::Save)];
        let recent = vec!["save".to_string()];

        let index = build_palette(&registry(), &status(), vec![], notebook, vec![], &recent);

        assert_eq!(keys_of(&index.recent), ["save"]);
        assert!(!index.commands.iter().any(|r| r.key == "save"));
    }

    #[test]
    fn recent_hotkey_renders_via_registry_and_is_deduped() {
        let recent = vec!["global.save".to_string()];
        let index = build_palette(&registry(), &status(), vec![], vec![], vec![], &recent);

        assert_eq!(index.recent.len(), 1);
        assert_eq!(index.recent[0].title, "Save notebook");
        assert_eq!(index.recent[0].keys.as_deref(), Some("ctrl+s"));
        assert!(!index.commands.iter().any(|r| r.key == "global.save"));
    }

    #[test]
    fn stale_recent_entries_vanish_silently() {
        let mut st = status();
        st.closed = true; // save has no live dispatch when closed
        let recent = vec![
            "global.save".to_string(),
            "no-such-label".to_string(),
        ];
        let index = build_palette(&registry(), &st, vec![], vec![], vec![], &recent);
        assert!(index.recent.is_empty());
    }

    #[test]
    fn recent_parent_groups_are_rejected() {
        let notebook = vec![CommandAction::group(
            "Convert cell to",
            vec![CommandAction::new("Markdown", Action::Save)],
        )];
        let recent = vec!["Convert cell to".to_string()];
        let index = build_palette(&registry(), &status(), vec![], notebook, vec![], &recent);
        assert!(index.recent.is_empty());
        // The parent is not selectable in the main list either
        assert!(!index.commands.iter().any(|r| r.key == "Convert cell to"));
        assert!(index.commands.iter().any(|r| r.key == "Markdown"));
    }

    #[test]
    fn no_key_appears_twice_across_sections() {
        let notebook = vec![
            CommandAction::new("Shutdown kernel", Action::ShutdownIntent)
                .with_headless(Action::Shutdown),
            CommandAction::new("Run all cells", Action::RunAll),
        ];
        let cell = vec![CommandAction::new(
            "Run cell",
            Action::RunCell(crate::domain::models::CellId("c1".into())),
        )];
        let recent = vec!["global.runStale".to_string(), "Run all cells".to_string()];

        let index = build_palette(&registry(), &status(), cell, notebook, vec![], &recent);

        let mut seen = std::collections::HashSet::new();
        for row in index.recent.iter().chain(index.commands.iter()) {
            assert!(seen.insert(row.key.clone()), "duplicate key {}", row.key);
        }
    }

    #[test]
    fn recently_used_cell_actions_are_skipped_from_commands() {
        // Cell actions are not label-indexed, so a recently used one
        // disappears from the list entirely instead of moving sections.
        let cell = vec![CommandAction::new(
            "Move cell up",
            Action::MoveCellUp(crate::domain::models::CellId("c1".into())),
        )];
        let recent = vec!["Move cell up".to_string()];
        let index = build_palette(&registry(), &status(), cell, vec![], vec![], &recent);

        assert!(index.recent.is_empty());
        assert!(!index.commands.iter().any(|r| r.key == "Move cell up"));
    }

    #[test]
    fn label_collisions_resolve_to_the_later_source() {
        let notebook = vec![CommandAction::new("Reload", Action::Save)];
        let config = vec![CommandAction::new("Reload", Action::RunAll)];
        let recent = vec!["Reload".to_string()];

        let index = build_palette(&registry(), &status(), vec![], notebook, config, &recent);
        assert_eq!(index.recent.len(), 1);
        assert_eq!(index.recent[0].dispatch, Action::RunAll);
    }

    #[test]
    fn headless_handler_is_preferred() {
        let notebook = vec![CommandAction::new("Shutdown kernel", Action::ShutdownIntent)
            .with_headless(Action::Shutdown)];
        let index = build_palette(&registry(), &status(), vec![], notebook, vec![], &[]);
        let row = index
            .commands
            .iter()
            .find(|r| r.key == "Shutdown kernel")
            .unwrap();
        assert_eq!(row.dispatch, Action::Shutdown);
    }

    #[test]
    fn cell_rows_are_namespaced_but_keyed_by_bare_label() {
        let cell = vec![CommandAction::new(
            "Delete cell",
            Action::DeleteCell(crate::domain::models::CellId("c1".into())),
        )];
        let index = build_palette(&registry(), &status(), cell, vec![], vec![], &[]);
        let row = index
            .commands
            .iter()
            .find(|r| r.key == "Delete cell")
            .unwrap();
        assert_eq!(row.title, "Cell > Delete cell");
    }

    #[test]
    fn search_ranks_title_hits_before_shortcut_hits() {
        let notebook = vec![
            CommandAction::new("Control flow", Action::RunAll),
            CommandAction::new("Anything", Action::Save).with_display_keys("ctrl+9"),
        ];
        let index = build_palette(&registry(), &status(), vec![], notebook, vec![], &[]);

        let hits = search_rows(&index, "ctrl");
        let titles: Vec<&str> = hits
            .iter()
            .filter_map(|r| index.get(*r))
            .map(|row| row.title.as_str())
            .collect();

        // Title matches ("Control flow") come before rows matched only via
        // their shortcut text.
        let control_pos = titles.iter().position(|t| *t == "Control flow").unwrap();
        let anything_pos = titles.iter().position(|t| *t == "Anything").unwrap();
        assert!(control_pos < anything_pos);
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let recent = vec!["global.save".to_string()];
        let index = build_palette(&registry(), &status(), vec![], vec![], vec![], &recent);
        let hits = search_rows(&index, "");
        assert_eq!(hits.len(), index.recent.len() + index.commands.len());
        assert_eq!(hits[0].section, Section::Recent);
    }
}
