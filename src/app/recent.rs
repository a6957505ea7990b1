use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on the recently-used history. The palette shows whatever the
/// store returns, so the bound lives here and nowhere else.
pub const RECENT_CAPACITY: usize = 8;

/// Ordered most-recent-first history of invoked command keys. A key is
/// either a `HotkeyId` string form or a plain action label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecentCommands {
    entries: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentFile {
    commands: Vec<String>,
}

fn config_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("bento");
        path.push("recent_commands.toml");
        path
    })
}

impl RecentCommands {
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut store = Self::default();
        for key in entries.iter().rev() {
            store.add(key);
        }
        store
    }

    #[must_use]
    pub fn load() -> Self {
        config_path().map_or_else(Self::default, |p| Self::load_from(&p))
    }

    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(file) = toml::from_str::<RecentFile>(&content) {
                    return Self::from_entries(file.commands);
                }
            }
        }
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append-or-promote-to-front, bounded by `RECENT_CAPACITY`.
    pub fn add(&mut self, key: &str) {
        self.entries.retain(|e| e != key);
        self.entries.insert(0, key.to_string());
        self.entries.truncate(RECENT_CAPACITY);
    }

    pub fn save(&self) {
        if let Some(path) = config_path() {
            self.save_to(&path);
        }
    }

    // Best-effort: history loss is acceptable, a surfaced error is not.
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let file = RecentFile {
            commands: self.entries.clone(),
        };
        if let Ok(content) = toml::to_string(&file) {
            let _ = std::fs::write(path, content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_promotes_to_front() {
        let mut recent = RecentCommands::default();
        recent.add("global.save");
        recent.add("Shutdown kernel");
        recent.add("global.save");
        assert_eq!(recent.entries(), ["global.save", "Shutdown kernel"]);
    }

    #[test]
    fn capacity_is_bounded() {
        let mut recent = RecentCommands::default();
        for i in 0..20 {
            recent.add(&format!("cmd-{i}"));
        }
        assert_eq!(recent.entries().len(), RECENT_CAPACITY);
        assert_eq!(recent.entries()[0], "cmd-19");
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_commands.toml");

        let mut recent = RecentCommands::default();
        recent.add("global.runStale");
        recent.add("Theme: Nord");
        recent.save_to(&path);

        let loaded = RecentCommands::load_from(&path);
        assert_eq!(loaded, recent);
    }

    #[test]
    fn load_tolerates_missing_and_garbage_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(RecentCommands::load_from(&missing).is_empty());

        let garbage = dir.path().join("garbage.toml");
        std::fs::write(&garbage, "not [valid toml").unwrap();
        assert!(RecentCommands::load_from(&garbage).is_empty());
    }
}
