use super::input::AppTextArea;
use crate::app::palette::{search_rows, PaletteIndex, PaletteRow, RowRef};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandPaletteState<'a> {
    pub input: AppTextArea<'a>,
    pub index: PaletteIndex,
    pub matches: Vec<RowRef>,
    pub selected_index: usize,
}

impl CommandPaletteState<'_> {
    #[must_use]
    pub fn query(&self) -> String {
        self.input.text()
    }

    /// Re-run the filter after the query or the underlying index changed.
    pub fn refresh_matches(&mut self) {
        self.matches = search_rows(&self.index, &self.query());
        self.selected_index = 0;
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&PaletteRow> {
        self.matches
            .get(self.selected_index)
            .and_then(|r| self.index.get(*r))
    }

    pub fn select_next(&mut self) {
        if !self.matches.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.matches.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.matches.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.matches.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }
}
