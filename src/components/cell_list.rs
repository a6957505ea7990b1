use crate::domain::models::{CellStatus, Notebook};
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget},
};

pub struct CellList<'a> {
    pub notebook: &'a Notebook,
    pub theme: &'a Theme,
    pub spinner: &'a str,
}

impl StatefulWidget for CellList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let items: Vec<ListItem> = self
            .notebook
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let selected = state.selected() == Some(i);
                let (glyph, glyph_style) = match cell.status {
                    CellStatus::Idle => (glyphs::CELL_IDLE, self.theme.cell_idle),
                    CellStatus::Queued => (glyphs::CELL_QUEUED, self.theme.cell_queued),
                    CellStatus::Running => (self.spinner, self.theme.cell_running),
                    CellStatus::Stale => (glyphs::CELL_STALE, self.theme.cell_stale),
                    CellStatus::Errored => (glyphs::CELL_ERRORED, self.theme.cell_errored),
                };

                let name_style = if selected {
                    self.theme.list_selected
                } else {
                    self.theme.cell_name
                };
                let prefix = if selected { "▸ " } else { "  " };

                ListItem::new(Line::from(vec![
                    Span::styled(prefix, name_style),
                    Span::styled(glyph.to_string(), glyph_style),
                    Span::styled(format!(" {:<24}", cell.name), name_style),
                    Span::styled(format!(" {}", cell.kind.label()), self.theme.cell_kind),
                ]))
            })
            .collect();

        let list = List::new(items);
        StatefulWidget::render(list, area, buf, state);
    }
}
