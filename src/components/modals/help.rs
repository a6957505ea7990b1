use crate::app::hotkeys::HotkeyRegistry;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

/// Keyboard shortcuts overlay, fed from the live registry so rebound keys
/// show their actual binding.
pub struct ShortcutsModal<'a> {
    pub theme: &'a Theme,
    pub registry: &'a HotkeyRegistry,
}

impl Widget for ShortcutsModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(60, 70, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, help_area, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" KEYBOARD SHORTCUTS ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let key_style = self.theme.controls_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;

        let mut rows = vec![Row::new(vec![
            Cell::from(Span::styled("Global", category_style)),
            Cell::from(""),
        ])];
        for id in self.registry.iter() {
            let hotkey = self.registry.get(id);
            rows.push(Row::new(vec![
                Cell::from(Span::styled(format!(" {}", hotkey.keys), key_style)),
                Cell::from(Span::styled(hotkey.name, desc_style)),
            ]));
        }

        rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
        rows.push(Row::new(vec![
            Cell::from(Span::styled("Cells", category_style)),
            Cell::from(""),
        ]));
        rows.push(Row::new(vec![
            Cell::from(Span::styled(" j / ↓", key_style)),
            Cell::from(Span::styled("Focus next cell", desc_style)),
        ]));
        rows.push(Row::new(vec![
            Cell::from(Span::styled(" k / ↑", key_style)),
            Cell::from(Span::styled("Focus previous cell", desc_style)),
        ]));
        rows.push(Row::new(vec![
            Cell::from(Span::styled(" Esc", key_style)),
            Cell::from(Span::styled("Close modal / Clear errors", desc_style)),
        ]));

        let table = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
            .block(block);

        Widget::render(table, help_area, buf);
    }
}
