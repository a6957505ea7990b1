use crate::app::palette::Section;
use crate::app::state::CommandPaletteState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

enum DisplayEntry {
    Heading(&'static str),
    Row(usize), // Index into the match list
}

pub struct CommandPaletteModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a CommandPaletteState<'a>,
}

impl CommandPaletteModal<'_> {
    /// Interleave section headings with the filtered rows. Matches are
    /// already grouped recent-before-commands, so each heading appears at
    /// most once.
    fn display_entries(&self) -> Vec<DisplayEntry> {
        let mut entries = Vec::new();
        let mut last_section = None;
        for (i, r) in self.state.matches.iter().enumerate() {
            if last_section != Some(r.section) {
                entries.push(DisplayEntry::Heading(match r.section {
                    Section::Recent => "Recently Used",
                    Section::Commands => "Commands",
                }));
                last_section = Some(r.section);
            }
            entries.push(DisplayEntry::Row(i));
        }
        entries
    }
}

impl Widget for CommandPaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(60, 60, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" COMMAND PALETTE ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Query input
                Constraint::Length(1), // Separator
                Constraint::Min(0),    // Results
            ])
            .split(inner_area);

        // Render Query
        let query_line = Line::from(vec![
            Span::styled(" > ", self.theme.controls_key),
            Span::styled(self.state.query(), self.theme.list_item),
            Span::styled(
                "_",
                self.theme
                    .list_item
                    .add_modifier(ratatui::style::Modifier::SLOW_BLINK),
            ),
        ]);
        buf.set_line(layout[0].x, layout[0].y, &query_line, layout[0].width);

        // Render Separator
        let separator = "─".repeat(layout[1].width as usize);
        buf.set_string(layout[1].x, layout[1].y, separator, self.theme.border_focus);

        // Render Results
        let results_area = layout[2];
        let entries = self.display_entries();
        if self.state.matches.is_empty() {
            let no_results = Line::from(vec![Span::styled(
                "  No commands found.",
                self.theme.dimmed,
            )]);
            buf.set_line(
                results_area.x,
                results_area.y + 1,
                &no_results,
                results_area.width,
            );
            return;
        }

        // Scroll so the selected row stays visible
        let selected_pos = entries
            .iter()
            .position(|e| matches!(e, DisplayEntry::Row(i) if *i == self.state.selected_index))
            .unwrap_or(0);
        let visible = results_area.height as usize;
        let offset = selected_pos.saturating_sub(visible.saturating_sub(1));

        let mut y = results_area.y;
        for entry in entries.iter().skip(offset).take(visible) {
            let line = match entry {
                DisplayEntry::Heading(title) => Line::from(Span::styled(
                    format!(" {title}"),
                    self.theme.palette_section,
                )),
                DisplayEntry::Row(i) => {
                    let Some(row) = self.state.matches.get(*i).and_then(|r| self.state.index.get(*r))
                    else {
                        continue;
                    };
                    let selected = *i == self.state.selected_index;
                    let style = if selected {
                        self.theme.list_selected
                    } else {
                        self.theme.list_item
                    };
                    let prefix = if selected { "> " } else { "  " };

                    let mut spans = vec![
                        Span::styled(prefix.to_string(), style),
                        Span::styled(format!("{:<36}", row.title), style),
                    ];
                    if let Some(keys) = &row.keys {
                        spans.push(Span::raw(" "));
                        spans.push(Span::styled(
                            format!(" {keys} "),
                            self.theme.shortcut_keys,
                        ));
                    }
                    Line::from(spans)
                }
            };
            buf.set_line(results_area.x, y, &line, results_area.width);
            y += 1;
        }
    }
}
