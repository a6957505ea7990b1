use crate::app::state::ConfirmState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

pub struct ConfirmModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a ConfirmState,
}

impl Widget for ConfirmModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(60, 5, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" CONFIRM ", self.theme.header_warn),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let text = vec![
            Line::from(Span::styled(
                self.state.message.clone(),
                self.theme.list_item,
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", self.theme.controls_key),
                Span::raw(" confirm   "),
                Span::styled(" n / Esc ", self.theme.controls_key),
                Span::raw(" cancel"),
            ]),
        ];

        Paragraph::new(text)
            .alignment(ratatui::layout::Alignment::Center)
            .block(block)
            .render(modal_area, buf);
    }
}
