use crate::app::state::ErrorState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::helpers::centered_rect;

pub struct ErrorModal<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl Widget for ErrorModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(60, 20, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        Clear.render(modal_area, buf);
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" ERROR ", self.theme.status_error),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(self.theme.status_error);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.error.message.clone(),
                self.theme.list_item,
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw(" Press "),
                Span::styled("Esc", self.theme.controls_key),
                Span::raw(" to acknowledge "),
            ]),
        ];

        Paragraph::new(text)
            .alignment(ratatui::layout::Alignment::Center)
            .block(block)
            .render(modal_area, buf);
    }
}
