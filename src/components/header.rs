use crate::app::action::Action;
use crate::app::hotkeys::HotkeyId;
use crate::app::state::AppState;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// The top-right cluster: layout select (only while presenting) and the
/// shutdown trigger. Suppressed entirely once the notebook is closed.
#[must_use]
pub fn top_right_segments(state: &AppState) -> Vec<(String, Action)> {
    if state.status.closed {
        return Vec::new();
    }

    let mut segments = Vec::new();
    if state.status.presenting {
        let layout = state
            .notebook
            .as_ref()
            .map_or("Vertical", |nb| nb.layout.label());
        let keys = &state.registry.get(HotkeyId::CycleLayout).keys;
        segments.push((format!(" {keys} Layout: {layout} "), Action::CycleLayout));
    }
    segments.push((" Shutdown ".to_string(), Action::ShutdownIntent));
    segments
}

pub struct Header<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);
        let sep_logo_base = Style::default().fg(logo_bg).bg(base_bg);

        let name = self
            .state
            .notebook
            .as_ref()
            .map_or("(no notebook)", |nb| nb.name.as_str());
        let mode_badge = if self.state.status.closed {
            Span::styled(" CLOSED ", self.theme.header_warn)
        } else if self.state.status.presenting {
            Span::styled(" PRESENTING ", self.theme.header_active)
        } else {
            Span::styled(" EDITING ", self.theme.header_item)
        };

        let mut spans = vec![
            Span::styled(" BENTO ", self.theme.header_logo),
            Span::styled(glyphs::SEP_RIGHT, sep_logo_base),
            Span::styled(format!(" {name} "), self.theme.header_item),
            Span::raw(" "),
            mode_badge,
        ];

        let right = top_right_segments(self.state);
        let used: usize = spans.iter().map(Span::width).sum();
        let right_width: usize = right.iter().map(|(text, _)| text.chars().count()).sum();
        if used + right_width < area.width as usize {
            spans.push(Span::styled(
                " ".repeat(area.width as usize - used - right_width),
                self.theme.header,
            ));
            for (text, action) in &right {
                let style = if *action == Action::ShutdownIntent {
                    self.theme.header_warn
                } else {
                    self.theme.header_item
                };
                spans.push(Span::styled(text.clone(), style));
            }
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}

/// Resolve a click on the header line to a top-right cluster action.
#[must_use]
pub fn hit_test(state: &AppState, area: Rect, column: u16, row: u16) -> Option<Action> {
    if row != area.y {
        return None;
    }

    let right = top_right_segments(state);
    let right_width: u16 = right
        .iter()
        .map(|(text, _)| text.chars().count() as u16)
        .sum();
    if right_width == 0 || right_width > area.width {
        return None;
    }

    let mut x = area.x + area.width - right_width;
    for (text, action) in &right {
        let w = text.chars().count() as u16;
        if column >= x && column < x + w {
            return Some(action.clone());
        }
        x += w;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_notebook_has_no_top_right_cluster() {
        let mut state = AppState::default();
        state.status.closed = true;
        assert!(top_right_segments(&state).is_empty());
        let area = Rect::new(0, 0, 80, 1);
        for col in 0..80 {
            assert_eq!(hit_test(&state, area, col, 0), None);
        }
    }

    #[test]
    fn layout_select_appears_only_while_presenting() {
        let mut state = AppState::default();
        assert_eq!(top_right_segments(&state).len(), 1); // Shutdown only
        state.status.presenting = true;
        let segments = top_right_segments(&state);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].0.contains("Layout"));
    }

    #[test]
    fn shutdown_is_clickable_at_the_right_edge() {
        let state = AppState::default();
        let area = Rect::new(0, 0, 80, 1);
        assert_eq!(
            hit_test(&state, area, 75, 0),
            Some(Action::ShutdownIntent)
        );
    }
}
