use crate::app::state::AppState;
use crate::components::cell_list::CellList;
use crate::components::controls::Controls;
use crate::components::header::Header;
use crate::components::modals::ModalManager;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub controls: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Cell list
            Constraint::Length(1), // Controls bar
        ])
        .split(area);

    AppLayout {
        header: main[0],
        body: main[1],
        controls: main[2],
    }
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    let theme = app_state.theme.clone();
    let layout = get_layout(f.area());
    let now = Instant::now();

    if layout.header.height > 0 {
        f.render_widget(
            Header {
                state: app_state,
                theme: &theme,
            },
            layout.header,
        );
    }

    // --- Cell list body ---
    if layout.body.width > 0 && layout.body.height > 0 {
        let title = if app_state.status.presenting {
            app_state
                .notebook
                .as_ref()
                .map_or("CELLS", |nb| nb.layout.label())
        } else {
            "CELLS"
        };
        let body_block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title.to_uppercase(), theme.header_item),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focus);
        let inner = body_block.inner(layout.body);
        f.render_widget(body_block, layout.body);

        if let Some(notebook) = &app_state.notebook {
            let spinner = app_state.spinner.clone();
            let list = CellList {
                notebook,
                theme: &theme,
                spinner: &spinner,
            };
            let mut list_state = app_state.cell_list_state.clone();
            f.render_stateful_widget(list, inner, &mut list_state);
            app_state.cell_list_state = list_state;
        } else {
            let loading = Paragraph::new(Line::from(vec![
                Span::styled(app_state.spinner.clone(), theme.header_logo),
                Span::raw(" Loading notebook... "),
            ]))
            .alignment(ratatui::layout::Alignment::Center);
            f.render_widget(loading, inner);
        }
    }

    if layout.controls.width > 0 && layout.controls.height > 0 {
        f.render_widget(
            Controls {
                state: app_state,
                theme: &theme,
                now,
            },
            layout.controls,
        );
    }

    // --- Modals ---
    f.render_widget(
        ModalManager {
            theme: &theme,
            app_state,
        },
        f.area(),
    );
}
