use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::command_palette::CommandPaletteModal;
use super::confirm::ConfirmModal;
use super::error::ErrorModal;
use super::help::ShortcutsModal;
use super::helpers::dim_area;

pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState<'a>,
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let is_modal_active =
            self.app_state.mode != AppMode::Normal || self.app_state.last_error.is_some();
        if is_modal_active {
            dim_area(buf, area);
        }

        if self.app_state.mode == AppMode::Shortcuts {
            ShortcutsModal {
                theme: self.theme,
                registry: &self.app_state.registry,
            }
            .render(area, buf);
        }

        if let (AppMode::CommandPalette, Some(cp)) =
            (self.app_state.mode, &self.app_state.command_palette)
        {
            CommandPaletteModal {
                theme: self.theme,
                state: cp,
            }
            .render(area, buf);
        }

        if let (AppMode::Confirm, Some(confirm)) =
            (self.app_state.mode, &self.app_state.confirm)
        {
            ConfirmModal {
                theme: self.theme,
                state: confirm,
            }
            .render(area, buf);
        }

        // Errors sit on top of whatever else is open
        if let Some(err) = &self.app_state.last_error {
            ErrorModal {
                theme: self.theme,
                error: err,
            }
            .render(area, buf);
        }
    }
}
