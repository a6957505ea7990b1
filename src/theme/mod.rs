use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod glyphs;
pub mod gruvbox;
pub mod nord;
pub mod palette;

pub use palette::{dim_color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub header: Style,
    pub header_logo: Style,
    pub header_item: Style,
    pub header_active: Style,
    pub header_warn: Style,

    pub cell_name: Style,
    pub cell_kind: Style,
    pub cell_idle: Style,
    pub cell_queued: Style,
    pub cell_running: Style,
    pub cell_stale: Style,
    pub cell_errored: Style,

    pub status_ready: Style,
    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,

    pub controls_bar: Style,
    pub controls_key: Style,
    pub controls_label: Style,
    pub save_clean: Style,
    pub save_dirty: Style,
    pub recovery: Style,
    pub run_stale: Style,
    pub interrupt: Style,
    pub inactive: Style,
    pub undo: Style,

    pub list_item: Style,
    pub list_selected: Style,
    pub palette_section: Style,
    pub shortcut_keys: Style,
    pub dimmed: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    CatppuccinMocha,
    Nord,
    Gruvbox,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::CatppuccinMocha => "Catppuccin (Mocha)",
            PaletteType::Nord => "Nord",
            PaletteType::Gruvbox => "Gruvbox",
        }
    }

    #[must_use]
    pub fn all() -> &'static [PaletteType] {
        &[
            PaletteType::CatppuccinMocha,
            PaletteType::Nord,
            PaletteType::Gruvbox,
        ]
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
            PaletteType::Gruvbox => Self::from_palette(&gruvbox::GRUVBOX),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),

            header: Style::default().bg(p.base).fg(p.text),
            header_logo: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.surface0).fg(p.text),
            header_active: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            cell_name: Style::default().fg(p.text),
            cell_kind: Style::default().fg(p.subtext0).add_modifier(Modifier::DIM),
            cell_idle: Style::default().fg(p.overlay0),
            cell_queued: Style::default().fg(p.teal),
            cell_running: Style::default().fg(p.blue).add_modifier(Modifier::BOLD),
            cell_stale: Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),
            cell_errored: Style::default().fg(p.red).add_modifier(Modifier::BOLD),

            status_ready: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_info: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_error: Style::default()
                .bg(p.red)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            controls_bar: Style::default().bg(p.crust).fg(p.subtext0),
            controls_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            controls_label: Style::default().bg(p.crust).fg(p.text),
            save_clean: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            save_dirty: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            recovery: Style::default()
                .bg(p.peach)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            run_stale: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            interrupt: Style::default()
                .bg(p.red)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            inactive: Style::default()
                .bg(dim_color(p.surface0, 0.7))
                .fg(p.overlay0)
                .add_modifier(Modifier::DIM),
            undo: Style::default()
                .bg(p.teal)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            list_item: Style::default().fg(p.text),
            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            palette_section: Style::default()
                .fg(p.mauve)
                .add_modifier(Modifier::BOLD),
            shortcut_keys: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            dimmed: Style::default().fg(p.overlay0).add_modifier(Modifier::DIM),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::CatppuccinMocha)
    }
}
