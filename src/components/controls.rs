use crate::app::action::Action;
use crate::app::hotkeys::HotkeyId;
use crate::app::state::{AppState, RunButton};
use crate::theme::{glyphs, Theme};
use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    StatusReady,
    StatusInfo,
    StatusError,
    Tasks,
    SaveClean,
    SaveDirty,
    Recovery,
    Toggle,
    Palette,
    Shortcuts,
    Undo,
    RunStale,
    Interrupt,
    Inactive,
}

/// One rendered chunk of the controls bar. `action` is what a click
/// dispatches; `None` marks a purely informational (or inactive) segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub key: Option<String>,
    pub label: String,
    pub kind: SegmentKind,
    pub action: Option<Action>,
}

impl Segment {
    fn plain(label: impl Into<String>, kind: SegmentKind, action: Option<Action>) -> Self {
        Self {
            key: None,
            label: label.into(),
            kind,
            action,
        }
    }

    fn keyed(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: SegmentKind,
        action: Action,
    ) -> Self {
        Self {
            key: Some(key.into()),
            label: label.into(),
            kind,
            action: Some(action),
        }
    }

    // Width in terminal cells; every glyph used here is single-width.
    fn width(&self) -> u16 {
        let key_width = self
            .key
            .as_deref()
            .map_or(0, |k| k.chars().count() as u16 + 2);
        key_width + self.label.chars().count() as u16 + 2
    }
}

fn status_segment(state: &AppState) -> Segment {
    if let Some(err) = &state.last_error {
        Segment::plain(
            format!("ERROR: {}", err.message),
            SegmentKind::StatusError,
            None,
        )
    } else if let Some(msg) = &state.status_message {
        Segment::plain(msg.clone(), SegmentKind::StatusInfo, None)
    } else {
        Segment::plain("READY", SegmentKind::StatusReady, None)
    }
}

/// The left-hand cluster: status, then save (or recovery when the notebook
/// is closed), the presenting toggle, and the palette/shortcuts triggers.
#[must_use]
pub fn left_segments(state: &AppState) -> Vec<Segment> {
    let status = &state.status;
    let mut segments = vec![status_segment(state)];

    if !state.active_tasks.is_empty() {
        segments.push(Segment::plain(
            format!("{} {}", state.spinner, state.active_tasks.join(", ")),
            SegmentKind::Tasks,
            None,
        ));
    }

    if status.closed {
        segments.push(Segment::plain(
            "Recover notebook",
            SegmentKind::Recovery,
            Some(Action::SaveRecovery),
        ));
    } else {
        let save_kind = if status.needs_save {
            SegmentKind::SaveDirty
        } else {
            SegmentKind::SaveClean
        };
        segments.push(Segment::keyed(
            state.registry.get(HotkeyId::Save).keys.clone(),
            "Save",
            save_kind,
            Action::Save,
        ));
        segments.push(Segment::keyed(
            state.registry.get(HotkeyId::TogglePresenting).keys.clone(),
            if status.presenting { "Edit" } else { "Present" },
            SegmentKind::Toggle,
            Action::TogglePresenting,
        ));
    }

    segments.push(Segment::keyed(
        state.registry.get(HotkeyId::CommandPalette).keys.clone(),
        "Commands",
        SegmentKind::Palette,
        Action::TogglePalette,
    ));
    segments.push(Segment::keyed(
        state.registry.get(HotkeyId::KeyboardShortcuts).keys.clone(),
        "Keys",
        SegmentKind::Shortcuts,
        Action::ToggleShortcuts,
    ));

    segments
}

/// The right-hand cluster: the undo affordance and the 3-state run control.
/// Both disappear entirely on a closed notebook.
#[must_use]
pub fn right_segments(state: &AppState, now: Instant) -> Vec<Segment> {
    let status = &state.status;
    if status.closed {
        return Vec::new();
    }

    let mut segments = Vec::new();
    if status.undo_available {
        segments.push(Segment::keyed(
            state.registry.get(HotkeyId::UndoDeleteCell).keys.clone(),
            format!("{} Undo cell", glyphs::UNDO),
            SegmentKind::Undo,
            Action::UndoDeleteCell,
        ));
    }

    match state.run_control.button(status.needs_run, now) {
        RunButton::Interrupt => segments.push(Segment::keyed(
            state.registry.get(HotkeyId::Interrupt).keys.clone(),
            format!("{} Interrupt", glyphs::INTERRUPT),
            SegmentKind::Interrupt,
            Action::Interrupt,
        )),
        RunButton::RunStale => segments.push(Segment::keyed(
            state.registry.get(HotkeyId::RunStale).keys.clone(),
            format!("{} Run stale", glyphs::RUN),
            SegmentKind::RunStale,
            Action::RunStale,
        )),
        RunButton::Inactive => segments.push(Segment::plain(
            format!("{} Nothing to run", glyphs::RUN),
            SegmentKind::Inactive,
            None,
        )),
    }

    segments
}

fn style_for(kind: SegmentKind, theme: &Theme) -> Style {
    match kind {
        SegmentKind::StatusReady => theme.status_ready,
        SegmentKind::StatusInfo => theme.status_info,
        SegmentKind::StatusError => theme.status_error,
        SegmentKind::Tasks => theme.status_info,
        SegmentKind::SaveClean => theme.save_clean,
        SegmentKind::SaveDirty => theme.save_dirty,
        SegmentKind::Recovery => theme.recovery,
        SegmentKind::Toggle => theme.controls_label,
        SegmentKind::Palette => theme.controls_label,
        SegmentKind::Shortcuts => theme.controls_label,
        SegmentKind::Undo => theme.undo,
        SegmentKind::RunStale => theme.run_stale,
        SegmentKind::Interrupt => theme.interrupt,
        SegmentKind::Inactive => theme.inactive,
    }
}

fn push_segment_spans<'a>(spans: &mut Vec<Span<'a>>, seg: &Segment, theme: &Theme) {
    if let Some(key) = &seg.key {
        spans.push(Span::styled(format!(" {key} "), theme.controls_key));
    }
    spans.push(Span::styled(
        format!(" {} ", seg.label),
        style_for(seg.kind, theme),
    ));
    spans.push(Span::raw(" "));
}

pub struct Controls<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
    pub now: Instant,
}

impl Widget for Controls<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = left_segments(self.state);
        let right = right_segments(self.state, self.now);

        let mut spans = Vec::new();
        let mut used: u16 = 0;
        for seg in &left {
            if used + seg.width() + 1 > area.width {
                break;
            }
            push_segment_spans(&mut spans, seg, self.theme);
            used += seg.width() + 1;
        }

        // Right cluster is right-aligned; pad the gap with the bar style.
        let right_width: u16 = right.iter().map(|s| s.width() + 1).sum();
        if right_width > 0 && used + right_width <= area.width {
            let gap = area.width - used - right_width;
            spans.push(Span::styled(
                " ".repeat(gap as usize),
                self.theme.controls_bar,
            ));
            for seg in &right {
                push_segment_spans(&mut spans, seg, self.theme);
            }
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.controls_bar)
            .render(area, buf);
    }
}

/// Resolve a click on the controls bar to the segment's action. Geometry
/// mirrors `Controls::render` exactly: same segment builders, same widths,
/// same right-alignment.
#[must_use]
pub fn hit_test(
    state: &AppState,
    area: Rect,
    column: u16,
    row: u16,
    now: Instant,
) -> Option<Action> {
    if row != area.y || column < area.x || column >= area.x + area.width {
        return None;
    }

    let left = left_segments(state);
    let right = right_segments(state, now);

    let mut x = area.x;
    let mut rendered_left: u16 = 0;
    for seg in &left {
        if rendered_left + seg.width() + 1 > area.width {
            break;
        }
        if column >= x && column < x + seg.width() {
            return seg.action.clone();
        }
        x += seg.width() + 1;
        rendered_left += seg.width() + 1;
    }

    let right_width: u16 = right.iter().map(|s| s.width() + 1).sum();
    if right_width == 0 || rendered_left + right_width > area.width {
        return None;
    }
    let mut x = area.x + area.width - right_width;
    for seg in &right {
        if column >= x && column < x + seg.width() {
            return seg.action.clone();
        }
        x += seg.width() + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;
    use std::time::Duration;

    fn state() -> AppState<'static> {
        AppState::default()
    }

    fn row_text(state: &AppState, now: Instant) -> String {
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        Controls {
            state,
            theme: &state.theme,
            now,
        }
        .render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn closed_notebook_shows_recovery_and_drops_the_run_cluster() {
        let mut st = state();
        st.status.closed = true;
        st.status.undo_available = true; // Suppressed while closed

        let text = row_text(&st, Instant::now());
        assert!(text.contains("Recover notebook"));
        assert!(!text.contains("Save "));
        assert!(!text.contains("Nothing to run"));
        assert!(!text.contains("Undo cell"));
    }

    #[test]
    fn open_notebook_shows_the_full_left_cluster() {
        let st = state();
        let text = row_text(&st, Instant::now());
        assert!(text.contains("Save"));
        assert!(text.contains("Present"));
        assert!(text.contains("Commands"));
        assert!(text.contains("Keys"));
        assert!(text.contains("Nothing to run"));
    }

    #[test]
    fn undo_affordance_requires_availability() {
        let mut st = state();
        assert!(!row_text(&st, Instant::now()).contains("Undo cell"));
        st.status.undo_available = true;
        assert!(row_text(&st, Instant::now()).contains("Undo cell"));
    }

    #[test]
    fn interrupt_replaces_run_only_after_the_debounce() {
        let mut st = state();
        st.status.needs_run = true;
        st.status.running = true;
        let start = Instant::now();
        st.run_control.set_running(true, start);

        let before = row_text(&st, start + Duration::from_millis(100));
        assert!(before.contains("Run stale"));
        assert!(!before.contains("Interrupt"));

        let after = row_text(&st, start + Duration::from_millis(250));
        assert!(after.contains("Interrupt"));
        assert!(!after.contains("Run stale"));
    }

    #[test]
    fn clicks_resolve_to_segment_actions() {
        let st = state();
        let area = Rect::new(0, 0, 120, 1);
        let now = Instant::now();

        // Walk the whole bar and collect every action a click can produce.
        let mut actions = Vec::new();
        for col in 0..area.width {
            if let Some(action) = hit_test(&st, area, col, 0, now) {
                if actions.last() != Some(&action) {
                    actions.push(action);
                }
            }
        }
        assert_eq!(
            actions,
            vec![
                Action::Save,
                Action::TogglePresenting,
                Action::TogglePalette,
                Action::ToggleShortcuts,
            ]
        );
    }

    #[test]
    fn inactive_run_control_ignores_clicks() {
        let st = state();
        let area = Rect::new(0, 0, 120, 1);
        let now = Instant::now();
        // The run control is the rightmost segment; the inactive state must
        // produce no action anywhere in its span.
        for col in 90..area.width {
            assert_eq!(hit_test(&st, area, col, 0, now), None);
        }
    }

    #[test]
    fn clicks_off_the_bar_do_nothing() {
        let st = state();
        let area = Rect::new(0, 5, 120, 1);
        assert_eq!(hit_test(&st, area, 3, 4, Instant::now()), None);
        assert_eq!(hit_test(&st, area, 3, 6, Instant::now()), None);
    }
}
