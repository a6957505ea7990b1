// Unicode pieces shared across components.

pub const SEP_RIGHT: &str = "\u{e0b0}";

pub const RUN: &str = "▶";
pub const INTERRUPT: &str = "■";
pub const UNDO: &str = "↺";

pub const CELL_IDLE: &str = "○";
pub const CELL_QUEUED: &str = "◌";
pub const CELL_STALE: &str = "✱";
pub const CELL_ERRORED: &str = "✗";
