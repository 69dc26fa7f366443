//! Process-wide tooltip state.
//!
//! One tooltip serves every chart instance, mirroring a shared hover
//! affordance: lazily created, last shown content wins, hidden on
//! pointer-leave. Global only by necessity; nothing else in this crate
//! shares state across instances.

use std::sync::{Mutex, OnceLock};

/// Visible tooltip content and its pointer-anchored position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

fn slot() -> &'static Mutex<Option<Tooltip>> {
    static TOOLTIP: OnceLock<Mutex<Option<Tooltip>>> = OnceLock::new();
    TOOLTIP.get_or_init(|| Mutex::new(None))
}

/// Show the tooltip near a pointer position, replacing whatever was shown.
pub fn show(text: impl Into<String>, x: i32, y: i32) {
    let mut guard = slot().lock().unwrap_or_else(|e| e.into_inner());
    *guard = Some(Tooltip {
        text: text.into(),
        x,
        y,
    });
}

/// Hide the tooltip. No-op when nothing is shown.
pub fn hide() {
    let mut guard = slot().lock().unwrap_or_else(|e| e.into_inner());
    *guard = None;
}

/// Snapshot of the current tooltip, if visible.
pub fn current() -> Option<Tooltip> {
    slot().lock().unwrap_or_else(|e| e.into_inner()).clone()
}
