//! Input bindings.
//!
//! Reading is right to left, so the left arrow and the left-hand button
//! move forward through the chapter.

use crate::reader::state::{Intent, Mode};

/// Keys the reader reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
}

/// On-screen navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left hover zone: next spread.
    Left,
    /// Right hover zone: previous spread.
    Right,
    PrevChapter,
    NextChapter,
}

/// Intent for a key press.
///
/// Shift+arrow changes chapter in either mode. Bare arrows only turn
/// spreads in horizontal mode.
pub fn intent_for_key(key: Key, shift: bool, mode: Mode) -> Option<Intent> {
    match (key, shift) {
        (Key::ArrowLeft, true) => Some(Intent::PrevChapter),
        (Key::ArrowRight, true) => Some(Intent::NextChapter),
        (_, false) if mode != Mode::Horizontal => None,
        (Key::ArrowLeft, false) => Some(Intent::AdvanceSpread),
        (Key::ArrowRight, false) => Some(Intent::RetreatSpread),
    }
}

/// Intent for a button click.
pub fn intent_for_button(button: Button) -> Intent {
    match button {
        Button::Left => Intent::AdvanceSpread,
        Button::Right => Intent::RetreatSpread,
        Button::PrevChapter => Intent::PrevChapter,
        Button::NextChapter => Intent::NextChapter,
    }
}
