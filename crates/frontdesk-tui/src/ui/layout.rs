//! Layout helpers for the frontdesk TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Height of the header (title + subtitle).
pub const HEADER_HEIGHT: u16 = 2;

/// Height of the input bar, borders included.
pub const INPUT_HEIGHT: u16 = 3;

/// Gap between suggestion chips.
const CHIP_GAP: u16 = 1;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Areas of the chat screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub header: Rect,
    pub log: Rect,
    /// Zero-height when there is nothing to offer.
    pub suggestions: Rect,
    pub input: Rect,
    pub disclaimer: Rect,
    pub status_bar: Rect,
}

/// Split the screen for the chat view.
pub fn chat_layout(area: Rect, show_suggestions: bool) -> ChatLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(u16::from(show_suggestions)),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    ChatLayout {
        header: chunks[0],
        log: chunks[1],
        suggestions: chunks[2],
        input: chunks[3],
        disclaimer: chunks[4],
        status_bar: chunks[5],
    }
}

/// Label drawn for a suggestion chip.
pub fn chip_label(action: &str) -> String {
    format!(" {action} ")
}

/// Areas of the suggestion chips laid out left to right in `area`.
///
/// Chips that do not fit are dropped, so the result may be shorter than
/// `actions`; index `i` of the result is always chip `i`.
#[allow(clippy::cast_possible_truncation)]
pub fn chip_areas(area: Rect, actions: &[String]) -> Vec<Rect> {
    let mut areas = Vec::with_capacity(actions.len());
    if area.height == 0 {
        return areas;
    }

    let right = area.x.saturating_add(area.width);
    let mut x = area.x.saturating_add(1);
    for action in actions {
        let width = chip_label(action).width().min(usize::from(u16::MAX)) as u16;
        if x.saturating_add(width) > right {
            break;
        }
        areas.push(Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width + CHIP_GAP);
    }
    areas
}

/// Index of the chip containing the cell `(column, row)`, if any.
pub fn chip_at(area: Rect, actions: &[String], column: u16, row: u16) -> Option<usize> {
    chip_areas(area, actions)
        .iter()
        .position(|chip| chip.contains(ratatui::layout::Position::new(column, row)))
}
