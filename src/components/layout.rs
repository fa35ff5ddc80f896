//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of a toast notification box
const TOAST_WIDTH: u16 = 44;
/// Height of a toast notification box, borders included
const TOAST_HEIGHT: u16 = 3;

/// Main screen layout areas
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub help: Rect,
}

/// Split the screen into title line, body and help bar
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        help: chunks[2],
    }
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Slot for the `index`-th toast, stacked down from the top-right corner
///
/// Returns `None` once the stack would run past the bottom of `area`.
pub fn toast_area(area: Rect, index: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let y = area.y + 1 + index * TOAST_HEIGHT;
    if y + TOAST_HEIGHT > area.bottom() {
        return None;
    }
    let x = area.right().saturating_sub(width + 1).max(area.x);
    Some(Rect::new(x, y, width, TOAST_HEIGHT))
}
