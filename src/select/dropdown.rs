//! Minimal dropdown: a one-line trigger plus an overlay list of entries.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::item::{item_spans, item_width, SelectItem};
use crate::theme::Theme;

const OPEN_INDICATOR: &str = "▲";
const CLOSED_INDICATOR: &str = "▼";
const SELECTED_MARKER: &str = "● ";
const UNSELECTED_MARKER: &str = "  ";

/// Open/cursor state of one dropdown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dropdown {
    open: bool,
    cursor: usize,
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Open with the cursor on `selected` if given
    pub fn open(&mut self, selected: Option<usize>) {
        if !self.open {
            self.open = true;
            self.cursor = selected.unwrap_or(0);
        }
    }

    /// Returns true if the dropdown was open
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn cursor_down(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn cursor_up(&mut self, len: usize) {
        if len > 0 {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(len - 1).min(len - 1);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }
}

/// Trigger width for a label: label, space, indicator, plus padding
pub fn trigger_width(label_width: u16) -> u16 {
    label_width.saturating_add(4)
}

/// Render the closed (or opened) trigger line
pub fn render_trigger(
    f: &mut Frame,
    area: Rect,
    label: Line<'_>,
    open: bool,
    style: Style,
    theme: &Theme,
) {
    let indicator = if open { OPEN_INDICATOR } else { CLOSED_INDICATOR };

    let mut spans = vec![Span::styled(" ", style)];
    spans.extend(label.spans);
    spans.push(Span::styled(" ", style));
    spans.push(Span::styled(indicator, style.fg(theme.text_dim)));
    spans.push(Span::styled(" ", style));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Place the overlay under `anchor`, or above it when the frame runs out.
pub fn content_area(anchor: Rect, entries: &[SelectItem], frame: Rect) -> Rect {
    let widest = entries.iter().map(item_width).max().unwrap_or(0);
    // Borders + marker + one column of right padding
    let width = widest
        .saturating_add(2 + SELECTED_MARKER.chars().count() as u16 + 1)
        .max(anchor.width)
        .min(frame.width);
    let wanted = u16::try_from(entries.len()).unwrap_or(u16::MAX).saturating_add(2);

    let below = frame.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(frame.y);
    let (y, height) = if wanted <= below || below >= above {
        (anchor.bottom(), wanted.min(below))
    } else {
        let height = wanted.min(above);
        (anchor.y - height, height)
    };

    let x = anchor.x.min(frame.right().saturating_sub(width)).max(frame.x);
    Rect::new(x, y, width, height)
}

/// Draw the open overlay. Returns one row rect per entry index up to the
/// last visible row; rows scrolled out of view are empty rects.
pub fn render_content(
    f: &mut Frame,
    area: Rect,
    entries: &[SelectItem],
    selected: Option<usize>,
    cursor: usize,
    theme: &Theme,
) -> Vec<Rect> {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Keep the cursor row on screen
    let rows = inner.height as usize;
    let offset = if rows == 0 { 0 } else { cursor.saturating_sub(rows - 1) };

    let mut regions = Vec::with_capacity(rows);
    for (row, (idx, entry)) in entries.iter().enumerate().skip(offset).take(rows).enumerate() {
        let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);

        let style = if idx == cursor {
            Style::default().fg(theme.text).bg(theme.bg_selected)
        } else {
            Style::default().fg(theme.text)
        };
        let marker = if Some(idx) == selected {
            Span::styled(SELECTED_MARKER, style.fg(theme.accent).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(UNSELECTED_MARKER, style)
        };

        let mut spans = vec![marker];
        spans.extend(item_spans(entry, style, theme));

        f.render_widget(Paragraph::new(Line::from(spans)).style(style), row_area);
        regions.push(row_area);
    }

    let mut aligned = vec![Rect::default(); offset];
    aligned.extend(regions);
    aligned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps() {
        let mut dropdown = Dropdown::default();
        dropdown.open(Some(2));
        assert_eq!(dropdown.cursor(), 2);

        dropdown.cursor_down(3);
        assert_eq!(dropdown.cursor(), 0);
        dropdown.cursor_up(3);
        assert_eq!(dropdown.cursor(), 2);

        dropdown.home();
        assert_eq!(dropdown.cursor(), 0);
        dropdown.end(3);
        assert_eq!(dropdown.cursor(), 2);

        // Empty list leaves the cursor alone
        dropdown.cursor_down(0);
        dropdown.cursor_up(0);
        assert_eq!(dropdown.cursor(), 2);
    }

    #[test]
    fn test_open_close() {
        let mut dropdown = Dropdown::default();
        assert!(!dropdown.close());

        dropdown.open(None);
        assert!(dropdown.is_open());
        assert_eq!(dropdown.cursor(), 0);

        // Re-opening keeps the cursor where the user left it
        dropdown.cursor_down(4);
        dropdown.open(Some(3));
        assert_eq!(dropdown.cursor(), 1);

        assert!(dropdown.close());
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_content_area_below_and_above() {
        let frame = Rect::new(0, 0, 40, 10);
        let entries = vec![SelectItem::new("a", "A"), SelectItem::new("b", "B")];

        let below = content_area(Rect::new(2, 1, 8, 1), &entries, frame);
        assert_eq!(below.y, 2);
        assert_eq!(below.height, 4);
        assert_eq!(below.width, 8);

        let above = content_area(Rect::new(2, 9, 8, 1), &entries, frame);
        assert_eq!(above.bottom(), 9);
        assert_eq!(above.height, 4);
    }

    #[test]
    fn test_content_area_huge_list_fills_space() {
        let frame = Rect::new(0, 0, 40, 20);
        let entries = vec![SelectItem::new("x", "X"); 65_536];

        let area = content_area(Rect::new(0, 0, 10, 1), &entries, frame);
        assert_eq!(area.y, 1);
        assert_eq!(area.height, 19);
    }

    #[test]
    fn test_content_area_clamped_to_frame() {
        let frame = Rect::new(0, 0, 20, 5);
        let entries: Vec<SelectItem> = (0..10)
            .map(|i| SelectItem::new(format!("{}", i), "A much longer label than fits"))
            .collect();

        let area = content_area(Rect::new(15, 0, 5, 1), &entries, frame);
        assert!(area.right() <= frame.right());
        assert!(area.bottom() <= frame.bottom());
        assert_eq!(area.height, 4);
    }
}
