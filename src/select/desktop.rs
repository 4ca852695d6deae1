//! Desktop variant: a row of chips, overflow folded into a dropdown.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::dropdown::{self, Dropdown};
use super::item::{item_spans, item_width, SelectItem};
use super::partition::{partition, trigger_label};
use super::{Regions, SelectGroupProps};
use crate::theme::Theme;

/// Columns between chips
const CHIP_GAP: u16 = 1;
/// Padding on each side of a chip label
const CHIP_PADDING: u16 = 1;

pub(crate) fn chip_width(item: &SelectItem) -> u16 {
    item_width(item).saturating_add(CHIP_PADDING * 2)
}

/// Lay out `widths` left to right on the first row of `area`. Slots that
/// start past the right edge are dropped, the last one is clipped.
pub(crate) fn layout_row(area: Rect, widths: &[u16]) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(widths.len());
    if area.height == 0 {
        return rects;
    }

    let mut x = area.x;
    for &width in widths {
        if x >= area.right() {
            break;
        }
        let width = width.min(area.right() - x);
        rects.push(Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width).saturating_add(CHIP_GAP);
    }
    rects
}

fn chip_style(active: bool, focused: bool, theme: &Theme) -> Style {
    let style = if active {
        Style::default()
            .fg(theme.bg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_dim)
    };
    if focused {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

pub(crate) fn render(
    f: &mut Frame,
    area: Rect,
    props: &SelectGroupProps<'_>,
    focus: usize,
    dropdown: &Dropdown,
    theme: &Theme,
) -> Regions {
    let part = partition(props.list, props.max_elements);
    let hidden_active = part.hidden_contains(props.current);
    let label = trigger_label(&part, props.current);

    let widths: Vec<u16> = part.visible.iter().map(chip_width).collect();

    // The overflow trigger always gets its columns; chips share the rest
    let trigger_width = if part.has_overflow() {
        dropdown::trigger_width(Line::from(label).width().min(u16::MAX as usize) as u16).min(area.width)
    } else {
        0
    };
    let reserved = if part.has_overflow() {
        trigger_width.saturating_add(CHIP_GAP)
    } else {
        0
    };
    let chips_area = Rect {
        width: area.width.saturating_sub(reserved),
        ..area
    };
    let slots = layout_row(chips_area, &widths);

    let mut regions = Regions::default();
    for ((idx, item), rect) in part.visible.iter().enumerate().zip(slots.iter()) {
        let style = chip_style(item.same_as(props.current), focus == idx, theme);

        let mut spans = vec![Span::styled(" ", style)];
        spans.extend(item_spans(item, style, theme));
        spans.push(Span::styled(" ", style));

        f.render_widget(Paragraph::new(Line::from(spans)), *rect);
        regions.chips.push(*rect);
    }

    if part.has_overflow() && area.height > 0 && trigger_width > 0 {
        let x = slots
            .last()
            .map_or(area.x, |last| last.right().saturating_add(CHIP_GAP))
            .min(area.right() - trigger_width);
        let rect = Rect::new(x, area.y, trigger_width, 1);

        let style = chip_style(hidden_active, focus == part.visible.len(), theme);
        let label = Line::from(Span::styled(label, style));
        dropdown::render_trigger(f, rect, label, dropdown.is_open(), style, theme);
        regions.trigger = Some(rect);

        if dropdown.is_open() {
            let selected = part.hidden.iter().position(|h| h.same_as(props.current));
            let content = dropdown::content_area(rect, part.hidden, f.area());
            regions.entries = dropdown::render_content(
                f,
                content,
                part.hidden,
                selected,
                dropdown.cursor(),
                theme,
            );
            regions.content = Some(content);
        }
    }

    regions
}
