//! Mobile variant: every item inside one dropdown.

use ratatui::{layout::Rect, style::Style, text::Line, Frame};

use super::dropdown::{self, Dropdown};
use super::item::{item_line, item_width};
use super::{Regions, SelectGroupProps};
use crate::theme::Theme;

pub(crate) fn render(
    f: &mut Frame,
    area: Rect,
    props: &SelectGroupProps<'_>,
    dropdown: &Dropdown,
    theme: &Theme,
) -> Regions {
    let mut regions = Regions::default();
    if area.width == 0 || area.height == 0 {
        return regions;
    }

    let style = Style::default().fg(theme.text).bg(theme.bg_selected);
    let label: Line<'_> = item_line(props.current, style, theme);
    let width = dropdown::trigger_width(item_width(props.current)).min(area.width);
    let trigger = Rect::new(area.x, area.y, width, 1);

    dropdown::render_trigger(f, trigger, label, dropdown.is_open(), style, theme);
    regions.trigger = Some(trigger);

    if dropdown.is_open() {
        let selected = props.list.iter().position(|i| i.same_as(props.current));
        let content = dropdown::content_area(trigger, props.list, f.area());
        regions.entries = dropdown::render_content(
            f,
            content,
            props.list,
            selected,
            dropdown.cursor(),
            theme,
        );
        regions.content = Some(content);
    }

    regions
}
