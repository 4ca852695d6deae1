use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use select_group::theme::{theme, Theme};
use select_group::SelectGroupProps;

use crate::app::App;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let t = theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(3), // Select group box
            Constraint::Min(0),    // Room for the dropdown overlay
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0], t);
    draw_footer(f, app, chunks[3], t);

    // Group last so its dropdown overlays everything below it
    draw_group_box(f, app, chunks[1], t);

    if app.show_help {
        draw_help_popup(f, t);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect, t: &Theme) {
    let viewport = app.group.viewport();
    let variant = if app.group.is_mobile() { "mobile" } else { "desktop" };

    let mut spans = vec![
        Span::styled(" 󰕰 ", Style::default().fg(t.accent)),
        Span::styled(variant, Style::default().fg(t.accent).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" │ {} cols (breakpoint {}) ", viewport.width(), viewport.breakpoint()),
            Style::default().fg(t.text_dim),
        ),
    ];

    if let Some(toggle) = app.last_toggle {
        spans.push(Span::styled(
            format!("│ toggle @{} ", toggle.timestamp_ms),
            Style::default().fg(t.text_dim),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::styled("│ ", Style::default().fg(t.inactive)));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(t.text)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_group_box(f: &mut Frame, app: &mut App, area: Rect, t: &Theme) {
    let title = match app.current_item() {
        Some(item) => format!(" Select ({}) ", item.value),
        None => " Select ".to_string(),
    };

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(t.text)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.inactive));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(current) = app.items.get(app.current) else {
        let empty = Paragraph::new("No items configured").style(Style::default().fg(t.text_dim));
        f.render_widget(empty, inner);
        return;
    };

    let props = SelectGroupProps::new(current, &app.items).max_elements(app.max_elements);
    app.group.render(f, inner, &props);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect, t: &Theme) {
    let hints: &[(&str, &str)] = if app.group.is_open() {
        &[("j/k", "move"), ("Enter", "select"), ("Esc", "close")]
    } else if app.group.is_mobile() {
        &[("Enter", "open"), ("m", "layout"), ("?", "help"), ("q", "quit")]
    } else {
        &[
            ("h/l", "move"),
            ("Enter", "select"),
            ("+/-", "max"),
            ("m", "layout"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (idx, (key, action)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(t.inactive)));
        }
        spans.push(Span::styled(*key, Style::default().fg(t.accent)));
        spans.push(Span::styled(format!(" {}", action), Style::default().fg(t.text_dim)));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, t: &Theme) {
    let popup_area = centered_rect(60, 60, f.area());

    f.render_widget(Clear, popup_area);

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(t.accent)),
            Span::styled(desc, Style::default().fg(t.text)),
        ])
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  Chips", Style::default().fg(t.text).add_modifier(Modifier::BOLD))),
        key_line("h/l ←/→", "Move between chips"),
        key_line("Enter", "Select chip / open overflow"),
        key_line("click", "Select chip / open dropdown"),
        Line::from(""),
        Line::from(Span::styled("  Dropdown", Style::default().fg(t.text).add_modifier(Modifier::BOLD))),
        key_line("j/k ↓/↑", "Move cursor"),
        key_line("Home/End", "First / last entry"),
        key_line("Enter", "Select"),
        key_line("Esc", "Close"),
        Line::from(""),
        Line::from(Span::styled("  General", Style::default().fg(t.text).add_modifier(Modifier::BOLD))),
        key_line("+/-", "More / fewer inline chips"),
        key_line("m", "Cycle layout: auto → desktop → mobile"),
        key_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(t.text_dim)),
            Span::styled("?", Style::default().fg(t.accent)),
            Span::styled("/", Style::default().fg(t.text_dim)),
            Span::styled("Esc", Style::default().fg(t.accent)),
            Span::styled(" to close", Style::default().fg(t.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 select-group Help ", Style::default().fg(t.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use select_group::config::AppConfig;
    use select_group::{Layout as GroupLayout, Viewport};

    #[test]
    fn test_draw_desktop_and_mobile() {
        for width in [120, 40] {
            let mut terminal = Terminal::new(TestBackend::new(width, 20)).unwrap();
            let mut app = App::new(AppConfig::default(), Viewport::new(width, 80, GroupLayout::Auto));
            app.show_help = true;

            let result = terminal.draw(|f| draw(f, &mut app));
            assert!(result.is_ok(), "drawing at {} columns should not fail", width);
        }
    }

    #[test]
    fn test_draw_empty_items() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let config = AppConfig {
            items: Vec::new(),
            ..AppConfig::default()
        };
        let mut app = App::new(config, Viewport::new(80, 80, GroupLayout::Auto));

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..buffer.area.width).map(|x| buffer[(x, 2)].symbol()).collect();
        assert!(row.contains("No items configured"));
    }
}
