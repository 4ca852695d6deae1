use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::broadcast::{self, error::TryRecvError};

use select_group::config::AppConfig;
use select_group::{
    EventOutcome, Layout, SelectGroup, SelectGroupProps, SelectItem, ToggleEvent, ToggleNotifier,
    Viewport,
};

/// How long a status message stays in the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

pub struct App {
    pub items: Vec<SelectItem>,
    pub current: usize,
    pub max_elements: Option<usize>,
    pub group: SelectGroup,
    pub show_help: bool,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    toggles: broadcast::Receiver<ToggleEvent>,
    pub last_toggle: Option<ToggleEvent>,
    /// Set when a toggle arrives; the main loop repaints from scratch
    pub needs_clear: bool,
}

impl App {
    pub fn new(config: AppConfig, viewport: Viewport) -> Self {
        let notifier = ToggleNotifier::new();
        let toggles = notifier.subscribe();
        let current = config.current_index();

        Self {
            items: config.items,
            current,
            max_elements: config.max_elements,
            group: SelectGroup::new(viewport, notifier),
            show_help: false,
            status_message: None,
            status_message_time: None,
            toggles,
            last_toggle: None,
            needs_clear: false,
        }
    }

    pub fn current_item(&self) -> Option<&SelectItem> {
        self.items.get(self.current)
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Route an input event. Returns false when the app should quit.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.show_help {
            if let Event::Key(key) = event {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q'))
                {
                    self.show_help = false;
                }
            }
            return true;
        }

        let Some(current) = self.items.get(self.current) else {
            return !is_quit(event);
        };

        let mut picked: Option<String> = None;
        let outcome = {
            let mut props = SelectGroupProps::new(current, &self.items)
                .max_elements(self.max_elements)
                .on_change(|name| picked = Some(name.to_string()));
            self.group.handle_event(event, &mut props)
        };

        if let Some(name) = picked {
            self.apply_selection(&name);
        }

        match outcome {
            EventOutcome::Ignored => self.handle_key(event),
            EventOutcome::Consumed | EventOutcome::Changed(_) => true,
        }
    }

    fn apply_selection(&mut self, name: &str) {
        if let Some(idx) = self.items.iter().position(|i| i.name == name) {
            self.current = idx;
            let label = self.items[idx].value.clone();
            tracing::info!(name, "selected");
            self.set_status(format!("Selected {}", label));
        }
    }

    fn handle_key(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return true;
        };
        if key.kind != KeyEventKind::Press {
            return true;
        }

        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('m') => {
                let layout = match self.group.viewport().layout() {
                    Layout::Auto => Layout::Desktop,
                    Layout::Desktop => Layout::Mobile,
                    Layout::Mobile => Layout::Auto,
                };
                self.group.set_layout(layout);
                self.set_status(format!("Layout: {:?}", layout));
            }
            KeyCode::Char('+') => {
                let max = select_group::select::partition::effective_max(self.max_elements);
                self.max_elements = Some(max + 1);
            }
            KeyCode::Char('-') => {
                let max = select_group::select::partition::effective_max(self.max_elements);
                self.max_elements = Some(max.saturating_sub(1).max(1));
            }
            _ => {}
        }
        true
    }

    /// Drain toggle notifications and expire the status message
    pub fn tick(&mut self) {
        loop {
            match self.toggles.try_recv() {
                Ok(event) => {
                    self.last_toggle = Some(event);
                    self.needs_clear = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "toggle receiver lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if self
            .status_message_time
            .is_some_and(|t| t.elapsed() >= STATUS_TIMEOUT)
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }
}

fn is_quit(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app(width: u16) -> App {
        App::new(AppConfig::default(), Viewport::new(width, 80, Layout::Auto))
    }

    #[test]
    fn test_desktop_selection_updates_current() {
        let mut app = app(120);
        assert_eq!(app.current, 0);

        assert!(app.handle_event(&key(KeyCode::Right)));
        assert!(app.handle_event(&key(KeyCode::Enter)));
        assert_eq!(app.current, 1);
        assert_eq!(app.status_message.as_deref(), Some("Selected GPT-4"));

        app.tick();
        assert!(app.last_toggle.is_none());
    }

    #[test]
    fn test_mobile_selection_triggers_refresh() {
        let mut app = app(40);

        app.handle_event(&key(KeyCode::Enter));
        app.handle_event(&key(KeyCode::End));
        app.handle_event(&key(KeyCode::Enter));
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("qwen"));

        app.tick();
        assert!(app.last_toggle.is_some());
        assert!(app.needs_clear);
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = app(120);
        assert!(app.handle_event(&key(KeyCode::Char('?'))));
        assert!(app.show_help);
        // 'q' closes help instead of quitting
        assert!(app.handle_event(&key(KeyCode::Char('q'))));
        assert!(!app.show_help);
        assert!(!app.handle_event(&key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_layout_cycle() {
        let mut app = app(120);
        app.handle_event(&key(KeyCode::Char('m')));
        assert!(!app.group.is_mobile());
        app.handle_event(&key(KeyCode::Char('m')));
        assert!(app.group.is_mobile());
        app.handle_event(&key(KeyCode::Char('m')));
        assert!(!app.group.is_mobile());
    }

    #[test]
    fn test_max_elements_adjust() {
        let mut app = app(120);
        app.handle_event(&key(KeyCode::Char('+')));
        assert_eq!(app.max_elements, Some(6));
        for _ in 0..10 {
            app.handle_event(&key(KeyCode::Char('-')));
        }
        assert_eq!(app.max_elements, Some(1));
    }
}
