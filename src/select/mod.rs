//! The select group component
//!
//! Props come from the host on every render and every input dispatch; the
//! component itself only remembers the viewport class, keyboard focus, the
//! dropdown state and where it last drew things.

mod desktop;
pub mod dropdown;
pub mod item;
mod mobile;
pub mod partition;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    Frame,
};

use crate::events::ToggleNotifier;
use crate::theme::{self, Theme};
use crate::viewport::{Layout, Viewport};
use dropdown::Dropdown;
use item::SelectItem;
use partition::partition;

/// Change callback, called with the selected item's name
pub type OnChange<'a> = Box<dyn FnMut(&str) + 'a>;

/// Inputs supplied by the host view
pub struct SelectGroupProps<'a> {
    pub current: &'a SelectItem,
    pub list: &'a [SelectItem],
    pub on_change: Option<OnChange<'a>>,
    pub max_elements: Option<usize>,
}

impl<'a> SelectGroupProps<'a> {
    pub fn new(current: &'a SelectItem, list: &'a [SelectItem]) -> Self {
        Self {
            current,
            list,
            on_change: None,
            max_elements: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn max_elements(mut self, max: Option<usize>) -> Self {
        self.max_elements = max;
        self
    }

    fn notify_change(&mut self, name: &str) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(name);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Consumed,
    /// An item was picked; carries its name
    Changed(String),
}

/// Screen regions from the last render, for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub(crate) struct Regions {
    pub chips: Vec<Rect>,
    pub trigger: Option<Rect>,
    pub content: Option<Rect>,
    pub entries: Vec<Rect>,
}

fn hit(rect: &Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}

pub struct SelectGroup {
    viewport: Viewport,
    notifier: ToggleNotifier,
    theme: Theme,
    /// Desktop keyboard focus: chip index, or `visible.len()` for the trigger
    focus: usize,
    dropdown: Dropdown,
    regions: Regions,
}

impl SelectGroup {
    pub fn new(viewport: Viewport, notifier: ToggleNotifier) -> Self {
        Self {
            viewport,
            notifier,
            theme: theme::theme().clone(),
            focus: 0,
            dropdown: Dropdown::default(),
            regions: Regions::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile()
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn notifier(&self) -> &ToggleNotifier {
        &self.notifier
    }

    /// Re-evaluate the viewport class for a new terminal width
    pub fn on_resize(&mut self, width: u16) {
        if self.viewport.resize(width) {
            self.variant_switched();
        }
    }

    pub fn set_layout(&mut self, layout: Layout) {
        if self.viewport.set_layout(layout) {
            self.variant_switched();
        }
    }

    fn variant_switched(&mut self) {
        tracing::debug!(
            width = self.viewport.width(),
            mobile = self.viewport.is_mobile(),
            "select group switched variant"
        );
        // The open dropdown belonged to the old variant
        self.dropdown.close();
        self.regions = Regions::default();
    }

    /// Draw into `area`. Draw the group after its siblings so an open
    /// dropdown overlays them.
    pub fn render(&mut self, f: &mut Frame, area: Rect, props: &SelectGroupProps<'_>) {
        self.regions = if self.viewport.is_mobile() {
            mobile::render(f, area, props, &self.dropdown, &self.theme)
        } else {
            self.focus = self.focus.min(desktop_slots(props).saturating_sub(1));
            desktop::render(f, area, props, self.focus, &self.dropdown, &self.theme)
        };
    }

    pub fn handle_event(&mut self, event: &Event, props: &mut SelectGroupProps<'_>) -> EventOutcome {
        match event {
            Event::Resize(width, _) => {
                self.on_resize(*width);
                EventOutcome::Consumed
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, props),
            Event::Mouse(mouse) => self.handle_mouse(mouse, props),
            _ => EventOutcome::Ignored,
        }
    }

    /// Items the dropdown lists in the active variant
    fn dropdown_entries<'a>(&self, props: &SelectGroupProps<'a>) -> &'a [SelectItem] {
        if self.viewport.is_mobile() {
            props.list
        } else {
            partition(props.list, props.max_elements).hidden
        }
    }

    fn open_dropdown(&mut self, props: &SelectGroupProps<'_>) {
        let entries = self.dropdown_entries(props);
        let selected = entries.iter().position(|i| i.same_as(props.current));
        self.dropdown.open(selected);
    }

    /// Close without picking anything
    fn dismiss(&mut self) {
        if self.dropdown.close() && self.viewport.is_mobile() {
            // Focus stays on the trigger; dependents still get a refresh
            self.notifier.emit();
        }
    }

    fn select(&mut self, name: String, props: &mut SelectGroupProps<'_>) -> EventOutcome {
        self.dropdown.close();
        if self.viewport.is_mobile() {
            self.notifier.emit();
        }
        tracing::debug!(name = %name, mobile = self.viewport.is_mobile(), "select group changed");
        props.notify_change(&name);
        EventOutcome::Changed(name)
    }

    fn handle_key(&mut self, key: &KeyEvent, props: &mut SelectGroupProps<'_>) -> EventOutcome {
        if self.dropdown.is_open() {
            return self.handle_dropdown_key(key, props);
        }

        if self.viewport.is_mobile() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down | KeyCode::Char('j') => {
                    self.open_dropdown(props);
                    EventOutcome::Consumed
                }
                _ => EventOutcome::Ignored,
            };
        }

        let part = partition(props.list, props.max_elements);
        let slots = desktop_slots(props);
        if slots == 0 {
            return EventOutcome::Ignored;
        }
        self.focus = self.focus.min(slots - 1);

        match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                self.focus = (self.focus + 1) % slots;
                EventOutcome::Consumed
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus = self.focus.checked_sub(1).unwrap_or(slots - 1);
                EventOutcome::Consumed
            }
            KeyCode::Enter | KeyCode::Char(' ') => match part.visible.get(self.focus) {
                Some(item) => self.select(item.name.clone(), props),
                None => {
                    self.open_dropdown(props);
                    EventOutcome::Consumed
                }
            },
            KeyCode::Down | KeyCode::Char('j') if self.focus == part.visible.len() => {
                self.open_dropdown(props);
                EventOutcome::Consumed
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn handle_dropdown_key(&mut self, key: &KeyEvent, props: &mut SelectGroupProps<'_>) -> EventOutcome {
        let entries = self.dropdown_entries(props);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.dropdown.cursor_down(entries.len()),
            KeyCode::Up | KeyCode::Char('k') => self.dropdown.cursor_up(entries.len()),
            KeyCode::Home => self.dropdown.home(),
            KeyCode::End => self.dropdown.end(entries.len()),
            KeyCode::Enter | KeyCode::Char(' ') => {
                return match entries.get(self.dropdown.cursor()) {
                    Some(item) => self.select(item.name.clone(), props),
                    None => {
                        self.dismiss();
                        EventOutcome::Consumed
                    }
                };
            }
            KeyCode::Esc => self.dismiss(),
            // An open dropdown keeps the keyboard
            _ => {}
        }
        EventOutcome::Consumed
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, props: &mut SelectGroupProps<'_>) -> EventOutcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return EventOutcome::Ignored;
        }
        let (column, row) = (mouse.column, mouse.row);

        if self.dropdown.is_open() {
            let entries = self.dropdown_entries(props);
            let picked = self
                .regions
                .entries
                .iter()
                .position(|rect| hit(rect, column, row))
                .and_then(|idx| entries.get(idx));
            if let Some(item) = picked {
                return self.select(item.name.clone(), props);
            }
            // Trigger or outside click both close
            self.dismiss();
            return EventOutcome::Consumed;
        }

        // Only the desktop variant records chips
        if let Some(idx) = self.regions.chips.iter().position(|rect| hit(rect, column, row)) {
            let part = partition(props.list, props.max_elements);
            if let Some(item) = part.visible.get(idx) {
                self.focus = idx;
                return self.select(item.name.clone(), props);
            }
        }

        if self.regions.trigger.is_some_and(|rect| hit(&rect, column, row)) {
            if !self.viewport.is_mobile() {
                self.focus = partition(props.list, props.max_elements).visible.len();
            }
            self.open_dropdown(props);
            return EventOutcome::Consumed;
        }

        EventOutcome::Ignored
    }
}

/// Focusable desktop slots: visible chips plus the overflow trigger
fn desktop_slots(props: &SelectGroupProps<'_>) -> usize {
    let part = partition(props.list, props.max_elements);
    part.visible.len() + usize::from(part.has_overflow())
}
