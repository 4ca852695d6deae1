//! Viewport classification
//!
//! The terminal is the viewport: anything narrower than the breakpoint
//! renders the mobile (single dropdown) variant.

use serde::{Deserialize, Serialize};

/// Width in columns below which the mobile variant is used
pub const DEFAULT_MOBILE_BREAKPOINT: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Follow the terminal width
    #[default]
    Auto,
    Desktop,
    Mobile,
}

pub fn is_mobile(width: u16, breakpoint: u16) -> bool {
    width < breakpoint
}

/// Tracks the last known width and the derived mobile flag
#[derive(Debug, Clone)]
pub struct Viewport {
    width: u16,
    breakpoint: u16,
    layout: Layout,
    mobile: bool,
}

impl Viewport {
    pub fn new(width: u16, breakpoint: u16, layout: Layout) -> Self {
        let mut viewport = Self {
            width,
            breakpoint,
            layout,
            mobile: false,
        };
        viewport.mobile = viewport.classify();
        viewport
    }

    /// Initial viewport from the real terminal size
    pub fn from_terminal(breakpoint: u16, layout: Layout) -> Self {
        let width = crossterm::terminal::size()
            .map(|(w, _)| w)
            .unwrap_or(breakpoint);
        Self::new(width, breakpoint, layout)
    }

    fn classify(&self) -> bool {
        match self.layout {
            Layout::Auto => is_mobile(self.width, self.breakpoint),
            Layout::Desktop => false,
            Layout::Mobile => true,
        }
    }

    /// Record a new width. Returns true if the variant flipped.
    pub fn resize(&mut self, width: u16) -> bool {
        self.width = width;
        let was_mobile = self.mobile;
        self.mobile = self.classify();
        was_mobile != self.mobile
    }

    pub fn set_layout(&mut self, layout: Layout) -> bool {
        self.layout = layout;
        let was_mobile = self.mobile;
        self.mobile = self.classify();
        was_mobile != self.mobile
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn breakpoint(&self) -> u16 {
        self.breakpoint
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_exclusive() {
        assert!(is_mobile(79, 80));
        assert!(!is_mobile(80, 80));
        assert!(!is_mobile(200, 80));
    }

    #[test]
    fn test_resize_reports_flips_only() {
        let mut viewport = Viewport::new(120, 80, Layout::Auto);
        assert!(!viewport.is_mobile());

        assert!(!viewport.resize(100), "Still desktop, no flip");
        assert!(viewport.resize(60), "Crossing the breakpoint flips");
        assert!(viewport.is_mobile());
        assert!(!viewport.resize(40));
        assert!(viewport.resize(80));
        assert!(!viewport.is_mobile());
    }

    #[test]
    fn test_forced_layout_ignores_width() {
        let mut viewport = Viewport::new(20, 80, Layout::Desktop);
        assert!(!viewport.is_mobile());
        assert!(!viewport.resize(10));

        assert!(viewport.set_layout(Layout::Mobile));
        assert!(!viewport.resize(300));
        assert!(viewport.is_mobile());

        assert!(viewport.set_layout(Layout::Auto));
        assert!(!viewport.is_mobile());
    }
}
