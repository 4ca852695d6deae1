//! Selectable items and their inline rendering.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Badge styling variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Gold,
}

/// Small label shown after an item's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBadge {
    #[serde(default)]
    pub variant: BadgeVariant,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectItem {
    /// Unique identifier, passed to `on_change`
    pub name: String,
    /// Display label
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<ItemBadge>,
}

impl SelectItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            badge: None,
        }
    }

    pub fn with_badge(mut self, variant: BadgeVariant, name: impl Into<String>) -> Self {
        self.badge = Some(ItemBadge {
            variant,
            name: name.into(),
        });
        self
    }

    /// Items are identified by name, not by label.
    pub fn same_as(&self, other: &SelectItem) -> bool {
        self.name == other.name
    }
}

/// Render an item's label plus its badge, if any.
///
/// `base` is the style of the surrounding chip or dropdown row; the badge
/// keeps its own colors on top of it.
pub fn item_spans<'a>(item: &'a SelectItem, base: Style, theme: &Theme) -> Vec<Span<'a>> {
    let mut spans = vec![Span::styled(item.value.as_str(), base)];

    if let Some(badge) = &item.badge {
        spans.push(Span::styled(" ", base));
        spans.push(Span::styled(format!(" {} ", badge.name), badge_style(badge.variant, theme)));
    }

    spans
}

pub fn item_line<'a>(item: &'a SelectItem, base: Style, theme: &Theme) -> Line<'a> {
    Line::from(item_spans(item, base, theme))
}

/// Display width of an item as rendered by [`item_spans`]
pub fn item_width(item: &SelectItem) -> u16 {
    let mut line = Line::from(item.value.as_str());
    if let Some(badge) = &item.badge {
        line.push_span(Span::raw(format!("  {} ", badge.name)));
    }
    line.width().min(u16::MAX as usize) as u16
}

fn badge_style(variant: BadgeVariant, theme: &Theme) -> Style {
    match variant {
        BadgeVariant::Default => Style::default().fg(theme.badge_fg).bg(theme.badge_bg),
        BadgeVariant::Gold => Style::default()
            .fg(theme.bg)
            .bg(theme.gold)
            .add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_width_with_badge() {
        let plain = SelectItem::new("a", "Alpha");
        assert_eq!(item_width(&plain), 5);

        let badged = SelectItem::new("a", "Alpha").with_badge(BadgeVariant::Gold, "new");
        // "Alpha" + " " + " new "
        assert_eq!(item_width(&badged), 11);

        let spans = item_spans(&badged, Style::default(), &Theme::default());
        let rendered: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rendered, "Alpha  new ");
    }

    #[test]
    fn test_badge_variant_styles_differ() {
        let theme = Theme::default();
        assert_ne!(
            badge_style(BadgeVariant::Default, &theme),
            badge_style(BadgeVariant::Gold, &theme)
        );
        assert_eq!(badge_style(BadgeVariant::Gold, &theme).bg, Some(theme.gold));
    }

    #[test]
    fn test_item_deserialization() {
        let item: SelectItem = toml::from_str(
            r#"
            name = "pro"
            value = "Pro"
            badge = { variant = "gold", name = "plus" }
            "#,
        )
        .unwrap();
        assert_eq!(item.badge.as_ref().map(|b| b.variant), Some(BadgeVariant::Gold));

        let plain: SelectItem = toml::from_str("name = \"x\"\nvalue = \"X\"").unwrap();
        assert!(plain.badge.is_none());
    }

    #[test]
    fn test_identity_is_name() {
        let a = SelectItem::new("id", "One");
        let b = SelectItem::new("id", "Other label");
        assert!(a.same_as(&b));
        assert!(!a.same_as(&SelectItem::new("id2", "One")));
    }
}
