//! Theme colors loaded from Omarchy/Hyprland system theme
//! Reads colors from ~/.config/omarchy/current/theme/kitty.conf

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Process-wide theme, loaded on first use
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

/// Theme colors for the select group
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,      // Active chip, focused trigger (color2 - amber in Omarchy)
    pub text: Color,        // Primary text (foreground)
    pub text_dim: Color,    // Inactive chips, hints (color8)
    pub bg: Color,          // Background
    pub bg_selected: Color, // Focus / dropdown cursor background
    pub inactive: Color,    // Borders
    pub gold: Color,        // Gold badges (color3/yellow)
    pub badge_fg: Color,    // Default badge text
    pub badge_bg: Color,    // Default badge background
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallbacks
        Self {
            accent: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg: Color::Rgb(30, 30, 46),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            gold: Color::Rgb(249, 226, 175),
            badge_fg: Color::Rgb(205, 214, 244),
            badge_bg: Color::Rgb(88, 91, 112),
        }
    }
}

impl Theme {
    pub fn load() -> Self {
        Self::load_omarchy_theme().unwrap_or_default()
    }

    fn load_omarchy_theme() -> Option<Self> {
        let home = dirs::home_dir()?;
        let theme_path = home.join(".config/omarchy/current/theme/kitty.conf");

        let content = fs::read_to_string(&theme_path).ok()?;
        let theme = Self::from_kitty_conf(&content);
        if theme.is_some() {
            tracing::debug!("Loaded theme from {}", theme_path.display());
        }
        theme
    }

    /// Map kitty colors onto the theme. None if the file has no colors.
    fn from_kitty_conf(content: &str) -> Option<Self> {
        let colors = Self::parse_kitty_conf(content);
        if colors.is_empty() {
            return None;
        }

        let fallback = Self::default();
        let pick = |keys: &[&str], default: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k))
                .copied()
                .unwrap_or(default)
        };

        // Omarchy Matte Black: color2 is the gold accent, color3 yellow
        let accent = pick(&["color2", "color10"], Color::Rgb(255, 193, 7));
        let inactive = pick(&["inactive_border_color", "color8"], fallback.inactive);

        Some(Self {
            accent,
            text: pick(&["foreground"], fallback.text),
            text_dim: pick(&["color8"], fallback.text_dim),
            bg: pick(&["background"], fallback.bg),
            bg_selected: pick(&["selection_background", "color0"], fallback.bg_selected),
            inactive,
            gold: pick(&["color3", "color11"], accent),
            badge_fg: pick(&["foreground"], fallback.badge_fg),
            badge_bg: inactive,
        })
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(char::is_whitespace) {
                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
        // Six bytes, but not six hex digits
        assert_eq!(Theme::parse_hex_color("1é234"), None);
        assert_eq!(Theme::parse_hex_color("#é1"), None);
        assert!(Theme::from_kitty_conf("color2 1é234").is_none());
    }

    #[test]
    fn test_from_kitty_conf() {
        let conf = "\
# Omarchy matte black
foreground #bebebe
background #121212
color2     #FFC107
color3     #b91c1c
font_family JetBrains Mono
";
        let theme = Theme::from_kitty_conf(conf).unwrap();
        assert_eq!(theme.accent, Color::Rgb(255, 193, 7));
        assert_eq!(theme.text, Color::Rgb(190, 190, 190));
        assert_eq!(theme.gold, Color::Rgb(185, 28, 28));
        assert_eq!(theme.bg_selected, Theme::default().bg_selected);
    }

    #[test]
    fn test_gold_falls_back_to_accent() {
        let theme = Theme::from_kitty_conf("color2 #FFC107").unwrap();
        assert_eq!(theme.gold, theme.accent);
        assert!(Theme::from_kitty_conf("# nothing here").is_none());
    }
}
