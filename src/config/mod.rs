use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::select::item::{BadgeVariant, SelectItem};
use crate::viewport::{Layout, DEFAULT_MOBILE_BREAKPOINT};

fn default_breakpoint() -> u16 {
    DEFAULT_MOBILE_BREAKPOINT
}

fn default_items() -> Vec<SelectItem> {
    vec![
        SelectItem::new("gpt-3.5", "GPT-3.5"),
        SelectItem::new("gpt-4", "GPT-4").with_badge(BadgeVariant::Gold, "plus"),
        SelectItem::new("claude", "Claude"),
        SelectItem::new("gemini", "Gemini").with_badge(BadgeVariant::Default, "new"),
        SelectItem::new("llama", "Llama"),
        SelectItem::new("mistral", "Mistral"),
        SelectItem::new("qwen", "Qwen"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Terminal width (columns) below which the single dropdown is used
    #[serde(default = "default_breakpoint")]
    pub mobile_breakpoint: u16,

    /// Chips shown inline before folding into the overflow dropdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_elements: Option<usize>,

    #[serde(default)]
    pub layout: Layout,

    /// Name of the initially selected item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,

    #[serde(default = "default_items")]
    pub items: Vec<SelectItem>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            max_elements: None,
            layout: Layout::Auto,
            current: None,
            items: default_items(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("select-group");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path` (or the default location), falling back to
    /// defaults. A missing default config file is created.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, is_default) = match path {
            Some(p) => (p.to_path_buf(), false),
            None => match Self::config_path() {
                Ok(p) => (p, true),
                Err(_) => return Ok(AppConfig::default()),
            },
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => match config.validate() {
                        Ok(()) => return Ok(config),
                        Err(e) => tracing::warn!("Invalid config {}: {}", path.display(), e),
                    },
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if is_default {
            if let Err(e) = config.save_to(&path) {
                tracing::warn!("Could not write default config: {}", e);
            }
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Names must be non-empty and unique; `current` must name an item.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::NoItems);
        }

        let mut seen = HashSet::new();
        for (index, item) in self.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            if !seen.insert(item.name.as_str()) {
                return Err(ConfigError::DuplicateName(item.name.clone()));
            }
        }

        if let Some(current) = &self.current {
            if !seen.contains(current.as_str()) {
                return Err(ConfigError::UnknownCurrent(current.clone()));
            }
        }

        Ok(())
    }

    /// Index of the configured current item, first item otherwise
    pub fn current_index(&self) -> usize {
        self.current
            .as_ref()
            .and_then(|name| self.items.iter().position(|i| &i.name == name))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            mobile_breakpoint: 100,
            max_elements: Some(3),
            layout: Layout::Mobile,
            current: Some("gpt-4".to_string()),
            items: default_items(),
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.mobile_breakpoint, 100);
        assert_eq!(deserialized.max_elements, Some(3));
        assert_eq!(deserialized.layout, Layout::Mobile);
        assert_eq!(deserialized.items, config.items);
        assert_eq!(deserialized.current_index(), 1);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("max_elements = 2").unwrap();
        assert_eq!(config.mobile_breakpoint, DEFAULT_MOBILE_BREAKPOINT);
        assert_eq!(config.layout, Layout::Auto);
        assert_eq!(config.items.len(), 7);
        assert_eq!(config.current_index(), 0);
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.current = Some("missing".to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownCurrent("missing".to_string()))
        );

        config.current = None;
        config.items.push(SelectItem::new("claude", "Claude again"));
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateName("claude".to_string()))
        );

        config.items = vec![SelectItem::new(" ", "Blank")];
        assert_eq!(config.validate(), Err(ConfigError::EmptyName { index: 0 }));

        config.items.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoItems));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
mobile_breakpoint = 60
current = "b"

[[items]]
name = "a"
value = "A"

[[items]]
name = "b"
value = "B"
badge = { variant = "gold", name = "pro" }
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.mobile_breakpoint, 60);
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.current_index(), 1);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[items]]\nname = \"a\"\nvalue = \"A\"\n[[items]]\nname = \"a\"\nvalue = \"B\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.items, default_items());

        // Explicit paths that don't exist are not created
        let missing = dir.path().join("nope.toml");
        AppConfig::load(Some(&missing)).unwrap();
        assert!(!missing.exists());
    }
}
