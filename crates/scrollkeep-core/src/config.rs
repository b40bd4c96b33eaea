use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory holding the log file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Render a line number gutter
    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_line_numbers: default_true(),
        }
    }
}

/// Scroll behaviour of the in-memory host and the half-page commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Allow the last line to scroll up to the top of the viewport
    #[serde(default)]
    pub scroll_beyond_last_line: bool,
    /// Keep the cursor's relative position on half-page scrolls.
    /// When false the half-page commands behave like plain scrolls.
    #[serde(default = "default_true")]
    pub preserve_cursor_on_half_page: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_beyond_last_line: false,
            preserve_cursor_on_half_page: default_true(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,

    // Cursor movement
    /// Move cursor down
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    /// Move cursor up
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    /// Move cursor left
    #[serde(default = "default_key_move_left")]
    pub move_left: String,
    /// Move cursor right
    #[serde(default = "default_key_move_right")]
    pub move_right: String,

    // Scrolling
    /// Scroll half page down
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    /// Scroll full page down
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    /// Scroll full page up
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,

    // Jump to top/bottom
    /// Jump to the first line
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to the last line
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            move_left: default_key_move_left(),
            move_right: default_key_move_right(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_move_left() -> String { "h".to_string() }
fn default_key_move_right() -> String { "l".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrollkeep")
}

fn default_tick_rate() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollkeep/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollkeep")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("scrollkeep.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::parse(
            r#"
            [scroll]
            scroll_beyond_last_line = true

            [keymap]
            scroll_half_down = "<C-j>"
            "#,
        )
        .unwrap();

        assert!(config.scroll.scroll_beyond_last_line);
        assert!(config.scroll.preserve_cursor_on_half_page);
        assert_eq!(config.keymap.scroll_half_down, "<C-j>");
        assert_eq!(config.keymap.scroll_half_up, "<C-u>");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_empty_config() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.scroll, ScrollConfig::default());
        assert!(config.ui.show_line_numbers);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = AppConfig::parse("[scroll]\nscroll_beyond_last_line = \"yes\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_keymap() {
        let mut config = AppConfig::default();
        config.keymap.quit = "<C-q>".to_string();

        let text = config.to_toml().unwrap();
        let parsed = AppConfig::parse(&text).unwrap();
        assert_eq!(parsed.keymap.quit, "<C-q>");
    }

    #[test]
    fn test_save_to_creates_dirs_and_loads_back() {
        let dir = std::env::temp_dir().join(format!("scrollkeep-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.scroll.preserve_cursor_on_half_page = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert!(!loaded.scroll.preserve_cursor_on_half_page);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        let path = Path::new("/var/lib/scrollkeep");
        assert_eq!(expand_tilde(path), PathBuf::from("/var/lib/scrollkeep"));
    }
}
