//! Shared configuration types for the statusbar overlay
//!
//! This crate contains serializable configuration types that are shared between
//! the engine (statusbar-core), the software surface (statusbar-overlay) and the
//! interactive driver (statusbar-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Namespace of the single overlay surface owned by the statusbar
pub const OVERLAY_NAMESPACE: &str = "statusbar";

/// Variables moved from the status strip into the overlay when nothing else is configured
pub const DEFAULT_REDIRECTED_VARIABLES: [&str; 3] = ["clock", "battery", "player"];

pub const DEFAULT_X_OFFSET: i32 = 10;
pub const DEFAULT_SEPARATOR: &str = " ";
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

fn default_redirected_variables() -> Vec<String> {
    DEFAULT_REDIRECTED_VARIABLES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_x_offset() -> i32 {
    DEFAULT_X_OFFSET
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

// ─────────────────────────────────────────────────────────────────────────────
// Statusbar Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// User-facing statusbar options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusbarConfig {
    /// Prefix text shown before every other value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Extra variables shown in the overlay but left on the status strip
    #[serde(default)]
    pub watched_variables: Vec<String>,

    /// Variables moved off the status strip while the overlay is enabled
    #[serde(default = "default_redirected_variables")]
    pub redirected_variables: Vec<String>,

    /// Gap in pixels between the overlay's right edge and the window's right edge
    #[serde(default = "default_x_offset")]
    pub x_offset: i32,

    /// Text placed between two displayed values
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default)]
    pub left_fringe: u32,

    #[serde(default)]
    pub right_fringe: u32,

    /// Font size used by surfaces that rasterize the text themselves
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Default for StatusbarConfig {
    fn default() -> Self {
        Self {
            note: None,
            watched_variables: Vec::new(),
            redirected_variables: default_redirected_variables(),
            x_offset: DEFAULT_X_OFFSET,
            separator: default_separator(),
            left_fringe: 0,
            right_fringe: 0,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl StatusbarConfig {
    /// Note text, treating an empty string the same as no note
    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.is_empty())
    }

    /// Builder-style override of the redirected variables
    pub fn with_redirected<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redirected_variables = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style override of the watched (note) variables
    pub fn with_watched<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watched_variables = names.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StatusbarConfig::default();
        assert_eq!(config.redirected_variables, vec!["clock", "battery", "player"]);
        assert!(config.watched_variables.is_empty());
        assert_eq!(config.x_offset, 10);
        assert_eq!(config.separator, " ");
        assert_eq!(config.left_fringe, 0);
        assert_eq!(config.right_fringe, 0);
        assert!(config.note.is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: StatusbarConfig = toml::from_str("x_offset = 25\n").unwrap();
        assert_eq!(config.x_offset, 25);
        assert_eq!(config.separator, " ");
        assert_eq!(config.redirected_variables.len(), 3);
    }

    #[test]
    fn test_empty_note_is_no_note() {
        let mut config = StatusbarConfig::default();
        config.note = Some(String::new());
        assert_eq!(config.note_text(), None);
        config.note = Some("WFH".into());
        assert_eq!(config.note_text(), Some("WFH"));
    }

    #[test]
    fn test_serialized_form_survives_reload() {
        let config = StatusbarConfig::default()
            .with_redirected(["clock"])
            .with_watched(["mail"]);
        let text = toml::to_string(&config).unwrap();
        let reloaded: StatusbarConfig = toml::from_str(&text).unwrap();
        assert_eq!(reloaded, config);
    }
}
