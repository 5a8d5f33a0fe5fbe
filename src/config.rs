use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::theme::Theme;
use crate::error::{Error, Result};

/// User settings shared by every command: the palette compositions are
/// rendered with and the preview's key bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub theme: Theme,
    pub preview: PreviewBindings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewBindings {
    pub next_frame: String,
    pub prev_frame: String,
    pub skip_forward: String,
    pub skip_back: String,
    pub first_frame: String,
    pub last_frame: String,
    pub play_pause: String,
    pub fullscreen: String,
    pub quit: String,
}

impl Default for PreviewBindings {
    fn default() -> Self {
        PreviewBindings {
            next_frame: "Right".into(),
            prev_frame: "Left".into(),
            skip_forward: "Shift-Right".into(),
            skip_back: "Shift-Left".into(),
            first_frame: "Home".into(),
            last_frame: "End".into(),
            play_pause: "Space".into(),
            fullscreen: "F11".into(),
            quit: "q".into(),
        }
    }
}

impl StudioConfig {
    /// Load from `path` when given; any failure is an error. Otherwise read
    /// the per-user file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::config_path();
                if !path.exists() {
                    return Ok(Self::default());
                }
                match Self::read(&path) {
                    Ok(config) => Ok(config),
                    Err(e) => {
                        warn!("invalid studio config ({e}), using defaults");
                        Ok(Self::default())
                    }
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("estate-motion");
        path.push("studio.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    for (prefix, modifier) in [
        ("Alt-", KeyModifiers::ALT),
        ("Ctrl-", KeyModifiers::CONTROL),
        ("Shift-", KeyModifiers::SHIFT),
    ] {
        if let Some(rest) = binding.strip_prefix(prefix) {
            return event.modifiers.contains(modifier) && key_matches(rest, event.code);
        }
    }

    // Plain bindings must not fire while Ctrl or Alt is held.
    if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }
    // Shift only counts for named keys; "Q" arrives as a shifted char.
    if event.modifiers.contains(KeyModifiers::SHIFT) && !matches!(event.code, KeyCode::Char(_)) {
        return false;
    }
    key_matches(binding, event.code)
}

fn key_matches(key: &str, code: KeyCode) -> bool {
    match key {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "Home" => code == KeyCode::Home,
        "End" => code == KeyCode::End,
        "PageUp" => code == KeyCode::PageUp,
        "PageDown" => code == KeyCode::PageDown,
        s => {
            // F-key binding: "F1" through "F12" etc.
            if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
                return code == KeyCode::F(n);
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_and_modified_bindings() {
        assert!(matches_binding("Right", &key(KeyCode::Right, KeyModifiers::NONE)));
        assert!(!matches_binding("Right", &key(KeyCode::Right, KeyModifiers::SHIFT)));
        assert!(matches_binding("Shift-Right", &key(KeyCode::Right, KeyModifiers::SHIFT)));
        assert!(!matches_binding("Shift-Right", &key(KeyCode::Right, KeyModifiers::NONE)));
        assert!(matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::ALT)));
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(matches_binding("F11", &key(KeyCode::F(11), KeyModifiers::NONE)));
        assert!(!matches_binding("qq", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: StudioConfig =
            serde_json::from_str(r##"{"theme": {"gold": "#d4af37"}, "preview": {"quit": "Esc"}}"##).unwrap();
        assert_eq!(config.theme.gold, Color::rgb(0xd4, 0xaf, 0x37));
        assert_eq!(config.theme.text, Theme::default().text);
        assert_eq!(config.preview.quit, "Esc");
        assert_eq!(config.preview.next_frame, "Right");
    }

    #[test]
    fn explicit_path_errors_are_reported() {
        let dir = std::env::temp_dir().join(format!("estate-motion-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let bad = dir.join("studio.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            StudioConfig::load(Some(&bad)),
            Err(Error::Config { ref path, .. }) if path == &bad
        ));
        assert!(matches!(
            StudioConfig::load(Some(&dir.join("missing.json"))),
            Err(Error::Io(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
