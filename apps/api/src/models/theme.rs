//! Theme preference — persisted independently of the resume document as a
//! plain string, one of `system | light | dark`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::System => "system",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parses the persisted string. Anything unrecognized falls back to
    /// `System` — storage corruption is never an error here.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "light" => ThemePreference::Light,
            "dark" => ThemePreference::Dark,
            _ => ThemePreference::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_string_round_trip() {
        for theme in [
            ThemePreference::System,
            ThemePreference::Light,
            ThemePreference::Dark,
        ] {
            assert_eq!(ThemePreference::parse(theme.as_str()), theme);
        }
    }

    #[test]
    fn test_unknown_theme_falls_back_to_system() {
        assert_eq!(ThemePreference::parse("solarized"), ThemePreference::System);
        assert_eq!(ThemePreference::parse(""), ThemePreference::System);
    }

    #[test]
    fn test_theme_json_shape_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ThemePreference::Dark).unwrap(),
            r#""dark""#
        );
        let parsed: ThemePreference = serde_json::from_str(r#""light""#).unwrap();
        assert_eq!(parsed, ThemePreference::Light);
    }
}
