use crate::error::PickerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An RGBA color, written as `#RRGGBB` or `#RRGGBBAA` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn clear() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, PickerError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(PickerError::Config(format!("invalid color '{}'", hex)));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| PickerError::Config(format!("invalid color '{}'", hex)))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if digits.len() == 8 { channel(6)? } else { 255 },
        })
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS `rgba()` notation for inline styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

impl TryFrom<String> for Color {
    type Error = PickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Picker behaviour, set by the host application before presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub allows_multiple_selection: bool,
    /// 0 means unlimited
    pub maximum_selection: usize,
    pub columns_portrait: usize,
    pub columns_landscape: usize,
    /// Show the "take photo" tile in front of the grid
    pub show_take_photo: bool,
    pub selection_color: Color,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            allows_multiple_selection: true,
            maximum_selection: 0,
            columns_portrait: 4,
            columns_landscape: 7,
            show_take_photo: true,
            selection_color: Color::rgb(55, 93, 129),
        }
    }
}

impl PickerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, PickerError> {
        let config: PickerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PickerError> {
        if !path.exists() {
            log::debug!("No picker config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        if self.columns_portrait == 0 || self.columns_landscape == 0 {
            return Err(PickerError::Config(
                "column counts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert!(config.allows_multiple_selection);
        assert_eq!(config.maximum_selection, 0);
        assert_eq!(config.columns_portrait, 4);
        assert_eq!(config.columns_landscape, 7);
        assert!(config.show_take_photo);
        assert_eq!(config.selection_color.to_hex(), "#375D81");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PickerConfig::from_toml_str(
            r##"
            maximum_selection = 3
            show_take_photo = false
            selection_color = "#FF000080"
            "##,
        )
        .unwrap();

        assert_eq!(config.maximum_selection, 3);
        assert!(!config.show_take_photo);
        assert_eq!(config.columns_portrait, 4);
        assert_eq!(
            config.selection_color,
            Color {
                r: 255,
                g: 0,
                b: 0,
                a: 128
            }
        );
    }

    #[test]
    fn test_zero_columns_rejected() {
        let result = PickerConfig::from_toml_str("columns_landscape = 0");
        assert!(matches!(result, Err(PickerError::Config(_))));
    }

    #[test]
    fn test_bad_color_rejected() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(PickerConfig::from_toml_str(r#"selection_color = "blue""#).is_err());
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(55, 93, 129).to_css(), "rgba(55, 93, 129, 1.000)");
        assert_eq!(Color::clear().to_css(), "rgba(0, 0, 0, 0.000)");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("{}.toml", uuid::Uuid::new_v4()));
        assert_eq!(PickerConfig::load(&path).unwrap(), PickerConfig::default());
    }
}
