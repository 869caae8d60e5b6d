//! Export options shared by both walkers.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_FALLBACK_COLOR: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ColorFormat {
    /// `#rrggbb`. Alpha is dropped.
    #[default]
    #[serde(rename = "hex")]
    Hex,
    /// `#rrggbbaa` when the color is translucent, `#rrggbb` otherwise.
    #[serde(rename = "hex-alpha")]
    HexAlpha,
}

impl FromStr for ColorFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "hex-alpha" | "hexalpha" => Ok(ColorFormat::HexAlpha),
            other => Err(ConfigError::UnknownColorFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExportConfig {
    /// Round numeric values to the nearest integer before insertion.
    pub round_numbers: bool,
    pub color_format: ColorFormat,
    /// Returned by the resolver when an alias cannot be resolved.
    pub fallback_color: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            round_numbers: false,
            color_format: ColorFormat::Hex,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

impl ExportConfig {
    pub fn with_rounding(mut self, round_numbers: bool) -> Self {
        self.round_numbers = round_numbers;
        self
    }
    pub fn with_color_format(mut self, color_format: ColorFormat) -> Self {
        self.color_format = color_format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ExportConfig::default();
        assert!(!config.round_numbers);
        assert_eq!(config.color_format, ColorFormat::Hex);
        assert_eq!(config.fallback_color, "#000000");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ExportConfig =
            serde_json::from_str(r#"{"round-numbers": true, "color-format": "hex-alpha"}"#)
                .unwrap();
        assert!(config.round_numbers);
        assert_eq!(config.color_format, ColorFormat::HexAlpha);
        assert_eq!(config.fallback_color, DEFAULT_FALLBACK_COLOR);
    }

    #[test]
    fn builders() {
        let config = ExportConfig::default()
            .with_rounding(true)
            .with_color_format(ColorFormat::HexAlpha);
        assert!(config.round_numbers);
        assert_eq!(config.color_format, ColorFormat::HexAlpha);
    }

    #[test]
    fn color_format_from_str() {
        assert_eq!("HEX".parse::<ColorFormat>().unwrap(), ColorFormat::Hex);
        assert_eq!(
            "hex-alpha".parse::<ColorFormat>().unwrap(),
            ColorFormat::HexAlpha
        );
        assert!("rgb".parse::<ColorFormat>().is_err());
    }
}
