//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum nested date phrases resolved in one clause
    pub recursion_limit: usize,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Separator used when a period carries several footnotes
    pub footnote_separator: String,

    /// Heading that introduces the footnote block
    pub notes_divider: String,

    /// Treat single capital letters followed by "." as initials
    pub protect_initials: bool,

    /// Round-trip checks compare acquisition wording exactly
    pub strict_parsable: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.recursion_limit == 0 {
            return Err("recursion_limit must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.notes_divider.trim().is_empty() {
            return Err("notes_divider cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            recursion_limit: 10,
            max_text_length: 100_000,
            footnote_separator: "; ".to_string(),
            notes_divider: "NOTES:".to_string(),
            protect_initials: true,
            strict_parsable: false,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: shallow recursion, exact round-trip comparison
    pub fn strict() -> Self {
        Self {
            recursion_limit: 5,
            max_text_length: 20_000,
            strict_parsable: true,
            ..Self::default()
        }
    }

    /// Lenient preset: deep recursion and long documents
    pub fn lenient() -> Self {
        Self {
            recursion_limit: 25,
            max_text_length: 1_000_000,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recursion_limit, 10);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::strict().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_recursion_limit() {
        let config = ExtractorConfig {
            recursion_limit: 0,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_notes_divider() {
        let config = ExtractorConfig {
            notes_divider: "  ".to_string(),
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("recursion_limit = 3").unwrap();
        assert_eq!(config.recursion_limit, 3);
        assert_eq!(config.notes_divider, "NOTES:");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
