//! Sensitive-data masking
//!
//! Redaction runs on the producer side, before a record reaches the
//! dispatch queue, so sinks and the performance monitor never observe
//! unmasked values. Key matching replaces flagged values wholesale;
//! pattern matching rewrites matching substrings in place.

use super::context::{FieldMap, FieldValue};
use super::error::{LoggerError, Result};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// Masking configuration: plain data, compiled into a [`MaskingEngine`]
/// at configure time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Case-insensitive key names; substring match flags a field
    pub sensitive_keys: Vec<String>,
    /// Regular expressions applied in order to values and message text
    pub patterns: Vec<String>,
    /// Fixed string substituted for flagged values and matched substrings
    pub replacement: String,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            sensitive_keys: [
                "password",
                "passwd",
                "secret",
                "token",
                "api_key",
                "apikey",
                "authorization",
                "credential",
                "private_key",
                "session",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            patterns: vec![
                // card-like digit runs, 13-19 digits with optional separators
                r"\b\d(?:[ -]?\d){12,18}\b".to_string(),
                r"(?i)\bbearer\s+[A-Za-z0-9._~+/=-]+".to_string(),
            ],
            replacement: "***".to_string(),
        }
    }
}

impl MaskConfig {
    /// A configuration that masks nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sensitive_keys: Vec::new(),
            patterns: Vec::new(),
            replacement: "***".to_string(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.sensitive_keys.push(key.into());
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    #[must_use]
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self
    }
}

/// Compiled masking engine. Construction validates every pattern, and
/// rejects replacement strings that a configured pattern would re-match,
/// which would make repeated masking unstable.
#[derive(Debug)]
pub struct MaskingEngine {
    keys: Vec<String>,
    patterns: Vec<Regex>,
    replacement: String,
}

impl MaskingEngine {
    pub fn from_config(config: &MaskConfig) -> Result<Self> {
        let mut patterns = Vec::with_capacity(config.patterns.len());
        for source in &config.patterns {
            let regex = Regex::new(source).map_err(|e| {
                LoggerError::config("masking", format!("pattern {:?}: {}", source, e))
            })?;
            if regex.is_match(&config.replacement) {
                return Err(LoggerError::config(
                    "masking",
                    format!(
                        "replacement {:?} matches pattern {:?}",
                        config.replacement, source
                    ),
                ));
            }
            patterns.push(regex);
        }
        Ok(Self {
            keys: config
                .sensitive_keys
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            patterns,
            replacement: config.replacement.clone(),
        })
    }

    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// True if `key` names sensitive data (case-insensitive substring match).
    #[must_use]
    pub fn is_sensitive_key(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.keys.iter().any(|flagged| key.contains(flagged))
    }

    /// Apply every configured pattern to free text, in order.
    #[must_use]
    pub fn mask_text(&self, text: &str) -> String {
        let mut masked = text.to_string();
        for pattern in &self.patterns {
            if pattern.is_match(&masked) {
                masked = pattern
                    .replace_all(&masked, NoExpand(self.replacement.as_str()))
                    .into_owned();
            }
        }
        masked
    }

    /// Mask a mapping in place: flagged keys have their value replaced
    /// wholesale; other string values get pattern masking.
    pub fn mask_fields(&self, fields: &mut FieldMap) {
        for (key, value) in fields.iter_mut() {
            if self.is_sensitive_key(key) {
                *value = FieldValue::String(self.replacement.clone());
            } else if let FieldValue::String(text) = value {
                let masked = self.mask_text(text);
                if masked != *text {
                    *value = FieldValue::String(masked);
                }
            }
        }
    }

    /// Pattern-mask the string members of an argument list.
    pub fn mask_args(&self, args: &mut [FieldValue]) {
        for value in args.iter_mut() {
            if let FieldValue::String(text) = value {
                let masked = self.mask_text(text);
                if masked != *text {
                    *value = FieldValue::String(masked);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MaskingEngine {
        MaskingEngine::from_config(&MaskConfig::default()).expect("default config compiles")
    }

    #[test]
    fn test_sensitive_key_replaced_wholesale() {
        let engine = engine();
        let mut fields = FieldMap::new();
        fields.insert("user".to_string(), "alice".into());
        fields.insert("password".to_string(), "hunter2".into());

        engine.mask_fields(&mut fields);

        assert_eq!(fields.get("user"), Some(&FieldValue::String("alice".into())));
        assert_eq!(
            fields.get("password"),
            Some(&FieldValue::String("***".into()))
        );
    }

    #[test]
    fn test_key_match_is_substring_and_case_insensitive() {
        let engine = engine();
        assert!(engine.is_sensitive_key("PASSWORD"));
        assert!(engine.is_sensitive_key("user_password_hash"));
        assert!(engine.is_sensitive_key("Authorization"));
        assert!(!engine.is_sensitive_key("username"));
    }

    #[test]
    fn test_pattern_masks_in_place() {
        let engine = engine();
        let masked = engine.mask_text("card 4111 1111 1111 1111 charged");
        assert_eq!(masked, "card *** charged");

        let masked = engine.mask_text("header: Bearer abc.def-ghi, done");
        assert_eq!(masked, "header: ***, done");
    }

    #[test]
    fn test_non_flagged_value_gets_pattern_masking() {
        let engine = engine();
        let mut fields = FieldMap::new();
        fields.insert(
            "note".to_string(),
            "pay with 4111111111111111 today".into(),
        );
        engine.mask_fields(&mut fields);
        assert_eq!(
            fields.get("note"),
            Some(&FieldValue::String("pay with *** today".into()))
        );
    }

    #[test]
    fn test_masking_is_idempotent() {
        let engine = engine();
        let once = engine.mask_text("token Bearer xyz and card 4111111111111111");
        let twice = engine.mask_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_masking_is_deterministic() {
        let engine = engine();
        let input = "Bearer aa.bb 4111111111111111 Bearer cc";
        assert_eq!(engine.mask_text(input), engine.mask_text(input));
    }

    #[test]
    fn test_numbers_too_short_untouched() {
        let engine = engine();
        assert_eq!(engine.mask_text("order 123456789"), "order 123456789");
    }

    #[test]
    fn test_bad_pattern_is_configuration_error() {
        let config = MaskConfig::disabled().with_pattern("(unclosed");
        let err = MaskingEngine::from_config(&config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_replacement_matching_pattern_rejected() {
        let config = MaskConfig::disabled()
            .with_pattern(r"\d+")
            .with_replacement("1234");
        let err = MaskingEngine::from_config(&config).unwrap_err();
        assert!(err.is_configuration());
    }
}
