//! Placeholder-name detection.
//!
//! Imported records get names like `YO&NO - 1328286`: the brand, a dash and
//! a raw product code. Only those are replaced; descriptive names are left
//! alone.

use regex_lite::Regex;

use super::config::SyncConfig;

/// Decides whether a display name is a generated placeholder.
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    code_only: Regex,
    single_token: Regex,
    max_len: usize,
}

impl EligibilityFilter {
    /// Build a filter for names prefixed with `brand_prefix`.
    pub fn new(brand_prefix: &str, max_len: usize) -> Self {
        let prefix = regex_lite::escape(brand_prefix.trim());
        Self {
            code_only: Regex::new(&format!(r"^{} - [0-9./]+$", prefix))
                .expect("escaped prefix is a valid pattern"),
            single_token: Regex::new(&format!(r"^{} - \S+$", prefix))
                .expect("escaped prefix is a valid pattern"),
            max_len,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(&config.brand_prefix, config.max_placeholder_len)
    }

    /// Whether `name` looks like a placeholder.
    pub fn is_eligible(&self, name: &str) -> bool {
        if self.code_only.is_match(name) {
            return true;
        }
        self.single_token.is_match(name) && name.chars().count() < self.max_len
    }
}
