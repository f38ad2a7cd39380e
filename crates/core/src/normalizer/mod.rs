//! Title normalizer.
//!
//! Turns a marketplace product page URL into a display title:
//!
//! 1. take the slug between `/p/` and the next `/`
//! 2. hyphens become spaces
//! 3. repair known brand names
//! 4. repair split decimals and number/unit spacing
//! 5. case each word
//!
//! `https://www.bol.com/nl/nl/p/yo-no-oorbellen-0-8-mm/1328286/` becomes
//! `YO&NO Oorbellen 0.8 mm`.
//!
//! The normalizer is pure: no I/O, same input, same output.

mod brands;
mod units;

pub use brands::{default_brand_rules, BrandRule, BrandTable};
pub use units::{canonical_unit, repair_units, UNITS};

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors building a normalizer.
#[derive(Debug, Error)]
pub enum NormalizerError {
    #[error("invalid brand pattern: {0}")]
    InvalidBrandPattern(String),
}

/// Normalizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Brand repairs, applied in order.
    #[serde(default = "default_brand_rules")]
    pub brands: Vec<BrandRule>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            brands: default_brand_rules(),
        }
    }
}

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"/p/([^/]+)/").unwrap());

/// The slug of a product page URL, if it has one.
pub fn extract_slug(url: &str) -> Option<&str> {
    SLUG_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Slug-to-title transformation.
#[derive(Debug, Clone)]
pub struct TitleNormalizer {
    brands: BrandTable,
}

impl TitleNormalizer {
    /// Create a normalizer with the configured brand table.
    pub fn new(config: &NormalizerConfig) -> Result<Self, NormalizerError> {
        Ok(Self {
            brands: BrandTable::new(&config.brands)?,
        })
    }

    /// Create a normalizer from an already compiled brand table.
    pub fn with_brands(brands: BrandTable) -> Self {
        Self { brands }
    }

    /// Derive a title from a product page URL.
    ///
    /// Returns `None` when the URL has no `/p/<slug>/` segment or the slug
    /// holds nothing but separators.
    pub fn normalize(&self, url: &str) -> Option<String> {
        let slug = extract_slug(url)?;
        let slug = urlencoding::decode(slug).unwrap_or(std::borrow::Cow::Borrowed(slug));

        let words = slug.replace('-', " ");
        let branded = self.brands.apply(&words);
        let spaced = repair_units(&branded);

        let title = spaced
            .split_whitespace()
            .map(case_word)
            .collect::<Vec<_>>()
            .join(" ");

        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }
}

/// Case a single word.
///
/// First matching rule wins: shouted words stay, units go lowercase,
/// numbers stay, everything else gets an uppercase first letter.
fn case_word(word: &str) -> String {
    if is_shouted(word) {
        return word.to_string();
    }
    if let Some(unit) = canonical_unit(word) {
        return unit.to_string();
    }
    if is_number(word) {
        return word.to_string();
    }
    capitalize(word)
}

fn is_shouted(word: &str) -> bool {
    word.chars().count() > 1
        && !word.chars().all(|c| c.is_ascii_digit())
        && word.to_uppercase() == word
}

fn is_number(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| c.is_ascii_digit() || c == '.')
        && word.matches('.').count() <= 1
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
