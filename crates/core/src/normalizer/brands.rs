//! Known-brand repair table.
//!
//! Brand names that contain punctuation or odd casing come out of slugs
//! hyphen-mangled ("yo-no" for "YO&NO"). Each rule maps a whole-word,
//! case-insensitive token sequence back to its canonical form. Rules are
//! applied in table order.

use regex_lite::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use super::NormalizerError;

/// A single brand repair: `pattern` (space separated tokens) → `canonical`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRule {
    pub pattern: String,
    pub canonical: String,
}

impl BrandRule {
    pub fn new(pattern: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            canonical: canonical.into(),
        }
    }
}

/// Brands repaired out of the box.
pub fn default_brand_rules() -> Vec<BrandRule> {
    vec![
        BrandRule::new("yo no", "YO&NO"),
        BrandRule::new("sparkle14", "Sparkle14"),
    ]
}

/// Compiled, ordered brand table.
#[derive(Debug, Clone)]
pub struct BrandTable {
    rules: Vec<(Regex, String)>,
}

impl BrandTable {
    /// Compile the given rules, keeping their order.
    pub fn new(rules: &[BrandRule]) -> Result<Self, NormalizerError> {
        let compiled = rules
            .iter()
            .map(|rule| Ok((compile_pattern(&rule.pattern)?, rule.canonical.clone())))
            .collect::<Result<Vec<_>, NormalizerError>>()?;

        Ok(Self { rules: compiled })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replace every brand occurrence with its canonical form.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, (pattern, canonical)| {
                pattern
                    .replace_all(&acc, NoExpand(canonical))
                    .into_owned()
            })
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, NormalizerError> {
    let tokens: Vec<String> = pattern
        .split_whitespace()
        .map(regex_lite::escape)
        .collect();

    if tokens.is_empty() {
        return Err(NormalizerError::InvalidBrandPattern(pattern.to_string()));
    }

    // `\b` only anchors next to word characters.
    let edge = |c: Option<char>| match c {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => r"\b",
        _ => "",
    };
    let trimmed = pattern.trim();

    let source = format!(
        "(?i){}{}{}",
        edge(trimmed.chars().next()),
        tokens.join(r"\s+"),
        edge(trimmed.chars().last())
    );

    Regex::new(&source).map_err(|e| NormalizerError::InvalidBrandPattern(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> BrandTable {
        BrandTable::new(&default_brand_rules()).unwrap()
    }

    #[test]
    fn test_multi_word_brand_is_joined() {
        assert_eq!(default_table().apply("yo no oorbellen"), "YO&NO oorbellen");
        assert_eq!(default_table().apply("ketting Yo No zilver"), "ketting YO&NO zilver");
    }

    #[test]
    fn test_whole_word_only() {
        let table = default_table();
        assert_eq!(table.apply("yono oorbellen"), "yono oorbellen");
        assert_eq!(table.apply("toyo no"), "toyo no");
        assert_eq!(table.apply("sparkle145 ring"), "sparkle145 ring");
    }

    #[test]
    fn test_single_token_brand_casing() {
        assert_eq!(default_table().apply("SPARKLE14 armband"), "Sparkle14 armband");
    }

    #[test]
    fn test_canonical_is_literal() {
        let table = BrandTable::new(&[BrandRule::new("dollar", "$1 Store")]).unwrap();
        assert_eq!(table.apply("dollar ring"), "$1 Store ring");
    }

    #[test]
    fn test_pattern_with_punctuation_edges() {
        let table = BrandTable::new(&[BrandRule::new("&more", "&More")]).unwrap();
        assert_eq!(table.apply("ring &more"), "ring &More");
    }

    #[test]
    fn test_blank_pattern_is_rejected() {
        let result = BrandTable::new(&[BrandRule::new("  ", "X")]);
        assert!(matches!(result, Err(NormalizerError::InvalidBrandPattern(_))));
    }

    #[test]
    fn test_rules_apply_in_order() {
        let table = BrandTable::new(&[
            BrandRule::new("la vie", "LaVie"),
            BrandRule::new("lavie bijoux", "LaVie Bijoux"),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.apply("la vie bijoux ring"), "LaVie Bijoux ring");
    }
}
