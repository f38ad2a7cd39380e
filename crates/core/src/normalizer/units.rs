//! Unit handling: decimal repair and number/unit spacing.
//!
//! Slugs lose decimal points ("0.8mm" becomes "0-8mm") and glue units to
//! numbers. The spacing rules form one family applied in a fixed order; a
//! span written by an earlier rule is never rewritten by a later one.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::trace;

/// Units recognized when casing words; output is always lowercase.
pub const UNITS: &[&str] = &["mm", "cm", "m", "gr", "g", "kg", "ml", "l"];

/// One rewrite in the spacing family.
struct UnitRule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl UnitRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Rewrite every match that does not touch a `fixed` span.
    ///
    /// Returns the new text and the fixed spans mapped into it, including
    /// the spans this rule produced.
    fn apply(&self, input: &str, fixed: &[Range<usize>]) -> (String, Vec<Range<usize>>) {
        let mut out = String::with_capacity(input.len() + 4);
        let mut spans = Vec::with_capacity(fixed.len());
        // (end offset in input, shift for every offset at or after it)
        let mut shifts: Vec<(usize, isize)> = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(input) {
            let Some(m) = caps.get(0) else { continue };
            if fixed.iter().any(|r| r.start < m.end() && m.start() < r.end) {
                continue;
            }

            out.push_str(&input[last..m.start()]);
            let start = out.len();
            caps.expand(self.replacement, &mut out);
            spans.push(start..out.len());
            shifts.push((m.end(), out.len() as isize - m.end() as isize));
            last = m.end();
        }
        out.push_str(&input[last..]);

        for range in fixed {
            let shift = shifts
                .iter()
                .take_while(|(end, _)| *end <= range.start)
                .last()
                .map_or(0, |(_, shift)| *shift);
            spans.push(offset(range, shift));
        }
        spans.sort_by_key(|r| r.start);

        (out, spans)
    }
}

fn offset(range: &Range<usize>, shift: isize) -> Range<usize> {
    let start = (range.start as isize + shift) as usize;
    let end = (range.end as isize + shift) as usize;
    start..end
}

/// The spacing family, in priority order.
static SPACING_RULES: Lazy<Vec<UnitRule>> = Lazy::new(|| {
    vec![
        // "0 8 mm" / "0 8mm" -> "0.8 mm"
        UnitRule::new(
            "split-decimal",
            r"\b(\d+) (\d+) ?(mm|cm|gr|g)\b",
            "${1}.${2} ${3}",
        ),
        // "8 5mm" -> "8.5 mm"
        UnitRule::new(
            "split-decimal-glued",
            r"\b(\d+) (\d+)(mm|cm|gr|g)\b",
            "${1}.${2} ${3}",
        ),
        // "19cm" -> "19 cm"; two-letter units are tried before "m" and "l"
        UnitRule::new(
            "glued-unit",
            r"\b(\d+)(mm|cm|kg|ml|gr|g|m|l)\b",
            "${1} ${2}",
        ),
    ]
});

/// Run the spacing family over `text`.
pub fn repair_units(text: &str) -> String {
    let mut current = text.to_string();
    let mut fixed: Vec<Range<usize>> = Vec::new();

    for rule in SPACING_RULES.iter() {
        let (next, spans) = rule.apply(&current, &fixed);
        if next != current {
            trace!("Unit rule {}: '{}' -> '{}'", rule.name, current, next);
        }
        current = next;
        fixed = spans;
    }

    current
}

/// The lowercase unit if `word` is a recognized unit in any case.
pub fn canonical_unit(word: &str) -> Option<&'static str> {
    UNITS
        .iter()
        .copied()
        .find(|unit| unit.eq_ignore_ascii_case(word))
}
