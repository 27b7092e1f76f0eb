//! Two-tier IMEI detection.
//!
//! The preferred tier requires a known Type Allocation Code prefix; the
//! fallback tier accepts any bare 15-digit run. Both tiers require the
//! run to be exactly 15 digits, bounded by non-digits, so a longer digit
//! run never yields a truncated match.

use once_cell::sync::Lazy;
use regex::Regex;

use super::builder::RecordBuilder;

/// 15-digit run starting with a known TAC prefix (86, 35, 01).
static TAC_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])((?:86|35|01)[0-9]{13})(?:[^0-9]|$)").expect("static pattern")
});

/// Any bare 15-digit run.
static ANY_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{15})(?:[^0-9]|$)").expect("static pattern"));

/// Explicit `imei:` label, anywhere in the line.
static IMEI_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)imei\s*:").expect("static pattern"));

fn first_run<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Preferred tier first, then the fallback, on a single piece of text.
pub(crate) fn match_two_tier(text: &str) -> Option<&str> {
    first_run(&TAC_RUN, text).or_else(|| first_run(&ANY_RUN, text))
}

/// True when the text contains any acceptable 15-digit run.
pub(crate) fn looks_like_imei(text: &str) -> bool {
    match_two_tier(text).is_some()
}

/// IMEI pass over the trimmed lines.
///
/// Explicit `imei:` labels beat implicit detection regardless of line
/// order, and the newest explicit match wins. Without an explicit match
/// the preferred tier is scanned across all lines before the fallback
/// tier is consulted, so a TAC-prefixed run beats a generic run that
/// appears earlier in the text.
pub(crate) fn scan(lines: &[&str], builder: &mut RecordBuilder) {
    let mut explicit: Option<String> = None;
    for line in lines {
        if let Some(label) = IMEI_LABEL.find(line) {
            if let Some(value) = match_two_tier(&line[label.end()..]) {
                explicit = Some(value.to_string());
            }
        }
    }
    if let Some(value) = explicit {
        builder.set_imei(value);
        return;
    }

    for line in lines {
        if let Some(value) = first_run(&TAC_RUN, line) {
            builder.set_imei(value.to_string());
            return;
        }
    }
    for line in lines {
        if let Some(value) = first_run(&ANY_RUN, line) {
            builder.set_imei(value.to_string());
            return;
        }
    }
}
