//! Label-free shape heuristics.
//!
//! These only run on lines where no structured label matched, and only
//! fill fields that are still unset. Order is fixed: device name (first
//! content line only), then model-code shape, then serial shape.

use once_cell::sync::Lazy;
use regex::Regex;

use super::builder::{Field, RecordBuilder};
use super::imei;

/// Alphanumeric code shape: a short letter prefix followed by a hyphen
/// and alphanumerics (SM-S928BZKKTPA), or letters followed directly by
/// digits and alphanumerics (CLK7N).
static MODEL_CODE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{1,6}(?:-[A-Za-z0-9]{2,}|[0-9][A-Za-z0-9]*)$").expect("static pattern")
});

/// Serial shape: 9 to 19 uppercase letters, digits, or slashes.
static SERIAL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9/]{9,19}$").expect("static pattern"));

/// Heuristic pass for one unlabeled line.
pub(crate) fn apply(line: &str, is_first_content_line: bool, builder: &mut RecordBuilder) {
    // The very first content line with no label and no IMEI in it is
    // taken wholesale as the device name; its first token seeds the
    // brand.
    if is_first_content_line && !line.contains(':') && !imei::looks_like_imei(line) {
        if builder.set_from_heuristic(Field::ModelName, line.to_string()) {
            if let Some(first_token) = line.split_whitespace().next() {
                builder.set_from_heuristic(Field::Brand, first_token.to_string());
            }
        }
        return;
    }

    if !builder.is_set(Field::ModelCode) && MODEL_CODE_SHAPE.is_match(line) {
        builder.set_from_heuristic(Field::ModelCode, line.to_string());
        return;
    }

    if !builder.is_set(Field::Serial)
        && SERIAL_SHAPE.is_match(line)
        && !imei::looks_like_imei(line)
    {
        builder.set_from_heuristic(Field::Serial, line.to_string());
    }
}
