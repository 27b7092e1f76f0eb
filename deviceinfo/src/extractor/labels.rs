//! Label vocabularies for the two paste formats.
//!
//! Two independently-evolved vocabularies reach the same fields: the
//! structured labels seen on supplier messages and phone "about" dumps,
//! and an older set of colon labels kept for backward compatibility.
//! They are held as separate tables and applied in a fixed pass order
//! (structured first, legacy second) so precedence is explicit.

use super::builder::{Field, RecordBuilder};

struct LabelRule {
    keywords: &'static [&'static str],
    field: Field,
    /// Accept bare whitespace as the separator when no colon follows.
    bare_keyword: bool,
    /// Seed brand from the value's first token when brand is unset.
    backfill_brand: bool,
}

/// Primary vocabulary. Order matters: the model-name family is checked
/// longest-phrase first so bare `nombre:` cannot swallow `nombre del
/// tlf:`, and model-name rules run before model-code rules.
const STRUCTURED_RULES: &[LabelRule] = &[
    LabelRule {
        keywords: &["marca"],
        field: Field::Brand,
        bare_keyword: false,
        backfill_brand: false,
    },
    LabelRule {
        keywords: &[
            "nombre del tlf",
            "nombre del telefono",
            "nombre del teléfono",
        ],
        field: Field::ModelName,
        bare_keyword: false,
        backfill_brand: false,
    },
    LabelRule {
        keywords: &["nombre"],
        field: Field::ModelName,
        bare_keyword: false,
        backfill_brand: false,
    },
    LabelRule {
        keywords: &["model name", "sku name", "model full description"],
        field: Field::ModelName,
        bare_keyword: false,
        backfill_brand: true,
    },
    LabelRule {
        keywords: &["modelo", "model code", "model number"],
        field: Field::ModelCode,
        bare_keyword: false,
        backfill_brand: false,
    },
    LabelRule {
        keywords: &["origen", "serie"],
        field: Field::Serial,
        bare_keyword: true,
        backfill_brand: false,
    },
    LabelRule {
        keywords: &["sn", "serial number"],
        field: Field::Serial,
        bare_keyword: false,
        backfill_brand: false,
    },
    LabelRule {
        keywords: &["market model"],
        field: Field::MarketModel,
        bare_keyword: false,
        backfill_brand: false,
    },
    LabelRule {
        keywords: &["memory"],
        field: Field::Memory,
        bare_keyword: false,
        backfill_brand: false,
    },
];

/// Legacy colon labels and whether they may displace a heuristic guess.
/// `imei:` is absent on purpose: the IMEI pass already honors it.
const LEGACY_RULES: &[(&str, Field, bool)] = &[
    ("model description", Field::Brand, false),
    ("model name", Field::ModelName, true),
    ("market model", Field::MarketModel, false),
    ("model code", Field::ModelCode, true),
    ("memory", Field::Memory, false),
    ("serial", Field::Serial, true),
];

/// Strip a case-insensitive keyword prefix and its separator, returning
/// the trimmed value. The separator is optional whitespace plus a colon;
/// bare keywords also accept plain whitespace. ASCII-only case folding,
/// so byte offsets into the original line stay valid.
fn strip_keyword<'a>(line: &'a str, keyword: &str, bare_keyword: bool) -> Option<&'a str> {
    let bytes = line.as_bytes();
    let keyword_bytes = keyword.as_bytes();
    if bytes.len() < keyword_bytes.len() {
        return None;
    }
    if !bytes[..keyword_bytes.len()].eq_ignore_ascii_case(keyword_bytes) {
        return None;
    }
    let rest = &line[keyword_bytes.len()..];
    let after_spaces = rest.trim_start();
    if let Some(value) = after_spaces.strip_prefix(':') {
        return Some(value.trim());
    }
    if bare_keyword && rest.starts_with(char::is_whitespace) && !after_spaces.is_empty() {
        return Some(after_spaces);
    }
    None
}

/// Structured-label pass for one line. Returns true when the line
/// carried a recognized label (even if the field was already set), so
/// the caller knows not to run heuristics on it.
pub(crate) fn apply_structured_line(line: &str, builder: &mut RecordBuilder) -> bool {
    for rule in STRUCTURED_RULES {
        for keyword in rule.keywords {
            if let Some(value) = strip_keyword(line, keyword, rule.bare_keyword) {
                if value.is_empty() {
                    return true;
                }
                let accepted = builder.set_from_label(rule.field, value.to_string());
                if accepted && rule.backfill_brand {
                    if let Some(first_token) = value.split_whitespace().next() {
                        builder.set_from_label(Field::Brand, first_token.to_string());
                    }
                }
                return true;
            }
        }
    }
    false
}

/// Legacy-label pass for one line.
pub(crate) fn apply_legacy_line(line: &str, builder: &mut RecordBuilder) {
    for (keyword, field, overwrites_guess) in LEGACY_RULES {
        if let Some(value) = strip_keyword(line, keyword, false) {
            if value.is_empty() {
                return;
            }
            if *overwrites_guess {
                builder.set_from_legacy_label(*field, value.to_string());
            } else {
                builder.set_from_label(*field, value.to_string());
            }
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_keyword_requires_colon_by_default() {
        assert_eq!(strip_keyword("Marca: Honor", "marca", false), Some("Honor"));
        assert_eq!(strip_keyword("marca:Honor", "marca", false), Some("Honor"));
        assert_eq!(strip_keyword("Marca Honor", "marca", false), None);
    }

    #[test]
    fn bare_keyword_accepts_whitespace_separator() {
        assert_eq!(
            strip_keyword("Serie RFCXA1533XA", "serie", true),
            Some("RFCXA1533XA")
        );
        assert_eq!(
            strip_keyword("origen AM4U9X4904G06824", "origen", true),
            Some("AM4U9X4904G06824")
        );
        // The keyword must end at a boundary.
        assert_eq!(strip_keyword("Serienummer 123", "serie", true), None);
    }

    #[test]
    fn sn_prefix_does_not_match_prose() {
        assert_eq!(strip_keyword("Snapdragon 8 Gen 3", "sn", false), None);
        assert_eq!(strip_keyword("SN: ABC12345678", "sn", false), Some("ABC12345678"));
    }

    #[test]
    fn phone_name_label_is_not_swallowed_by_bare_nombre() {
        let mut builder = RecordBuilder::new();
        assert!(apply_structured_line("Nombre del tlf: X7B", &mut builder));
        assert_eq!(builder.into_record().model_name.as_deref(), Some("X7B"));
    }

    #[test]
    fn bare_nombre_still_matches_with_colon() {
        let mut builder = RecordBuilder::new();
        assert!(apply_structured_line("Nombre: Redmi Note 13", &mut builder));
        let record = builder.into_record();
        assert_eq!(record.model_name.as_deref(), Some("Redmi Note 13"));
        // Spanish labels do not backfill the brand.
        assert_eq!(record.brand, None);
    }

    #[test]
    fn generic_model_name_family_backfills_brand() {
        let mut builder = RecordBuilder::new();
        assert!(apply_structured_line("Model Name: Honor X7B", &mut builder));
        let record = builder.into_record();
        assert_eq!(record.model_name.as_deref(), Some("Honor X7B"));
        assert_eq!(record.brand.as_deref(), Some("Honor"));
    }

    #[test]
    fn backfill_skipped_when_value_was_not_accepted() {
        let mut builder = RecordBuilder::new();
        assert!(apply_structured_line("Nombre del tlf: X7B", &mut builder));
        assert!(apply_structured_line("Model Name: Honor X7B", &mut builder));
        let record = builder.into_record();
        assert_eq!(record.model_name.as_deref(), Some("X7B"));
        assert_eq!(record.brand, None);
    }

    #[test]
    fn label_with_empty_value_consumes_line_without_setting() {
        let mut builder = RecordBuilder::new();
        assert!(apply_structured_line("Marca:", &mut builder));
        assert!(builder.into_record().brand.is_none());
    }

    #[test]
    fn legacy_serial_keyword_does_not_match_serial_number() {
        // "Serial Number:" belongs to the structured vocabulary; the
        // legacy "serial" keyword must not half-match it.
        let mut builder = RecordBuilder::new();
        apply_legacy_line("Serial Number: ABC12345678", &mut builder);
        assert!(builder.into_record().serial.is_none());
    }

    #[test]
    fn legacy_model_description_sets_brand_only_when_unset() {
        let mut builder = RecordBuilder::new();
        apply_legacy_line("Model Description: Galaxy device", &mut builder);
        assert_eq!(builder.into_record().brand.as_deref(), Some("Galaxy device"));

        let mut builder = RecordBuilder::new();
        assert!(builder.set_from_label(Field::Brand, "Samsung".to_string()));
        apply_legacy_line("Model Description: Galaxy device", &mut builder);
        assert_eq!(builder.into_record().brand.as_deref(), Some("Samsung"));
    }
}
