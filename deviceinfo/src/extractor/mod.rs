//! Device-info extraction from pasted free text.
//!
//! Takes an arbitrary multi-line blob (a phone's "about" screen, a
//! supplier message) and produces a best-effort [`DeviceRecord`]. The
//! extraction is deterministic, side-effect-free, and never fails:
//! unparsable input simply yields an empty record.
//!
//! Extraction runs as three fixed-order passes over the trimmed lines:
//!
//! 1. IMEI detection (explicit `imei:` labels beat implicit runs).
//! 2. Structured labels, with label-free shape heuristics as the
//!    per-line fallback.
//! 3. Legacy colon labels kept for backward compatibility.
//!
//! Precedence between the passes is enforced by [`builder`], which
//! tracks where each value came from.

mod builder;
mod heuristics;
mod imei;
mod labels;
mod record;

pub use record::DeviceRecord;

/// Extract a device record from pasted text.
///
/// ```
/// use deviceinfo::extract;
///
/// let record = extract("Samsung S24 ultra\n351123965542967");
/// assert_eq!(record.model_name.as_deref(), Some("Samsung S24 ultra"));
/// assert_eq!(record.imei.as_deref(), Some("351123965542967"));
/// ```
pub fn extract(text: &str) -> DeviceRecord {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut builder = builder::RecordBuilder::new();

    imei::scan(&lines, &mut builder);

    let first_content = lines.iter().position(|line| !line.is_empty());
    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        if labels::apply_structured_line(line, &mut builder) {
            continue;
        }
        heuristics::apply(line, Some(index) == first_content, &mut builder);
    }

    for line in &lines {
        if !line.is_empty() {
            labels::apply_legacy_line(line, &mut builder);
        }
    }

    builder.into_record()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_paste_extracts_all_named_fields() {
        let text = "Marca: Honor\n\
                    Nombre del tlf: X7B\n\
                    Imei: 864414074675206\n\
                    Modelo: CLK-LX3\n\
                    Origen: AM4U9X4904G06824";
        let record = extract(text);
        assert_eq!(record.brand.as_deref(), Some("Honor"));
        assert_eq!(record.model_name.as_deref(), Some("X7B"));
        assert_eq!(record.model_code.as_deref(), Some("CLK-LX3"));
        assert_eq!(record.serial.as_deref(), Some("AM4U9X4904G06824"));
    }

    #[test]
    fn unlabeled_paste_extracts_by_shape() {
        let text = "Samsung S24 ultra\n\
                    351123965542967\n\
                    SM-S928BZKKTPA\n\
                    Serie RFCXA1533XA";
        let record = extract(text);
        assert_eq!(record.model_name.as_deref(), Some("Samsung S24 ultra"));
        assert_eq!(record.brand.as_deref(), Some("Samsung"));
        assert_eq!(record.imei.as_deref(), Some("351123965542967"));
        assert_eq!(record.model_code.as_deref(), Some("SM-S928BZKKTPA"));
        assert_eq!(record.serial.as_deref(), Some("RFCXA1533XA"));
    }

    #[test]
    fn pure_digit_line_goes_to_imei_never_serial() {
        let record = extract("861234567890123");
        assert_eq!(record.imei.as_deref(), Some("861234567890123"));
        assert_eq!(record.serial, None);

        // Even repeated, the run stays out of the serial field.
        let record = extract("861234567890123\n861234567890123");
        assert_eq!(record.imei.as_deref(), Some("861234567890123"));
        assert_eq!(record.serial, None);
    }

    #[test]
    fn labeled_serial_equal_to_imei_is_dropped() {
        let record = extract("Imei: 861234567890123\nSerie: 861234567890123");
        assert_eq!(record.imei.as_deref(), Some("861234567890123"));
        assert_eq!(record.serial, None);
    }

    #[test]
    fn empty_input_yields_empty_record() {
        let record = extract("");
        assert!(record.is_empty());

        let record = extract("\n\n   \n");
        assert!(record.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "Samsung S24 ultra\n351123965542967\nSM-S928BZKKTPA";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn leading_blank_lines_shift_the_first_content_line() {
        let record = extract("\n\nPixel 9 Pro\n351123965542967");
        assert_eq!(record.model_name.as_deref(), Some("Pixel 9 Pro"));
        assert_eq!(record.brand.as_deref(), Some("Pixel"));
    }

    #[test]
    fn legacy_export_format_is_supported() {
        let text = "Model Description: Galaxy device\n\
                    Model Name: Galaxy S24\n\
                    Market Model: SM-S921B\n\
                    Model Code: SM-S921BZAD\n\
                    Memory: 256+8 GB\n\
                    IMEI: 353123965542961\n\
                    Serial: R5CX71ABCDE";
        let record = extract(text);
        assert_eq!(record.model_name.as_deref(), Some("Galaxy S24"));
        assert_eq!(record.market_model.as_deref(), Some("SM-S921B"));
        assert_eq!(record.model_code.as_deref(), Some("SM-S921BZAD"));
        assert_eq!(record.memory.as_deref(), Some("256+8 GB"));
        assert_eq!(record.imei.as_deref(), Some("353123965542961"));
        assert_eq!(record.serial.as_deref(), Some("R5CX71ABCDE"));
        // "Model Name:" backfills the brand before the legacy
        // "Model Description:" line is consulted.
        assert_eq!(record.brand.as_deref(), Some("Galaxy"));
    }

    #[test]
    fn legacy_label_displaces_a_shape_guess() {
        let text = "Sony Xperia 1 II\n\
                    XQ-AT51\n\
                    Model Code: XQ-AT52\n\
                    Serial: CB512345678";
        let record = extract(text);
        assert_eq!(record.model_name.as_deref(), Some("Sony Xperia 1 II"));
        assert_eq!(record.model_code.as_deref(), Some("XQ-AT52"));
        assert_eq!(record.serial.as_deref(), Some("CB512345678"));
    }

    #[test]
    fn tac_prefixed_run_beats_earlier_generic_run() {
        let record = extract("123456789012345\n861234567890123");
        assert_eq!(record.imei.as_deref(), Some("861234567890123"));
    }

    #[test]
    fn generic_run_is_used_when_no_tac_run_exists() {
        let record = extract("code 123456789012345");
        assert_eq!(record.imei.as_deref(), Some("123456789012345"));
    }

    #[test]
    fn explicit_imei_label_beats_implicit_run_found_earlier() {
        let record = extract("861234567890123\nImei: 351123965542967");
        assert_eq!(record.imei.as_deref(), Some("351123965542967"));
    }

    #[test]
    fn crlf_input_is_trimmed_per_line() {
        let record = extract("Samsung S24 ultra\r\n351123965542967\r\n");
        assert_eq!(record.model_name.as_deref(), Some("Samsung S24 ultra"));
        assert_eq!(record.imei.as_deref(), Some("351123965542967"));
    }
}
