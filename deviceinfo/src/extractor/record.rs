use serde::{Deserialize, Serialize};

/// Best-effort device description assembled from pasted free text.
///
/// Every field is optional: `None` means nothing was found for it, never
/// that extraction failed. The caller merges the record into an editable
/// form, so a half-filled record is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// 15-digit equipment identity, preferring known TAC prefixes.
    pub imei: Option<String>,
    /// Short brand or description string.
    pub brand: Option<String>,
    /// Human device name (e.g. "Samsung S24 ultra").
    pub model_name: Option<String>,
    /// Public marketing name, when distinct from the device name.
    pub market_model: Option<String>,
    /// Manufacturer's internal model code (e.g. "CLK-LX3").
    pub model_code: Option<String>,
    /// Free-text memory/storage descriptor (e.g. "256+8 GB").
    pub memory: Option<String>,
    /// Manufacturer serial number.
    pub serial: Option<String>,
}

impl DeviceRecord {
    /// Number of fields a record can carry.
    pub const FIELD_COUNT: usize = 7;

    /// Number of fields that received a value.
    pub fn filled_count(&self) -> usize {
        [
            self.imei.is_some(),
            self.brand.is_some(),
            self.model_name.is_some(),
            self.market_model.is_some(),
            self.model_code.is_some(),
            self.memory.is_some(),
            self.serial.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// True when no field received a value.
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        let record = DeviceRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.filled_count(), 0);
    }

    #[test]
    fn filled_count_tracks_set_fields() {
        let record = DeviceRecord {
            imei: Some("351123965542967".to_string()),
            brand: Some("Samsung".to_string()),
            ..Default::default()
        };
        assert_eq!(record.filled_count(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let record = DeviceRecord {
            model_name: Some("X7B".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).expect("Should serialize");
        assert_eq!(json["model_name"], "X7B");
        assert!(json["imei"].is_null());
    }
}
