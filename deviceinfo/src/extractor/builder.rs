//! Result builder with explicit overwrite policy.
//!
//! Every rule in the extractor goes through this builder, so the
//! precedence between label passes and heuristics lives in one place
//! instead of being implied by evaluation order. Each field remembers
//! where its value came from; that provenance is the guard condition
//! for the one legal kind of overwrite (a legacy label displacing a
//! heuristic guess).

use super::record::DeviceRecord;

/// Target field of an extraction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Brand,
    ModelName,
    MarketModel,
    ModelCode,
    Memory,
    Serial,
}

/// Where a field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Structured label (primary vocabulary). Never displaced.
    Label,
    /// Legacy colon label. Displaced only by a newer legacy label.
    LegacyLabel,
    /// Label-free shape heuristic. Displaced by legacy labels.
    Heuristic,
}

#[derive(Debug)]
struct Slot {
    value: String,
    origin: Origin,
}

#[derive(Debug, Default)]
pub(crate) struct RecordBuilder {
    imei: Option<String>,
    brand: Option<Slot>,
    model_name: Option<Slot>,
    market_model: Option<Slot>,
    model_code: Option<Slot>,
    memory: Option<Slot>,
    serial: Option<Slot>,
}

impl RecordBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: Field) -> &Option<Slot> {
        match field {
            Field::Brand => &self.brand,
            Field::ModelName => &self.model_name,
            Field::MarketModel => &self.market_model,
            Field::ModelCode => &self.model_code,
            Field::Memory => &self.memory,
            Field::Serial => &self.serial,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<Slot> {
        match field {
            Field::Brand => &mut self.brand,
            Field::ModelName => &mut self.model_name,
            Field::MarketModel => &mut self.market_model,
            Field::ModelCode => &mut self.model_code,
            Field::Memory => &mut self.memory,
            Field::Serial => &mut self.serial,
        }
    }

    /// Assign the IMEI. The IMEI pass owns the explicit-vs-implicit
    /// policy and runs before any serial rule, so this is a plain set.
    pub(crate) fn set_imei(&mut self, value: String) {
        self.imei = Some(value);
    }

    pub(crate) fn imei(&self) -> Option<&str> {
        self.imei.as_deref()
    }

    /// A serial candidate must never equal the value consumed as IMEI.
    fn serial_conflicts(&self, field: Field, value: &str) -> bool {
        field == Field::Serial && self.imei.as_deref() == Some(value)
    }

    /// Structured-label assignment. First label wins; an already-set
    /// field is left alone. Returns whether the value was accepted.
    pub(crate) fn set_from_label(&mut self, field: Field, value: String) -> bool {
        if self.serial_conflicts(field, &value) {
            return false;
        }
        let slot = self.slot_mut(field);
        if slot.is_none() {
            *slot = Some(Slot {
                value,
                origin: Origin::Label,
            });
            return true;
        }
        false
    }

    /// Legacy-label assignment. Displaces a heuristic guess or an older
    /// legacy value (newest explicit label wins) but never a
    /// structured-label value.
    pub(crate) fn set_from_legacy_label(&mut self, field: Field, value: String) -> bool {
        if self.serial_conflicts(field, &value) {
            return false;
        }
        let slot = self.slot_mut(field);
        match slot {
            Some(existing) if existing.origin == Origin::Label => false,
            _ => {
                *slot = Some(Slot {
                    value,
                    origin: Origin::LegacyLabel,
                });
                true
            }
        }
    }

    /// Heuristic assignment. Only fills an unset field.
    pub(crate) fn set_from_heuristic(&mut self, field: Field, value: String) -> bool {
        if self.serial_conflicts(field, &value) {
            return false;
        }
        let slot = self.slot_mut(field);
        if slot.is_none() {
            *slot = Some(Slot {
                value,
                origin: Origin::Heuristic,
            });
            return true;
        }
        false
    }

    pub(crate) fn is_set(&self, field: Field) -> bool {
        self.slot(field).is_some()
    }

    pub(crate) fn into_record(self) -> DeviceRecord {
        DeviceRecord {
            imei: self.imei,
            brand: self.brand.map(|s| s.value),
            model_name: self.model_name.map(|s| s.value),
            market_model: self.market_model.map(|s| s.value),
            model_code: self.model_code.map(|s| s.value),
            memory: self.memory.map(|s| s.value),
            serial: self.serial.map(|s| s.value),
        }
    }
}
