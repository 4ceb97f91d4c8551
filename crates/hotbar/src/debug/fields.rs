use crate::hotbar::{RawDisplayRecord, RawRecastRecord, SlotRecord};

/// Renders one field of a record
pub type FieldFormatter<T> = fn(&T) -> String;

/// Record type with a fixed, ordered list of named fields
pub trait DebugFields: SlotRecord + 'static {
    const FIELDS: &'static [(&'static str, FieldFormatter<Self>)];
}

pub static DISPLAY_FIELDS: &[(&str, FieldFormatter<RawDisplayRecord>)] = &[
    ("name", |r| r.name.clone()),
    ("keybind", |r| r.keybind.clone()),
    ("modifiers", |r| r.modifiers.to_string()),
    ("key_code", |r| r.key_code.to_string()),
    ("padding", |r| format!("{:?}", r.padding)),
    ("id", |r| r.id.to_string()),
    ("id2", |r| r.id2.to_string()),
    ("icon_id", |r| r.icon_id.to_string()),
    ("unknown", |r| format!("{:?}", r.unknown)),
];

pub static RECAST_FIELDS: &[(&str, FieldFormatter<RawRecastRecord>)] = &[
    ("category", |r| r.category.to_string()),
    ("unknown1", |r| format!("{:?}", r.unknown1)),
    ("slot_type", |r| r.slot_type.to_string()),
    ("id", |r| r.id.to_string()),
    ("icon", |r| r.icon.to_string()),
    ("is_available", |r| r.is_available.to_string()),
    ("has_charges_available", |r| r.has_charges_available.to_string()),
    ("unknown2", |r| format!("{:?}", r.unknown2)),
    ("gcd_cooldown_percent", |r| r.gcd_cooldown_percent.to_string()),
    ("cooldown_percent", |r| r.cooldown_percent.to_string()),
    ("cost_or_cooldown", |r| r.cost_or_cooldown.to_string()),
    ("item_quantity", |r| r.item_quantity.to_string()),
    ("unknown3", |r| format!("{:?}", r.unknown3)),
    ("proc_or_combo", |r| r.proc_or_combo.to_string()),
    ("in_range", |r| r.in_range.to_string()),
];

impl DebugFields for RawDisplayRecord {
    const FIELDS: &'static [(&'static str, FieldFormatter<Self>)] = DISPLAY_FIELDS;
}

impl DebugFields for RawRecastRecord {
    const FIELDS: &'static [(&'static str, FieldFormatter<Self>)] = RECAST_FIELDS;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_listed_once() {
        let names: Vec<&str> = DISPLAY_FIELDS.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), 9);
        assert_eq!(names.first(), Some(&"name"));

        let mut recast: Vec<&str> = RECAST_FIELDS.iter().map(|(n, _)| *n).collect();
        assert_eq!(recast.len(), 15);
        recast.sort_unstable();
        recast.dedup();
        assert_eq!(recast.len(), 15);
    }

    #[test]
    fn test_reserved_bytes_render_as_lists() {
        let record = RawRecastRecord {
            unknown1: [1, 2, 3, 4],
            ..Default::default()
        };
        let (_, format) = RECAST_FIELDS[1];
        assert_eq!(format(&record), "[1, 2, 3, 4]");
    }
}
