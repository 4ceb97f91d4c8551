use strum::IntoEnumIterator;

use crate::debug::DebugFields;
use crate::hotbar::HotbarType;
use crate::memory::layout::NUM_SLOTS;

/// Separator between columns
const COLUMN_GAP: &str = "  ";

/// All fields of one record as `name=value`, in layout order
pub fn format_record<T: DebugFields>(record: &T) -> String {
    components(record).join(COLUMN_GAP)
}

/// One line per slot, `[Slot01] name=...`, columns aligned within the bar
pub fn format_bar<T: DebugFields>(bar: &[T; NUM_SLOTS]) -> String {
    let rows: Vec<Vec<String>> = bar.iter().map(components).collect();
    let widths = column_widths(&rows);

    let mut out = String::new();
    for (slot, row) in rows.iter().enumerate() {
        out.push_str(&format!("[Slot{:02}] ", slot + 1));
        write_row(&mut out, row, &widths);
    }
    out
}

/// Whole table, `[HB1] [Slot01] name=...`, columns aligned across every bar
pub fn format_table<T: DebugFields>(bars: &[[T; NUM_SLOTS]]) -> String {
    let rows: Vec<Vec<String>> = bars.iter().flatten().map(components).collect();
    let widths = column_widths(&rows);

    let mut out = String::new();
    for (bar_type, bar_rows) in HotbarType::iter().zip(rows.chunks(NUM_SLOTS)) {
        for (slot, row) in bar_rows.iter().enumerate() {
            out.push_str(&format!("[{}] [Slot{:02}] ", bar_type.short_label(), slot + 1));
            write_row(&mut out, row, &widths);
        }
    }
    out
}

fn components<T: DebugFields>(record: &T) -> Vec<String> {
    T::FIELDS
        .iter()
        .map(|(name, format)| format!("{}={}", name, format(record)))
        .collect()
}

/// Widest entry of every column
fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn write_row(out: &mut String, row: &[String], widths: &[usize]) {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(component, &width)| format!("{:<width$}", component))
        .collect();
    out.push_str(&padded.join(COLUMN_GAP));
    out.push('\n');
}
