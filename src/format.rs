use crate::labels::TypeNameTable;
use crate::package::index::TgiRecord;
use std::borrow::Cow;

/// The hex part of a line: `TTTTTTTT-GGGGGGGG-IIIIIIII`. 64-bit instances
/// render as sixteen digits.
pub fn tgi_text(record: &TgiRecord) -> String {
    match record.instance_hi {
        Some(hi) => format!(
            "{:08X}-{:08X}-{:08X}{:08X}",
            record.type_id, record.group_id, hi, record.instance_id
        ),
        None => format!(
            "{:08X}-{:08X}-{:08X}",
            record.type_id, record.group_id, record.instance_id
        ),
    }
}

pub fn label(record: &TgiRecord, table: &TypeNameTable) -> Option<Cow<'static, str>> {
    table.label(record.type_id, record.group_id)
}

/// Canonical line used both for display and for pattern matching.
pub fn format_record(record: &TgiRecord, table: &TypeNameTable) -> String {
    let tgi = tgi_text(record);
    match label(record, table) {
        Some(name) => format!("{} ({})", tgi, name),
        None => tgi,
    }
}
