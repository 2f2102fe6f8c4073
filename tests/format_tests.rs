mod common;

use common::{sample_archive, EXEMPLAR, FSH, LTEXT, S3D};
use dbpf_grep::{format_record, read_index, tgi_text, MatchPattern, TgiRecord, TypeLabel, TypeNameTable};
use std::io::Cursor;

static LOWERCASE_LABELS: &[TypeLabel] = &[TypeLabel { type_id: EXEMPLAR, name: "exemplar", groups: &[] }];

fn lines(table: &TypeNameTable) -> Vec<String> {
    read_index(&mut Cursor::new(sample_archive()))
        .unwrap()
        .iter()
        .map(|r| format_record(r, table))
        .collect()
}

#[test]
fn test_sample_lines() {
    let lines = lines(TypeNameTable::standard());
    assert_eq!(lines, vec!["6534284A-12345678-00000001 (Exemplar)", "5AD0E817-00000000-00000002"]);
}

#[test]
fn test_format_is_deterministic() {
    let record = TgiRecord::new(FSH, 0x46A006B0, 0xABC);
    let table = TypeNameTable::standard();
    let first = format_record(&record, table);
    let _ = format_record(&TgiRecord::new(EXEMPLAR, 0, 0), table);
    assert_eq!(format_record(&record, table), first);
}

#[test]
fn test_group_labels() {
    let table = TypeNameTable::standard();
    assert_eq!(
        format_record(&TgiRecord::new(EXEMPLAR, 0x2821ED93, 0x5), table),
        "6534284A-2821ED93-00000005 (Exemplar: Road)"
    );
    assert_eq!(
        format_record(&TgiRecord::new(FSH, 0x46A006B0, 0xFF), table),
        "7AB50E44-46A006B0-000000FF (FSH: UI Image)"
    );
    // WAV replaces the LText name entirely
    assert_eq!(
        format_record(&TgiRecord::new(LTEXT, 0xAA4D1933, 0x1), table),
        "2026960B-AA4D1933-00000001 (WAV)"
    );
    assert_eq!(
        format_record(&TgiRecord::new(LTEXT, 0x12345678, 0x1), table),
        "2026960B-12345678-00000001 (LText)"
    );
}

#[test]
fn test_type_zero_is_ini() {
    let table = TypeNameTable::standard();
    assert_eq!(table.lookup(0).map(|l| l.name), Some("INI"));
    assert_eq!(format_record(&TgiRecord::new(0, 0, 0), table), "00000000-00000000-00000000 (INI)");
}

#[test]
fn test_unknown_type_has_no_suffix() {
    let table = TypeNameTable::standard();
    assert!(table.lookup(S3D).is_none());
    assert!(table.lookup(0xDEADBEEF).is_none());
    assert_eq!(format_record(&TgiRecord::new(0xDEADBEEF, 1, 2), table), "DEADBEEF-00000001-00000002");
}

#[test]
fn test_wide_instance() {
    let record = TgiRecord { instance_hi: Some(0x00A1B2C3), ..TgiRecord::new(0x220557DA, 0, 0xD4E5F607) };
    assert_eq!(tgi_text(&record), "220557DA-00000000-00A1B2C3D4E5F607");
    assert_eq!(record.instance(), 0x00A1B2C3_D4E5F607);
}

#[test]
fn test_empty_pattern_matches_everything() {
    let pattern = MatchPattern::all();
    assert!(pattern.is_empty());
    for line in lines(TypeNameTable::standard()) {
        assert!(pattern.matches(&line));
    }
    assert!(pattern.matches(""));
    assert!(MatchPattern::new(Vec::<String>::new(), true).unwrap().matches("anything"));
}

#[test]
fn test_pattern_filters_by_name_and_hex() {
    let lines = lines(TypeNameTable::standard());

    let by_name = MatchPattern::new(["Exemplar"], false).unwrap();
    let hits: Vec<_> = lines.iter().filter(|l| by_name.matches(l)).collect();
    assert_eq!(hits, vec!["6534284A-12345678-00000001 (Exemplar)"]);

    let by_hex = MatchPattern::new(["-0000000[12]$"], false).unwrap();
    assert_eq!(lines.iter().filter(|l| by_hex.matches(l)).count(), 1);

    let by_group = MatchPattern::new([r"^[0-9A-F]{8}-00000000-"], false).unwrap();
    assert!(!by_group.matches(&lines[0]));
    assert!(by_group.matches(&lines[1]));
}

#[test]
fn test_patterns_are_or_combined() {
    let line = "6534284A-12345678-00000001 (Exemplar)";
    let single = MatchPattern::new(["Exemplar"], false).unwrap();
    let both = MatchPattern::new(["Exemplar", "S3D"], false).unwrap();
    let miss = MatchPattern::new(["S3D", "FSH"], false).unwrap();

    assert!(single.matches(line));
    assert!(both.matches(line));
    assert!(!miss.matches(line));
    assert!(MatchPattern::new(["S3D", "FSH", "1234"], false).unwrap().matches(line));
}

#[test]
fn test_case_sensitivity() {
    let line = "6534284A-12345678-00000001 (Exemplar)";
    assert!(!MatchPattern::new(["exemplar"], false).unwrap().matches(line));

    let ci = MatchPattern::new(["exemplar", "6534284a"], true).unwrap();
    assert!(ci.ignore_case());
    assert!(ci.matches(line));
    assert_eq!(ci.matches(&line.to_uppercase()), ci.matches(line));
    assert_eq!(ci.matches(&line.to_lowercase()), ci.matches(line));
}

#[test]
fn test_inline_flag_with_lowercase_label() {
    let table = TypeNameTable::new(LOWERCASE_LABELS);
    let line = format_record(&TgiRecord::new(EXEMPLAR, 0, 1), &table);
    assert_eq!(line, "6534284A-00000000-00000001 (exemplar)");

    assert!(MatchPattern::new(["(?i)exemplar"], true).unwrap().matches(&line));
    assert!(MatchPattern::new(["(?i)EXEMPLAR"], false).unwrap().matches(&line));
    assert!(MatchPattern::new(["Exemplar"], true).unwrap().matches(&line));
}

#[test]
fn test_invalid_pattern() {
    assert!(MatchPattern::new(["(unclosed"], false).is_err());
    assert!(MatchPattern::new(["ok", "[z-a]"], true).is_err());
}
