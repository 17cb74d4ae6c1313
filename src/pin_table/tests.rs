use super::*;

use std::io::Write;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;

const JSON_TABLE: &str = r#"{ "SW[0]": "PIN_C10", "sw[1]": "PIN_C11", "CLOCK_50": "PIN_P11" }"#;
const YAML_TABLE: &str = "SW[0]: PIN_C10\nsw[1]: PIN_C11\nCLOCK_50: PIN_P11\n";

fn expected() -> PinTable {
    [("SW[0]", "PIN_C10"), ("SW[1]", "PIN_C11"), ("CLOCK_50", "PIN_P11")]
        .into_iter()
        .collect()
}

fn scratch_file(name: &str, data: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pex-pin-table-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

fn gzipped(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_lookup_is_case_insensitive() {
    let table = expected();
    assert_eq!(table.lookup("sw[0]"), Some("PIN_C10"));
    assert_eq!(table.lookup("Sw[1]"), Some("PIN_C11"));
    assert_eq!(table.lookup("SW[2]"), None);
}

#[test]
fn test_insert_normalizes_names() {
    let mut table = PinTable::new();
    assert!(table.is_empty());
    assert_eq!(table.insert("ledr[0]", "PIN_A8"), None);
    assert_eq!(table.insert("LEDR[0]", "PIN_A9"), Some("PIN_A8".to_string()));
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("LEDR[0]"), Some("PIN_A9"));
}

#[test]
fn test_json_and_yaml_readers_agree() {
    let json = PinTable::from_reader(JSON_TABLE.as_bytes(), TableFormat::Json).unwrap();
    let yaml = PinTable::from_reader(YAML_TABLE.as_bytes(), TableFormat::Yaml).unwrap();
    assert_eq!(json, expected());
    assert_eq!(yaml, expected());
}

#[test]
fn test_malformed_table() {
    let err = PinTable::from_reader(&b"[1, 2, 3]"[..], TableFormat::Json).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn test_guess_format() {
    assert_eq!(guess_format(Path::new("de10.json")), (Some(TableFormat::Json), false));
    assert_eq!(guess_format(Path::new("a/b/DE10.YML")), (Some(TableFormat::Yaml), false));
    assert_eq!(guess_format(Path::new("de10.yaml.gz")), (Some(TableFormat::Yaml), true));
    assert_eq!(guess_format(Path::new("de10.txt")), (None, false));
}

#[test]
fn test_load_plain_and_gzipped_files() {
    let json = scratch_file("table.json", JSON_TABLE.as_bytes());
    let yaml = scratch_file("table.yml", YAML_TABLE.as_bytes());
    let gz = scratch_file("table.json.gz", &gzipped(JSON_TABLE));

    assert_eq!(PinTable::load(&json).unwrap(), expected());
    assert_eq!(PinTable::load(&yaml).unwrap(), expected());
    assert_eq!(PinTable::load(&gz).unwrap(), expected());
}

#[test]
fn test_open_with_explicit_options() {
    let path = scratch_file("table.pins", &gzipped(YAML_TABLE));
    let opts = OpenOpts { format: Some(TableFormat::Yaml), gzip: Some(true) };
    assert_eq!(PinTable::open(&path, opts).unwrap(), expected());
}

#[test]
fn test_load_errors() {
    let unknown = scratch_file("table.txt", b"");
    assert!(matches!(PinTable::load(&unknown), Err(LoadError::UnknownFormat(_))));

    let missing = std::env::temp_dir().join("pex-no-such-table.json");
    assert!(matches!(PinTable::load(&missing), Err(LoadError::CantOpenFile { .. })));
}
