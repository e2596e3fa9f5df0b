//! Loading a small Unicorn tree from disk.

use std::io::Write;
use std::path::Path;

use flate2::Compression as GzLevel;
use flate2::write::GzEncoder;
use hist_ingest::{
    Compression, IngestError, SymphonyPaths, load_barcode_index, load_client_types,
    load_code_table, open_hist_file,
};
use hist_model::{CodeDomain, ItemKey};
use tempfile::TempDir;

const HIST: &str = "E202301180024493003R ^S01JZFFBIBLIOCOMM^FcNONE^FEEPLJPL^UO21221012345678^Uf4444^O0\r\nE202301180025001234R ^S01EVFFSIPCHK^FEEPLMNA^NQ31221012345678^O0\n";

fn unicorn() -> (TempDir, SymphonyPaths) {
    let dir = TempDir::new().unwrap();
    let paths = SymphonyPaths::new(dir.path());
    std::fs::create_dir_all(paths.command_codes().parent().unwrap()).unwrap();
    std::fs::create_dir_all(paths.hist_dir()).unwrap();
    std::fs::write(
        paths.command_codes(),
        "JZ|Create Hold|\nEV|Discharge Item|\n\nbroken line\n",
    )
    .unwrap();
    std::fs::write(
        paths.data_codes(),
        b"FE|Station Library|\nUO|User ID|\nUf|User PIN|\nNQ|Item ID|\nN1|Jos\xe9 Field|\n",
    )
    .unwrap();
    (dir, paths)
}

fn write_gzip(path: &Path, text: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, GzLevel::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn loads_code_tables() {
    let (_dir, paths) = unicorn();
    let commands = load_code_table(&paths.command_codes(), CodeDomain::Command).unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands.resolve("EV"), Some("Discharge Item"));

    let data = load_code_table(&paths.data_codes(), CodeDomain::Data).unwrap();
    assert_eq!(data.resolve("FE"), Some("station_library"));
    assert_eq!(data.resolve("Uf"), Some("user_pin"));
    assert_eq!(data.resolve("N1"), Some("josé_field"));
}

#[test]
fn missing_code_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_code_table(&dir.path().join("cmdcode"), CodeDomain::Command).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn reads_plain_and_gzip_hist_files_alike() {
    let (_dir, paths) = unicorn();
    let plain = paths.hist_dir().join("20230118.hist");
    let packed = paths.hist_dir().join("20230117.hist.gz");
    std::fs::write(&plain, HIST).unwrap();
    write_gzip(&packed, HIST);

    let plain_reader = open_hist_file(&plain).unwrap();
    assert_eq!(plain_reader.compression(), Compression::None);
    let plain_lines: Vec<String> = plain_reader.map(Result::unwrap).collect();

    let packed_reader = open_hist_file(&packed).unwrap();
    assert_eq!(packed_reader.compression(), Compression::Gzip);
    let packed_lines: Vec<String> = packed_reader.map(Result::unwrap).collect();

    assert_eq!(plain_lines.len(), 2);
    assert!(plain_lines[0].ends_with("^O0"));
    assert_eq!(plain_lines, packed_lines);
}

#[test]
fn lzw_archives_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("20230101.hist.Z");
    std::fs::write(&path, [0x1f, 0x9d, 0x90, 0x45]).unwrap();
    let err = open_hist_file(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedCompression { .. }));
}

#[test]
fn loads_barcodes_and_counts_bad_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("items.lst");
    std::fs::write(
        &path,
        "2371230|55|1|31221012345678|\n\nnot an item\n99|1|2|31221000000001  |\n",
    )
    .unwrap();
    let load = load_barcode_index(&path).unwrap();
    assert_eq!(load.index.len(), 2);
    assert_eq!(load.malformed, 1);
    assert_eq!(
        load.index.lookup(&ItemKey::new("99", "1", "2")),
        Some("31221000000001")
    );
}

#[test]
fn client_table_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("clients.json");
    std::fs::write(&good, r#"{"5": "CLIENT_ONLINE_CATALOG", "": "EMPTY"}"#).unwrap();
    let table = load_client_types(&good).unwrap();
    assert_eq!(table.len(), 1);

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "not json").unwrap();
    let err = load_client_types(&bad).unwrap_err();
    assert!(matches!(err, IngestError::ClientTable { .. }));
    assert!(err.to_string().contains("bad.json"));
}
