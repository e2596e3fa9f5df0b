//! End-to-end tests for the conversion pipeline.

use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;
use hist_cli::pipeline::{
    Destination, OutputConfig, SourceConfig, check_output, convert_file, discover, load,
};
use hist_ingest::SymphonyPaths;
use hist_model::FormatOptions;
use hist_output::OutputFormat;
use hist_transform::Translator;
use serde_json::Value;
use tempfile::TempDir;

const DAY_ONE: &str = "\
E202301180024493003R ^S59IYFWCLOUDLIBRARY^FEEPLMNA^UO21221012345678^Uf1234^O
\r
E202301180025001234R ^S01EVFFSIPCHK^FEEPLMNA^IQ2371230^IS55^IT1^Zq9^O0
E202301180026001234R ^S01XXFFSIPCHK^O0
";

const DAY_TWO: &str = "E202301190900001234R ^S01IYFFSIPCHK^Zz4^O0\n";

struct Fixture {
    _dir: TempDir,
    unicorn: SymphonyPaths,
    items: PathBuf,
    out_dir: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let unicorn = SymphonyPaths::new(dir.path().join("Unicorn"));
    std::fs::create_dir_all(unicorn.hist_dir()).unwrap();
    std::fs::create_dir_all(unicorn.command_codes().parent().unwrap()).unwrap();
    std::fs::write(
        unicorn.command_codes(),
        "IY|Cancel Hold|\nEV|Discharge Item|\n",
    )
    .unwrap();
    std::fs::write(
        unicorn.data_codes(),
        "FE|Station Library|\nUO|User ID|\nUf|User PIN|\nIQ|Catalog Key Number|\n\
         IS|Call Sequence Code|\nIT|Copy Number|\nNQ|Item ID|\n",
    )
    .unwrap();
    std::fs::write(unicorn.hist_dir().join("20230118.hist"), DAY_ONE).unwrap();

    let file = std::fs::File::create(unicorn.hist_dir().join("20230119.hist.gz")).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(DAY_TWO.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let items = dir.path().join("items.lst");
    std::fs::write(&items, "2371230|55|1|31221012345678|\nbad\n").unwrap();
    let out_dir = dir.path().join("json");
    Fixture {
        _dir: dir,
        unicorn,
        items,
        out_dir,
    }
}

fn read_array(path: &std::path::Path) -> Vec<Value> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn converts_all_hist_files_with_global_line_numbers() {
    let fx = fixture();
    let config = SourceConfig {
        item_barcodes: Some(fx.items.clone()),
        ..SourceConfig::new(fx.unicorn.clone())
    };
    let loaded = load(&config).unwrap();
    assert_eq!(loaded.counts.command_codes, 2);
    assert_eq!(loaded.counts.data_codes, 11);
    assert_eq!(loaded.counts.items, 1);
    assert_eq!(loaded.counts.malformed_items, 1);

    let (files, failures) = discover(&fx.unicorn, &[], true).unwrap();
    assert!(failures.is_empty());
    assert_eq!(files.len(), 2);

    let output = OutputConfig {
        format: OutputFormat::Array,
        destination: Destination::Directory(fx.out_dir.clone()),
    };
    let mut translator = Translator::new(loaded.tables, FormatOptions::default());
    let mut line_no = 0;
    let first = convert_file(&mut translator, &files[0], &output, &mut line_no).unwrap();
    let second = convert_file(&mut translator, &files[1], &output, &mut line_no).unwrap();

    assert_eq!(first.stats.lines, 4);
    assert_eq!(first.stats.records, 3);
    assert_eq!(first.stats.errors, 1);
    assert_eq!(second.stats.records, 1);
    assert_eq!(line_no, 5);
    assert_eq!(translator.record_count(), 4);
    assert_eq!(translator.error_count(), 1);

    let missing: Vec<(u64, String)> = translator
        .missing_codes()
        .iter()
        .map(|(line, code)| (line, code.to_string()))
        .collect();
    assert_eq!(missing, vec![(3, "Zq".to_string()), (5, "Zz".to_string())]);

    let records = read_array(&fx.out_dir.join("20230118.json"));
    assert_eq!(records.len(), 3);
    insta::assert_json_snapshot!(records[0], @r#"
    {
      "command_code": "Cancel Hold",
      "station_library": "MNA",
      "timestamp": "2023-01-18 00:24:49",
      "user_id": "21221012345678",
      "user_pin": "xxxxx"
    }
    "#);
    assert_eq!(records[1]["item_id"], "31221012345678");
    assert_eq!(records[1]["data_code_Zq"], "9");
    assert!(records[1].get("catalog_key_number").is_none());
    assert!(records[2].get("command_code").is_none());

    let day_two = read_array(&fx.out_dir.join("20230119.json"));
    assert_eq!(day_two[0]["data_code_Zz"], "4");
}

#[test]
fn mongo_output_is_one_object_per_line() {
    let fx = fixture();
    let loaded = load(&SourceConfig::new(fx.unicorn.clone())).unwrap();
    let (files, _) = discover(&fx.unicorn, &[PathBuf::from("20230118.hist")], false).unwrap();
    let output = OutputConfig {
        format: OutputFormat::Lines,
        destination: Destination::Directory(fx.out_dir.clone()),
    };
    let mut translator = Translator::new(loaded.tables, FormatOptions::default());
    let mut line_no = 0;
    let converted = convert_file(&mut translator, &files[0], &output, &mut line_no).unwrap();

    let text = std::fs::read_to_string(converted.output.unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert!(serde_json::from_str::<Value>(line).unwrap().is_object());
    }
}

#[test]
fn unresolved_hist_names_are_reported_not_fatal() {
    let fx = fixture();
    let names = [PathBuf::from("20230118.hist"), PathBuf::from("19990101.hist")];
    let (files, failures) = discover(&fx.unicorn, &names, false).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].hist_file, PathBuf::from("19990101.hist"));
}

#[test]
fn nothing_to_convert_is_an_error() {
    let fx = fixture();
    let err = discover(&fx.unicorn, &[], false).unwrap_err();
    assert!(err.to_string().contains("--hist-file"));
}

#[test]
fn missing_command_codes_fail_the_load() {
    let fx = fixture();
    let config = SourceConfig {
        command_codes: Some(fx.unicorn.root().join("nope")),
        ..SourceConfig::new(fx.unicorn.clone())
    };
    let err = load(&config).unwrap_err();
    assert!(format!("{err:#}").contains("load command codes"));
}

#[test]
fn stdout_arrays_are_limited_to_one_file() {
    let array = OutputConfig {
        format: OutputFormat::Array,
        destination: Destination::Stdout,
    };
    assert!(check_output(&array, 1).is_ok());
    let err = check_output(&array, 2).unwrap_err();
    assert!(err.to_string().contains("--mongo"));

    let lines = OutputConfig {
        format: OutputFormat::Lines,
        destination: Destination::Stdout,
    };
    assert!(check_output(&lines, 3).is_ok());
    let files = OutputConfig {
        format: OutputFormat::Array,
        destination: Destination::Directory(PathBuf::from("json")),
    };
    assert!(check_output(&files, 3).is_ok());
}

#[test]
fn truncated_archive_leaves_no_output_file() {
    let fx = fixture();
    let packed = fx.unicorn.hist_dir().join("20230119.hist.gz");
    let mut bytes = std::fs::read(&packed).unwrap();
    bytes.truncate(bytes.len() - 6);
    std::fs::write(&packed, bytes).unwrap();

    let loaded = load(&SourceConfig::new(fx.unicorn.clone())).unwrap();
    let output = OutputConfig {
        format: OutputFormat::Array,
        destination: Destination::Directory(fx.out_dir.clone()),
    };
    let mut translator = Translator::new(loaded.tables, FormatOptions::default());
    let mut line_no = 0;
    assert!(convert_file(&mut translator, &packed, &output, &mut line_no).is_err());
    assert!(!fx.out_dir.join("20230119.json").exists());
}
