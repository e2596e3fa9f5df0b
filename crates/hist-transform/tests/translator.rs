//! Tests for line translation.

use chrono::NaiveDate;
use hist_model::{BarcodeIndex, CodeDomain, CodeTable, FormatOptions};
use hist_transform::{FixedClock, TranslationTables, Translator};

fn commands() -> CodeTable {
    CodeTable::try_from_pairs(
        CodeDomain::Command,
        [
            ("IY", "Cancel Hold"),
            ("EV", "Discharge Item"),
            ("CV", "Charge Item"),
            ("JZ", "Create Hold"),
        ],
    )
    .expect("command codes")
}

fn data_codes() -> CodeTable {
    CodeTable::try_from_pairs(
        CodeDomain::Data,
        [
            ("FE", "station_library"),
            ("FG", "library"),
            ("FF", "library_station"),
            ("NQ", "item_id"),
            ("UO", "user_id"),
            ("Uf", "user_pin"),
            ("IQ", "catalog_key_number"),
            ("IS", "call_sequence_code"),
            ("IT", "copy_number"),
            ("CO", "date_of_discharge"),
            ("HB", "date_hold_expires"),
            ("UK", "user_last_activity"),
            ("dC", "client_type"),
            ("tJ", "transit_to"),
            ("aA", "entry_or_tag_data"),
            ("HK", "hold_type"),
        ],
    )
    .expect("data codes")
}

fn translator() -> Translator {
    let client_types =
        CodeTable::try_from_pairs(CodeDomain::ClientType, [("5", "CLIENT_ONLINE_CATALOG")])
            .expect("client types");
    let barcodes: BarcodeIndex = [("2371230|55|1|", "31221012345678")].into_iter().collect();
    let tables = TranslationTables::new(commands(), data_codes())
        .with_client_types(client_types)
        .with_barcodes(barcodes);
    let today = NaiveDate::from_ymd_opt(2023, 1, 18).expect("date");
    Translator::new(tables, FormatOptions::default()).with_clock(Box::new(FixedClock(today)))
}

fn pairs(record: &hist_model::Record) -> Vec<(String, String)> {
    record
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn owned(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn cancel_hold_with_library_codes() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180024493003R^S59IYFWCLOUDLIBRARY^FEEPLMNA^FGEPLHVY^FFEPLCPL^O",
    );
    assert_eq!(result.errors, 0);
    assert_eq!(
        pairs(&result.record),
        owned(&[
            ("timestamp", "2023-01-18 00:24:49"),
            ("command_code", "Cancel Hold"),
            ("station_library", "MNA"),
            ("library", "HVY"),
            ("library_station", "CPL"),
        ])
    );
}

#[test]
fn serialized_record_keeps_field_order() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180024493003R^S59IYFWCLOUDLIBRARY^FEEPLMNA^FGEPLHVY^FFEPLCPL^O",
    );
    let json = serde_json::to_string(&result.record).expect("serialize");
    insta::assert_snapshot!(json, @r#"{"timestamp":"2023-01-18 00:24:49","command_code":"Cancel Hold","station_library":"MNA","library":"HVY","library_station":"CPL"}"#);
}

#[test]
fn item_key_resolves_to_barcode() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180024493003R^S01CVFFBIBLIOCOMM^IQ2371230^IS55^IT1^^O00101",
    );
    assert_eq!(result.errors, 0);
    assert_eq!(result.record.get("copy_number"), Some("1"));
    assert_eq!(result.record.get("item_id"), Some("31221012345678"));
    assert!(!result.record.contains("catalog_key_number"));
    assert!(!result.record.contains("call_sequence_code"));
}

#[test]
fn copy_number_without_key_parts_is_kept_raw() {
    let mut translator = translator();
    let result = translator.translate(1, "E202301180024493003R^S01CVFFBIBLIOCOMM^IT1^O");
    assert_eq!(result.record.get("copy_number"), Some("1"));
    assert!(!result.record.contains("item_id"));
}

#[test]
fn unknown_item_key_gets_no_item_id() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180024493003R^S01CVFFBIBLIOCOMM^IQ999^IS1^IT2^O",
    );
    assert_eq!(result.errors, 0);
    assert_eq!(result.record.get("copy_number"), Some("2"));
    assert!(!result.record.contains("item_id"));
}

#[test]
fn unknown_command_code_stops_translation() {
    let mut translator = translator();
    let result = translator.translate(
        7,
        "E202301180024493003R^S59ZZFWCLOUDLIBRARY^FEEPLMNA^zQsomething^O",
    );
    assert_eq!(result.errors, 1);
    assert!(!result.is_complete());
    assert_eq!(
        pairs(&result.record),
        owned(&[("timestamp", "2023-01-18 00:24:49")])
    );
    assert_eq!(translator.error_count(), 1);
    assert!(translator.missing_codes().is_empty());
}

#[test]
fn line_without_command_token_is_incomplete() {
    let mut translator = translator();
    let result = translator.translate(1, "E202301180024493003R");
    assert_eq!(result.errors, 1);
    assert_eq!(result.record.len(), 1);
}

#[test]
fn unknown_data_codes_are_tracked_once_and_cached() {
    let mut translator = translator();
    let first = translator.translate(
        3,
        "E202301180024493003R^S59IYFWCLOUDLIBRARY^zQfirst^zQsecond^O",
    );
    assert_eq!(first.record.get("data_code_zQ"), Some("second"));
    let second = translator.translate(
        4,
        "E202301180024493003R^S59IYFWCLOUDLIBRARY^zQthird^O",
    );
    assert_eq!(second.record.get("data_code_zQ"), Some("third"));

    let missing: Vec<(u64, &str)> = translator.missing_codes().iter().collect();
    assert_eq!(missing, vec![(3, "zQ")]);
    assert_eq!(
        translator.tables().data.resolve("zQ"),
        Some("data_code_zQ")
    );
}

#[test]
fn pin_is_redacted() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180001403066R^S01JZFFBIBLIOCOMM^UO21221027661047^UfIlovebigb00ks^O",
    );
    assert_eq!(result.record.get("user_id"), Some("21221027661047"));
    assert_eq!(result.record.get("user_pin"), Some("xxxxx"));
}

#[test]
fn dates_are_normalized() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180001403066R^S01IYFFBIBLIOCOMM^HB01/18/2024^UKTODAY^O",
    );
    assert_eq!(result.record.get("date_hold_expires"), Some("2024-01-18"));
    assert_eq!(result.record.get("user_last_activity"), Some("2023-01-18"));
}

#[test]
fn client_type_translated_or_kept() {
    let mut translator = translator();
    let known = translator.translate(1, "E202301180001313066R^S32IYFWOVERDRIVE^dC5^O");
    assert_eq!(known.record.get("client_type"), Some("CLIENT_ONLINE_CATALOG"));
    let unknown = translator.translate(2, "E202301180001313066R^S32IYFWOVERDRIVE^dC6^O");
    assert_eq!(unknown.errors, 0);
    assert_eq!(unknown.record.get("client_type"), Some("6"));
}

#[test]
fn tag_data_and_transit_prefixes_are_stripped() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180001313066R^S32IYFWOVERDRIVE^aA245Some title^tJEPLWHP^O",
    );
    assert_eq!(result.record.get("entry_or_tag_data"), Some("5Some title"));
    assert_eq!(result.record.get("transit_to"), Some("WHP"));
}

#[test]
fn discharge_gets_date_of_discharge_from_timestamp() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180024493003R^S01EVFFBIBLIOCOMM^NQ31221118073159^O",
    );
    assert_eq!(result.record.get("command_code"), Some("Discharge Item"));
    assert_eq!(result.record.get("date_of_discharge"), Some("2023-01-18"));
}

#[test]
fn explicit_discharge_date_is_not_overwritten() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180024493003R^S01EVFFBIBLIOCOMM^CO1/17/2023^O",
    );
    assert_eq!(result.record.get("date_of_discharge"), Some("2023-01-17"));
}

#[test]
fn inert_tokens_are_skipped() {
    let mut translator = translator();
    let result = translator.translate(
        1,
        "E202301180000592981R ^S01IYFFBIBLIOCOMM^^H^O00101",
    );
    assert_eq!(result.errors, 0);
    assert_eq!(result.record.len(), 2);
}

#[test]
fn same_line_translates_identically() {
    let mut translator = translator();
    let line = "E202301180024493003R^S59IYFWCLOUDLIBRARY^FEEPLMNA^zQnew^IQ2371230^IS55^IT1^O";
    let first = serde_json::to_string(&translator.translate(1, line).record).unwrap();
    let second = serde_json::to_string(&translator.translate(1, line).record).unwrap();
    assert_eq!(first, second);
    assert_eq!(translator.record_count(), 2);
}

#[test]
fn fixture_format_overrides() {
    let options = FormatOptions::default()
        .with_field_separator('|')
        .with_record_start('X')
        .with_end_of_record("ZZ")
        .with_branch_prefix_len(2);
    let tables = TranslationTables::new(commands(), data_codes());
    let mut translator = Translator::new(tables, options);
    let result = translator.translate(
        1,
        "X202301180024493003R|S59IYFWCLOUDLIBRARY|FGABHVY|ZZ01",
    );
    assert_eq!(result.record.get("timestamp"), Some("2023-01-18 00:24:49"));
    assert_eq!(result.record.get("library"), Some("HVY"));
    assert_eq!(result.record.len(), 3);
}
