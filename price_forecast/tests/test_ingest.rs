use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::ingest::{parse_csv, parse_json, to_csv, to_json};
use price_forecast::{DataLoader, ForecastError, Observation};
use std::fs;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_csv_basic() {
    let csv = "date,price,symbol,volume\n\
               2024-01-02,101.5,AMZN,1200000\n\
               2024-01-01,100.0,AMZN,1000000\n";

    let data = parse_csv(csv).unwrap();

    assert_eq!(
        data,
        vec![
            Observation::new(date(2024, 1, 1), 100.0, "AMZN").with_volume(1_000_000),
            Observation::new(date(2024, 1, 2), 101.5, "AMZN").with_volume(1_200_000),
        ]
    );
}

#[test]
fn test_parse_csv_skips_unusable_rows() {
    let csv = "Date,Price\n\
               2024-01-01,100.0\n\
               not-a-date,101.0\n\
               2024-01-03,\n\
               2024-01-04,-5\n\
               2024-01-05,abc\n\
               01/06/2024,104.25\n";

    let data = parse_csv(csv).unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data[0].date, date(2024, 1, 1));
    assert_eq!(data[1].date, date(2024, 1, 6));
    assert_eq!(data[1].price, 104.25);
    assert!(data.iter().all(|o| o.symbol == "UNKNOWN"));
    assert!(data.iter().all(|o| o.volume.is_none()));
}

#[test]
fn test_parse_csv_without_required_columns() {
    let data = parse_csv("timestamp,close\n2024-01-01,100.0\n").unwrap();
    assert!(data.is_empty());
}

#[test]
fn test_parse_json_basic() {
    let json = r#"[
        {"date": "2024-01-02", "price": 101.5, "symbol": "NVDA", "volume": 2000000},
        {"date": "2024-01-01", "price": "100.0"}
    ]"#;

    let data = parse_json(json).unwrap();

    assert_eq!(
        data,
        vec![
            Observation::new(date(2024, 1, 1), 100.0, "UNKNOWN"),
            Observation::new(date(2024, 1, 2), 101.5, "NVDA").with_volume(2_000_000),
        ]
    );
}

#[test]
fn test_parse_json_malformed() {
    let result = parse_json("[{\"date\": \"2024-01-01\", ");
    match result {
        Err(ForecastError::MalformedInput(message)) => {
            assert!(message.starts_with("Invalid JSON format"));
        }
        other => panic!("Expected MalformedInput, got {:?}", other),
    }
}

#[test]
fn test_parse_json_bad_element() {
    assert!(matches!(
        parse_json(r#"[{"date": "2024-01-01"}]"#),
        Err(ForecastError::MalformedInput(_))
    ));
    assert!(matches!(
        parse_json(r#"[{"date": "yesterday", "price": 10.0}]"#),
        Err(ForecastError::MalformedInput(_))
    ));
    assert!(matches!(
        parse_json(r#"[42]"#),
        Err(ForecastError::MalformedInput(_))
    ));
}

#[test]
fn test_parse_json_non_array_is_empty() {
    let data = parse_json(r#"{"date": "2024-01-01", "price": 100.0}"#).unwrap();
    assert!(data.is_empty());
}

#[test]
fn test_csv_export_reads_back() {
    let original = vec![
        Observation::new(date(2024, 3, 1), 250.75, "CRM").with_volume(3_500_000),
        Observation::new(date(2024, 3, 2), 251.1, "CRM"),
    ];

    let text = to_csv(&original).unwrap();
    assert!(text.starts_with("date,price,symbol,volume"));

    assert_eq!(parse_csv(&text).unwrap(), original);
}

#[test]
fn test_json_export_reads_back() {
    let original = vec![Observation::new(date(2024, 3, 1), 250.75, "CRM").with_volume(3_500_000)];

    let text = to_json(&original).unwrap();
    assert_eq!(parse_json(&text).unwrap(), original);
}

#[test]
fn test_data_loader_from_path() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("prices.csv");
    let json_path = dir.path().join("prices.JSON");

    fs::write(&csv_path, "date,price\n2024-01-01,100.0\n2024-01-02,102.0\n").unwrap();
    fs::write(&json_path, r#"[{"date": "2024-01-01", "price": 99.5}]"#).unwrap();

    assert_eq!(DataLoader::from_path(&csv_path).unwrap().len(), 2);
    assert_eq!(DataLoader::from_path(&json_path).unwrap()[0].price, 99.5);
    assert!(matches!(
        DataLoader::from_path(dir.path().join("missing.csv")),
        Err(ForecastError::IoError(_))
    ));
}
