//! CSV assembly boundary: header contract, directory creation, and the
//! empty-returns shape.

use chrono::NaiveDate;
use ecomgen_core::{
    config::GenConfig,
    dataset::{
        Dataset, CUSTOMERS_HEADER, MARKETING_HEADER, ORDERS_HEADER, RETURNS_HEADER,
    },
    pipeline::GenPipeline,
};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ecomgen-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn first_line(path: &PathBuf) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
        .lines()
        .next()
        .unwrap()
        .to_string()
}

#[test]
fn headers_match_the_external_contract() {
    let mut config = GenConfig::default_test();
    config.end_date = config.start_date; // keep the run tiny
    let dataset = GenPipeline::new(config, 42).unwrap().run().unwrap();

    let dir = scratch_dir("headers");
    dataset.write_csv(&dir).unwrap();

    assert_eq!(first_line(&dir.join("customers.csv")), CUSTOMERS_HEADER);
    assert_eq!(first_line(&dir.join("marketing.csv")), MARKETING_HEADER);
    assert_eq!(first_line(&dir.join("orders.csv")), ORDERS_HEADER);
    assert_eq!(first_line(&dir.join("returns.csv")), RETURNS_HEADER);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn row_counts_match_the_tables() {
    let dataset = GenPipeline::new(GenConfig::default_test(), 7)
        .unwrap()
        .run()
        .unwrap();
    let dir = scratch_dir("rowcounts");
    dataset.write_csv(&dir).unwrap();

    let lines = |file: &str| fs::read_to_string(dir.join(file)).unwrap().lines().count();
    assert_eq!(lines("customers.csv"), dataset.customers.len() + 1);
    assert_eq!(lines("marketing.csv"), dataset.marketing.len() + 1);
    assert_eq!(lines("orders.csv"), dataset.orders.len() + 1);
    assert_eq!(lines("returns.csv"), dataset.returns.len() + 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_returns_table_still_has_its_header() {
    // Assemble a dataset with the returns table forced empty: the file
    // must still carry the 5-column header and nothing else.
    let mut config = GenConfig::default_test();
    config.end_date = config.start_date;
    let mut dataset = GenPipeline::new(config, 42).unwrap().run().unwrap();
    dataset.returns.clear();

    let dir = scratch_dir("empty-returns");
    dataset.write_csv(&dir).unwrap();

    let content = fs::read_to_string(dir.join("returns.csv")).unwrap();
    assert_eq!(content.trim_end(), RETURNS_HEADER);
    assert_eq!(RETURNS_HEADER.split(',').count(), 5);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn output_directory_is_created_recursively() {
    let dir = scratch_dir("nested").join("a").join("b");
    let mut config = GenConfig::default_test();
    config.end_date = config.start_date;
    let dataset = GenPipeline::new(config, 1).unwrap().run().unwrap();

    dataset.write_csv(&dir).unwrap();
    assert!(dir.join("orders.csv").exists());

    fs::remove_dir_all(dir.parent().unwrap().parent().unwrap()).unwrap();
}

#[test]
fn dates_serialize_iso_and_money_has_two_decimals() {
    let mut config = GenConfig::default_test();
    config.start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    config.end_date = config.start_date;
    let dataset = GenPipeline::new(config, 42).unwrap().run().unwrap();

    let dir = scratch_dir("formats");
    dataset.write_csv(&dir).unwrap();

    let content = fs::read_to_string(dir.join("marketing.csv")).unwrap();
    let row = content.lines().nth(1).unwrap();
    let fields: Vec<&str> = row.split(',').collect();
    assert_eq!(fields[0], "2023-01-01");
    let (_, cents) = fields[3].split_once('.').expect("spend must carry decimals");
    assert_eq!(cents.len(), 2, "spend must print 2 decimal places");

    fs::remove_dir_all(&dir).unwrap();
}
