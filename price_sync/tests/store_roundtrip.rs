use std::fs;

use chrono::NaiveDate;
use price_sync::store::CacheTable;
use trade_ingestor::models::day_row::{DayRow, Price};
use trade_ingestor::models::resource::Resource;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_table() -> CacheTable {
    let mut table = CacheTable::default();

    let mut first = DayRow::new(d(2024, 3, 4));
    first.set(Resource::Oil, Some(Price(13.33)));
    first.set(Resource::Food, Some(Price(150.0)));
    // Credits left empty on purpose: absence must survive the round trip.
    table.merge(first);

    let mut second = DayRow::new(d(2024, 3, 5));
    second.set(Resource::Coal, Some(Price(60.5)));
    table.merge(second);

    table
}

#[test]
fn persist_then_load_reproduces_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");

    let table = sample_table();
    table.persist(&path).unwrap();

    let reloaded = CacheTable::load(&path).unwrap();
    assert_eq!(reloaded, table);
}

#[test]
fn persisted_file_has_the_fixed_header_and_two_decimal_prices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    sample_table().persist(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,oil,coal,iron,bauxite,lead,uranium,food,gasoline,steel,aluminum,munitions,credits"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2024-03-04,13.33,,,,,,150.00,,,,,"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2024-03-05,,60.50,,,,,,,,,,"
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn persisting_twice_is_byte_identical_regardless_of_merge_order() {
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("a.csv");
    let second_path = dir.path().join("b.csv");

    let table = sample_table();
    table.persist(&first_path).unwrap();

    // Same rows merged in the opposite order.
    let mut reversed = CacheTable::default();
    reversed.merge(table.get(d(2024, 3, 5)).unwrap().clone());
    reversed.merge(table.get(d(2024, 3, 4)).unwrap().clone());
    reversed.persist(&second_path).unwrap();

    assert_eq!(
        fs::read(&first_path).unwrap(),
        fs::read(&second_path).unwrap()
    );
}

#[test]
fn load_persist_load_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    sample_table().persist(&path).unwrap();
    let before = fs::read(&path).unwrap();

    let reloaded = CacheTable::load(&path).unwrap();
    reloaded.persist(&path).unwrap();
    let after = fs::read(&path).unwrap();

    assert_eq!(before, after);
}
