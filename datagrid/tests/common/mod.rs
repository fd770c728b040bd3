#![allow(dead_code)]

use std::collections::HashMap;

use datagrid::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// A row with the given cells.
pub fn row(row_index: usize, cells: &[(&str, Value)]) -> Row {
    let cells: HashMap<String, Value> = cells
        .iter()
        .map(|(field, value)| (field.to_string(), value.clone()))
        .collect();
    Row::new(row_index, cells)
}

pub fn people_columns() -> Vec<Column> {
    vec![
        Column::new("name").label("Name"),
        Column::new("age").label("Age").input_type(InputType::Number),
    ]
}

/// Bob 30, Amy 25, Cid 40.
pub fn people() -> TableData {
    TableData::from_records(
        people_columns(),
        vec![
            Record::new().set("name", "Bob").set("age", 30),
            Record::new().set("name", "Amy").set("age", 25),
            Record::new().set("name", "Cid").set("age", 40),
        ],
    )
}

/// `count` rows with `id` = position and `name` = `"row <id>"`.
pub fn numbered(count: usize) -> TableData {
    TableData::from_records(
        vec![
            Column::new("id").input_type(InputType::Number),
            Column::new("name"),
        ],
        (0..count)
            .map(|i| Record::new().set("id", i).set("name", format!("row {}", i)))
            .collect(),
    )
}

pub fn table(data: TableData, options: TableOptions) -> DataTable {
    init_logging();
    DataTable::new(data, options).expect("valid table")
}

pub fn names(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|row| row.value("name").to_string()).collect()
}

pub fn indices<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<usize> {
    rows.into_iter().map(Row::row_index).collect()
}
