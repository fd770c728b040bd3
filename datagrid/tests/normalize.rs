mod common;

use common::{init_logging, table};
use datagrid::normalize::{canonical_row, columns_from_json, empty_record, rows_from_json};
use datagrid::prelude::*;
use serde_json::json;

#[test]
fn test_array_rows_follow_column_positions() {
    init_logging();
    let data = TableData::new(
        vec![Column::new("name"), Column::new("age")],
        vec![RawRow::from(vec![Value::from("Amy"), Value::from(25), Value::from("extra")])],
    );
    let normalized = data.normalize().expect("valid data");

    let record = &normalized.records[0];
    assert_eq!(record.get("name"), Some(&Value::from("Amy")));
    assert_eq!(record.get("age"), Some(&Value::Int(25)));
    assert_eq!(record.len(), 2);
}

#[test]
fn test_typed_array_cells_are_parsed() {
    let data = TableData::from_json(&json!({
        "columns": [
            {"field": "age", "inputType": "number"},
            {"field": "active", "inputType": "checkbox"},
            {"field": "code"}
        ],
        "rows": [["25", "true", "007"], ["n/a", "maybe", "1"]]
    }))
    .expect("valid json");
    let normalized = data.normalize().expect("valid data");

    let first = &normalized.records[0];
    assert_eq!(first.get("age"), Some(&Value::Int(25)));
    assert_eq!(first.get("active"), Some(&Value::Bool(true)));
    assert_eq!(first.get("code"), Some(&Value::from("007")));

    let second = &normalized.records[1];
    assert_eq!(second.get("age"), Some(&Value::from("n/a")));
    assert_eq!(second.get("active"), Some(&Value::from("maybe")));
}

#[test]
fn test_object_rows_keep_unknown_fields() {
    let table = table(
        TableData::from_records(
            vec![Column::new("name")],
            vec![Record::new().set("name", "Amy").set("team", "Blue")],
        ),
        TableOptions::default(),
    );
    let row = table.row(0).expect("row 0");
    assert_eq!(row.get("team"), Some(&Value::from("Blue")));
}

#[test]
fn test_row_index_is_input_position() {
    let table = table(
        TableData::from_json_str(r#"{"columns": ["A"], "rows": [["x"], ["y"], ["z"]]}"#)
            .expect("valid json"),
        TableOptions::default(),
    );
    let pairs: Vec<(usize, String)> = table
        .rows()
        .map(|row| (row.row_index(), row.value("field_0").to_string()))
        .collect();
    assert_eq!(
        pairs,
        vec![(0, "x".to_string()), (1, "y".to_string()), (2, "z".to_string())]
    );
}

#[test]
fn test_string_columns_become_labels() {
    let columns = columns_from_json(&json!(["Name", {"field": "age", "label": "Age"}, {}]))
        .expect("valid columns");
    let data = TableData::new(columns, vec![]).normalize().expect("valid data");

    let fields: Vec<&str> = data.columns.iter().map(|c| c.field.as_str()).collect();
    let labels: Vec<&str> = data.columns.iter().map(|c| c.label.as_str()).collect();
    let positions: Vec<usize> = data.columns.iter().map(|c| c.column_index).collect();
    assert_eq!(fields, ["field_0", "age", "field_2"]);
    assert_eq!(labels, ["Name", "Age", "field_2"]);
    assert_eq!(positions, [0, 1, 2]);
}

#[test]
fn test_column_options() {
    let columns = columns_from_json(&json!([
        {"field": "a", "sort": false, "fixed": true, "width": 120, "editable": false},
        {"field": "b", "fixed": "right", "inputType": "select", "options": "['x', 'y']"},
        {"field": "c", "required": true, "defaultValue": 0, "options": ["p", 1]}
    ]))
    .expect("valid columns");

    assert!(!columns[0].sortable);
    assert_eq!(columns[0].fixed, Fixed::Left);
    assert_eq!(columns[0].width, Some(120));
    assert!(!columns[0].editable);
    assert_eq!(columns[1].fixed, Fixed::Right);
    assert_eq!(columns[1].input_type, InputType::Select);
    assert_eq!(columns[1].options, ["x", "y"]);
    assert!(columns[2].required);
    assert_eq!(columns[2].default_value.as_deref(), Some("0"));
    assert_eq!(columns[2].options, ["p", "1"]);
}

#[test]
fn test_duplicate_field_is_rejected() {
    init_logging();
    let data = TableData::new(vec![Column::new("a"), Column::new("b"), Column::new("a")], vec![]);
    let err = DataTable::new(data, TableOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateField {
            field: "a".to_string(),
            first: 0,
            second: 2,
        }
    );
    assert!(err.to_string().contains("'a'"));
}

#[test]
fn test_malformed_columns_are_rejected() {
    let err = columns_from_json(&json!(["ok", 42])).unwrap_err();
    assert!(matches!(err, ConfigError::Column { index: 1, .. }));

    let err = columns_from_json(&json!([{"field": "a", "inputType": "slider"}])).unwrap_err();
    assert!(err.to_string().contains("slider"));

    let err = columns_from_json(&json!([{"field": "a", "sort": "yes"}])).unwrap_err();
    assert!(err.to_string().contains("'sort' must be a boolean"));

    let err = columns_from_json(&json!({"field": "a"})).unwrap_err();
    assert!(matches!(err, ConfigError::NotAnArray { section: "columns", .. }));
}

#[test]
fn test_malformed_rows_are_rejected() {
    let err = rows_from_json(&json!([["a"], "b"])).unwrap_err();
    assert_eq!(err, ConfigError::Row { index: 1, found: "string" });

    let err = TableData::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_default_substitution() {
    let columns = vec![
        Column::new("a"),
        Column::new("b").default_value("n/a"),
        Column::new("c").default_value(""),
        Column::new("zero"),
        Column::new("flag"),
        Column::new("nan"),
    ];
    let record = Record::new()
        .set("a", Value::Null)
        .set("c", "")
        .set("zero", 0)
        .set("flag", false)
        .set("nan", f64::NAN);

    let row = canonical_row(7, &record, &columns, "-");
    assert_eq!(row.row_index(), 7);
    assert_eq!(row.value("a"), &Value::from("-"));
    assert_eq!(row.value("b"), &Value::from("n/a"));
    assert_eq!(row.value("c"), &Value::from("-"));
    assert_eq!(row.value("zero"), &Value::Int(0));
    assert_eq!(row.value("flag"), &Value::Bool(false));
    assert_eq!(row.value("nan"), &Value::from("-"));
}

#[test]
fn test_reads_do_not_rewrite_records() {
    let table = table(
        TableData::from_records(vec![Column::new("a")], vec![Record::new()]),
        TableOptions::default(),
    );
    assert_eq!(table.row(0).map(|r| r.value("a").clone()), Some(Value::from("-")));
    assert_eq!(table.record(0), Some(&Record::new()));
}

#[test]
fn test_empty_record_is_typed() {
    let columns = vec![
        Column::new("name"),
        Column::new("age").input_type(InputType::Number),
        Column::new("qty").input_type(InputType::Number).default_value("1"),
        Column::new("done").input_type(InputType::Checkbox),
    ];
    let record = empty_record(&columns, "-");
    assert_eq!(record.get("name"), Some(&Value::from("-")));
    assert_eq!(record.get("age"), Some(&Value::Null));
    assert_eq!(record.get("qty"), Some(&Value::Int(1)));
    assert_eq!(record.get("done"), Some(&Value::Bool(false)));
}

#[test]
fn test_scraped_table_is_prepended() {
    let scraped = ScrapedTable {
        headers: vec![
            ScrapedHeader::new("Name").attribute("field", "name"),
            ScrapedHeader::new("Age")
                .attribute("field", "age")
                .attribute("inputType", "number")
                .attribute("sort", "false"),
        ],
        rows: vec![vec!["Zed".to_string(), "51".to_string()]],
    };
    let data = TableData::from_records(
        vec![Column::new("team")],
        vec![Record::new().set("name", "Amy").set("team", "Blue")],
    )
    .with_scraped(&scraped)
    .expect("valid markup");

    let table = table(data, TableOptions::default());
    let fields: Vec<&str> = table.columns().iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, ["name", "age", "team"]);
    assert!(!table.columns()[1].sortable);

    let zed = table.row(0).expect("scraped row");
    assert_eq!(zed.value("name"), &Value::from("Zed"));
    assert_eq!(zed.value("age"), &Value::Int(51));
    assert_eq!(zed.value("team"), &Value::from("-"));

    let amy = table.row(1).expect("configured row");
    assert_eq!(amy.value("name"), &Value::from("Amy"));
}

#[test]
fn test_value_from_json() {
    assert_eq!(Value::from(json!(null)), Value::Null);
    assert_eq!(Value::from(json!(3)), Value::Int(3));
    assert_eq!(Value::from(json!(3.5)), Value::Float(3.5));
    assert_eq!(Value::from(json!([1, 2])), Value::from("[1,2]"));

    let value: Value = serde_json::from_str("true").expect("valid json");
    assert_eq!(value, Value::Bool(true));
}
