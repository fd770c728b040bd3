mod common;

use common::{indices, init_logging, names, numbered, people, table};
use datagrid::pipeline::paginate;
use datagrid::prelude::*;

#[test]
fn test_end_to_end_scenario() {
    let mut table = table(people(), TableOptions::default());

    table.sort("name", SortDirection::Ascending);
    assert_eq!(names(&table.visible_rows()), ["Amy", "Bob", "Cid"]);

    table.search("", "");
    table.search("b", SearchColumns::All);
    assert_eq!(names(&table.visible_rows()), ["Bob"]);

    table.search("", SearchColumns::All);
    let unfiltered = table.search_result();
    let first_page = paginate(&unfiltered, PageSize::Count(2), 0);
    let first_names: Vec<String> = first_page
        .iter()
        .map(|row| row.value("name").to_string())
        .collect();
    assert_eq!(first_names, ["Amy", "Bob"]);

    table.set_page_size(PageSize::Count(2));
    assert_eq!(names(&table.visible_rows()), ["Amy", "Bob"]);
    table.next_page();
    assert_eq!(names(&table.visible_rows()), ["Cid"]);
}

#[test]
fn test_page_clamps_when_rows_shrink() {
    let mut table = table(numbered(25), TableOptions::default());
    table.set_active_page(2);
    assert_eq!(table.active_page(), 2);

    for row_index in 0..16 {
        assert!(table.delete_row(row_index));
    }
    assert_eq!(table.total_rows(), 9);
    assert_eq!(table.page_count(), 1);
    assert_eq!(table.active_page(), 0);
    assert_eq!(indices(&table.visible_rows()), (16..25).collect::<Vec<_>>());
}

#[test]
fn test_page_clamps_when_search_shrinks() {
    let mut table = table(numbered(25), TableOptions::default());
    table.set_active_page(2);
    table.search("row 2", SearchColumns::All);
    assert_eq!(table.active_page(), 0);
    assert_eq!(table.page_count(), 1);
}

#[test]
fn test_add_moves_no_page() {
    let mut table = table(numbered(20), TableOptions::default());
    table.set_active_page(1);
    table.add_row(Record::new().set("name", "new"));
    assert_eq!(table.active_page(), 1);
    assert_eq!(table.page_count(), 3);

    table.last_page();
    assert_eq!(indices(&table.visible_rows()), vec![20]);
}

#[test]
fn test_update_replaces_data_and_clears_state() {
    let mut table = table(people(), TableOptions::editor().multi_select());
    table.toggle_row(0);
    table.edit_row(1);

    table
        .update(Some(numbered(30)), None)
        .expect("valid update");
    assert_eq!(table.total_rows(), 30);
    assert!(table.selection().is_empty());
    assert!(!table.is_editing());
    assert_eq!(table.columns()[0].field, "id");
}

#[test]
fn test_update_options_only() {
    let mut table = table(people(), TableOptions::default());
    table
        .update(None, Some(TableOptions::default().default_value("?").entries(PageSize::Count(2))))
        .expect("valid update");
    assert_eq!(table.page_size(), PageSize::Count(2));
    assert_eq!(table.page_count(), 2);
    assert_eq!(table.options().default_value, "?");
}

#[test]
fn test_update_applies_new_default() {
    let data = TableData::from_records(vec![Column::new("a")], vec![Record::new()]);
    let mut table = table(data, TableOptions::default());
    table
        .update(None, Some(TableOptions::default().default_value("?")))
        .expect("valid update");
    assert_eq!(table.row(0).map(|r| r.value("a").clone()), Some(Value::from("?")));
}

#[test]
fn test_failed_update_changes_nothing() {
    let mut table = table(people(), TableOptions::default().multi_select());
    table.toggle_row(2);

    let bad_data = TableData::new(vec![Column::new("x"), Column::new("x")], vec![]);
    assert!(table.update(Some(bad_data), None).is_err());

    let bad_options = TableOptions::default().entries(PageSize::Count(0));
    assert!(table.update(Some(numbered(5)), Some(bad_options)).is_err());

    assert_eq!(table.total_rows(), 3);
    assert_eq!(table.selection().selected(), vec![2]);
}

#[test]
fn test_update_drops_sort_on_removed_field() {
    let mut table = table(people(), TableOptions::default());
    table.sort("name", SortDirection::Descending);
    table
        .update(
            Some(TableData::new(vec![Column::new("other")], vec![])),
            None,
        )
        .expect("valid update");
    assert_eq!(table.sort_state(), &SortState::default());
}

#[test]
fn test_invalid_options_fail_construction() {
    init_logging();
    let err = DataTable::new(people(), TableOptions::default().entries(PageSize::Count(0)))
        .unwrap_err();
    assert!(matches!(err, ConfigError::OptionValue { ref option, .. } if option == "entries"));

    let err = DataTable::new(people(), TableOptions::default().entries_options(vec![]))
        .unwrap_err();
    assert!(err.to_string().contains("entriesOptions"));
}

#[test]
fn test_dispose_clears_state() {
    let mut table = table(people(), TableOptions::editor().multi_select());
    table.select_all();
    table.edit_row(0);

    table.dispose();
    assert!(table.is_disposed());
    assert!(table.selection().is_empty());
    assert!(!table.is_editing());
}

#[test]
fn test_visible_rows_apply_defaults() {
    let data = TableData::from_records(
        vec![Column::new("name"), Column::new("age").default_value("unknown")],
        vec![Record::new().set("name", "Amy"), Record::new().set("age", 0)],
    );
    let table = table(data, TableOptions::default());
    let visible = table.visible_rows();
    assert_eq!(visible[0].value("age"), &Value::from("unknown"));
    assert_eq!(visible[1].value("name"), &Value::from("-"));
    assert_eq!(visible[1].value("age"), &Value::Int(0));
}

#[test]
fn test_loading_message() {
    let table = table(people(), TableOptions::default().loading(true));
    assert_eq!(table.empty_message(), Some("Loading results..."));
}

#[test]
fn test_built_from_json() {
    init_logging();
    let data = TableData::from_json_str(
        r#"{
            "columns": [{"label": "Name", "field": "name"}, {"label": "Age", "field": "age"}],
            "rows": [{"name": "Bob", "age": 30}, {"name": "Amy", "age": 25}]
        }"#,
    )
    .expect("valid data");
    let options = TableOptions::from_json_str(r#"{"sortField": "age", "entries": 1}"#)
        .expect("valid options");

    let table = DataTable::new(data, options).expect("valid table");
    assert_eq!(names(&table.visible_rows()), ["Amy"]);
    assert_eq!(table.navigation_text(), "1 - 1 of 2");
}
