mod common;

use common::{names, numbered, people, table};
use datagrid::prelude::*;
use datagrid::source::SearchQuery;
use futures::future::{BoxFuture, FutureExt};

/// Answers with one row named after the query.
fn echo(query: &SearchQuery) -> BoxFuture<'static, Result<Vec<RawRow>, SourceError>> {
    let term = query.term.clone();
    async move {
        Ok(vec![
            RawRow::Record(Record::new().set("name", term.clone()).set("age", 1)),
            RawRow::Cells(vec![Value::from(format!("{} 2", term)), Value::from(2)]),
        ])
    }
    .boxed()
}

fn failing(query: &SearchQuery) -> BoxFuture<'static, Result<Vec<RawRow>, SourceError>> {
    let message = format!("lookup of '{}' failed", query.term);
    async move { Err(SourceError::new(message)) }.boxed()
}

#[tokio::test]
async fn test_latest_result_is_applied() {
    let mut table = table(people(), TableOptions::default().multi_select());
    table.toggle_row(0);
    let remote = RemoteSearch::new(echo);

    let applied = remote.run(&mut table, "Zed", SearchColumns::All).await;
    assert_eq!(applied, Ok(true));
    assert_eq!(names(&table.visible_rows()), ["Zed", "Zed 2"]);
    assert!(table.selection().is_empty());
    assert_eq!(table.row(1).map(|r| r.value("age").clone()), Some(Value::Int(2)));
}

#[tokio::test]
async fn test_stale_result_is_ignored() {
    let mut table = table(people(), TableOptions::default());
    let remote = RemoteSearch::new(echo);

    let first = remote.start(&mut table, "old", SearchColumns::All);
    let second = remote.start(&mut table, "new", SearchColumns::All);
    assert!(first.token() < second.token());
    assert_eq!(table.latest_search_token(), Some(second.token()));

    let second = second.resolve().await;
    assert_eq!(table.complete_remote_search(second), Ok(true));

    let first = first.resolve().await;
    assert_eq!(table.complete_remote_search(first), Ok(false));
    assert_eq!(names(&table.visible_rows()), ["new", "new 2"]);
}

#[tokio::test]
async fn test_stale_error_is_ignored() {
    let mut table = table(people(), TableOptions::default());
    let broken = RemoteSearch::new(failing);
    let working = RemoteSearch::new(echo);

    let stale = broken.start(&mut table, "old", SearchColumns::All);
    let current = working.start(&mut table, "new", SearchColumns::All);

    let stale = stale.resolve().await;
    assert_eq!(table.complete_remote_search(stale), Ok(false));
    assert_eq!(table.total_rows(), 3);

    let current = current.resolve().await;
    assert_eq!(table.complete_remote_search(current), Ok(true));
}

#[tokio::test]
async fn test_current_error_is_returned() {
    let mut table = table(people(), TableOptions::default());
    let remote = RemoteSearch::new(failing);

    let err = remote
        .run(&mut table, "Bob", SearchColumns::All)
        .await
        .unwrap_err();
    assert_eq!(err, SourceError::new("lookup of 'Bob' failed"));
    assert_eq!(names(&table.visible_rows()), ["Bob", "Amy", "Cid"]);
}

#[tokio::test]
async fn test_remote_rows_skip_local_filter() {
    let mut table = table(people(), TableOptions::default());
    table.search("Amy", SearchColumns::All);
    assert_eq!(table.visible_rows().len(), 1);

    let remote = RemoteSearch::new(echo);
    remote
        .run(&mut table, "Zed", SearchColumns::All)
        .await
        .expect("search succeeds");
    assert_eq!(table.visible_rows().len(), 2);
    assert_eq!(table.active_page(), 0);

    table.search("2", SearchColumns::All);
    assert_eq!(names(&table.visible_rows()), ["Zed 2"]);
}

#[test]
fn test_no_token_before_first_search() {
    let table = table(people(), TableOptions::default());
    assert_eq!(table.latest_search_token(), None);
}

#[tokio::test]
async fn test_local_search_supersedes_remote_search() {
    let mut table = table(people(), TableOptions::default());
    let remote = RemoteSearch::new(echo);

    let pending = remote.start(&mut table, "Zed", SearchColumns::All);
    table.search("Bob", SearchColumns::All);

    let response = pending.resolve().await;
    assert_eq!(table.complete_remote_search(response), Ok(false));
    assert_eq!(names(&table.visible_rows()), ["Bob"]);
    assert_eq!(table.search_term(), "Bob");
}

#[tokio::test]
async fn test_new_data_supersedes_remote_search() {
    let mut table = table(people(), TableOptions::default());
    let remote = RemoteSearch::new(echo);

    let pending = remote.start(&mut table, "Zed", SearchColumns::All);
    table
        .update(Some(numbered(2)), None)
        .expect("valid update");

    let response = pending.resolve().await;
    assert_eq!(table.complete_remote_search(response), Ok(false));
    assert_eq!(names(&table.visible_rows()), ["row 0", "row 1"]);
}

#[tokio::test]
async fn test_options_update_keeps_remote_search_current() {
    let mut table = table(people(), TableOptions::default());
    let remote = RemoteSearch::new(echo);

    let pending = remote.start(&mut table, "Zed", SearchColumns::All);
    table
        .update(None, Some(TableOptions::default().entries(PageSize::Count(25))))
        .expect("valid update");

    let response = pending.resolve().await;
    assert_eq!(table.complete_remote_search(response), Ok(true));
    assert_eq!(names(&table.visible_rows()), ["Zed", "Zed 2"]);
}

#[tokio::test]
async fn test_disposed_table_ignores_remote_results() {
    let mut table = table(people(), TableOptions::default());
    let remote = RemoteSearch::new(echo);

    let pending = remote.start(&mut table, "Zed", SearchColumns::All);
    table.dispose();

    let response = pending.resolve().await;
    assert_eq!(table.complete_remote_search(response), Ok(false));
    assert_eq!(table.total_rows(), 3);
}
