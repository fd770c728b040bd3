//! Asynchronous row sources.
//!
//! A remote search sends the query to a [`RowSource`] and applies the rows
//! it returns. Every request is tagged with a [`SearchToken`]; only the
//! answer to the latest token is applied, so a slow answer can never
//! overwrite a newer one.

use futures::future::BoxFuture;

use crate::error::SourceError;
use crate::normalize::RawRow;
use crate::pipeline::SearchColumns;
use crate::table::DataTable;

/// Tag of one remote search request. Later requests get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchToken(pub(crate) u64);

impl SearchToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What a remote search asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub columns: SearchColumns,
}

/// The answer to a remote search request.
#[derive(Debug)]
pub struct SearchResponse {
    pub token: SearchToken,
    pub result: Result<Vec<RawRow>, SourceError>,
}

/// Produces rows for a search query.
pub trait RowSource: Send + Sync {
    fn fetch(&self, query: &SearchQuery) -> BoxFuture<'static, Result<Vec<RawRow>, SourceError>>;
}

impl<F> RowSource for F
where
    F: Fn(&SearchQuery) -> BoxFuture<'static, Result<Vec<RawRow>, SourceError>> + Send + Sync,
{
    fn fetch(&self, query: &SearchQuery) -> BoxFuture<'static, Result<Vec<RawRow>, SourceError>> {
        self(query)
    }
}

/// A request in flight.
pub struct PendingSearch {
    token: SearchToken,
    future: BoxFuture<'static, Result<Vec<RawRow>, SourceError>>,
}

impl PendingSearch {
    pub fn token(&self) -> SearchToken {
        self.token
    }

    /// Wait for the source to answer.
    pub async fn resolve(self) -> SearchResponse {
        SearchResponse {
            token: self.token,
            result: self.future.await,
        }
    }
}

/// Runs searches against a [`RowSource`] on behalf of a table.
///
/// ```
/// use datagrid::prelude::*;
/// use datagrid::source::{RemoteSearch, SearchQuery};
/// use futures::future::{BoxFuture, FutureExt};
///
/// fn lookup(query: &SearchQuery) -> BoxFuture<'static, Result<Vec<RawRow>, SourceError>> {
///     let row = Record::new().set("name", query.term.clone());
///     async move { Ok(vec![RawRow::Record(row)]) }.boxed()
/// }
///
/// let data = TableData::new(vec![Column::new("name")], vec![]);
/// let mut table = DataTable::new(data, TableOptions::default())?;
/// let remote = RemoteSearch::new(lookup);
///
/// let pending = remote.start(&mut table, "Amy", SearchColumns::All);
/// let response = futures::executor::block_on(pending.resolve());
/// assert_eq!(table.complete_remote_search(response), Ok(true));
/// assert_eq!(table.total_rows(), 1);
/// # Ok::<(), datagrid::error::ConfigError>(())
/// ```
pub struct RemoteSearch<S> {
    source: S,
}

impl<S: RowSource> RemoteSearch<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Issue a new token on `table` and send the query to the source.
    ///
    /// The returned request is not tied to the table; resolve it on any
    /// executor and hand the response to
    /// [`DataTable::complete_remote_search`].
    pub fn start(
        &self,
        table: &mut DataTable,
        term: impl Into<String>,
        columns: impl Into<SearchColumns>,
    ) -> PendingSearch {
        let (token, query) = table.begin_remote_search(term, columns);
        log::debug!("remote search {} for '{}'", token.value(), query.term);
        PendingSearch {
            token,
            future: self.source.fetch(&query),
        }
    }

    /// Start a search, wait for it, and apply the answer.
    ///
    /// `table` stays borrowed until the answer is applied, so nothing can
    /// supersede the request and a successful answer returns `Ok(true)`.
    /// Use [`RemoteSearch::start`] to keep the table usable while the
    /// source is working.
    pub async fn run(
        &self,
        table: &mut DataTable,
        term: impl Into<String>,
        columns: impl Into<SearchColumns>,
    ) -> Result<bool, SourceError> {
        let pending = self.start(table, term, columns);
        let response = pending.resolve().await;
        table.complete_remote_search(response)
    }
}
