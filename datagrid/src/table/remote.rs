//! Applying remote search results

use crate::error::SourceError;
use crate::events::TableEvent;
use crate::normalize::to_record;
use crate::pipeline::SearchColumns;
use crate::source::{SearchQuery, SearchResponse, SearchToken};

use super::DataTable;

impl DataTable {
    /// Record a new search and issue its token.
    ///
    /// Any earlier request still in flight becomes stale.
    pub fn begin_remote_search(
        &mut self,
        term: impl Into<String>,
        columns: impl Into<SearchColumns>,
    ) -> (SearchToken, SearchQuery) {
        self.last_search_token += 1;
        let query = SearchQuery {
            term: term.into(),
            columns: columns.into(),
        };
        (SearchToken(self.last_search_token), query)
    }

    /// Token an answer must carry to be applied, if a remote search was
    /// started and nothing has superseded it since.
    pub fn latest_search_token(&self) -> Option<SearchToken> {
        (self.last_search_token > 0).then_some(SearchToken(self.last_search_token))
    }

    /// Make every request still in flight stale.
    pub(super) fn supersede_remote_search(&mut self) {
        self.last_search_token += 1;
    }

    /// Apply the answer to a remote search.
    ///
    /// Answers to anything but the latest request are dropped, errors
    /// included, and `Ok(false)` is returned. A current error is handed
    /// back unchanged. Applied rows replace the stored rows as they come;
    /// the local search term is not applied to them again. Selection and
    /// edit state are cleared and the first page is shown.
    pub fn complete_remote_search(&mut self, response: SearchResponse) -> Result<bool, SourceError> {
        if response.token.0 != self.last_search_token {
            log::debug!(
                "dropping stale search {} (latest is {})",
                response.token.0,
                self.last_search_token
            );
            return Ok(false);
        }
        let raw_rows = response.result?;

        let records = raw_rows
            .into_iter()
            .enumerate()
            .map(|(index, raw)| to_record(index, raw, &self.columns))
            .collect();
        self.replace_records(records);
        self.selection.clear();
        self.close_editor();
        self.state.remote_results = true;
        self.state.active_page = 0;

        self.emit(TableEvent::Updated);
        self.refresh();
        Ok(true)
    }
}
