//! Ports for paginated data access.
//!
//! [`PageSource`] is the one capability the orchestrator needs from a
//! backend. Implementations hand back raw nodes; edge and token
//! construction stay with the orchestrator, so backends never touch the
//! token wire format.

use async_trait::async_trait;

use crate::cursor::Cursor;

/// Fetch parameters for one page, handed to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Decoded resume position; empty means start of the collection.
    pub cursor: Cursor,
    /// Maximum number of nodes to return.
    pub limit: u32,
}

/// Raw backend response for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage<N> {
    /// Nodes in collection order, taken verbatim as the page.
    pub nodes: Vec<N>,
    /// Whether at least one more node exists past this page.
    pub has_next_page: bool,
}

/// Backend capability the orchestrator paginates over.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Domain object this source pages through.
    type Node: Send;

    /// Backend error type, propagated to the caller unchanged.
    type Error: Send + 'static;

    /// Fetches one page at the given position.
    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<FetchedPage<Self::Node>, Self::Error>;

    /// Counts the items matching the position's criteria.
    ///
    /// Only runs when the caller awaits the connection's total count.
    async fn count_matching(&self, cursor: &Cursor) -> Result<u64, Self::Error>;

    /// Extracts the resumable position of a node.
    fn cursor_for(&self, node: &Self::Node) -> Cursor;
}
