//! Connection result types for cursor pagination.
//!
//! A [`Connection`] is one assembled page: edges pairing each node with
//! its resume token, forward-only page info, and a total count that is
//! computed only on demand. Pagination here is forward-only, so
//! [`PageInfo`] carries no previous-page bookkeeping.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::cursor::CursorToken;

/// A single item in a paginated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<N> {
    /// The actual item.
    pub node: N,
    /// Opaque token resuming immediately after this item.
    pub cursor: CursorToken,
}

/// Information about the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether more items exist after this page.
    pub has_next_page: bool,
    /// Token of the last edge, absent when the page is empty.
    pub end_cursor: Option<CursorToken>,
}

/// Deferred total count.
///
/// Wraps the backend count query without running it: the query executes
/// only if [`get`](TotalCount::get) is awaited. Connections whose total
/// count is never requested never pay for it.
pub struct TotalCount<E> {
    future: BoxFuture<'static, Result<u64, E>>,
}

impl<E> TotalCount<E> {
    /// Wraps a count computation. The future stays cold until awaited.
    pub fn new(future: impl Future<Output = Result<u64, E>> + Send + 'static) -> Self {
        Self {
            future: future.boxed(),
        }
    }

    /// Runs the count query.
    pub async fn get(self) -> Result<u64, E> {
        self.future.await
    }
}

impl<E> fmt::Debug for TotalCount<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TotalCount(<deferred>)")
    }
}

/// Paginated result set with edges and page info.
///
/// `N` is the node type; `E` is the backend's error type, surfaced only
/// by the deferred [`total_count`](Connection::total_count).
#[derive(Debug)]
pub struct Connection<N, E> {
    /// Edges in collection order.
    pub edges: Vec<Edge<N>>,
    /// Forward-only paging information.
    pub page_info: PageInfo,
    /// Total count of matching items, computed only if awaited.
    pub total_count: TotalCount<E>,
}
