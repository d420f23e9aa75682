//! Relational store adapter.
//!
//! Relational backends answer "give me N rows after X" cheaply, but not
//! "is there anything after those N" - that would be a second query.
//! This adapter learns the answer from the page itself by over-fetching
//! one probe row: fetch `limit + 1`, report `has_next_page` when the
//! probe came back, then drop it before edges are built. The probe row
//! never reaches the caller and never becomes `end_cursor`.
//!
//! Cursors are fixed to the single reserved `{after: <position>}` shape
//! and use the standard [`QueryStringCodec`], so tokens stay
//! interchangeable with every other adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, trace};

use reprise_core::connection::Connection;
use reprise_core::cursor::{Cursor, CursorValue, QueryStringCodec};
use reprise_core::paginate::{paginate as assemble_connection, PaginationInput, SafeLimit};
use reprise_core::ports::{FetchedPage, PageRequest, PageSource};

/// Row access a relational backend must provide.
///
/// `fetch_after` is expected to order rows consistently and return
/// strictly-after matches; the adapter owns every other pagination
/// concern.
#[async_trait]
pub trait RelationalSource: Send + Sync {
    /// Row type this source pages through.
    type Node: Send;

    /// Backend error type, propagated to the caller unchanged.
    type Error: Send + 'static;

    /// Fetches up to `limit` rows strictly after the given position,
    /// from the start when `after` is `None`.
    async fn fetch_after(
        &self,
        after: Option<&CursorValue>,
        limit: u32,
    ) -> Result<Vec<Self::Node>, Self::Error>;

    /// Counts rows matching the position's criteria.
    async fn count_from(&self, after: Option<&CursorValue>) -> Result<u64, Self::Error>;

    /// Position of a row, stored as the cursor's `after` field.
    fn position(&self, node: &Self::Node) -> CursorValue;
}

/// Paginates a relational backend into a relay-style connection.
///
/// The requested page size resolves against `safe_limit` first; the
/// probe row is requested on top of the resolved limit under a raised
/// ceiling, so it is never clamped away and never changes the page the
/// caller sees.
#[instrument(skip_all)]
pub async fn paginate<S>(
    input: PaginationInput,
    safe_limit: SafeLimit,
    source: Arc<S>,
) -> Result<Connection<S::Node, S::Error>, S::Error>
where
    S: RelationalSource + 'static,
{
    let page_limit = safe_limit.resolve(input.first);
    trace!(page_limit, "Over-fetching one probe row");

    // probe one past the page; saturates only for ceilings near i32::MAX
    let probe_first = (i64::from(page_limit) + 1).min(i64::from(i32::MAX)) as i32;
    let probe_input = PaginationInput {
        first: Some(probe_first),
        after: input.after,
    };
    let bridge = Arc::new(OverfetchBridge {
        inner: source,
        page_limit,
    });
    assemble_connection(
        probe_input,
        safe_limit.overfetch_ceiling(),
        &QueryStringCodec,
        bridge,
    )
    .await
}

/// Presents a [`RelationalSource`] as a [`PageSource`], deriving
/// `has_next_page` from the probe row.
struct OverfetchBridge<S> {
    inner: Arc<S>,
    page_limit: u32,
}

#[async_trait]
impl<S> PageSource for OverfetchBridge<S>
where
    S: RelationalSource + 'static,
{
    type Node = S::Node;
    type Error = S::Error;

    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<FetchedPage<Self::Node>, Self::Error> {
        // request.limit carries the probe row on top of page_limit
        let mut nodes = self
            .inner
            .fetch_after(request.cursor.after(), request.limit)
            .await?;
        let has_next_page = nodes.len() > self.page_limit as usize;
        nodes.truncate(self.page_limit as usize);
        Ok(FetchedPage {
            nodes,
            has_next_page,
        })
    }

    async fn count_matching(&self, cursor: &Cursor) -> Result<u64, Self::Error> {
        self.inner.count_from(cursor.after()).await
    }

    fn cursor_for(&self, node: &Self::Node) -> Cursor {
        Cursor::resume_after(self.inner.position(node))
    }
}
