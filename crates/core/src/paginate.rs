//! Connection pagination orchestrator.
//!
//! [`paginate`] turns one backend page into a relay-style connection:
//! it resolves the requested page size against the configured ceiling,
//! decodes the client's resume token (failing open to the first page),
//! fetches raw nodes through the [`PageSource`] port, builds the edges
//! and tokens itself, and defers the total count until it is asked for.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::connection::{Connection, Edge, PageInfo, TotalCount};
use crate::cursor::{Cursor, CursorCodec, CursorToken};
use crate::error::{PaginationError, PaginationResult};
use crate::metrics::{record_cursor_decode_failure, record_page_served, PageTimer};
use crate::ports::{PageRequest, PageSource};

/// Client-supplied pagination arguments, taken as they came in.
///
/// Out-of-range values never fail a request: `first` is clamped by the
/// safe limit and an undecodable `after` restarts from page one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationInput {
    /// Requested page size.
    pub first: Option<i32>,
    /// Token of the node to resume after.
    pub after: Option<CursorToken>,
}

/// Validated page-size ceiling.
///
/// Whatever the client asks for, at most this many nodes are fetched
/// per page. Zero is rejected at construction, so every downstream
/// computation can rely on a positive bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeLimit(u32);

impl SafeLimit {
    /// Creates a ceiling, rejecting zero.
    pub fn new(limit: u32) -> PaginationResult<Self> {
        if limit == 0 {
            return Err(PaginationError::SafeLimitZero);
        }
        Ok(Self(limit))
    }

    /// The ceiling value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Resolves a client-requested page size against this ceiling.
    ///
    /// A `first` within `1..=ceiling` is honored; absent, zero,
    /// negative and above-ceiling requests all resolve to the ceiling.
    pub fn resolve(&self, first: Option<i32>) -> u32 {
        match first {
            Some(n) if n > 0 && (n as u32) <= self.0 => n as u32,
            _ => self.0,
        }
    }

    /// Ceiling for an over-fetch probe, one above this one.
    ///
    /// Store adapters fetch one node past the resolved limit to learn
    /// whether a next page exists; the raised ceiling keeps that probe
    /// row from being clamped away.
    pub fn overfetch_ceiling(&self) -> SafeLimit {
        SafeLimit(self.0.saturating_add(1))
    }
}

/// Outcome of resolving the client-supplied `after` token.
#[derive(Debug, Clone, PartialEq)]
enum CursorState {
    /// No token supplied: first page.
    NoCursor,
    /// Token decoded to a position.
    Valid(Cursor),
    /// Token rejected: fail open to the first page.
    Invalid,
}

impl CursorState {
    fn resolve<C>(after: Option<&CursorToken>, codec: &C) -> Self
    where
        C: CursorCodec + ?Sized,
    {
        match after {
            None => CursorState::NoCursor,
            Some(token) => match codec.try_decode(token.as_str()) {
                Ok(cursor) => CursorState::Valid(cursor),
                Err(error) => {
                    debug!(%error, token = %token, "Rejected cursor token, serving first page");
                    record_cursor_decode_failure();
                    CursorState::Invalid
                }
            },
        }
    }

    fn into_position(self) -> Cursor {
        match self {
            CursorState::Valid(cursor) => cursor,
            CursorState::NoCursor | CursorState::Invalid => Cursor::new(),
        }
    }
}

/// Assembles one relay-style connection page.
///
/// Backend errors from the fetch propagate unchanged; the deferred
/// count surfaces its error through [`TotalCount::get`] the same way.
#[instrument(skip_all)]
pub async fn paginate<S, C>(
    input: PaginationInput,
    safe_limit: SafeLimit,
    codec: &C,
    source: Arc<S>,
) -> Result<Connection<S::Node, S::Error>, S::Error>
where
    S: PageSource + 'static,
    C: CursorCodec + ?Sized,
{
    let _timer = PageTimer::new();

    let limit = safe_limit.resolve(input.first);
    trace!(limit, first = input.first, "Resolved page limit");

    let position = CursorState::resolve(input.after.as_ref(), codec).into_position();

    let request = PageRequest {
        cursor: position.clone(),
        limit,
    };
    let fetched = source.fetch_page(&request).await?;
    trace!(
        nodes = fetched.nodes.len(),
        has_next_page = fetched.has_next_page,
        "Fetched page"
    );

    let edges: Vec<Edge<S::Node>> = fetched
        .nodes
        .into_iter()
        .map(|node| {
            let cursor = codec.encode(&source.cursor_for(&node));
            Edge { node, cursor }
        })
        .collect();

    let page_info = PageInfo {
        has_next_page: fetched.has_next_page,
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
    };

    let total_count = TotalCount::new({
        let source = Arc::clone(&source);
        async move { source.count_matching(&position).await }
    });

    record_page_served();
    Ok(Connection {
        edges,
        page_info,
        total_count,
    })
}
