//! Document store adapter.
//!
//! Document backends typically learn whether another page exists as a
//! side effect of the fetch itself (an exhausted batch, a server-side
//! `hasMore` flag), so no probe row is needed: the backend reports
//! `has_next_page` and this adapter passes it through untouched.
//!
//! Cursors are fixed to the single reserved `{after: <position>}` shape
//! and use the standard [`QueryStringCodec`], so tokens stay
//! interchangeable with every other adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use reprise_core::connection::Connection;
use reprise_core::cursor::{Cursor, CursorValue, QueryStringCodec};
use reprise_core::paginate::{paginate as assemble_connection, PaginationInput, SafeLimit};
use reprise_core::ports::{FetchedPage, PageRequest, PageSource};

/// One fetched batch of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage<N> {
    /// Documents in collection order.
    pub nodes: Vec<N>,
    /// Whether the backend knows of at least one more document.
    pub has_next_page: bool,
}

/// Document access a backend must provide.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Document type this source pages through.
    type Node: Send;

    /// Backend error type, propagated to the caller unchanged.
    type Error: Send + 'static;

    /// Fetches up to `limit` documents strictly after the given
    /// position, from the start when `after` is `None`.
    async fn fetch_after(
        &self,
        after: Option<&CursorValue>,
        limit: u32,
    ) -> Result<DocumentPage<Self::Node>, Self::Error>;

    /// Counts documents matching the position's criteria.
    async fn count_from(&self, after: Option<&CursorValue>) -> Result<u64, Self::Error>;

    /// Position of a document, stored as the cursor's `after` field.
    fn position(&self, node: &Self::Node) -> CursorValue;
}

/// Paginates a document backend into a relay-style connection.
#[instrument(skip_all)]
pub async fn paginate<S>(
    input: PaginationInput,
    safe_limit: SafeLimit,
    source: Arc<S>,
) -> Result<Connection<S::Node, S::Error>, S::Error>
where
    S: DocumentSource + 'static,
{
    let bridge = Arc::new(AfterBridge { inner: source });
    assemble_connection(input, safe_limit, &QueryStringCodec, bridge).await
}

/// Presents a [`DocumentSource`] as a [`PageSource`].
struct AfterBridge<S> {
    inner: Arc<S>,
}

#[async_trait]
impl<S> PageSource for AfterBridge<S>
where
    S: DocumentSource + 'static,
{
    type Node = S::Node;
    type Error = S::Error;

    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<FetchedPage<Self::Node>, Self::Error> {
        let page = self
            .inner
            .fetch_after(request.cursor.after(), request.limit)
            .await?;
        Ok(FetchedPage {
            nodes: page.nodes,
            has_next_page: page.has_next_page,
        })
    }

    async fn count_matching(&self, cursor: &Cursor) -> Result<u64, Self::Error> {
        self.inner.count_from(cursor.after()).await
    }

    fn cursor_for(&self, node: &Self::Node) -> Cursor {
        Cursor::resume_after(self.inner.position(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reprise_core::cursor::{CursorCodec, CursorToken};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    struct StoreError(&'static str);

    struct DocStore {
        docs: Vec<String>,
        next_flag: bool,
        seen_limits: Mutex<Vec<u32>>,
        seen_after: Mutex<Vec<Option<CursorValue>>>,
        count_calls: AtomicUsize,
    }

    impl DocStore {
        fn with_docs(n: usize, next_flag: bool) -> Arc<Self> {
            Arc::new(Self {
                docs: (1..=n).map(|i| i.to_string()).collect(),
                next_flag,
                seen_limits: Mutex::new(Vec::new()),
                seen_after: Mutex::new(Vec::new()),
                count_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DocumentSource for DocStore {
        type Node = String;
        type Error = StoreError;

        async fn fetch_after(
            &self,
            after: Option<&CursorValue>,
            limit: u32,
        ) -> Result<DocumentPage<String>, StoreError> {
            self.seen_limits.lock().unwrap().push(limit);
            self.seen_after.lock().unwrap().push(after.cloned());

            let start = match after.and_then(CursorValue::as_str) {
                Some(id) => self
                    .docs
                    .iter()
                    .position(|doc| doc == id)
                    .map(|i| i + 1)
                    .unwrap_or(0),
                None => 0,
            };
            Ok(DocumentPage {
                nodes: self
                    .docs
                    .iter()
                    .skip(start)
                    .take(limit as usize)
                    .cloned()
                    .collect(),
                has_next_page: self.next_flag,
            })
        }

        async fn count_from(&self, _after: Option<&CursorValue>) -> Result<u64, StoreError> {
            self.count_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.docs.len() as u64)
        }

        fn position(&self, node: &String) -> CursorValue {
            CursorValue::from(node.as_str())
        }
    }

    fn token_for(id: &str) -> CursorToken {
        QueryStringCodec.encode(&Cursor::resume_after(id))
    }

    // Test critique: le flag du backend passe tel quel, sans sonde
    #[tokio::test]
    async fn backend_flag_passes_through_unchanged() {
        for next_flag in [true, false] {
            let store = DocStore::with_docs(3, next_flag);
            let connection = paginate(
                PaginationInput::default(),
                SafeLimit::new(100).unwrap(),
                Arc::clone(&store),
            )
            .await
            .unwrap();

            assert_eq!(connection.page_info.has_next_page, next_flag);
            // no probe row: the backend saw the resolved limit itself
            assert_eq!(*store.seen_limits.lock().unwrap(), [100]);
        }
    }

    #[tokio::test]
    async fn edges_carry_single_after_field_tokens() {
        let store = DocStore::with_docs(2, false);
        let connection = paginate(
            PaginationInput::default(),
            SafeLimit::new(10).unwrap(),
            store,
        )
        .await
        .unwrap();

        assert_eq!(connection.edges.len(), 2);
        let decoded = QueryStringCodec
            .try_decode(connection.edges[0].cursor.as_str())
            .unwrap();
        assert_eq!(decoded, Cursor::resume_after("1"));
        assert_eq!(connection.page_info.end_cursor, Some(token_for("2")));
    }

    #[tokio::test]
    async fn resume_position_reaches_backend() {
        let store = DocStore::with_docs(5, false);
        let connection = paginate(
            PaginationInput {
                first: Some(2),
                after: Some(token_for("2")),
            },
            SafeLimit::new(100).unwrap(),
            Arc::clone(&store),
        )
        .await
        .unwrap();

        let nodes: Vec<&str> = connection
            .edges
            .iter()
            .map(|edge| edge.node.as_str())
            .collect();
        assert_eq!(nodes, ["3", "4"]);
        assert_eq!(
            *store.seen_after.lock().unwrap(),
            [Some(CursorValue::from("2"))]
        );
        assert_eq!(*store.seen_limits.lock().unwrap(), [2]);
    }

    #[tokio::test]
    async fn count_is_lazy() {
        let store = DocStore::with_docs(4, false);
        let connection = paginate(
            PaginationInput::default(),
            SafeLimit::new(10).unwrap(),
            Arc::clone(&store),
        )
        .await
        .unwrap();

        assert_eq!(store.count_calls.load(Ordering::SeqCst), 0);
        assert_eq!(connection.total_count.get().await, Ok(4));
        assert_eq!(store.count_calls.load(Ordering::SeqCst), 1);
    }
}
