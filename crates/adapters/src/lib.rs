//! Store adapters for Reprise pagination.
//!
//! This crate bridges concrete backend shapes onto the
//! [`PageSource`](reprise_core::ports::PageSource) port from
//! `reprise-core`. Both adapters fix the cursor to the single reserved
//! `{after: <position>}` field and use the standard codec, so a token
//! minted by one backend can resume pagination on any other.
//!
//! - [`relational`] - backends that only return rows; `has_next_page`
//!   is derived by over-fetching one probe row
//! - [`document`] - backends that report `has_next_page` themselves
//!
//! # Usage
//!
//! ```ignore
//! use reprise_adapters::relational;
//! use reprise_core::paginate::{PaginationInput, SafeLimit};
//!
//! let safe_limit = SafeLimit::new(100)?;
//! let connection = relational::paginate(input, safe_limit, store).await?;
//!
//! for edge in &connection.edges {
//!     println!("{} -> {}", edge.cursor, edge.node.id);
//! }
//! let total = connection.total_count.get().await?;
//! ```

pub mod document;
pub mod relational;

pub use document::{DocumentPage, DocumentSource};
pub use relational::RelationalSource;
