//! Core pagination layer for Reprise.
//!
//! This crate contains the cursor model and codec, the port trait that
//! backends implement, and the orchestrator that assembles relay-style
//! connections. It follows hexagonal architecture principles - this is
//! the innermost layer with no dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              transport layer (GraphQL, REST, ...)           │
//! │                     not part of reprise                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      reprise-adapters                       │
//! │          (relational / document store bridges)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  reprise-core  ← YOU ARE HERE               │
//! │              (cursor codec, ports, orchestrator)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cursor`] - Cursor model, opaque tokens and the codec
//! - [`connection`] - Connection, edges, page info, deferred count
//! - [`ports`] - Interface trait for backends to implement
//! - [`paginate`] - The orchestrator and its input types
//! - [`error`] - Configuration and decode error types
//! - [`metrics`] - Pagination metrics definitions
//!
//! # Key Concepts
//!
//! ## Fail-open cursors
//!
//! Client-supplied resume tokens are untrusted input. A token that does
//! not decode - expired format, truncation, hand-editing - never fails
//! the request; pagination restarts from the first page instead.
//!
//! ## Safe limit
//!
//! Every call carries a [`paginate::SafeLimit`] ceiling. The client's
//! `first` is honored inside `1..=ceiling`; everything else resolves to
//! the ceiling itself, so no request can fetch an unbounded page.
//!
//! ## Deferred total count
//!
//! Counting matches is often the most expensive query of a connection.
//! The orchestrator returns it as a cold future; callers that never
//! await [`connection::TotalCount`] never run it.
//!
//! ## Request Lifecycle
//!
//! 1. Resolve the requested page size against the safe limit
//! 2. Decode the `after` token (fail open on rejection)
//! 3. Fetch one page of raw nodes through [`ports::PageSource`]
//! 4. Build edges, encoding each node's position into a token
//! 5. Defer the total count until the caller asks for it

pub mod connection;
pub mod cursor;
pub mod error;
pub mod metrics;
pub mod paginate;
pub mod ports;
