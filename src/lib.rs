#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]

//! # razor-cursor
//!
//! A demand-driven paged cursor for remote stores.
//!
//! The consumer signals how many items it wants, the cursor fetches pages of a fixed
//! `fetch_size` from the store only when its buffer can't cover that demand. Consumer-side stages
//! (filter, limit, limit-rate) keep the demand accounting intact.
//!
//! ## Components
//!
//! `razor-cursor` is a collection of crates, re-exported here:
//!
//! - [`razor-cursor-core`](https://docs.rs/razor-cursor-core): pages, the [Source] trait, the
//!   [FetchListener] hook, [CursorConfig] and [CursorError].
//! - [`razor-cursor-stream`](https://docs.rs/razor-cursor-stream): the cursor state machine,
//!   the tokio driver and the stages.
//!
//! ## Usage
//!
//! ```ignore
//! use razor_cursor::*;
//!
//! let facts = CursorDefault::with_listener(
//!     CursorConfig::with_fetch_size(10),
//!     Arc::new(LogListener::new("Cassandra")),
//! );
//! let mut cursor = Cursor::open(source, &facts)?;
//! cursor.request(10);
//! while let Some(item) = cursor.next().await {
//!     ...
//! }
//! ```

#[macro_use]
extern crate captains_log;

pub use razor_cursor_core::*;
pub use razor_cursor_stream::cursor::{Cursor, CursorDefault, CursorFacts, CursorStats};
pub use razor_cursor_stream::stage::{self, Publisher, PublisherExt};
pub use razor_cursor_stream::state;

mod listener;
pub use listener::LogListener;
