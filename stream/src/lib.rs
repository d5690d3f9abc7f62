#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]

//! # razor-cursor-stream
//!
//! This crate provides the demand-aware paged cursor of `razor-cursor`,
//! and the consumer-side stages chained on top of it.
//!
//! If you are looking for the whole API in one place, use [`razor-cursor`](https://docs.rs/razor-cursor) instead.
//!
//! ## The Design
//!
//! A remote store is read through a [Source](razor_cursor_core::Source), one page of at most
//! `fetch_size` records per fetch. The consumer never pulls pages itself: it signals demand
//! ("I want N more items") and the cursor turns that demand into fetches.
//!
//! The bookkeeping lives in [CursorState](crate::state::CursorState), a synchronous state machine
//! with no I/O, so every rule of the demand accounting can be tested in isolation:
//!
//! - Items are delivered only against prior demand, in fetch order.
//! - A fetch is issued only when the buffer is empty and demand is left, and never more than one at a time.
//! - A page arriving for a cancelled cursor is dropped without being buffered.
//! - After the source signals end-of-data, no fetch is issued again.
//!
//! A [Cursor](crate::cursor::Cursor) drives the state machine from one tokio task. Demand, cancel and
//! fetch results are queued to that task, which serializes them. Each fetch runs in a separate
//! task and reports back through the same queue, with an optional timeout that fails the cursor
//! just like a source error.
//!
//! The consumer side is a chain of [Publisher](crate::stage::Publisher) stages: filter, limit,
//! limit-rate and request logging. A filter re-requests one item upstream for each item it drops,
//! otherwise a consumer asking for N items could stall with fewer than N delivered.
//!
//! ## Usage
//!
//! You can refer to the [test case](https://github.com/NaturalIO/razor-cursor/blob/master/test-suite/src/cursor/) for example.
//!

#[macro_use]
extern crate captains_log;

pub mod cursor;
pub mod stage;
pub mod state;
