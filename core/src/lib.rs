//! # razor-cursor-core
//!
//! This crate provides the core types and traits for [`razor-cursor`](https://docs.rs/razor-cursor).
//! It includes the paging model, the [Source] trait a remote store implements,
//! the fetch observer hook, configuration and the error type shared by the other crates in the workspace.

mod config;
pub use config::*;
pub mod error;
pub use error::CursorError;
mod listener;
pub use listener::*;
mod page;
pub use page::*;
mod source;
pub use source::*;
