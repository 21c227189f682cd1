//! Core domain types for docsum
//!
//! This crate defines the data that flows through the pipeline — fetched
//! documents, bounded text chunks, and per-chunk summaries — plus the
//! chunker itself. Everything here is pure: no I/O, no clients.

pub mod chunker;
pub mod document;
pub mod error;
pub mod summary;

pub use chunker::{chunk, merge_paragraphs, split_lines, ChunkConfig};
pub use document::Document;
pub use error::{CoreError, Result};
pub use summary::Summary;
