//! Domain model for summarized source documents.
//!
//! # Responsibility
//! - Define the record shape shared by the relationship engine and library views.
//! - Keep markdown parsing rules next to the data they produce.
//!
//! # Invariants
//! - Every record is identified by a stable slug.
//! - Records are read-only inputs; derived graph data is never stored on them.

pub mod source;
