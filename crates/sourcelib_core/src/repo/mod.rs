//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the document-loading contract used by services.
//! - Keep filesystem details out of the engine and report code.
//!
//! # Invariants
//! - Repositories return raw documents; parsing happens in `model`.

pub mod source_repo;
