//! Fever Runtime - Condition evaluation and query fragment generation
//!
//! This crate renders fever conditions for their three execution targets:
//! - in-memory evaluation against a [`Record`]
//! - relational WHERE fragments
//! - search engine query documents
//!
//! Everything here is a pure function of its inputs plus the injected clock.

pub mod clock;
pub mod error;
pub mod memory;
pub mod record;
pub mod snippet;

// Re-export main types
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, RuntimeError};
pub use memory::MemoryEvaluator;
pub use record::{BoundCondition, FnRecord, Record};
pub use snippet::{
    Backend, Dispatcher, Fragment, RelationalDialect, RelationalGenerator, SearchGenerator,
    SnippetMap,
};
