//! Release database of the Go standard library api
//!
//! Built from the `api/go1*.txt` files of the Go repository, it answers in
//! which release a package or symbol appeared and when it was deprecated.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Grammar   │────▶│  VersionDb  │
//! │(cache, http)│     │ (api lines) │     │(since/search│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │    Split    │
//!                     │  (fields)   │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`db`]: Load orchestration and queries
//! - [`grammar`]: Parsing of a single api line
//! - [`split`]: Field splitter aware of brackets and literals
//! - [`source`]: Api file retrieval with a local cache
//! - [`version`]: Release tags
//! - [`error`]: Error types for every stage

pub mod db;
pub mod error;
pub mod grammar;
pub mod source;
pub mod split;
pub mod version;

pub use db::{SearchHit, SymbolInfo, VersionDb};
pub use error::{FetchError, GrammarError, LoadError, QueryError, SplitError};
pub use source::{ApiSource, CachedSource};
pub use version::VersionTag;
