#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Bidirectional cache answering "which registered strings match this pattern?".
//!
//! # Purpose
//!
//! Workloads with a fairly stable set of patterns queried repeatedly against a changing set
//! of strings (name matching, ACL rules) should not re-run every pattern on every query, nor
//! recompute the full cross product whenever a string arrives. [`RegexMatchCache`] keeps the
//! confirmed matches in both directions and defers evaluation of new pairs until the pattern
//! side is actually queried.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`RegexMatchCache`] | The cache: registration, lazy evaluation, queries, eviction. |
//! | [`SharedRegexMatchCache`] | The cache behind a reader/writer lock. |
//! | [`Timestamp`] | Caller-supplied time used for recency. |
//! | [`CacheConfig`] | Engine options and retention policy, loadable from TOML. |
//! | [`ConsistencyOracle`] | Ground truth for [`RegexMatchCache::consistency`]. |
//!
//! # Failure Model
//!
//! Pattern engine failures are returned to the caller after the cache has been repaired: every
//! pattern is unregistered and every confirmed or pending pair dropped, while strings remain.
//! Nothing is left half-applied; everything dropped is rebuilt by later preparation.
//!
//! # Example
//!
//! ```
//! use sift_cache::{RegexMatchCache, Timestamp};
//!
//! let mut cache = RegexMatchCache::new();
//! for s in ["cat", "car", "dog"] {
//! 	cache.add_string(s);
//! }
//! cache.prepare_to_find_matches("ca.*").unwrap();
//!
//! let mut found: Vec<String> = cache
//! 	.find_matches("ca.*", Timestamp::from_nanos(1))
//! 	.iter()
//! 	.map(|s| s.to_string())
//! 	.collect();
//! found.sort();
//! assert_eq!(found, ["car", "cat"]);
//! ```

mod cache;
mod config;
mod diagnostics;
mod error;
mod guard;
pub(crate) mod invariants;
mod shared;
mod store;
#[cfg(test)]
mod testing;
mod time;

pub use cache::{CacheStats, Matches, MatchesIter, RegexMatchCache};
pub use config::{CacheConfig, RetentionPolicy};
pub use diagnostics::{ConsistencyOracle, IndexSide, InspectView, QueueSide, Violation};
pub use error::{CacheError, ConfigError, Result};
pub use shared::SharedRegexMatchCache;
pub use sift_pattern::{
	CompiledPattern, EngineOptions, PatternEngine, PatternError, PatternMemo, RegexEngine,
};
pub use time::Timestamp;
