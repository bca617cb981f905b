//! [`RegexMatchCache`]: which registered strings match a pattern, computed lazily.
//!
//! # Mental Model
//!
//! 1. **Registration:** [`RegexMatchCache::add_regex`] and [`RegexMatchCache::add_string`] only
//!    record pending pairs against the opposite side. No pattern is evaluated.
//! 2. **Preparation:** [`RegexMatchCache::prepare_to_find_matches`] evaluates one pattern against
//!    exactly its pending strings (or the whole corpus on first contact) and confirms the hits.
//! 3. **Query:** [`RegexMatchCache::find_matches`] reads the confirmed set of a prepared pattern
//!    and max-merges the caller's timestamp into its last-access stamp.
//! 4. **Eviction:** [`RegexMatchCache::purge`] erases every regex last accessed at or before a
//!    threshold. Strings are only removed explicitly.
//!
//! # Concurrency
//!
//! Mutations take `&mut self`; callers serialize them. Queries take `&self` and may run in
//! parallel with each other. [`crate::SharedRegexMatchCache`] packages that discipline behind a
//! lock.
//!
//! # Invariants
//!
//! See [`crate::invariants`] for the catalog and the tests that pin each one down.

mod evaluate;
mod purge;
mod query;

use std::sync::Arc;

use sift_pattern::{PatternEngine, RegexEngine};

use crate::config::{CacheConfig, RetentionPolicy};
use crate::guard::RepairGuard;
use crate::store::Tables;

pub use query::{Matches, MatchesIter};

/// Bidirectional regex/string match cache.
pub struct RegexMatchCache {
	tables: Tables,
	engine: Arc<dyn PatternEngine>,
	retention: RetentionPolicy,
}

/// Size summary of a [`RegexMatchCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
	pub regexes: usize,
	pub strings: usize,
	/// Confirmed `(regex, string)` match pairs.
	pub confirmed_pairs: usize,
	/// `(regex, string)` pairs awaiting evaluation.
	pub pending_pairs: usize,
}

impl Default for RegexMatchCache {
	fn default() -> Self {
		Self::new()
	}
}

impl RegexMatchCache {
	/// Creates an empty cache over the default [`RegexEngine`].
	pub fn new() -> Self {
		Self::with_engine(Arc::new(RegexEngine::default()))
	}

	/// Creates an empty cache over a custom pattern engine.
	pub fn with_engine(engine: Arc<dyn PatternEngine>) -> Self {
		Self {
			tables: Tables::default(),
			engine,
			retention: RetentionPolicy::default(),
		}
	}

	pub fn from_config(config: &CacheConfig) -> Self {
		let mut cache = Self::with_engine(Arc::new(RegexEngine::new(config.engine.clone())));
		cache.retention = config.retention;
		cache
	}

	pub fn engine(&self) -> &Arc<dyn PatternEngine> {
		&self.engine
	}

	pub fn retention(&self) -> RetentionPolicy {
		self.retention
	}

	pub fn set_retention(&mut self, retention: RetentionPolicy) {
		self.retention = retention;
	}

	pub fn has_regex(&self, pattern: &str) -> bool {
		self.tables.regex_id(pattern).is_some()
	}

	pub fn has_string(&self, text: &str) -> bool {
		self.tables.string_id(text).is_some()
	}

	/// Registers a pattern, queueing it against every registered string.
	///
	/// Returns `false` (and does nothing) if the pattern was already registered.
	pub fn add_regex(&mut self, pattern: &str) -> bool {
		if self.has_regex(pattern) {
			return false;
		}
		let mut tx = RepairGuard::new(&mut self.tables, "add_regex");
		let id = tx.insert_regex(pattern);
		tx.enqueue_regex(id);
		tx.commit();
		true
	}

	/// Removes a pattern along with its confirmed and pending pairs.
	///
	/// Returns `false` if the pattern was not registered.
	pub fn erase_regex(&mut self, pattern: &str) -> bool {
		let Some(id) = self.tables.regex_id(pattern) else {
			return false;
		};
		let mut tx = RepairGuard::new(&mut self.tables, "erase_regex");
		tx.remove_regex(id);
		tx.commit();
		true
	}

	/// Registers a string, queueing it against every registered pattern.
	///
	/// Returns `false` (and does nothing) if the string was already registered.
	pub fn add_string(&mut self, text: &str) -> bool {
		if self.has_string(text) {
			return false;
		}
		let mut tx = RepairGuard::new(&mut self.tables, "add_string");
		let id = tx.insert_string(text);
		tx.enqueue_string(id);
		tx.commit();
		true
	}

	/// Removes a string along with its confirmed and pending pairs.
	///
	/// Returns `false` if the string was not registered.
	pub fn erase_string(&mut self, text: &str) -> bool {
		let Some(id) = self.tables.string_id(text) else {
			return false;
		};
		let mut tx = RepairGuard::new(&mut self.tables, "erase_string");
		tx.remove_string(id);
		tx.commit();
		true
	}

	/// Registered patterns, in no particular order.
	pub fn regex_list(&self) -> Vec<&str> {
		self.tables.regexes.iter().map(|(_, entry)| &*entry.pattern).collect()
	}

	/// Registered strings, in no particular order.
	pub fn string_list(&self) -> Vec<&str> {
		self.tables.strings.iter().map(|(_, entry)| &*entry.text).collect()
	}

	pub fn stats(&self) -> CacheStats {
		CacheStats {
			regexes: self.tables.regexes.len(),
			strings: self.tables.strings.len(),
			confirmed_pairs: self.tables.confirmed_pairs(),
			pending_pairs: self.tables.pending_pairs(),
		}
	}

	/// Discards every pending pair and every confirmed association, and unregisters every
	/// pattern. Strings stay registered.
	///
	/// All discarded knowledge is rebuilt by later registration and preparation.
	pub fn repair(&mut self) {
		tracing::debug!(regexes = self.tables.regexes.len(), "Repairing match cache");
		self.tables.repair();
	}

	/// Drops everything, strings included.
	pub fn clear(&mut self) {
		tracing::debug!(
			regexes = self.tables.regexes.len(),
			strings = self.tables.strings.len(),
			"Clearing match cache"
		);
		self.tables = Tables::default();
	}

	pub(crate) fn tables(&self) -> &Tables {
		&self.tables
	}

	#[cfg(test)]
	pub(crate) fn tables_mut(&mut self) -> &mut Tables {
		&mut self.tables
	}
}
