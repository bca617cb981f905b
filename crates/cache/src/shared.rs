use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::RegexMatchCache;
use crate::error::Result;
use crate::time::Timestamp;

/// A [`RegexMatchCache`] behind a single reader/writer lock.
///
/// Structural operations take the write lock. Queries on prepared patterns share the read
/// lock and race only on the last-access stamp, which tolerates concurrent max-merges.
#[derive(Default)]
pub struct SharedRegexMatchCache {
	inner: RwLock<RegexMatchCache>,
}

impl SharedRegexMatchCache {
	pub fn new(cache: RegexMatchCache) -> Self {
		Self {
			inner: RwLock::new(cache),
		}
	}

	/// Prepares `pattern` if needed and returns its matches, recording an access at `now`.
	///
	/// Takes only the read lock when the pattern is already prepared.
	pub fn find_matches(&self, pattern: &str, now: Timestamp) -> Result<Vec<Arc<str>>> {
		{
			let cache = self.inner.read();
			if cache.is_ready_to_find_matches(pattern) {
				return Ok(cache.find_matches(pattern, now));
			}
		}

		let mut cache = self.inner.write();
		cache.prepare_to_find_matches(pattern)?;
		let cache = RwLockWriteGuard::downgrade(cache);
		Ok(cache.find_matches(pattern, now))
	}

	pub fn add_regex(&self, pattern: &str) -> bool {
		self.inner.write().add_regex(pattern)
	}

	pub fn erase_regex(&self, pattern: &str) -> bool {
		self.inner.write().erase_regex(pattern)
	}

	pub fn add_string(&self, text: &str) -> bool {
		self.inner.write().add_string(text)
	}

	pub fn erase_string(&self, text: &str) -> bool {
		self.inner.write().erase_string(text)
	}

	pub fn purge(&self, expiry: Timestamp) -> usize {
		self.inner.write().purge(expiry)
	}

	pub fn purge_expired(&self, now: Timestamp) -> usize {
		self.inner.write().purge_expired(now)
	}

	/// Shared access for read-only operations (diagnostics, listings).
	pub fn read(&self) -> RwLockReadGuard<'_, RegexMatchCache> {
		self.inner.read()
	}

	/// Exclusive access for batches of mutations.
	pub fn write(&self) -> RwLockWriteGuard<'_, RegexMatchCache> {
		self.inner.write()
	}

	pub fn into_inner(self) -> RegexMatchCache {
		self.inner.into_inner()
	}
}
