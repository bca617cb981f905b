use super::RegexMatchCache;
use crate::guard::RepairGuard;
use crate::time::Timestamp;

impl RegexMatchCache {
	/// Erases every regex whose last access is at or before `expiry`. Strings are untouched.
	///
	/// A regex that was registered but never queried has a last access of
	/// [`Timestamp::ZERO`], so any threshold removes it.
	///
	/// Returns the number of regexes erased.
	pub fn purge(&mut self, expiry: Timestamp) -> usize {
		let expired: Vec<_> = self
			.tables
			.regex_handles()
			.filter(|&id| self.tables.regex(id).accessed_at.load() <= expiry)
			.collect();
		if expired.is_empty() {
			return 0;
		}

		let mut tx = RepairGuard::new(&mut self.tables, "purge");
		for &id in &expired {
			tx.remove_regex(id);
		}
		tx.commit();

		tracing::debug!(
			expiry = expiry.as_nanos(),
			purged = expired.len(),
			remaining = self.tables.regexes.len(),
			"Purged expired regexes"
		);
		expired.len()
	}

	/// Applies the configured [`crate::RetentionPolicy`] at `now`.
	pub fn purge_expired(&mut self, now: Timestamp) -> usize {
		match self.retention.expiry(now) {
			Some(expiry) => self.purge(expiry),
			None => 0,
		}
	}
}
