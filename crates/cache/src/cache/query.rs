use std::collections::hash_set;
use std::sync::Arc;

use super::RegexMatchCache;
use crate::error::{CacheError, Result};
use crate::store::{Set, StringId, Tables};
use crate::time::Timestamp;

/// Borrowed view of a prepared pattern's confirmed matches.
///
/// Borrows the cache, so no structural mutation can happen while a view is alive.
#[derive(Clone, Copy)]
pub struct Matches<'a> {
	tables: &'a Tables,
	ids: Option<&'a Set<StringId>>,
}

impl<'a> Matches<'a> {
	pub fn len(&self) -> usize {
		self.ids.map_or(0, Set::len)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn iter(&self) -> MatchesIter<'a> {
		MatchesIter {
			tables: self.tables,
			ids: self.ids.map(|ids| ids.iter()),
		}
	}

	pub fn contains(&self, text: &str) -> bool {
		self.iter().any(|m| m == text)
	}
}

impl<'a> IntoIterator for Matches<'a> {
	type Item = &'a str;
	type IntoIter = MatchesIter<'a>;

	fn into_iter(self) -> MatchesIter<'a> {
		self.iter()
	}
}

/// Iterator over a [`Matches`] view.
pub struct MatchesIter<'a> {
	tables: &'a Tables,
	ids: Option<hash_set::Iter<'a, StringId>>,
}

impl<'a> Iterator for MatchesIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		let tables = self.tables;
		let id = self.ids.as_mut()?.next()?;
		Some(&*tables.string(*id).text)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.ids.as_ref().map_or((0, Some(0)), |ids| ids.size_hint())
	}
}

impl RegexMatchCache {
	/// Returns a borrowed view of the confirmed matches of a prepared pattern and records an
	/// access at `now`.
	///
	/// # Panics
	///
	/// With debug assertions enabled, panics if the pattern is not ready (see
	/// [`RegexMatchCache::is_ready_to_find_matches`]). Without them, an unregistered pattern
	/// yields an empty view and a pending one yields whatever has been confirmed so far.
	pub fn find_matches_unsafe(&self, pattern: &str, now: Timestamp) -> Matches<'_> {
		debug_assert!(
			self.is_ready_to_find_matches(pattern),
			"not ready to find matches: {pattern:?}"
		);
		let ids = self.tables.regex_id(pattern).map(|id| {
			let entry = self.tables.regex(id);
			entry.accessed_at.bump(now);
			&entry.matches
		});
		Matches {
			tables: &self.tables,
			ids,
		}
	}

	/// Returns the confirmed matches of a prepared pattern as owned handles and records an
	/// access at `now`.
	///
	/// # Panics
	///
	/// Same precondition as [`RegexMatchCache::find_matches_unsafe`].
	pub fn find_matches(&self, pattern: &str, now: Timestamp) -> Vec<Arc<str>> {
		debug_assert!(
			self.is_ready_to_find_matches(pattern),
			"not ready to find matches: {pattern:?}"
		);
		let Some(id) = self.tables.regex_id(pattern) else {
			return Vec::new();
		};
		let entry = self.tables.regex(id);
		entry.accessed_at.bump(now);
		entry
			.matches
			.iter()
			.map(|&string| Arc::clone(&self.tables.string(string).text))
			.collect()
	}

	/// Like [`RegexMatchCache::find_matches`], but reports an unprepared pattern as
	/// [`CacheError::NotReady`] instead of asserting.
	pub fn try_find_matches(&self, pattern: &str, now: Timestamp) -> Result<Vec<Arc<str>>> {
		if !self.is_ready_to_find_matches(pattern) {
			return Err(CacheError::NotReady {
				pattern: pattern.to_owned(),
			});
		}
		Ok(self.find_matches(pattern, now))
	}

	/// Evaluates `pattern` against every registered string without consulting or updating any
	/// cached state.
	pub fn find_matches_uncached(&self, pattern: &str) -> Result<Vec<Arc<str>>> {
		let compiled = self.engine.compile(pattern)?;
		let mut out = Vec::new();
		for (_, entry) in &self.tables.strings {
			if compiled.matches(&entry.text)? {
				out.push(Arc::clone(&entry.text));
			}
		}
		Ok(out)
	}

	/// Last recorded access of `pattern`, or `None` if it is not registered.
	pub fn last_access(&self, pattern: &str) -> Option<Timestamp> {
		let id = self.tables.regex_id(pattern)?;
		Some(self.tables.regex(id).accessed_at.load())
	}
}
