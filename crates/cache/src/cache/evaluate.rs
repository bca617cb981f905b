use super::RegexMatchCache;
use crate::error::Result;
use crate::guard::RepairGuard;

impl RegexMatchCache {
	/// Returns true if `pattern` is registered and has no pending evaluation work.
	pub fn is_ready_to_find_matches(&self, pattern: &str) -> bool {
		self.tables
			.regex_id(pattern)
			.is_some_and(|id| !self.tables.is_pending(id))
	}

	/// Makes `pattern` ready to query, evaluating only what is outstanding for it.
	///
	/// - Unregistered pattern: registers it and evaluates it against every registered string.
	/// - Registered pattern with pending strings: evaluates it against exactly those strings.
	/// - Ready pattern: no work.
	///
	/// # Errors
	///
	/// Returns [`crate::CacheError::Pattern`] if the engine fails to compile or evaluate the
	/// pattern. The cache is repaired first: every regex is unregistered and every confirmed or
	/// pending pair is dropped, while registered strings are kept.
	pub fn prepare_to_find_matches(&mut self, pattern: &str) -> Result<()> {
		let known = self.tables.regex_id(pattern);
		if known.is_some_and(|id| !self.tables.is_pending(id)) {
			return Ok(());
		}

		let engine = &*self.engine;
		let mut tx = RepairGuard::new(&mut self.tables, "prepare_to_find_matches");

		let (id, candidates) = match known {
			Some(id) => {
				let pending = tx.queue_reverse.remove(&id).unwrap_or_default();
				for &string in &pending {
					tx.unqueue_forward(string, id);
				}
				(id, pending.into_iter().collect::<Vec<_>>())
			}
			None => {
				let id = tx.insert_regex(pattern);
				(id, tx.string_handles().collect::<Vec<_>>())
			}
		};

		if candidates.is_empty() {
			tx.commit();
			return Ok(());
		}

		let compiled = engine.compile(pattern)?;
		let mut matched = 0usize;
		for &string in &candidates {
			if compiled.matches(&tx.string(string).text)? {
				tx.confirm(id, string);
				matched += 1;
			}
		}
		tx.commit();

		tracing::trace!(
			pattern,
			first_contact = known.is_none(),
			evaluated = candidates.len(),
			matched,
			"Prepared regex"
		);
		Ok(())
	}
}
