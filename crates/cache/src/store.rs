//! The four interlocking maps and the primitive edits that keep them in agreement.
//!
//! Records live in slab arenas. A [`RegexId`] or [`StringId`] stays valid from insertion until
//! the record is removed, and removal cascades through every map that mentions the handle, so
//! no handle outlives its record. Handles never leave the crate.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use slab::Slab;

use crate::time::AccessStamp;

pub(crate) type Map<K, V> = FxHashMap<K, V>;
pub(crate) type Set<T> = FxHashSet<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct RegexId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct StringId(usize);

/// A registered pattern and the strings confirmed to match it.
#[derive(Debug)]
pub(crate) struct RegexEntry {
	pub(crate) pattern: Arc<str>,
	pub(crate) matches: Set<StringId>,
	pub(crate) accessed_at: AccessStamp,
}

/// A registered string and the patterns confirmed to match it.
#[derive(Debug)]
pub(crate) struct StringEntry {
	pub(crate) text: Arc<str>,
	pub(crate) regexes: Set<RegexId>,
}

/// Confirmed index (both directions) plus pending queue (both directions).
///
/// A pair is confirmed iff it is in both `regexes[r].matches` and `strings[s].regexes`, and
/// pending iff it is in both `queue_forward[s]` and `queue_reverse[r]`. Queue sets are never
/// left empty; an emptied set is removed with its key.
#[derive(Debug, Default)]
pub(crate) struct Tables {
	pub(crate) regexes: Slab<RegexEntry>,
	pub(crate) regex_ids: Map<Arc<str>, RegexId>,
	pub(crate) strings: Slab<StringEntry>,
	pub(crate) string_ids: Map<Arc<str>, StringId>,
	pub(crate) queue_forward: Map<StringId, Set<RegexId>>,
	pub(crate) queue_reverse: Map<RegexId, Set<StringId>>,
}

impl Tables {
	pub(crate) fn regex_id(&self, pattern: &str) -> Option<RegexId> {
		self.regex_ids.get(pattern).copied()
	}

	pub(crate) fn string_id(&self, text: &str) -> Option<StringId> {
		self.string_ids.get(text).copied()
	}

	pub(crate) fn regex(&self, id: RegexId) -> &RegexEntry {
		&self.regexes[id.0]
	}

	pub(crate) fn string(&self, id: StringId) -> &StringEntry {
		&self.strings[id.0]
	}

	/// Like [`Tables::regex`], but tolerates a dangling handle.
	pub(crate) fn try_regex(&self, id: RegexId) -> Option<&RegexEntry> {
		self.regexes.get(id.0)
	}

	/// Like [`Tables::string`], but tolerates a dangling handle.
	pub(crate) fn try_string(&self, id: StringId) -> Option<&StringEntry> {
		self.strings.get(id.0)
	}

	pub(crate) fn regex_handles(&self) -> impl Iterator<Item = RegexId> + '_ {
		self.regexes.iter().map(|(key, _)| RegexId(key))
	}

	pub(crate) fn string_handles(&self) -> impl Iterator<Item = StringId> + '_ {
		self.strings.iter().map(|(key, _)| StringId(key))
	}

	pub(crate) fn is_pending(&self, regex: RegexId) -> bool {
		self.queue_reverse.contains_key(&regex)
	}

	/// Inserts a regex record with no matches and no pending work.
	pub(crate) fn insert_regex(&mut self, pattern: &str) -> RegexId {
		let pattern: Arc<str> = Arc::from(pattern);
		let id = RegexId(self.regexes.insert(RegexEntry {
			pattern: Arc::clone(&pattern),
			matches: Set::default(),
			accessed_at: AccessStamp::default(),
		}));
		self.regex_ids.insert(pattern, id);
		id
	}

	/// Inserts a string record with no matches and no pending work.
	pub(crate) fn insert_string(&mut self, text: &str) -> StringId {
		let text: Arc<str> = Arc::from(text);
		let id = StringId(self.strings.insert(StringEntry {
			text: Arc::clone(&text),
			regexes: Set::default(),
		}));
		self.string_ids.insert(text, id);
		id
	}

	/// Queues `regex` against every registered string.
	pub(crate) fn enqueue_regex(&mut self, regex: RegexId) {
		if self.strings.is_empty() {
			return;
		}
		let mut pending = Set::default();
		pending.reserve(self.strings.len());
		for (key, _) in &self.strings {
			let string = StringId(key);
			self.queue_forward.entry(string).or_default().insert(regex);
			pending.insert(string);
		}
		self.queue_reverse.insert(regex, pending);
	}

	/// Queues `string` against every registered regex.
	pub(crate) fn enqueue_string(&mut self, string: StringId) {
		if self.regexes.is_empty() {
			return;
		}
		let mut pending = Set::default();
		pending.reserve(self.regexes.len());
		for (key, _) in &self.regexes {
			let regex = RegexId(key);
			self.queue_reverse.entry(regex).or_default().insert(string);
			pending.insert(regex);
		}
		self.queue_forward.insert(string, pending);
	}

	/// Records `(regex, string)` as a confirmed match on both sides.
	pub(crate) fn confirm(&mut self, regex: RegexId, string: StringId) {
		self.regexes[regex.0].matches.insert(string);
		self.strings[string.0].regexes.insert(regex);
	}

	/// Removes `regex` from the forward queue entry of `string`, dropping the entry once empty.
	pub(crate) fn unqueue_forward(&mut self, string: StringId, regex: RegexId) {
		if let Some(regexes) = self.queue_forward.get_mut(&string) {
			regexes.remove(&regex);
			if regexes.is_empty() {
				self.queue_forward.remove(&string);
			}
		}
	}

	/// Removes `string` from the reverse queue entry of `regex`, dropping the entry once empty.
	pub(crate) fn unqueue_reverse(&mut self, regex: RegexId, string: StringId) {
		if let Some(strings) = self.queue_reverse.get_mut(&regex) {
			strings.remove(&string);
			if strings.is_empty() {
				self.queue_reverse.remove(&regex);
			}
		}
	}

	/// Removes a regex record and every reference to it.
	pub(crate) fn remove_regex(&mut self, regex: RegexId) -> RegexEntry {
		if let Some(pending) = self.queue_reverse.remove(&regex) {
			for string in pending {
				self.unqueue_forward(string, regex);
			}
		}
		let entry = self.regexes.remove(regex.0);
		for string in &entry.matches {
			self.strings[string.0].regexes.remove(&regex);
		}
		self.regex_ids.remove(&entry.pattern);
		entry
	}

	/// Removes a string record and every reference to it.
	pub(crate) fn remove_string(&mut self, string: StringId) -> StringEntry {
		if let Some(pending) = self.queue_forward.remove(&string) {
			for regex in pending {
				self.unqueue_reverse(regex, string);
			}
		}
		let entry = self.strings.remove(string.0);
		for regex in &entry.regexes {
			self.regexes[regex.0].matches.remove(&string);
		}
		self.string_ids.remove(&entry.text);
		entry
	}

	/// Discards all regex-side knowledge while keeping every string registered.
	pub(crate) fn repair(&mut self) {
		self.queue_reverse.clear();
		self.queue_forward.clear();
		for (_, entry) in &mut self.strings {
			entry.regexes.clear();
		}
		self.regexes.clear();
		self.regex_ids.clear();
	}

	pub(crate) fn confirmed_pairs(&self) -> usize {
		self.regexes.iter().map(|(_, entry)| entry.matches.len()).sum()
	}

	pub(crate) fn pending_pairs(&self) -> usize {
		self.queue_reverse.values().map(Set::len).sum()
	}
}
