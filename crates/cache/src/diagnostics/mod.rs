//! Read-only verification and inspection of a [`RegexMatchCache`].
//!
//! Nothing here is needed for correctness. [`RegexMatchCache::consistency`] walks every
//! `(regex, string)` pair and every queue entry and reports where the four maps disagree with
//! each other or with the pattern engine; [`RegexMatchCache::inspect`] renders the maps.

mod inspect;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use sift_pattern::{PatternEngine, PatternError, PatternMemo};

pub use inspect::InspectView;

use crate::RegexMatchCache;
use crate::store::{RegexId, StringId, Tables};

/// Which direction of the confirmed index a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSide {
	RegexToMatch,
	MatchToRegex,
}

/// Which direction of the pending queue a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSide {
	Forward,
	Reverse,
}

impl fmt::Display for IndexSide {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::RegexToMatch => "regex-to-match",
			Self::MatchToRegex => "match-to-regex",
		})
	}
}

impl fmt::Display for QueueSide {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Forward => "queue-forward",
			Self::Reverse => "queue-reverse",
		})
	}
}

/// One disagreement found by [`RegexMatchCache::consistency`].
///
/// Dangling handles render as `#` followed by their debug form, as in [`InspectView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
	/// A queue is non-empty while there are no regexes or no strings.
	QueueWithoutCorpus { side: QueueSide },
	/// A confirmed pair recorded on `side` but not on the other side.
	OneSided {
		side: IndexSide,
		regex: String,
		string: String,
	},
	/// A confirmed pair the engine says does not match.
	FalseMatch {
		side: IndexSide,
		regex: String,
		string: String,
	},
	/// A true match absent from `side` and not pending on both queue sides.
	MissingMatch {
		side: IndexSide,
		regex: String,
		string: String,
	},
	/// A queue key that is not a registered record.
	UnknownKey { side: QueueSide, key: String },
	/// A queue key mapped to an empty set.
	EmptyEntry { side: QueueSide, key: String },
	/// A pair queued on `side` but absent from the other queue side.
	Unmirrored {
		side: QueueSide,
		regex: String,
		string: String,
	},
	/// A pair queued on `side` that is also confirmed.
	QueuedAndConfirmed {
		side: QueueSide,
		regex: String,
		string: String,
	},
}

impl fmt::Display for Violation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::QueueWithoutCorpus { side } => write!(f, "{side} not empty"),
			Self::OneSided {
				side,
				regex,
				string,
			} => write!(f, "{side} has unmirrored pair ({regex:?}, {string:?})"),
			Self::FalseMatch {
				side,
				regex,
				string,
			} => write!(f, "{side} has non-matching pair ({regex:?}, {string:?})"),
			Self::MissingMatch {
				side,
				regex,
				string,
			} => write!(f, "{side} missing pair ({regex:?}, {string:?})"),
			Self::UnknownKey { side, key } => write!(f, "{side} has unknown key {key:?}"),
			Self::EmptyEntry { side, key } => write!(f, "{side}[{key:?}] is empty"),
			Self::Unmirrored {
				side,
				regex,
				string,
			} => write!(f, "{side} pair ({regex:?}, {string:?}) missing from other queue"),
			Self::QueuedAndConfirmed {
				side,
				regex,
				string,
			} => write!(f, "{side} pair ({regex:?}, {string:?}) is already confirmed"),
		}
	}
}

/// Ground truth for consistency checks: an engine plus a memo of compiled patterns, so each
/// pattern compiles once per oracle.
pub struct ConsistencyOracle {
	engine: Arc<dyn PatternEngine>,
	memo: PatternMemo,
}

impl ConsistencyOracle {
	pub fn new(engine: Arc<dyn PatternEngine>) -> Self {
		Self {
			engine,
			memo: PatternMemo::new(),
		}
	}

	pub fn matches(&mut self, pattern: &str, candidate: &str) -> Result<bool, PatternError> {
		self.memo.matches(&*self.engine, pattern, candidate)
	}
}

fn regex_text(tables: &Tables, id: RegexId) -> Cow<'_, str> {
	tables.try_regex(id).map_or_else(
		|| Cow::Owned(format!("#{id:?}")),
		|entry| Cow::Borrowed(&*entry.pattern),
	)
}

fn string_text(tables: &Tables, id: StringId) -> Cow<'_, str> {
	tables.try_string(id).map_or_else(
		|| Cow::Owned(format!("#{id:?}")),
		|entry| Cow::Borrowed(&*entry.text),
	)
}

impl RegexMatchCache {
	/// Checks every invariant tying the four maps together, using `oracle` as ground truth.
	///
	/// Returns an empty list for a consistent cache.
	///
	/// # Errors
	///
	/// Fails if the oracle cannot compile or evaluate a registered pattern while strings are
	/// registered.
	pub fn consistency(
		&self,
		oracle: &mut ConsistencyOracle,
	) -> Result<Vec<Violation>, PatternError> {
		let t = self.tables();
		let mut out = Vec::new();

		if t.regexes.is_empty() || t.strings.is_empty() {
			if !t.queue_forward.is_empty() {
				out.push(Violation::QueueWithoutCorpus {
					side: QueueSide::Forward,
				});
			}
			if !t.queue_reverse.is_empty() {
				out.push(Violation::QueueWithoutCorpus {
					side: QueueSide::Reverse,
				});
			}
		}

		for r in t.regex_handles() {
			let regex = t.regex(r);
			let queued_strings = t.queue_reverse.get(&r);
			for s in t.string_handles() {
				let string = t.string(s);
				let in_rtm = regex.matches.contains(&s);
				let in_mtr = string.regexes.contains(&r);
				let pair = || (regex.pattern.to_string(), string.text.to_string());

				for (side, here, there) in [
					(IndexSide::RegexToMatch, in_rtm, in_mtr),
					(IndexSide::MatchToRegex, in_mtr, in_rtm),
				] {
					if here && !there {
						let (regex, string) = pair();
						out.push(Violation::OneSided {
							side,
							regex,
							string,
						});
					}
				}

				let truth = oracle.matches(&regex.pattern, &string.text)?;
				let queued = queued_strings.is_some_and(|q| q.contains(&s))
					&& t.queue_forward.get(&s).is_some_and(|q| q.contains(&r));

				for (side, present) in [
					(IndexSide::RegexToMatch, in_rtm),
					(IndexSide::MatchToRegex, in_mtr),
				] {
					if present && !truth {
						let (regex, string) = pair();
						out.push(Violation::FalseMatch {
							side,
							regex,
							string,
						});
					}
					if truth && !present && !queued {
						let (regex, string) = pair();
						out.push(Violation::MissingMatch {
							side,
							regex,
							string,
						});
					}
				}
			}
		}

		for (&s, regexes) in &t.queue_forward {
			let string = t.try_string(s);
			if string.is_none() {
				out.push(Violation::UnknownKey {
					side: QueueSide::Forward,
					key: string_text(t, s).into_owned(),
				});
			}
			if regexes.is_empty() {
				out.push(Violation::EmptyEntry {
					side: QueueSide::Forward,
					key: string_text(t, s).into_owned(),
				});
			}
			for &r in regexes {
				if !t.queue_reverse.get(&r).is_some_and(|q| q.contains(&s)) {
					out.push(Violation::Unmirrored {
						side: QueueSide::Forward,
						regex: regex_text(t, r).into_owned(),
						string: string_text(t, s).into_owned(),
					});
				}
				let confirmed = string.is_some_and(|e| e.regexes.contains(&r))
					|| t.try_regex(r).is_some_and(|e| e.matches.contains(&s));
				if confirmed {
					out.push(Violation::QueuedAndConfirmed {
						side: QueueSide::Forward,
						regex: regex_text(t, r).into_owned(),
						string: string_text(t, s).into_owned(),
					});
				}
			}
		}

		for (&r, strings) in &t.queue_reverse {
			let regex = t.try_regex(r);
			if regex.is_none() {
				out.push(Violation::UnknownKey {
					side: QueueSide::Reverse,
					key: regex_text(t, r).into_owned(),
				});
			}
			if strings.is_empty() {
				out.push(Violation::EmptyEntry {
					side: QueueSide::Reverse,
					key: regex_text(t, r).into_owned(),
				});
			}
			for &s in strings {
				if !t.queue_forward.get(&s).is_some_and(|q| q.contains(&r)) {
					out.push(Violation::Unmirrored {
						side: QueueSide::Reverse,
						regex: regex_text(t, r).into_owned(),
						string: string_text(t, s).into_owned(),
					});
				}
				let confirmed = regex.is_some_and(|e| e.matches.contains(&s))
					|| t.try_string(s).is_some_and(|e| e.regexes.contains(&r));
				if confirmed {
					out.push(Violation::QueuedAndConfirmed {
						side: QueueSide::Reverse,
						regex: regex_text(t, r).into_owned(),
						string: string_text(t, s).into_owned(),
					});
				}
			}
		}

		Ok(out)
	}

	/// [`RegexMatchCache::consistency`] with the cache's own engine as the oracle.
	pub fn check_consistency(&self) -> Result<Vec<Violation>, PatternError> {
		self.consistency(&mut ConsistencyOracle::new(Arc::clone(self.engine())))
	}

	/// Returns a [`fmt::Display`] rendering of all four maps.
	pub fn inspect(&self) -> InspectView<'_> {
		InspectView::new(self.tables())
	}
}
