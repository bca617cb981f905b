//! Proofs for the match cache invariant catalog.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use proptest::prelude::*;

use crate::testing::{MockEngine, cache_with, mock_cache, sorted, violations};
use crate::{RegexMatchCache, SharedRegexMatchCache, Timestamp};

/// Confirmed pairs stay mirrored across preparation and erasure of either side.
#[cfg_attr(test, test)]
pub(crate) fn test_confirmed_index_is_mirrored() {
	let mut cache = cache_with(&["ab", "abc", "b"]);
	for pattern in ["a.*", ".*b", "b"] {
		cache.prepare_to_find_matches(pattern).unwrap();
	}
	assert!(violations(&cache).is_empty());

	cache.erase_string("ab");
	assert!(violations(&cache).is_empty());
	cache.erase_regex("a.*");
	assert!(violations(&cache).is_empty());

	let t = cache.tables();
	for (_, entry) in &t.strings {
		for &r in &entry.regexes {
			assert!(t.regex(r).matches.contains(&t.string_id(&entry.text).unwrap()));
		}
	}
}

#[cfg_attr(test, test)]
pub(crate) fn test_pending_queue_is_mirrored() {
	let mut cache = RegexMatchCache::new();
	cache.add_regex("a");
	cache.add_string("a");
	cache.add_string("b");
	cache.add_regex("b");
	assert_eq!(cache.stats().pending_pairs, 4);
	assert!(violations(&cache).is_empty());

	cache.prepare_to_find_matches("a").unwrap();
	assert_eq!(cache.stats().pending_pairs, 2);
	assert!(violations(&cache).is_empty());

	cache.erase_string("a");
	cache.prepare_to_find_matches("b").unwrap();
	let t = cache.tables();
	assert!(t.queue_forward.is_empty());
	assert!(t.queue_reverse.is_empty());
}

#[cfg_attr(test, test)]
pub(crate) fn test_prepared_matches_equal_uncached() {
	let mut cache = cache_with(&["", "a", "aa", "ab", "ba", "b"]);
	for pattern in ["a*", "a+b?", "[ab]", ".*a", "x"] {
		cache.prepare_to_find_matches(pattern).unwrap();
		assert_eq!(
			sorted(cache.find_matches(pattern, Timestamp::ZERO)),
			sorted(cache.find_matches_uncached(pattern).unwrap()),
			"{pattern}"
		);
	}
}

#[cfg_attr(test, test)]
pub(crate) fn test_registration_is_lazy() {
	let (mut cache, engine) = mock_cache(MockEngine::default());
	for i in 0..20 {
		cache.add_string(&format!("s{i}"));
		cache.add_regex(&format!("s{i}.*"));
	}
	assert_eq!(engine.compiles(), 0);
	assert_eq!(engine.evaluations(), 0);
	assert_eq!(cache.stats().pending_pairs, 400);
}

#[cfg_attr(test, test)]
pub(crate) fn test_prepare_evaluates_only_pending() {
	let (mut cache, engine) = mock_cache(MockEngine::default());
	for i in 0..10 {
		cache.add_string(&format!("s{i}"));
	}
	cache.prepare_to_find_matches("s1.*").unwrap();
	assert_eq!(engine.evaluations(), 10);

	cache.add_string("s10");
	cache.add_string("s11");
	cache.prepare_to_find_matches("s1.*").unwrap();
	assert_eq!(engine.evaluations(), 12);
	assert_eq!(
		sorted(cache.find_matches("s1.*", Timestamp::ZERO)),
		["s1", "s10", "s11"]
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_access_stamp_is_monotonic() {
	let mut cache = cache_with(&["x"]);
	cache.prepare_to_find_matches("x").unwrap();
	let shared = Arc::new(SharedRegexMatchCache::new(cache));

	let handles: Vec<_> = (0..4u64)
		.map(|worker| {
			let shared = Arc::clone(&shared);
			std::thread::spawn(move || {
				for step in (0..100u64).rev() {
					shared
						.find_matches("x", Timestamp::from_nanos(step * 4 + worker))
						.unwrap();
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}

	assert_eq!(
		shared.read().last_access("x"),
		Some(Timestamp::from_nanos(99 * 4 + 3))
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_failed_prepare_leaves_safe_state() {
	let (mut cache, _engine) = mock_cache(MockEngine::panicking_on("boom"));
	for s in ["a", "b", "c"] {
		cache.add_string(s);
	}
	cache.prepare_to_find_matches("[ab]").unwrap();
	cache.add_regex("c");
	cache.add_string("boom");

	let result = catch_unwind(AssertUnwindSafe(|| cache.prepare_to_find_matches("c")));
	assert!(result.is_err());
	assert!(violations(&cache).is_empty());

	// Everything dropped is rebuilt on demand.
	cache.erase_string("boom");
	cache.prepare_to_find_matches("[ab]").unwrap();
	assert_eq!(sorted(cache.find_matches("[ab]", Timestamp::ZERO)), ["a", "b"]);
}

#[cfg_attr(test, test)]
pub(crate) fn test_purge_removes_exactly_expired() {
	let mut cache = cache_with(&["x"]);
	for (i, pattern) in ["x", "x?", "x*", "x+"].into_iter().enumerate() {
		cache.prepare_to_find_matches(pattern).unwrap();
		cache.find_matches(pattern, Timestamp::from_nanos(10 * i as u64));
	}

	assert_eq!(cache.purge(Timestamp::from_nanos(15)), 2);
	assert_eq!(sorted(cache.regex_list()), ["x*", "x+"]);
	assert_eq!(cache.purge(Timestamp::from_nanos(15)), 0);
}

const PATTERNS: &[&str] = &["a.*", ".*b", "ab?", "[ab]+", "c", "(a|c)b*"];
const STRINGS: &[&str] = &["", "a", "ab", "b", "abc", "cb", "c", "aab"];

#[derive(Debug, Clone)]
enum Op {
	AddRegex(usize),
	EraseRegex(usize),
	AddString(usize),
	EraseString(usize),
	Prepare(usize),
	Query(usize, u64),
	Purge(u64),
}

fn arb_op() -> impl Strategy<Value = Op> {
	let p = 0..PATTERNS.len();
	let s = 0..STRINGS.len();
	prop_oneof![
		1 => p.clone().prop_map(Op::AddRegex),
		1 => p.clone().prop_map(Op::EraseRegex),
		2 => s.clone().prop_map(Op::AddString),
		1 => s.prop_map(Op::EraseString),
		3 => p.clone().prop_map(Op::Prepare),
		2 => (p, 1..100u64).prop_map(|(i, at)| Op::Query(i, at)),
		1 => (0..100u64).prop_map(Op::Purge),
	]
}

proptest! {
	/// Arbitrary operation sequences keep the four maps consistent, and every ready pattern
	/// answers exactly what a fresh scan would.
	#[test]
	fn test_random_operations_stay_consistent(ops in prop::collection::vec(arb_op(), 1..60)) {
		let mut cache = RegexMatchCache::new();

		for op in ops {
			match op {
				Op::AddRegex(i) => {
					cache.add_regex(PATTERNS[i]);
				}
				Op::EraseRegex(i) => {
					cache.erase_regex(PATTERNS[i]);
				}
				Op::AddString(i) => {
					cache.add_string(STRINGS[i]);
				}
				Op::EraseString(i) => {
					cache.erase_string(STRINGS[i]);
				}
				Op::Prepare(i) => {
					cache.prepare_to_find_matches(PATTERNS[i]).unwrap();
					prop_assert!(cache.is_ready_to_find_matches(PATTERNS[i]));
				}
				Op::Query(i, at) => {
					let pattern = PATTERNS[i];
					if let Ok(found) = cache.try_find_matches(pattern, Timestamp::from_nanos(at)) {
						prop_assert_eq!(
							sorted(found),
							sorted(cache.find_matches_uncached(pattern).unwrap())
						);
						prop_assert!(cache.last_access(pattern) >= Some(Timestamp::from_nanos(at)));
					}
				}
				Op::Purge(at) => {
					let expiry = Timestamp::from_nanos(at);
					cache.purge(expiry);
					for pattern in cache.regex_list() {
						prop_assert!(cache.last_access(pattern) > Some(expiry));
					}
				}
			}

			let found = violations(&cache);
			prop_assert!(found.is_empty(), "{:?}", found);
		}
	}
}
