//! Invariant catalog for [`crate::RegexMatchCache`].
#![allow(dead_code)]

/// Must record every confirmed pair in both directions of the index, or in neither.
///
/// - Enforced in: `Tables::confirm`, `Tables::remove_regex`, `Tables::remove_string`
/// - Tested by: [`crate::invariants::test_confirmed_index_is_mirrored`]
/// - Failure symptom: A string is returned for a pattern that erasing the string should have
///   cleaned up, or a stale handle is dereferenced after slab reuse.
pub(crate) const CONFIRMED_INDEX_IS_MIRRORED: () = ();

/// Must record every pending pair in both queue directions, and must never keep an empty
/// queue entry.
///
/// - Enforced in: `Tables::enqueue_regex`, `Tables::enqueue_string`, `Tables::unqueue_forward`,
///   `Tables::unqueue_reverse`
/// - Tested by: [`crate::invariants::test_pending_queue_is_mirrored`]
/// - Failure symptom: [`crate::RegexMatchCache::is_ready_to_find_matches`] stays false forever
///   for a pattern, or a pending string is never evaluated.
pub(crate) const PENDING_QUEUE_IS_MIRRORED: () = ();

/// Must not hold a pair as both confirmed and pending.
///
/// - Enforced in: [`crate::RegexMatchCache::prepare_to_find_matches`]
/// - Tested by: [`crate::invariants::test_random_operations_stay_consistent`]
/// - Failure symptom: A pair is evaluated twice, and a true match may be dropped when the
///   duplicate evaluation fails.
pub(crate) const CONFIRMED_AND_PENDING_ARE_DISJOINT: () = ();

/// Must return exactly the registered strings the pattern matches once it is ready.
///
/// - Enforced in: [`crate::RegexMatchCache::prepare_to_find_matches`]
/// - Tested by: [`crate::invariants::test_prepared_matches_equal_uncached`],
///   [`crate::invariants::test_random_operations_stay_consistent`]
/// - Failure symptom: Cached lookups silently disagree with a fresh scan of the corpus.
pub(crate) const READY_MEANS_COMPLETE: () = ();

/// Must not compile or evaluate any pattern while registering regexes or strings.
///
/// - Enforced in: [`crate::RegexMatchCache::add_regex`], [`crate::RegexMatchCache::add_string`]
/// - Tested by: [`crate::invariants::test_registration_is_lazy`]
/// - Failure symptom: Adding strings costs a full pass over every pattern.
pub(crate) const REGISTRATION_IS_LAZY: () = ();

/// Must evaluate a known pattern only against its pending strings.
///
/// - Enforced in: [`crate::RegexMatchCache::prepare_to_find_matches`]
/// - Tested by: [`crate::invariants::test_prepare_evaluates_only_pending`]
/// - Failure symptom: Each new string triggers re-evaluation of the whole corpus.
pub(crate) const PREPARE_EVALUATES_ONLY_PENDING: () = ();

/// Must never move a regex's last-access stamp backwards, including under concurrent queries.
///
/// - Enforced in: `AccessStamp::bump`
/// - Tested by: [`crate::invariants::test_access_stamp_is_monotonic`]
/// - Failure symptom: A hot pattern is purged because a slow reader stored an older timestamp.
pub(crate) const ACCESS_STAMP_IS_MONOTONIC: () = ();

/// Must leave the cache consistent when a mutation fails or panics part way.
///
/// - Enforced in: `RepairGuard`
/// - Tested by: [`crate::invariants::test_failed_prepare_leaves_safe_state`]
/// - Failure symptom: Half-applied preparation leaves pairs neither confirmed nor pending,
///   and they are never evaluated.
pub(crate) const FAILED_MUTATION_LEAVES_SAFE_STATE: () = ();

/// Must erase exactly the regexes last accessed at or before the threshold.
///
/// - Enforced in: [`crate::RegexMatchCache::purge`]
/// - Tested by: [`crate::invariants::test_purge_removes_exactly_expired`]
/// - Failure symptom: Recently used patterns are recompiled, or stale ones accumulate.
pub(crate) const PURGE_REMOVES_EXACTLY_EXPIRED: () = ();
