//! Machine-checkable invariant catalog and proof entrypoints for the match cache.
#![allow(dead_code)]

pub(crate) mod catalog;

#[allow(unused_imports)]
pub(crate) use catalog::{
	ACCESS_STAMP_IS_MONOTONIC, CONFIRMED_AND_PENDING_ARE_DISJOINT, CONFIRMED_INDEX_IS_MIRRORED,
	FAILED_MUTATION_LEAVES_SAFE_STATE, PENDING_QUEUE_IS_MIRRORED, PREPARE_EVALUATES_ONLY_PENDING,
	PURGE_REMOVES_EXACTLY_EXPIRED, READY_MEANS_COMPLETE, REGISTRATION_IS_LAZY,
};

#[cfg(doc)]
pub(crate) fn test_confirmed_index_is_mirrored() {}

#[cfg(doc)]
pub(crate) fn test_pending_queue_is_mirrored() {}

#[cfg(doc)]
pub(crate) fn test_prepared_matches_equal_uncached() {}

#[cfg(doc)]
pub(crate) fn test_registration_is_lazy() {}

#[cfg(doc)]
pub(crate) fn test_prepare_evaluates_only_pending() {}

#[cfg(doc)]
pub(crate) fn test_access_stamp_is_monotonic() {}

#[cfg(doc)]
pub(crate) fn test_failed_prepare_leaves_safe_state() {}

#[cfg(doc)]
pub(crate) fn test_purge_removes_exactly_expired() {}

#[cfg(doc)]
pub(crate) fn test_random_operations_stay_consistent() {}

#[cfg(test)]
mod proofs;

#[cfg(test)]
#[allow(unused_imports)]
pub(crate) use proofs::{
	test_access_stamp_is_monotonic, test_confirmed_index_is_mirrored,
	test_failed_prepare_leaves_safe_state, test_pending_queue_is_mirrored,
	test_prepare_evaluates_only_pending, test_prepared_matches_equal_uncached,
	test_purge_removes_exactly_expired, test_registration_is_lazy,
};
