use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Caller-supplied point in time, in nanoseconds from an origin the caller chooses.
///
/// The cache never reads a clock. Every recency decision is made against values the caller
/// passes in, so eviction is deterministic under test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
	/// Access time of a regex that has never been queried.
	pub const ZERO: Self = Self(0);
	pub const MAX: Self = Self(u64::MAX);

	pub const fn from_nanos(nanos: u64) -> Self {
		Self(nanos)
	}

	pub const fn as_nanos(self) -> u64 {
		self.0
	}

	/// Time elapsed from `origin` to `now`, saturating at both ends.
	pub fn since(origin: Instant, now: Instant) -> Self {
		let nanos = now.saturating_duration_since(origin).as_nanos();
		Self(u64::try_from(nanos).unwrap_or(u64::MAX))
	}

	pub fn saturating_sub(self, by: Duration) -> Self {
		let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
		Self(self.0.saturating_sub(by))
	}

	pub fn saturating_add(self, by: Duration) -> Self {
		let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
		Self(self.0.saturating_add(by))
	}
}

/// Last-access stamp shared by concurrent readers.
///
/// Updates are a relaxed max-merge: a racing earlier stamp never overwrites a later one, and
/// no exclusive access is needed.
#[derive(Debug, Default)]
pub(crate) struct AccessStamp(AtomicU64);

impl AccessStamp {
	pub(crate) fn load(&self) -> Timestamp {
		Timestamp(self.0.load(Ordering::Relaxed))
	}

	pub(crate) fn bump(&self, now: Timestamp) {
		self.0.fetch_max(now.0, Ordering::Relaxed);
	}
}
